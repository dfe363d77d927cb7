use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use remora::types::BenchmarkParams;
use remora::{Session, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "remora", about = "Query a UCI chess engine from the command line")]
struct Args {
    /// Path to the engine binary
    #[arg(long, default_value = "stockfish")]
    engine: PathBuf,

    /// Search depth for depth-limited queries
    #[arg(long, default_value_t = 15)]
    depth: u32,

    /// FEN of the position to query (defaults to the initial position)
    #[arg(long)]
    fen: Option<String>,

    /// Moves to replay after setting the position
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,

    /// Report evaluations relative to white instead of the side to move
    #[arg(long)]
    white_perspective: bool,

    /// Echo the raw protocol traffic to the logger at info level
    #[arg(long)]
    debug_view: bool,

    #[command(subcommand)]
    query: Query,
}

#[derive(Subcommand, Debug)]
enum Query {
    /// Best move in the position
    Bestmove {
        /// Search for a fixed time (ms) instead of the configured depth
        #[arg(long)]
        movetime: Option<u64>,
    },
    /// Search evaluation of the position
    Eval,
    /// Top N moves by MultiPV
    Top {
        #[arg(short, default_value_t = 5)]
        n: usize,
        #[arg(long)]
        verbose: bool,
    },
    /// Perft leaf counts per move
    Perft { depth: u32 },
    /// ASCII board
    Board {
        #[arg(long)]
        black: bool,
    },
    /// FEN as the engine holds it
    Fen,
    /// Run the engine's bench command
    Bench,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SessionConfig {
        depth: args.depth,
        turn_perspective: !args.white_perspective,
        debug_view: args.debug_view,
        ..SessionConfig::default()
    };
    let mut session = Session::spawn(&args.engine, config)
        .with_context(|| format!("failed to start engine {}", args.engine.display()))?;

    if let Some(fen) = &args.fen {
        session.set_fen_position(fen, true)?;
    }
    if !args.moves.is_empty() {
        let moves: Vec<&str> = args.moves.iter().map(String::as_str).collect();
        session.make_moves(&moves)?;
    }

    match args.query {
        Query::Bestmove { movetime } => {
            let mv = match movetime {
                Some(ms) => session.get_best_move_time(ms)?,
                None => session.get_best_move(None, None)?,
            };
            match mv {
                Some(mv) => println!("{}", mv),
                None => println!("(none)"),
            }
        }
        Query::Eval => {
            let eval = session.get_evaluation(None)?;
            println!("{}", serde_json::to_string(&eval)?);
        }
        Query::Top { n, verbose } => {
            let moves = session.get_top_moves(n, verbose, None)?;
            println!("{}", serde_json::to_string_pretty(&moves)?);
        }
        Query::Perft { depth } => {
            let perft = session.get_perft(depth)?;
            println!("{}", serde_json::to_string_pretty(&perft)?);
        }
        Query::Board { black } => {
            print!("{}", session.get_board_visual(!black)?);
        }
        Query::Fen => {
            println!("{}", session.get_fen_position()?);
        }
        Query::Bench => {
            println!("{}", session.benchmark(BenchmarkParams::default())?);
        }
    }

    Ok(())
}
