mod common;

use common::{sent_index, ScriptedEngine};
use remora::params::ParamValue;
use remora::types::{Capture, EvalKind, Piece, Wdl};
use remora::{EngineError, Session, SessionConfig, STARTPOS_FEN};

const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
const AFTER_E4_H5: &str = "rnbqkbnr/ppppppp1/8/7p/4P3/8/PPPP1PPP/RNBQKBNR w KQkq h6 0 2";

fn session(engine: ScriptedEngine) -> Session<ScriptedEngine> {
    Session::over(engine, SessionConfig::default()).expect("handshake should succeed")
}

#[test]
fn construction_handshake() {
    let s = session(ScriptedEngine::new());
    assert_eq!(s.version().major, 16);
    assert_eq!(s.version().minor, 0);
    assert!(!s.version().is_dev_build);
    assert!(!s.has_wdl_option());
    assert_eq!(s.parameters().len(), 14);
    assert_eq!(s.parameters()["MultiPV"], ParamValue::Int(1));
    assert_eq!(s.parameters()["Skill Level"], ParamValue::Int(20));

    let sent = &s.channel().sent;
    assert_eq!(sent[0], "uci");
    assert!(sent.iter().any(|l| l == "ucinewgame"));
    // Default batch still ends with Threads then Hash, in that order.
    let threads = sent_index(sent, 0, "setoption name Threads value 1").unwrap();
    let hash = sent_index(sent, 0, "setoption name Hash value 16").unwrap();
    assert!(threads < hash);
}

#[test]
fn wdl_capability_probed_once_and_enabled() {
    let s = session(ScriptedEngine::with_wdl());
    assert!(s.has_wdl_option());
    let sent = &s.channel().sent;
    assert_eq!(sent.iter().filter(|l| l.as_str() == "uci").count(), 1);
    assert!(sent.iter().any(|l| l == "setoption name UCI_ShowWDL value true"));
    // The capability toggle is not caller configuration.
    assert!(!s.parameters().contains_key("UCI_ShowWDL"));
}

#[test]
fn skill_level_clears_the_rating_flag() {
    let mut s = session(ScriptedEngine::new());
    let mark = s.channel().sent.len();
    s.update_parameters([("Skill Level", ParamValue::Int(10))]).unwrap();
    assert_eq!(s.parameters()["Skill Level"], ParamValue::Int(10));
    assert_eq!(s.parameters()["UCI_LimitStrength"], ParamValue::Bool(false));
    let sent = &s.channel().sent;
    assert!(sent_index(sent, mark, "setoption name UCI_LimitStrength value false").is_some());
}

#[test]
fn elo_rating_sets_the_rating_flag() {
    let mut s = session(ScriptedEngine::new());
    s.update_parameters([("UCI_Elo", ParamValue::Int(2000))]).unwrap();
    assert_eq!(s.parameters()["UCI_Elo"], ParamValue::Int(2000));
    assert_eq!(s.parameters()["UCI_LimitStrength"], ParamValue::Bool(true));
}

#[test]
fn explicit_strength_flag_wins_over_the_auto_toggle() {
    let mut s = session(ScriptedEngine::new());
    let mark = s.channel().sent.len();
    s.update_parameters([
        ("UCI_Elo", ParamValue::Int(1500)),
        ("UCI_LimitStrength", ParamValue::Bool(false)),
    ])
    .unwrap();
    assert_eq!(s.parameters()["UCI_LimitStrength"], ParamValue::Bool(false));
    let toggles = s.channel().sent[mark..]
        .iter()
        .filter(|l| l.starts_with("setoption name UCI_LimitStrength"))
        .count();
    assert_eq!(toggles, 1, "only the explicit flag value may be sent");
}

#[test]
fn threads_before_hash_with_one_barrier_and_a_position_refresh() {
    let mut s = session(ScriptedEngine::new());
    let mark = s.channel().sent.len();
    s.update_parameters([("Hash", ParamValue::Int(64)), ("Threads", ParamValue::Int(4))])
        .unwrap();
    let sent = &s.channel().sent;
    let threads = sent_index(sent, mark, "setoption name Threads value 4").unwrap();
    let hash = sent_index(sent, mark, "setoption name Hash value 64").unwrap();
    assert!(threads < hash, "Threads must be applied strictly before Hash");

    let tail = &sent[mark..];
    let barriers = tail.iter().filter(|l| l.as_str() == "isready").count();
    assert_eq!(barriers, 2, "one post-batch barrier plus the position refresh");
    let barrier = sent_index(sent, hash, "isready").unwrap();
    let refresh = tail
        .iter()
        .position(|l| l.starts_with("position fen"))
        .map(|i| i + mark)
        .unwrap();
    assert!(barrier < refresh, "options settle before the position is resent");
    assert!(sent[refresh].starts_with(&format!("position fen {}", STARTPOS_FEN)));
}

#[test]
fn hash_is_resent_when_only_threads_changes() {
    let mut s = session(ScriptedEngine::new());
    let mark = s.channel().sent.len();
    s.update_parameters([("Threads", ParamValue::Int(2))]).unwrap();
    let sent = &s.channel().sent;
    let threads = sent_index(sent, mark, "setoption name Threads value 2").unwrap();
    let hash = sent_index(sent, mark, "setoption name Hash value 16").unwrap();
    assert!(threads < hash);
}

#[test]
fn unknown_parameter_leaves_state_untouched() {
    let mut s = session(ScriptedEngine::new());
    let before = s.parameters().clone();
    let mark = s.channel().sent.len();
    let err = s
        .update_parameters([("Fingers", ParamValue::Int(11))])
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownParameter(_)));
    assert_eq!(s.parameters(), &before);
    assert_eq!(s.channel().sent.len(), mark, "nothing may reach the engine");
}

#[test]
fn invalid_value_in_a_batch_aborts_the_whole_batch() {
    let mut s = session(ScriptedEngine::new());
    let mark = s.channel().sent.len();
    let err = s
        .update_parameters([
            ("MultiPV", ParamValue::Int(3)),
            ("Threads", ParamValue::Int(0)),
        ])
        .unwrap_err();
    assert!(matches!(err, EngineError::OutOfRange { .. }));
    assert_eq!(s.parameters()["MultiPV"], ParamValue::Int(1));
    assert_eq!(s.channel().sent.len(), mark);
}

#[test]
fn best_move_records_diagnostics() {
    let mut engine = ScriptedEngine::new();
    engine.allow_move(STARTPOS_FEN, "e2e4", AFTER_E4);
    let mut s = session(engine);
    let mv = s.get_best_move(None, None).unwrap();
    assert_eq!(mv.as_deref(), Some("e2e4"));
    assert!(s.info().contains("depth 15"), "info was: {}", s.info());
    // The search must not have moved the engine's position.
    assert_eq!(s.get_fen_position().unwrap(), STARTPOS_FEN);
}

#[test]
fn best_move_by_clocks_issues_a_clock_search() {
    let mut s = session(ScriptedEngine::new());
    let mark = s.channel().sent.len();
    s.get_best_move(Some(60_000), Some(30_000)).unwrap();
    assert!(sent_index(&s.channel().sent, mark, "go wtime 60000 btime 30000").is_some());
}

#[test]
fn terminal_position_has_no_best_move() {
    let mut engine = ScriptedEngine::new();
    // Once for the best-move search, once for the evaluation search.
    engine.stage_go(&["info depth 0 score mate 0", "bestmove (none)"]);
    engine.stage_go(&["info depth 0 score mate 0", "bestmove (none)"]);
    let mut s = session(engine);
    assert_eq!(s.get_best_move(None, None).unwrap(), None);
    let eval = s.get_evaluation(None).unwrap();
    assert_eq!(eval.kind, EvalKind::Mate);
    assert_eq!(eval.value, 0);
}

#[test]
fn legality_check_restores_diagnostics() {
    let mut engine = ScriptedEngine::new();
    engine.allow_move(STARTPOS_FEN, "e2e4", AFTER_E4);
    let mut s = session(engine);
    s.get_best_move(None, None).unwrap();
    let info = s.info().to_string();
    assert!(!info.is_empty());

    assert!(s.is_move_legal("e2e4").unwrap());
    assert!(!s.is_move_legal("e2e5").unwrap());
    assert_eq!(s.info(), info, "legality probes must not disturb diagnostics");
}

#[test]
fn make_moves_is_all_or_nothing() {
    let mut engine = ScriptedEngine::new();
    engine.allow_move(STARTPOS_FEN, "e2e4", AFTER_E4);
    engine.allow_move(AFTER_E4, "h7h5", AFTER_E4_H5);
    let mut s = session(engine);

    // A batch with an illegal tail rolls everything back.
    let err = s.make_moves(&["e2e4", "a1a5"]).unwrap_err();
    assert!(matches!(err, EngineError::IllegalMove(mv) if mv == "a1a5"));
    assert_eq!(s.get_fen_position().unwrap(), STARTPOS_FEN);

    // An empty batch sends nothing at all.
    let mark = s.channel().sent.len();
    s.make_moves(&[]).unwrap();
    assert_eq!(s.channel().sent.len(), mark);

    // The legal batch lands.
    s.make_moves(&["e2e4", "h7h5"]).unwrap();
    assert_eq!(s.get_fen_position().unwrap(), AFTER_E4_H5);
}

#[test]
fn set_startpos_replays_moves() {
    let mut engine = ScriptedEngine::new();
    engine.allow_move(STARTPOS_FEN, "e2e4", AFTER_E4);
    let mut s = session(engine);
    s.set_startpos(&["e2e4"]).unwrap();
    assert_eq!(s.get_fen_position().unwrap(), AFTER_E4);
}

#[test]
fn top_moves_restore_multipv_and_node_budget() {
    let mut engine = ScriptedEngine::new();
    engine.stage_go(&[
        "info depth 15 seldepth 20 multipv 1 score cp 30 nodes 2000 nps 60000 time 33 pv e2e4 e7e5",
        "info depth 15 seldepth 19 multipv 2 score cp 25 nodes 2000 nps 60000 time 33 pv d2d4",
        "bestmove e2e4",
    ]);
    let mut s = session(engine);
    let moves = s.get_top_moves(2, false, None).unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].mv, "e2e4");

    assert_eq!(s.parameters()["MultiPV"], ParamValue::Int(1));
    assert_eq!(s.num_nodes(), 1_000_000);
    let sent = &s.channel().sent;
    let raise = sent_index(sent, 0, "setoption name MultiPV value 2").unwrap();
    let restore = sent_index(sent, raise, "setoption name MultiPV value 1").unwrap();
    assert!(raise < restore);
}

#[test]
fn top_moves_restore_on_early_exhaustion() {
    let mut engine = ScriptedEngine::new();
    // Only one legal move despite five being requested.
    engine.stage_go(&[
        "info depth 15 multipv 1 score cp 5 nodes 900 pv g8f6",
        "bestmove g8f6",
    ]);
    let mut s = session(engine);
    let moves = s.get_top_moves(5, false, None).unwrap();
    assert_eq!(moves.len(), 1);
    assert_eq!(s.parameters()["MultiPV"], ParamValue::Int(1));
}

#[test]
fn top_moves_with_node_override() {
    let mut engine = ScriptedEngine::new();
    engine.stage_go(&[
        "info depth 12 multipv 1 score cp 20 nodes 600000 pv e2e4",
        "bestmove e2e4",
    ]);
    let mut s = session(engine);
    let moves = s.get_top_moves(1, false, Some(500_000)).unwrap();
    assert_eq!(moves.len(), 1);
    assert!(sent_index(&s.channel().sent, 0, "go nodes 500000").is_some());
    assert_eq!(s.num_nodes(), 1_000_000, "node budget must be restored");
}

#[test]
fn evaluation_respects_white_perspective() {
    let mut engine = ScriptedEngine::new();
    engine.stage_go(&[
        "info depth 15 multipv 1 score cp 30 nodes 100 pv h7h5",
        "bestmove h7h5",
    ]);
    let mut s = Session::over(
        engine,
        SessionConfig {
            turn_perspective: false,
            ..SessionConfig::default()
        },
    )
    .unwrap();
    s.set_fen_position(AFTER_E4, true).unwrap();
    let eval = s.get_evaluation(None).unwrap();
    assert_eq!(eval.value, -30, "black-to-move score must flip for white perspective");
}

#[test]
fn wdl_stats_require_the_capability() {
    let mut s = session(ScriptedEngine::new());
    assert!(matches!(s.get_wdl_stats(), Err(EngineError::WdlUnsupported)));

    let mut engine = ScriptedEngine::with_wdl();
    engine.stage_go(&[
        "info depth 15 multipv 1 score cp 20 wdl 250 600 150 nodes 100 pv e2e4",
        "bestmove e2e4",
    ]);
    let mut s = session(engine);
    assert_eq!(
        s.get_wdl_stats().unwrap(),
        Some(Wdl { win: 250, draw: 600, loss: 150 })
    );
}

#[test]
fn perft_via_session() {
    let mut engine = ScriptedEngine::new();
    engine.stage_perft(&["a2a3: 1", "b2b3: 1", "Nodes searched: 2", ""]);
    let mut s = session(engine);
    let perft = s.get_perft(1).unwrap();
    assert_eq!(perft.total, 2);
    assert_eq!(perft.moves["b2b3"], 1);

    assert!(matches!(
        s.get_perft(0),
        Err(EngineError::InvalidArgument(_))
    ));
}

#[test]
fn static_eval_via_session() {
    let mut engine = ScriptedEngine::new();
    engine.stage_eval(&["Final evaluation       +0.25 (white side)", ""]);
    let mut s = session(engine);
    assert_eq!(s.get_static_eval().unwrap(), Some(0.25));

    let mut engine = ScriptedEngine::new();
    engine.stage_eval(&["Final evaluation: none (in check)"]);
    let mut s = session(engine);
    assert_eq!(s.get_static_eval().unwrap(), None);
}

#[test]
fn square_contents_and_board_views() {
    let mut s = session(ScriptedEngine::new());
    assert_eq!(s.get_what_is_on_square("e1").unwrap(), Some(Piece::WhiteKing));
    assert_eq!(s.get_what_is_on_square("e4").unwrap(), None);
    let white = s.get_board_visual(true).unwrap();
    assert!(white.contains("| r | n | b | q | k | b | n | r | 8"));
    let black = s.get_board_visual(false).unwrap();
    assert!(black.contains("| R | N | B | K | Q | B | N | R | 1"));
}

#[test]
fn capture_classification() {
    // Direct capture: white rook takes the a7 pawn.
    let rook_fen = "rnbqkbnr/pppppppp/8/8/8/8/1PPPPPPP/RNBQKBNR w KQkq - 0 4";
    let mut engine = ScriptedEngine::new();
    engine.allow_move(rook_fen, "a1a7", "unused");
    let mut s = session(engine);
    s.set_fen_position(rook_fen, true).unwrap();
    assert_eq!(s.will_move_be_a_capture("a1a7").unwrap(), Capture::Direct);

    // Quiet pawn push.
    let mut engine = ScriptedEngine::new();
    engine.allow_move(STARTPOS_FEN, "e2e4", AFTER_E4);
    let mut s = session(engine);
    assert_eq!(s.will_move_be_a_capture("e2e4").unwrap(), Capture::None);

    // En passant: black pawn on d4 takes on the e3 target square.
    let ep_fen = "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPP1PPPP/RNBQKBNR b KQkq e3 0 3";
    let mut engine = ScriptedEngine::new();
    engine.allow_move(ep_fen, "d4e3", "unused");
    let mut s = session(engine);
    s.set_fen_position(ep_fen, true).unwrap();
    assert_eq!(s.will_move_be_a_capture("d4e3").unwrap(), Capture::EnPassant);

    // Illegal candidate is an error, not a classification.
    let mut s = session(ScriptedEngine::new());
    assert!(matches!(
        s.will_move_be_a_capture("a1a8"),
        Err(EngineError::IllegalMove(_))
    ));
}

#[test]
fn chess960_castling_is_not_a_capture() {
    let castle_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQK2R w KQkq - 0 5";
    let mut engine = ScriptedEngine::new();
    engine.allow_move(castle_fen, "e1h1", "unused");
    let mut s = Session::over(
        engine,
        SessionConfig {
            parameters: vec![("UCI_Chess960".to_string(), ParamValue::Bool(true))],
            ..SessionConfig::default()
        },
    )
    .unwrap();
    s.set_fen_position(castle_fen, true).unwrap();
    assert_eq!(s.will_move_be_a_capture("e1h1").unwrap(), Capture::None);
}

#[test]
fn depth_and_node_budget_must_be_positive() {
    let mut s = session(ScriptedEngine::new());
    assert!(s.set_depth(0).is_err());
    assert!(s.set_num_nodes(0).is_err());
    s.set_depth(20).unwrap();
    assert_eq!(s.depth(), 20);
    s.set_num_nodes(5).unwrap();
    assert_eq!(s.num_nodes(), 5);

    assert!(Session::over(
        ScriptedEngine::new(),
        SessionConfig {
            depth: 0,
            ..SessionConfig::default()
        }
    )
    .is_err());
}

#[test]
fn quit_is_idempotent_and_drops_later_commands() {
    let mut s = session(ScriptedEngine::new());
    s.quit();
    s.quit();
    let mark = s.channel().sent.len();
    // Further traffic is dropped silently by the channel.
    assert!(s.flip().is_ok());
    assert_eq!(s.channel().sent.len(), mark);
}
