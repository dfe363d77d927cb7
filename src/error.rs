use thiserror::Error;

/// Errors surfaced by a UCI session.
///
/// `ChannelBroken` and `EngineCrashed` are fatal to the session: once the
/// process is gone its state is unknowable, so callers must build a new
/// session rather than retry. The parameter-validation variants are plain
/// caller errors and leave session state untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine stdin pipe is closed")]
    ChannelBroken,

    #[error("the engine process has crashed")]
    EngineCrashed,

    #[error("'{0}' is not a supported engine parameter")]
    UnknownParameter(String),

    #[error("'{name}' expects a {expected} value, got {got}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("'{name}' value {value} is outside {min}..={max}")]
    OutOfRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("no engine release precedes build date {0}")]
    VersionResolution(String),

    #[error("cannot make move: {0}")]
    IllegalMove(String),

    #[error("this engine build has no UCI_ShowWDL option")]
    WdlUnsupported,

    #[error("malformed engine output: {0}")]
    Protocol(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
