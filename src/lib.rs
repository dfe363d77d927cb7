pub mod channel;
pub mod error;
pub mod fen;
pub mod params;
pub mod parse;
pub mod session;
pub mod types;
pub mod version;

pub use channel::{Channel, EngineProcess};
pub use error::{EngineError, Result};
pub use session::{Session, SessionConfig, STARTPOS_FEN};
