pub mod coin_flip;
pub mod config;
pub mod display;
pub mod r#loop; // `loop` is reserved keyword, need to escape with `r#`
pub mod session;

pub use config::{ConfigError, GameConfig, GameKind};
pub use session::{new_session, Markers, Session, SessionError, TurnOutcome};
