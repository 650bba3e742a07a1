pub mod play;
pub mod replay;

pub use play::PlayMode;
pub use replay::{ReplayMode, ReplaySummary, parse_script};
