//! Result persistence
//!
//! A plain append-only text log, one `"<timestamp> <score>"` line per won
//! game. Nothing else about a run is saved.

pub mod score_log;

pub use score_log::{FileScoreLog, MemoryScoreLog, ScoreLog, format_result, timestamp_now};
