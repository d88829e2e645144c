//! Error types
//!
//! The simulation itself never fails; everything here comes from the
//! collaborators around it (terminal, score log file, settings file).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    /// A resource needed before the loop starts could not be acquired
    #[error("couldn't acquire {resource}: {source}")]
    ResourceInit {
        resource: String,
        #[source]
        source: io::Error,
    },

    #[error("render failed: {0}")]
    Render(#[source] io::Error),

    #[error("input polling failed: {0}")]
    Input(#[source] io::Error),

    #[error("score log {path}: {source}")]
    ScoreLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't parse settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl GameError {
    pub fn resource_init(resource: impl Into<String>, source: io::Error) -> Self {
        Self::ResourceInit {
            resource: resource.into(),
            source,
        }
    }
}
