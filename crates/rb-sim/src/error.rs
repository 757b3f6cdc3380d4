use std::io;

use rb_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("failed to spawn {worker} thread: {source}")]
    Spawn {
        worker: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{worker} thread panicked: {message}")]
    WorkerPanicked {
        worker:  String,
        message: String,
    },
}

pub type SimResult<T> = Result<T, SimError>;
