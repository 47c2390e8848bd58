mod config;
mod executor;

pub use config::RuntimeConfig;
pub use executor::{Execution, Runtime};

use std::io;
use thiserror::Error;

/// Errors that can occur while loading a program into the runtime.
///
/// Execution faults are deliberately not part of this taxonomy: a fault is
/// data about a finished execution (see [`Execution`]), and the calling
/// shell decides how to report it.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("bytecode parsing error: {0}")]
    ParsingError(#[from] crate::bytecode::ParseError),
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
