pub mod cli;
pub mod codegen;
pub mod error;
pub mod lexer;

pub use codegen::translate;
pub use error::{AsmError, AsmErrorKind};
