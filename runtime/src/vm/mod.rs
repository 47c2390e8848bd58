mod error;
mod machine;

pub use error::{Fault, VMResult};
pub use machine::{Machine, STACK_CAPACITY};
