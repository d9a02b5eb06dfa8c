//! Core module containing the shared building blocks of the engine

pub mod error;
pub mod messages;
pub mod validation;
pub mod value;

pub use error::{InputFilterError, Result};
pub use messages::{MessageTree, Messages, violation};
pub use value::is_empty_value;
