//! Core types and schemas for the newswire analysis engine.

pub mod analysis;
pub mod article;
pub mod error;
pub mod stream;

pub use analysis::*;
pub use article::*;
pub use error::{Error, Result};
pub use stream::*;
