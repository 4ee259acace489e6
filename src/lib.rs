//! # ndrtext
//!
//! Renders decoded NDR interface descriptions (complex types and procedure
//! signatures) into C-like text while recording the span of every reference
//! to a named entity, so viewers can hyperlink the output without parsing it
//! again.

pub mod error;
pub mod parser;
pub mod renderer;
pub mod transport;

pub use error::RenderError;
pub use parser::*;
pub use renderer::*;

#[cfg(test)]
mod tests;
