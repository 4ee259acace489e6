use thiserror::Error;

/// Errors raised while building tagged text.
#[derive(Debug, Error)]
pub enum RenderError {
    /// `pop_indent` was called with nothing left on the indent stack.
    #[error("indent stack underflow: pop_indent called with no indent pushed")]
    IndentUnderflow,

    /// A tag was requested for an entity whose name is empty.
    #[error("cannot tag an entity with an empty name")]
    EmptyEntityName,

    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}
