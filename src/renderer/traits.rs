use serde::Serialize;

use crate::error::RenderError;
use crate::renderer::builder::TaggedTextBuilder;

/// Configuration context for rendering operations
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub indent_width: usize,
    pub show_offsets: bool,
    pub show_proc_numbers: bool,
    pub format: OutputFormat,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            indent_width: 4,
            show_offsets: true,
            show_proc_numbers: false,
            format: OutputFormat::Text,
        }
    }

    pub fn with_indent_width(&self, indent_width: usize) -> Self {
        Self {
            indent_width,
            ..self.clone()
        }
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Output format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// Text plus the tag list, as a JSON document.
    Json,
}

/// What kind of item a tag points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Interface,
    Structure,
    Union,
    Member,
    Procedure,
    Parameter,
    TypeReference,
    Unknown,
}

/// Anything that can be referenced by name in rendered text.
///
/// The name must be non-empty and must not change while a tag refers to it.
#[cfg_attr(test, mockall::automock)]
pub trait NamedEntity {
    fn name(&self) -> &str;

    fn kind(&self) -> EntityKind {
        EntityKind::Unknown
    }
}

/// One step of a type's indirection chain.
pub enum Indirection<'a, T: ?Sized> {
    /// The type is a pointer to another type.
    Pointer(&'a T),
    /// The type is terminal. Carries the entity to tag, if the type has a name.
    Terminal(Option<&'a dyn NamedEntity>),
}

/// Type shapes that may wrap other types through pointers.
pub trait IndirectionChain {
    fn indirection(&self) -> Indirection<'_, Self>;
}

/// Unwraps pointer indirections until a terminal type is reached and returns
/// its named entity, if any.
///
/// Cyclic chains never terminate; the type model must not produce them.
pub fn resolve_named<T>(ty: &T) -> Option<&dyn NamedEntity>
where
    T: IndirectionChain + ?Sized,
{
    let mut current = ty;
    loop {
        match current.indirection() {
            Indirection::Pointer(inner) => current = inner,
            Indirection::Terminal(named) => return named,
        }
    }
}

/// Core rendering trait for description items
pub trait Render {
    fn render<'a>(
        &'a self,
        builder: &mut TaggedTextBuilder<'a>,
        context: &RenderContext,
    ) -> Result<(), RenderError>;
}
