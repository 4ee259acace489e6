use serde::Serialize;
use tracing::debug;

use crate::error::RenderError;
use crate::parser::*;
use crate::renderer::builder::{NameTag, TaggedTextBuilder};
use crate::renderer::traits::*;

/// Renders whole interfaces, or parts of them, into tagged text.
pub struct NdrFormatter {
    context: RenderContext,
}

impl NdrFormatter {
    pub fn new(context: RenderContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn format_interface<'a>(&self, interface: &'a NdrInterface) -> Result<TaggedTextBuilder<'a>, RenderError> {
        let mut builder = TaggedTextBuilder::new();
        interface.render(&mut builder, &self.context)?;

        debug!(
            interface = %interface.name,
            bytes = builder.len(),
            tags = builder.tags().len(),
            "formatted interface"
        );
        Ok(builder)
    }

    /// Only the complex types, separated by blank lines.
    pub fn format_complex_types<'a>(&self, interface: &'a NdrInterface) -> Result<TaggedTextBuilder<'a>, RenderError> {
        let mut builder = TaggedTextBuilder::new();
        for (i, complex) in interface.complex_types.iter().enumerate() {
            if i > 0 {
                builder.new_line();
            }
            complex.render(&mut builder, &self.context)?;
        }
        Ok(builder)
    }

    /// Only the procedure signatures, one per line.
    pub fn format_procedures<'a>(&self, interface: &'a NdrInterface) -> Result<TaggedTextBuilder<'a>, RenderError> {
        let mut builder = TaggedTextBuilder::new();
        for procedure in &interface.procedures {
            procedure.render(&mut builder, &self.context)?;
        }
        Ok(builder)
    }
}

impl Default for NdrFormatter {
    fn default() -> Self {
        Self::new(RenderContext::default())
    }
}

/// Owned copy of a tag, detached from the description it points into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub offset: usize,
    pub length: usize,
    pub name: String,
    pub kind: EntityKind,
}

impl From<&NameTag<'_>> for TagRecord {
    fn from(tag: &NameTag<'_>) -> Self {
        let entity = tag.entity();
        Self {
            offset: tag.offset(),
            length: tag.length(),
            name: entity.name().to_string(),
            kind: entity.kind(),
        }
    }
}

/// Rendered text plus its tags, ready to hand to a viewer.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub text: String,
    pub tags: Vec<TagRecord>,
}

impl RenderedDocument {
    pub fn from_builder(builder: &TaggedTextBuilder<'_>) -> Self {
        Self {
            text: builder.text().to_string(),
            tags: builder.tags().iter().map(TagRecord::from).collect(),
        }
    }

    /// The text a tag covers.
    pub fn tagged_text(&self, tag: &TagRecord) -> Option<&str> {
        self.text.get(tag.offset..tag.offset + tag.length)
    }
}
