use std::fmt;

use crate::error::RenderError;
use crate::renderer::traits::{resolve_named, IndirectionChain, NamedEntity};

/// A reference to a named entity within built text.
///
/// `offset` and `length` are byte positions into the text, so
/// `&text[tag.offset()..tag.end()]` is always a valid slice.
#[derive(Clone, Copy)]
pub struct NameTag<'a> {
    offset: usize,
    length: usize,
    entity: &'a dyn NamedEntity,
}

impl<'a> NameTag<'a> {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn entity(&self) -> &'a dyn NamedEntity {
        self.entity
    }
}

impl fmt::Debug for NameTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameTag")
            .field("offset", &self.offset)
            .field("length", &self.length)
            .field("entity", &self.entity.name())
            .finish()
    }
}

/// Text buffer with lazy indentation and position-accurate name tags.
///
/// Indentation is written only in front of the first non-empty content on a
/// line, so pushing or popping an indent never touches text already written.
/// Tags are append-only; their offsets stay valid because text is never
/// inserted before them.
#[derive(Debug, Default)]
pub struct TaggedTextBuilder<'a> {
    text: String,
    indents: Vec<String>,
    mid_line: bool,
    tags: Vec<NameTag<'a>>,
}

impl<'a> TaggedTextBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_indent(&mut self, indent: impl Into<String>) -> &mut Self {
        self.indents.push(indent.into());
        self
    }

    /// Pushes an indent made of `count` copies of `ch`.
    pub fn push_indent_repeat(&mut self, ch: char, count: usize) -> &mut Self {
        self.push_indent(std::iter::repeat(ch).take(count).collect::<String>())
    }

    pub fn pop_indent(&mut self) -> Result<&mut Self, RenderError> {
        self.indents.pop().ok_or(RenderError::IndentUnderflow)?;
        Ok(self)
    }

    pub fn indent_depth(&self) -> usize {
        self.indents.len()
    }

    pub fn is_at_line_start(&self) -> bool {
        !self.mid_line
    }

    pub fn append(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self;
        }
        self.begin_content();
        self.text.push_str(s);
        self
    }

    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<&mut Self, RenderError> {
        fmt::Write::write_fmt(&mut *self, args)?;
        Ok(self)
    }

    pub fn append_line(&mut self, s: &str) -> &mut Self {
        self.append(s);
        self.text.push('\n');
        self.mid_line = false;
        self
    }

    pub fn new_line(&mut self) -> &mut Self {
        self.append_line("")
    }

    /// Appends `display` and tags the first occurrence of the entity's name
    /// inside it.
    ///
    /// When the name does not occur in `display` the tag is placed at the
    /// start of the appended text instead, with its length clamped to the
    /// appended text. An empty `display` writes nothing and records no tag.
    pub fn append_tagged(
        &mut self,
        display: &str,
        entity: &'a dyn NamedEntity,
    ) -> Result<&mut Self, RenderError> {
        let name = entity.name();
        if name.is_empty() {
            return Err(RenderError::EmptyEntityName);
        }
        if display.is_empty() {
            return Ok(self);
        }

        self.begin_content();

        let (relative, length) = match display.find(name) {
            Some(found) => (found, name.len()),
            None => (0, clamp_to_boundary(display, name.len())),
        };

        self.tags.push(NameTag {
            offset: self.text.len() + relative,
            length,
            entity,
        });
        self.text.push_str(display);
        Ok(self)
    }

    /// Appends the entity's name and tags all of it.
    pub fn append_name(&mut self, entity: &'a dyn NamedEntity) -> Result<&mut Self, RenderError> {
        self.append_tagged(entity.name(), entity)
    }

    /// Appends `display`, tagging the named type reached by unwrapping `ty`'s
    /// pointers. Without a named terminal type this is a plain append.
    pub fn append_tagged_type<T>(&mut self, display: &str, ty: &'a T) -> Result<&mut Self, RenderError>
    where
        T: IndirectionChain + ?Sized,
    {
        match resolve_named(ty) {
            Some(entity) => self.append_tagged(display, entity),
            None => Ok(self.append(display)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &[NameTag<'a>] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<NameTag<'a>>) {
        (self.text, self.tags)
    }

    /// Resets to the freshly constructed state, keeping allocations.
    pub fn clear(&mut self) -> &mut Self {
        self.text.clear();
        self.indents.clear();
        self.tags.clear();
        self.mid_line = false;
        self
    }

    fn begin_content(&mut self) {
        if !self.mid_line {
            for indent in &self.indents {
                self.text.push_str(indent);
            }
            self.mid_line = true;
        }
    }
}

impl fmt::Write for TaggedTextBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}

impl fmt::Display for TaggedTextBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn clamp_to_boundary(s: &str, len: usize) -> usize {
    let mut len = len.min(s.len());
    while !s.is_char_boundary(len) {
        len -= 1;
    }
    len
}
