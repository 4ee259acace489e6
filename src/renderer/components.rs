use crate::parser::*;

/// Helper for rendering type declarations
pub struct TypeRenderer;

impl TypeRenderer {
    /// The type as written before a declarator, e.g. `struct Struct_0*`.
    pub fn render_type(&self, ty: &NdrType) -> String {
        format!("{}{}", self.render_keyword(ty), self.render_type_name(ty))
    }

    /// Keyword in front of a complex type's name, e.g. `struct `.
    pub fn render_keyword(&self, ty: &NdrType) -> &'static str {
        match ty {
            NdrType::Pointer(pointer) => self.render_keyword(&pointer.referent),
            NdrType::Array { element, .. } => self.render_keyword(element),
            NdrType::Complex(complex) => match complex.kind {
                ComplexKind::Struct => "struct ",
                ComplexKind::Union => "union ",
            },
            _ => "",
        }
    }

    /// The type without its keyword, e.g. `Struct_0*`. A complex type's name
    /// always starts this text.
    pub fn render_type_name(&self, ty: &NdrType) -> String {
        match ty {
            NdrType::Base(base) => base.c_name().to_string(),
            NdrType::Pointer(pointer) => format!("{}*", self.render_type_name(&pointer.referent)),
            NdrType::Complex(complex) => complex.name.clone(),
            NdrType::Array { element, .. } => self.render_type_name(element),
            NdrType::String { wide: true } => "wchar_t*".to_string(),
            NdrType::String { wide: false } => "char*".to_string(),
            NdrType::ContextHandle => "void*".to_string(),
        }
    }

    /// Text that follows the declarator name, e.g. `[4]` for arrays.
    pub fn render_declarator_suffix(&self, ty: &NdrType) -> String {
        match ty {
            NdrType::Array { element, count } => {
                let dimension = match count {
                    Some(count) => format!("[{}]", count),
                    None => "[]".to_string(),
                };
                format!("{}{}", dimension, self.render_declarator_suffix(element))
            }
            _ => String::new(),
        }
    }

    /// The type whose named terminal should be tagged for a declaration of
    /// `ty`. Arrays are declared through their element type.
    pub fn tag_target<'t>(&self, ty: &'t NdrType) -> &'t NdrType {
        match ty {
            NdrType::Array { element, .. } => self.tag_target(element),
            _ => ty,
        }
    }

    /// IDL attributes implied by the type itself.
    pub fn type_attributes(&self, ty: &NdrType) -> Vec<&'static str> {
        match ty {
            NdrType::Pointer(pointer) => pointer.kind.attribute().into_iter().collect(),
            NdrType::String { .. } => vec!["string"],
            NdrType::ContextHandle => vec!["context_handle"],
            _ => Vec::new(),
        }
    }

    /// Attribute list for a parameter, e.g. `[in, out, unique] `.
    pub fn render_param_attributes(&self, param: &NdrProcedureParameter) -> String {
        let attributes: Vec<&str> = param
            .attributes
            .iter()
            .map(|attribute| attribute.as_str())
            .chain(self.type_attributes(&param.param_type))
            .collect();
        render_attribute_list(&attributes)
    }

    /// Attribute list for a structure member or union arm.
    pub fn render_field_attributes(&self, ty: &NdrType) -> String {
        render_attribute_list(&self.type_attributes(ty))
    }
}

fn render_attribute_list(attributes: &[&str]) -> String {
    if attributes.is_empty() {
        String::new()
    } else {
        format!("[{}] ", attributes.join(", "))
    }
}
