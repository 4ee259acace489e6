use serde::Deserialize;

use crate::renderer::traits::{EntityKind, Indirection, IndirectionChain, NamedEntity};

// Decoded NDR description model. Produced by an external decoder and read
// here as JSON; nothing in this module touches wire-format bytes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NdrBaseType {
    Byte,
    Char,
    Small,
    Short,
    Long,
    Hyper,
    Float,
    Double,
    #[serde(rename = "wchar_t")]
    WChar,
    #[serde(rename = "__int3264")]
    Int3264,
    #[serde(rename = "error_status_t")]
    ErrorStatus,
    Enum16,
    Void,
    #[serde(rename = "handle_t")]
    Handle,
}

impl NdrBaseType {
    pub fn c_name(&self) -> &'static str {
        match self {
            NdrBaseType::Byte => "byte",
            NdrBaseType::Char => "char",
            NdrBaseType::Small => "small",
            NdrBaseType::Short => "short",
            NdrBaseType::Long => "long",
            NdrBaseType::Hyper => "hyper",
            NdrBaseType::Float => "float",
            NdrBaseType::Double => "double",
            NdrBaseType::WChar => "wchar_t",
            NdrBaseType::Int3264 => "__int3264",
            NdrBaseType::ErrorStatus => "error_status_t",
            NdrBaseType::Enum16 => "enum16",
            NdrBaseType::Void => "void",
            NdrBaseType::Handle => "handle_t",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Ref,
    #[default]
    Unique,
    Full,
}

impl PointerKind {
    /// IDL attribute spelling, `None` for reference pointers.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            PointerKind::Ref => None,
            PointerKind::Unique => Some("unique"),
            PointerKind::Full => Some("ptr"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrPointerType {
    #[serde(default)]
    pub kind: PointerKind,
    pub referent: Box<NdrType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexKind {
    Struct,
    Union,
}

impl ComplexKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ComplexKind::Struct => "struct",
            ComplexKind::Union => "union",
        }
    }
}

/// A use of a complex type by name, e.g. a member of type `struct Struct_0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrComplexRef {
    pub name: String,
    pub kind: ComplexKind,
}

impl NamedEntity for NdrComplexRef {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::TypeReference
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NdrType {
    Base(NdrBaseType),
    Pointer(NdrPointerType),
    Complex(NdrComplexRef),
    Array {
        element: Box<NdrType>,
        #[serde(default)]
        count: Option<u32>,
    },
    String {
        #[serde(default)]
        wide: bool,
    },
    ContextHandle,
}

impl NdrType {
    pub fn pointer_to(kind: PointerKind, referent: NdrType) -> Self {
        NdrType::Pointer(NdrPointerType {
            kind,
            referent: Box::new(referent),
        })
    }

    pub fn complex(kind: ComplexKind, name: impl Into<String>) -> Self {
        NdrType::Complex(NdrComplexRef {
            name: name.into(),
            kind,
        })
    }

    /// Every complex type this type refers to, through pointers and arrays.
    pub fn complex_refs(&self) -> Vec<&NdrComplexRef> {
        match self {
            NdrType::Pointer(pointer) => pointer.referent.complex_refs(),
            NdrType::Array { element, .. } => element.complex_refs(),
            NdrType::Complex(complex) => vec![complex],
            _ => Vec::new(),
        }
    }
}

impl IndirectionChain for NdrType {
    fn indirection(&self) -> Indirection<'_, Self> {
        match self {
            NdrType::Pointer(pointer) => Indirection::Pointer(pointer.referent.as_ref()),
            NdrType::Complex(complex) => Indirection::Terminal(Some(complex as &dyn NamedEntity)),
            _ => Indirection::Terminal(None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrStructureMember {
    pub name: String,
    #[serde(default)]
    pub offset: u32,
    #[serde(rename = "type")]
    pub member_type: NdrType,
}

impl NamedEntity for NdrStructureMember {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Member
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrStructure {
    pub name: String,
    #[serde(default)]
    pub members: Vec<NdrStructureMember>,
}

impl NamedEntity for NdrStructure {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Structure
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrUnionArm {
    pub name: String,
    /// Selector value, `None` for the default arm.
    #[serde(default)]
    pub case: Option<i64>,
    #[serde(rename = "type")]
    pub arm_type: NdrType,
}

impl NamedEntity for NdrUnionArm {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Member
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrUnion {
    pub name: String,
    #[serde(default)]
    pub arms: Vec<NdrUnionArm>,
}

impl NamedEntity for NdrUnion {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Union
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NdrComplexType {
    Struct(NdrStructure),
    Union(NdrUnion),
}

impl NdrComplexType {
    pub fn complex_kind(&self) -> ComplexKind {
        match self {
            NdrComplexType::Struct(_) => ComplexKind::Struct,
            NdrComplexType::Union(_) => ComplexKind::Union,
        }
    }

    /// Names and types of the members or arms, in declaration order.
    pub fn fields(&self) -> Vec<(&str, &NdrType)> {
        match self {
            NdrComplexType::Struct(s) => s
                .members
                .iter()
                .map(|m| (m.name.as_str(), &m.member_type))
                .collect(),
            NdrComplexType::Union(u) => u
                .arms
                .iter()
                .map(|a| (a.name.as_str(), &a.arm_type))
                .collect(),
        }
    }
}

impl NamedEntity for NdrComplexType {
    fn name(&self) -> &str {
        match self {
            NdrComplexType::Struct(s) => s.name(),
            NdrComplexType::Union(u) => u.name(),
        }
    }

    fn kind(&self) -> EntityKind {
        match self {
            NdrComplexType::Struct(s) => s.kind(),
            NdrComplexType::Union(u) => u.kind(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamAttribute {
    In,
    Out,
    Retval,
}

impl ParamAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamAttribute::In => "in",
            ParamAttribute::Out => "out",
            ParamAttribute::Retval => "retval",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrProcedureParameter {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<ParamAttribute>,
    #[serde(rename = "type")]
    pub param_type: NdrType,
}

impl NamedEntity for NdrProcedureParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Parameter
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrProcedure {
    pub name: String,
    #[serde(default)]
    pub proc_num: u32,
    #[serde(default)]
    pub params: Vec<NdrProcedureParameter>,
    #[serde(default)]
    pub return_type: Option<NdrType>,
}

impl NamedEntity for NdrProcedure {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Procedure
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdrInterface {
    pub name: String,
    pub uuid: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub complex_types: Vec<NdrComplexType>,
    #[serde(default)]
    pub procedures: Vec<NdrProcedure>,
}

impl NamedEntity for NdrInterface {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Interface
    }
}

impl NdrInterface {
    pub fn complex_type(&self, name: &str) -> Option<&NdrComplexType> {
        self.complex_types.iter().find(|ty| ty.name() == name)
    }
}
