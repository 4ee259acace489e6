use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::parser::types::*;
use crate::renderer::traits::NamedEntity;

/// Reads decoded interface descriptions and checks they are safe to render.
pub struct InterfaceParser;

impl InterfaceParser {
    pub fn parse_str(json: &str) -> Result<NdrInterface> {
        let interface: NdrInterface =
            serde_json::from_str(json).context("Failed to parse interface description JSON")?;
        Self::validate(&interface)?;

        debug!(
            interface = %interface.name,
            complex_types = interface.complex_types.len(),
            procedures = interface.procedures.len(),
            "parsed interface description"
        );
        Ok(interface)
    }

    pub fn validate(interface: &NdrInterface) -> Result<()> {
        check_name(&interface.name, "interface")?;

        let mut declared: HashMap<&str, ComplexKind> = HashMap::new();
        for complex in &interface.complex_types {
            check_name(complex.name(), "complex type")?;
            if declared.insert(complex.name(), complex.complex_kind()).is_some() {
                bail!("Duplicate complex type '{}'", complex.name());
            }
        }

        for complex in &interface.complex_types {
            for (field, ty) in complex.fields() {
                let owner = format!("{}::{}", complex.name(), field);
                check_name(field, &owner)?;
                check_refs(ty, &declared, &owner)?;
            }
        }

        for procedure in &interface.procedures {
            check_name(&procedure.name, "procedure")?;
            for param in &procedure.params {
                let owner = format!("{}({})", procedure.name, param.name);
                check_name(&param.name, &owner)?;
                check_refs(&param.param_type, &declared, &owner)?;
            }
            if let Some(ret) = &procedure.return_type {
                check_refs(ret, &declared, &format!("{} return", procedure.name))?;
            }
        }

        Ok(())
    }
}

pub fn load_interface(path: impl AsRef<Path>) -> Result<NdrInterface> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read interface description {}", path.display()))?;
    InterfaceParser::parse_str(&json).with_context(|| format!("Invalid description in {}", path.display()))
}

fn check_name(name: &str, what: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Empty name for {}", what);
    }
    Ok(())
}

fn check_refs(ty: &NdrType, declared: &HashMap<&str, ComplexKind>, owner: &str) -> Result<()> {
    for reference in ty.complex_refs() {
        match declared.get(reference.name.as_str()) {
            Some(kind) if *kind == reference.kind => {}
            Some(kind) => bail!(
                "{} refers to {} {} but it is declared as a {}",
                owner,
                reference.kind.keyword(),
                reference.name,
                kind.keyword()
            ),
            None => bail!(
                "{} refers to undeclared {} {}",
                owner,
                reference.kind.keyword(),
                reference.name
            ),
        }
    }
    Ok(())
}
