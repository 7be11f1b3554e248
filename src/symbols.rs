//! Component 1 — build the symbol table from the components TOML file.
//!
//! Each top-level table names an interface; the required `id` key is the
//! interface id and every other key maps a component name to its id local
//! to that interface. Both halves must fit in 16 bits.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::BuildError;
use crate::model::{SymbolTable, pack_id};
use crate::report::Reporter;

#[derive(Debug, Deserialize)]
struct InterfaceTable {
    id: Option<i64>,
    #[serde(flatten)]
    components: BTreeMap<String, i64>,
}

fn in_id_range(value: i64) -> bool {
    (0..=0xffff).contains(&value)
}

/// Parse `path` into a flat `"interface:component"` → packed-id table.
///
/// Fails on the first violation; no partial table is returned. Duplicate
/// keys after case-folding overwrite (last write wins in sorted interface
/// order) with a warning, since they usually mean a config typo.
pub fn build(path: &Path, reporter: &dyn Reporter) -> Result<SymbolTable, BuildError> {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let text = fs::read_to_string(path).map_err(|e| BuildError::SourceIo {
        path: path.to_path_buf(),
        source: e,
    })?;

    let doc: BTreeMap<String, InterfaceTable> = match toml::from_str(&text) {
        Ok(doc) => doc,
        Err(e) => {
            reporter.error(&e.to_string());
            return Err(BuildError::ConfigParse { file });
        }
    };

    let mut symbols = SymbolTable::new();
    for (interface_name, table) in &doc {
        let interface_id = table
            .id
            .ok_or_else(|| BuildError::MissingInterfaceId(interface_name.clone()))?;
        if !in_id_range(interface_id) {
            return Err(BuildError::IdOutOfRange(interface_name.clone()));
        }

        for (component_name, &component_id) in &table.components {
            if !in_id_range(component_id) {
                return Err(BuildError::IdOutOfRange(component_name.clone()));
            }

            let full_name = format!(
                "{}:{}",
                interface_name.to_lowercase(),
                component_name.to_lowercase()
            );
            let packed = pack_id(interface_id as u16, component_id as u16);

            if symbols.insert(full_name.clone(), packed).is_some() {
                reporter.warn(&format!("duplicate component symbol {full_name}, overwriting"));
            }
        }
    }

    Ok(symbols)
}
