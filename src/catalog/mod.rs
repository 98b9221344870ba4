//! The command catalog: which named operations a script may call, whether each one suspends the
//! calling fragment, and how long it is declared to take.
//!
//! The catalog never runs a command. Execution belongs to the host (see
//! [`crate::playback::host::CommandHost`]).

pub mod builtin;
pub mod spec;

use crate::foundation::error::{PonderError, PonderResult};
use crate::scene::line::CommandCall;
use serde::{Deserialize, Serialize};
use spec::CommandSpec;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "CatalogDef", into = "CatalogDef")]
pub struct CommandCatalog {
    commands: BTreeMap<String, CommandSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDef {
    commands: Vec<CommandSpec>,
}

impl TryFrom<CatalogDef> for CommandCatalog {
    type Error = PonderError;

    fn try_from(def: CatalogDef) -> Result<Self, Self::Error> {
        let mut out = Self::default();
        for spec in def.commands {
            if spec.name.trim().is_empty() {
                return Err(PonderError::validation("catalog command name must be non-empty"));
            }
            if out.commands.contains_key(&spec.name) {
                return Err(PonderError::validation(format!(
                    "catalog command '{}' is defined twice",
                    spec.name
                )));
            }
            out.commands.insert(spec.name.clone(), spec);
        }
        Ok(out)
    }
}

impl From<CommandCatalog> for CatalogDef {
    fn from(c: CommandCatalog) -> Self {
        Self {
            commands: c.commands.into_values().collect(),
        }
    }
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, spec: CommandSpec) -> Option<CommandSpec> {
        self.commands.insert(spec.name.clone(), spec)
    }

    pub fn with(mut self, spec: CommandSpec) -> Self {
        self.insert(spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Look up the entry a parsed call refers to.
    pub fn classify(&self, call: &CommandCall) -> Option<&CommandSpec> {
        self.get(&call.name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    pub fn from_json_str(s: &str) -> PonderResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PonderResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            PonderError::validation(format!("read catalog '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/catalog.rs"]
mod tests;
