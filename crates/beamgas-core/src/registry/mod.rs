//! Immutable `(PT, PST)` to process-name reference table.

mod builtin;

use crate::domain::{AnalysisError, AnalysisResult};
use crate::table::DelimitedTable;
use builtin::BUILTIN_PROCESS_TABLE;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const PROCESS_TYPE_COLUMNS: [&str; 3] = ["ProcessType", "PT", "Type"];
const SUBTYPE_COLUMNS: [&str; 4] = ["SubType", "ProcessSubType", "PST", "Subtype"];
const NAME_COLUMNS: [&str; 4] = ["TypeName", "Name", "ProcessName", "Description"];

static BUILTIN_REGISTRY: OnceLock<ProcessRegistry> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRegistryEntry {
    pub process_type: i32,
    pub process_subtype: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    Builtin,
    File(PathBuf),
    /// Parsed from text or assembled in code; carries the caller's label.
    Inline(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRegistry {
    entries: BTreeMap<(i32, i32), ProcessRegistryEntry>,
    source: RegistrySource,
}

impl ProcessRegistry {
    /// Geant4 catalogue compiled into the crate, built on first use.
    pub fn builtin() -> &'static ProcessRegistry {
        BUILTIN_REGISTRY.get_or_init(|| {
            let entries = BUILTIN_PROCESS_TABLE
                .iter()
                .map(|(process_type, process_subtype, name)| {
                    (
                        (*process_type, *process_subtype),
                        ProcessRegistryEntry {
                            process_type: *process_type,
                            process_subtype: *process_subtype,
                            name: (*name).to_string(),
                        },
                    )
                })
                .collect();
            ProcessRegistry {
                entries,
                source: RegistrySource::Builtin,
            }
        })
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = ProcessRegistryEntry>,
    ) -> AnalysisResult<Self> {
        let mut table = BTreeMap::new();
        for entry in entries {
            insert_entry(&mut table, entry, "registry")?;
        }
        Ok(Self {
            entries: table,
            source: RegistrySource::Inline("in-memory".to_string()),
        })
    }

    /// Reads a `ProcessType,SubType,TypeName` table such as Geant4's `g4_processes.csv`.
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            AnalysisError::input_not_found(
                "IO.REGISTRY_READ",
                format!(
                    "failed to read process registry '{}': {}",
                    path.display(),
                    source
                ),
            )
        })?;
        let label = path.display().to_string();
        let mut registry = Self::parse(&label, &content)?;
        registry.source = RegistrySource::File(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            entries = registry.len(),
            "loaded process registry"
        );
        Ok(registry)
    }

    pub fn parse(source_label: &str, content: &str) -> AnalysisResult<Self> {
        let table = DelimitedTable::parse(source_label, content)?;
        let type_column = table.require_column(source_label, "ProcessType", &PROCESS_TYPE_COLUMNS)?;
        let subtype_column = table.require_column(source_label, "SubType", &SUBTYPE_COLUMNS)?;
        let name_column = table.require_column(source_label, "TypeName", &NAME_COLUMNS)?;

        let mut entries = BTreeMap::new();
        for row in &table.rows {
            let entry = ProcessRegistryEntry {
                process_type: row.integer(source_label, type_column, "ProcessType")?,
                process_subtype: row.integer(source_label, subtype_column, "SubType")?,
                name: row.text(source_label, name_column, "TypeName")?.to_string(),
            };
            insert_entry(&mut entries, entry, source_label)?;
        }

        Ok(Self {
            entries,
            source: RegistrySource::Inline(source_label.to_string()),
        })
    }

    pub fn lookup(&self, process_type: i32, process_subtype: i32) -> Option<&ProcessRegistryEntry> {
        self.entries.get(&(process_type, process_subtype))
    }

    pub fn resolve(
        &self,
        process_type: i32,
        process_subtype: i32,
    ) -> AnalysisResult<&ProcessRegistryEntry> {
        self.lookup(process_type, process_subtype).ok_or_else(|| {
            AnalysisError::unknown_process(
                "PROCESS.UNREGISTERED",
                format!(
                    "process type {} subtype {} has no entry in the {} process registry",
                    process_type,
                    process_subtype,
                    self.source_label()
                ),
            )
        })
    }

    pub fn source(&self) -> &RegistrySource {
        &self.source
    }

    pub fn source_label(&self) -> String {
        match &self.source {
            RegistrySource::Builtin => "built-in".to_string(),
            RegistrySource::File(path) => format!("'{}'", path.display()),
            RegistrySource::Inline(label) => format!("'{}'", label),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ProcessRegistryEntry> {
        self.entries.values()
    }
}

fn insert_entry(
    entries: &mut BTreeMap<(i32, i32), ProcessRegistryEntry>,
    entry: ProcessRegistryEntry,
    source_label: &str,
) -> AnalysisResult<()> {
    match entries.entry((entry.process_type, entry.process_subtype)) {
        Entry::Vacant(slot) => {
            slot.insert(entry);
            Ok(())
        }
        Entry::Occupied(existing) if existing.get().name == entry.name => Ok(()),
        Entry::Occupied(existing) => Err(AnalysisError::schema(
            "SCHEMA.REGISTRY_CONFLICT",
            format!(
                "{}: process type {} subtype {} is registered as both '{}' and '{}'",
                source_label,
                entry.process_type,
                entry.process_subtype,
                existing.get().name,
                entry.name
            ),
        )),
    }
}
