//! In-memory scheme catalog with atomic whole-catalog replacement.

mod standard;

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::scheme::{Scheme, SchemeDefinitionError, SchemeRecord};

pub use standard::standard_schemes;

/// Errors raised while loading a catalog. A failed load never disturbs the
/// catalog that was active before the call.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog: schemes must be a list, found {found}")]
    NotAList { found: &'static str },
    #[error("invalid catalog: malformed scheme record at index {index}: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid catalog: record at index {index} rejected: {source}")]
    InvalidScheme {
        index: usize,
        #[source]
        source: SchemeDefinitionError,
    },
    #[error("invalid catalog: duplicate scheme id {scheme_id}")]
    DuplicateSchemeId { scheme_id: String },
    #[error("invalid catalog: unable to parse document: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("unable to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// One immutable catalog version shared by concurrent evaluations.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    version: u64,
    schemes: Vec<Scheme>,
}

impl CatalogSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    pub fn get(&self, scheme_id: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|scheme| scheme.id() == scheme_id)
    }
}

/// Outcome of a successful load: the size and version of the installed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogLoad {
    pub schemes: usize,
    pub version: u64,
}

/// Handle to the active scheme catalog. Loads swap the whole snapshot at once,
/// so readers observe either the previous catalog or the new one.
#[derive(Debug, Default)]
pub struct SchemeCatalog {
    active: RwLock<Arc<CatalogSnapshot>>,
}

impl SchemeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the national sample schemes.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_records(standard_schemes())
    }

    pub fn from_records(records: Vec<SchemeRecord>) -> Result<Self, CatalogError> {
        let catalog = Self::new();
        catalog.replace(records)?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let catalog = Self::new();
        catalog.load_str(&raw)?;
        Ok(catalog)
    }

    /// Replace the active catalog from a JSON document that must be a list of
    /// scheme records.
    pub fn load(&self, document: Value) -> Result<CatalogLoad, CatalogError> {
        let items = match document {
            Value::Array(items) => items,
            other => {
                return Err(CatalogError::NotAList {
                    found: json_kind(&other),
                })
            }
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<SchemeRecord>(item)
                    .map_err(|source| CatalogError::MalformedRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.replace(records)
    }

    pub fn load_str(&self, raw: &str) -> Result<CatalogLoad, CatalogError> {
        let document = serde_json::from_str::<Value>(raw).map_err(CatalogError::Syntax)?;
        self.load(document)
    }

    /// Validate every record, then swap the catalog in one step.
    pub fn replace(&self, records: Vec<SchemeRecord>) -> Result<CatalogLoad, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut schemes = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let scheme = Scheme::try_from(record)
                .map_err(|source| CatalogError::InvalidScheme { index, source })?;
            if !seen.insert(scheme.id().to_string()) {
                return Err(CatalogError::DuplicateSchemeId {
                    scheme_id: scheme.id().to_string(),
                });
            }
            schemes.push(scheme);
        }

        let count = schemes.len();
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        let version = active.version + 1;
        *active = Arc::new(CatalogSnapshot { version, schemes });
        drop(active);

        info!(schemes = count, version, "scheme catalog replaced");
        Ok(CatalogLoad {
            schemes: count,
            version,
        })
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.snapshot().len()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
