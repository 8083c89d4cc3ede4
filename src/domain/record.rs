use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::mapping::schema::FieldPath;

/// One accounting entity (expense, invoice or quotation) as it came out of the API.
///
/// Fields are kept as raw JSON since every column rule tolerates their absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainRecord(Map<String, Value>);

impl DomainRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Resolves a field path, going at most one mapping deep.
    /// Returns `None` as soon as a segment is missing or the parent is not a mapping.
    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        match path {
            FieldPath::Field(field) => self.get(field),
            FieldPath::Nested(parent, child) => self.get(parent)?.as_object()?.get(*child),
        }
    }

}
