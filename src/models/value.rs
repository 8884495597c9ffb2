use serde::{Deserialize, Serialize};

/// A row of the placeholder `values` resource.
///
/// Kept only to back the stubbed `/api/values` endpoints; three rows are
/// seeded by migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub id: i64,
    pub name: String,
}
