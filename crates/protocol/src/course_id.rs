use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Normalized course identifier.
///
/// Course tables are hand-maintained and ids arrive with stray whitespace
/// (`"DA 101 "` vs `"DA 101"`). Every id is trimmed once on construction, so
/// bars, connectors, arrows and prerequisite lookups agree on one spelling.
/// Cloning shares the string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CourseId(Arc<str>);

impl CourseId {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty after trimming. Such ids never resolve.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq<&str> for CourseId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Borrow<str> for CourseId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CourseId {
    fn from(id: String) -> Self {
        Self::new(&id)
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.as_str().to_owned()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
