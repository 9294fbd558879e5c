use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

pub const LIBRARY_NAME: &str = "analytics-php";
pub const LIBRARY_VERSION: &str = "1.1.3";

/// Identity reported to the collector under `context.library`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryInfo {
    pub name: String,
    pub version: String,
}

impl LibraryInfo {
    pub fn current() -> Self {
        Self {
            name: LIBRARY_NAME.to_string(),
            version: LIBRARY_VERSION.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "version": self.version,
        })
    }
}

impl Default for LibraryInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Shallow merge: caller entries first, library entry overlaid on top.
/// A missing or null context counts as empty; any other non-object is dropped.
pub fn merge_context(caller: Option<Value>, library: &LibraryInfo) -> Map<String, Value> {
    let mut context = match caller {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => Map::new(),
        Some(_) => {
            debug!("Discarding non-object context supplied by caller");
            Map::new()
        }
    };
    context.insert("library".to_string(), library.to_value());
    context
}
