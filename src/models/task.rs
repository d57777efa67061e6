use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Body for task creation.
///
/// The four modeled fields must be present. `priority` is whatever the
/// caller uses, a label or an ordinal, and `deadline` is stored verbatim
/// as supplied. Anything else the caller sends rides along into the
/// document unchanged. Tasks carry no owner field.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewTask {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub deadline: String,
    pub priority: Value,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for the fixed four-field task update.
///
/// Every field is written back on update: an omitted one overwrites the
/// stored value with null rather than being merged around. Fields outside
/// these four are never touched by an update.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<Value>,
    pub description: Option<String>,
}
