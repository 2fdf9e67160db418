use bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A customer account, identified by `code`.
///
/// Anything beyond `code` and `name` rides along in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub code: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Document,
}
