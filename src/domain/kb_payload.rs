use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One table row as the knowledge base receives it: column name to text
pub type Item = IndexMap<String, String>;

/// Which columns the knowledge base searches and which it keeps as metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSelection {
    pub searchable_fields: Vec<String>,
    pub metadata_fields: Vec<String>,
}

impl SchemaSelection {
    pub fn new(searchable_fields: Vec<String>, metadata_fields: Vec<String>) -> Self {
        Self {
            searchable_fields,
            metadata_fields,
        }
    }
}

/// A whole table document. Field order is the wire order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadPayload {
    pub schema: SchemaSelection,
    pub name: String,
    pub items: Vec<Item>,
}

/// Request body of the table upload endpoint: `{ "data": <payload> }`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadRequest {
    pub data: UploadPayload,
}

impl From<UploadPayload> for UploadRequest {
    fn from(data: UploadPayload) -> Self {
        Self { data }
    }
}

/// What the user checks before confirming an upload
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadPreview {
    pub table_name: String,
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub sample: Vec<Item>,
}

/// Status and body of an accepted upload
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadReceipt {
    pub status: u16,
    pub body: String,
}
