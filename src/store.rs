//!
//! # Document Store Capability
//!
//! Persistence is treated as an external collaborator: named collections of
//! JSON documents supporting exactly `find`, `find_one`, `insert_one`,
//! `update_one` and `delete_one`. Handlers depend on that surface and
//! nothing else, so the backing can change without touching them.
//!
//! This module realizes the capability in process: each collection is a
//! vector of documents behind an async `RwLock`. Every operation is a single
//! critical section, and single-operation atomicity is the only consistency
//! the system promises. Nothing is retried or transacted across operations.
//!
//! Write operations return acknowledgement records summarizing their effect
//! (inserted id, matched/modified counts, deleted count). Handlers serialize
//! these verbatim to the caller.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Error raised by a collection operation.
#[derive(Debug)]
pub enum StoreError {
    /// The supplied document or update was not a JSON object.
    NotAnObject,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::NotAnObject => write!(f, "document must be a JSON object"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Single-field equality match, the only query shape the handlers need.
#[derive(Debug, Clone)]
pub struct Filter {
    field: String,
    value: Value,
}

impl Filter {
    /// Matches on the store-assigned `id` field.
    pub fn by_id(id: &str) -> Self {
        Self::by_field("id", id)
    }

    pub fn by_field(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }

    fn matches(&self, doc: &Value) -> bool {
        doc.get(&self.field) == Some(&self.value)
    }
}

/// Acknowledgement for `insert_one`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Option<String>,
}

/// Acknowledgement for `update_one`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Acknowledgement for `delete_one`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Handle to the process-wide document store.
#[derive(Clone, Default)]
pub struct Store {
    collections: Arc<Mutex<HashMap<String, Collection>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a named collection, creating it on first use. Handles to the
    /// same name share the same documents.
    pub fn collection(&self, name: &str) -> Collection {
        let mut collections = self.collections.lock().expect("store registry poisoned");
        collections
            .entry(name.to_string())
            .or_insert_with(|| Collection::new(name))
            .clone()
    }
}

/// Cheap cloneable handle to one named collection of JSON documents.
#[derive(Clone)]
pub struct Collection {
    name: String,
    docs: Arc<RwLock<Vec<Value>>>,
}

impl Collection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            docs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Full collection scan, in insertion order.
    pub async fn find(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.docs.read().await.clone())
    }

    /// First document matching the filter.
    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Value>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|doc| filter.matches(doc)).cloned())
    }

    /// Inserts one document, assigning an opaque `id` when the caller did
    /// not provide one.
    pub async fn insert_one(&self, mut doc: Value) -> Result<InsertAck, StoreError> {
        let fields = doc.as_object_mut().ok_or(StoreError::NotAnObject)?;
        let id = match fields.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                fields.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };
        self.docs.write().await.push(doc);
        log::debug!("inserted document {} into {}", id, self.name);
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: Some(id),
        })
    }

    /// Merges the fields of `update` into the first matching document,
    /// leaving its other fields in place.
    ///
    /// `modified_count` reports whether any field actually changed value, so
    /// re-applying an update the document already reflects acknowledges with
    /// zero modifications.
    pub async fn update_one(&self, filter: &Filter, update: Value) -> Result<UpdateAck, StoreError> {
        let new_fields = update.as_object().ok_or(StoreError::NotAnObject)?;
        let mut docs = self.docs.write().await;
        match docs.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                let fields = docs[index].as_object_mut().ok_or(StoreError::NotAnObject)?;
                let mut modified_count = 0;
                for (key, value) in new_fields {
                    if fields.get(key) != Some(value) {
                        fields.insert(key.clone(), value.clone());
                        modified_count = 1;
                    }
                }
                log::debug!("updated one document in {}", self.name);
                Ok(UpdateAck {
                    acknowledged: true,
                    matched_count: 1,
                    modified_count,
                })
            }
            None => Ok(UpdateAck {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
            }),
        }
    }

    /// Removes the first matching document.
    pub async fn delete_one(&self, filter: &Filter) -> Result<DeleteAck, StoreError> {
        let mut docs = self.docs.write().await;
        match docs.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                docs.remove(index);
                log::debug!("deleted one document from {}", self.name);
                Ok(DeleteAck {
                    acknowledged: true,
                    deleted_count: 1,
                })
            }
            None => Ok(DeleteAck {
                acknowledged: true,
                deleted_count: 0,
            }),
        }
    }
}
