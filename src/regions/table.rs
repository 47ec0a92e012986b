// src/regions/table.rs

use super::key::RegionKey;
use serde::de::DeserializeOwned;
use std::{collections::HashMap, fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),
}

/// Read-only mapping from a region to some value, injected into the pipeline.
pub trait RegionLookup<V> {
    fn lookup(&self, key: &RegionKey) -> Option<V>;
}

/// JSON object keyed by [`RegionKey::table_key`], e.g.
/// `{"東京都": ..., "北海道|道央": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable<V> {
    entries: HashMap<String, V>,
}

impl<V> Default for LookupTable<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> LookupTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &RegionKey, value: V) -> Option<V> {
        self.entries.insert(key.table_key(), value)
    }

    pub fn get(&self, key: &RegionKey) -> Option<&V> {
        self.entries.get(&key.table_key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: DeserializeOwned> LookupTable<V> {
    pub fn from_json_str(text: &str) -> Result<Self, TableError> {
        let entries = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

impl<V: Clone> RegionLookup<V> for LookupTable<V> {
    fn lookup(&self, key: &RegionKey) -> Option<V> {
        self.get(key).cloned()
    }
}
