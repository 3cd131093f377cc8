//! In-memory caches for generated contexts and descriptions.
//!
//! Both caches live for one batch run and are passed explicitly into the
//! generation phase (`&mut`) and the translation phase (`&`). Inserts are
//! write-once: the first value stored for a key wins, so regenerating is
//! idempotent and phase 2 sees exactly what phase 1 produced.

use std::collections::HashMap;

/// Key for a generated translation context: one per unique string occurrence
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextKey {
    pub file: String,
    pub key_path: String,
    pub text: String,
}

impl ContextKey {
    pub fn new(file: &str, key_path: &str, text: &str) -> Self {
        Self {
            file: file.to_string(),
            key_path: key_path.to_string(),
            text: text.to_string(),
        }
    }
}

/// Key for a generated description: one per parent mapping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptionKey {
    pub file: String,
    pub key_path: String,
}

impl DescriptionKey {
    pub fn new(file: &str, key_path: &str) -> Self {
        Self {
            file: file.to_string(),
            key_path: key_path.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ContextCache {
    entries: HashMap<ContextKey, String>,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ContextKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store a context, keeping any value already present for the key
    pub fn insert(&mut self, key: ContextKey, context: String) {
        self.entries.entry(key).or_insert(context);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct DescriptionCache {
    entries: HashMap<DescriptionKey, String>,
}

impl DescriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DescriptionKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store a description, keeping any value already present for the key
    pub fn insert(&mut self, key: DescriptionKey, description: String) {
        self.entries.entry(key).or_insert(description);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
