//! Generator metadata
//!
//! Metadata is not needed to render audio; it identifies a generator in
//! listings and error messages and is checked once when the catalog is built.

use serde::{Deserialize, Serialize};

use crate::error::{MorphError, Result};

/// Descriptive fields attached to a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    /// Catalog key, lowercase with underscores (e.g. `sine_to_triangle`)
    pub id: String,
    /// Display name
    pub name: String,
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Whether the generator is freely available
    #[serde(default = "default_free")]
    pub free: bool,
}

fn default_free() -> bool {
    true
}

impl GeneratorInfo {
    /// Create metadata with the display name defaulting to the id
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: description.into(),
            author: "Anonymous".to_string(),
            tags: Vec::new(),
            collections: Vec::new(),
            keywords: Vec::new(),
            free: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_collections(mut self, collections: &[&str]) -> Self {
        self.collections = collections.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Check the metadata is usable as a catalog entry
    ///
    /// # Errors
    /// * `InvalidMetadata` - empty id/name/description, an id that is not
    ///   lowercase `[a-z0-9_]`, or an empty tag/collection/keyword entry
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| MorphError::InvalidMetadata {
            generator: self.id.clone(),
            reason,
        };

        if self.id.is_empty() {
            return Err(fail("id must be non-empty".to_string()));
        }
        if let Some(c) = self
            .id
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(fail(format!(
                "id may only contain lowercase letters, digits and '_', found {:?}",
                c
            )));
        }
        if self.name.trim().is_empty() {
            return Err(fail("name must be non-empty".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(fail("description must be non-empty".to_string()));
        }

        for (field, values) in [
            ("tags", &self.tags),
            ("collections", &self.collections),
            ("keywords", &self.keywords),
        ] {
            if values.iter().any(|v| v.trim().is_empty()) {
                return Err(fail(format!("{} must not contain empty entries", field)));
            }
        }

        Ok(())
    }
}
