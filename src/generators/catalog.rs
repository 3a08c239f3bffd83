//! Generator catalog
//!
//! Built once at startup through [`CatalogBuilder`] and passed explicitly to
//! whatever needs to look generators up. There is no ambient registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use super::{
    GeneratorInfo, LinearInterpolation, SineToSaw, SineToTriangle, SquarePwmTz, WaveformGenerator,
};
use crate::error::{MorphError, Result};

/// Collects generators before the catalog is frozen
#[derive(Default)]
pub struct CatalogBuilder {
    generators: BTreeMap<String, Arc<dyn WaveformGenerator>>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a generator under its `info().id`
    ///
    /// # Errors
    /// * `InvalidMetadata` - the generator's metadata fails validation
    /// * `DuplicateGenerator` - the id is already taken
    pub fn register(&mut self, generator: Arc<dyn WaveformGenerator>) -> Result<&mut Self> {
        let info = generator.info();
        info.validate()?;

        let id = info.id.clone();
        if self.generators.contains_key(&id) {
            return Err(MorphError::DuplicateGenerator { id });
        }

        debug!("Registered generator '{}'", id);
        self.generators.insert(id, generator);
        Ok(self)
    }

    /// Add every built-in generator
    pub fn register_builtins(&mut self) -> Result<&mut Self> {
        self.register(Arc::new(LinearInterpolation::new()))?;
        self.register(Arc::new(SineToSaw::new()))?;
        self.register(Arc::new(SineToTriangle::new()))?;
        self.register(Arc::new(SquarePwmTz::new()))?;
        Ok(self)
    }

    /// Freeze the catalog
    pub fn build(self) -> GeneratorCatalog {
        GeneratorCatalog {
            generators: self.generators,
        }
    }
}

/// Read-only mapping from generator id to generator
#[derive(Clone)]
pub struct GeneratorCatalog {
    generators: BTreeMap<String, Arc<dyn WaveformGenerator>>,
}

impl GeneratorCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Catalog containing the built-in generators
    pub fn with_defaults() -> Result<Self> {
        let mut builder = CatalogBuilder::new();
        builder.register_builtins()?;
        Ok(builder.build())
    }

    /// Look up a generator by id
    ///
    /// # Errors
    /// * `UnknownGenerator` - no generator with that id; the error lists the
    ///   available ids
    pub fn get(&self, id: &str) -> Result<Arc<dyn WaveformGenerator>> {
        self.generators
            .get(id)
            .cloned()
            .ok_or_else(|| MorphError::UnknownGenerator {
                name: id.to_string(),
                available: self.ids().into_iter().map(String::from).collect(),
            })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.generators.contains_key(id)
    }

    /// Generator ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        self.generators.keys().map(|s| s.as_str()).collect()
    }

    /// Metadata for every generator, sorted by id
    pub fn list_info(&self) -> Vec<&GeneratorInfo> {
        self.generators.values().map(|g| g.info()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn WaveformGenerator>)> {
        self.generators.iter().map(|(id, g)| (id.as_str(), g))
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
