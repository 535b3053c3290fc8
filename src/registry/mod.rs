//! Endpoint registry.
//!
//! This module handles:
//! - Endpoint and parameter definitions
//! - The built-in game API catalogue
//! - Ordered lookup by key

pub mod catalog;
pub mod types;

use once_cell::sync::Lazy;

use crate::error::RegistryError;

pub use catalog::{HEALTH_ENDPOINT_KEY, LOGS_ENDPOINT_KEY};
pub use types::{EndpointDefinition, HttpMethod, InputKind, ParameterSpec};

static BUILTIN: Lazy<EndpointRegistry> = Lazy::new(|| EndpointRegistry {
    endpoints: catalog::builtin_endpoints(),
});

/// Ordered, immutable mapping from key to endpoint definition.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    endpoints: Vec<EndpointDefinition>,
}

impl EndpointRegistry {
    /// Build a registry from definitions in display order.
    pub fn new(endpoints: Vec<EndpointDefinition>) -> Result<Self, RegistryError> {
        if endpoints.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, endpoint) in endpoints.iter().enumerate() {
            if endpoints[..i].iter().any(|e| e.key == endpoint.key) {
                return Err(RegistryError::DuplicateKey(endpoint.key.clone()));
            }
        }

        Ok(Self { endpoints })
    }

    /// The built-in game API catalogue.
    pub fn builtin() -> &'static EndpointRegistry {
        &BUILTIN
    }

    /// Look up a definition by key.
    pub fn get(&self, key: &str) -> Option<&EndpointDefinition> {
        self.endpoints.iter().find(|e| e.key == key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The first definition, selected on startup.
    pub fn default_endpoint(&self) -> &EndpointDefinition {
        // Construction guarantees at least one entry.
        &self.endpoints[0]
    }

    /// Definitions in display order.
    pub fn iter(&self) -> impl Iterator<Item = &EndpointDefinition> {
        self.endpoints.iter()
    }

    /// Number of registered endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
