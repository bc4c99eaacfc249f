//! # Model Registry - Main Facade
//!
//! Maintains the insertion-ordered set of [`ModelDescriptor`]s the
//! orchestrator draws its fallback chain from, and the derived
//! `enabled_ordered` view sorted by ascending priority.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌────────────────────┐
//!                    │   ModelRegistry    │
//!                    │      (Facade)      │
//!                    └─────────┬──────────┘
//!                              │
//!                   descriptors: Vec<ModelDescriptor>
//!                   enabled_ordered: Vec<usize>   (cached, rebuilt on mutation)
//! ```
//!
//! Registry contents are statically known at startup (loaded from
//! configuration) and frozen unless an operator calls `enable`, `disable`,
//! or `set_priority`.

use thiserror::Error;

use crate::models::ModelDescriptor;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no model named '{0}' is registered")]
    NotFound(String),

    #[error("a model named '{0}' is already registered")]
    DuplicateName(String),
}

/// The model registry facade.
///
/// Lookups by name are linear scans; the expected descriptor count is in
/// the tens, so this is simpler and fast enough rather than indexing by
/// name in a map.
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    descriptors: Vec<ModelDescriptor>,
    enabled_ordered: Vec<usize>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a freshly loaded descriptor list (startup path).
    pub fn load(descriptors: Vec<ModelDescriptor>) -> Result<Self> {
        let mut registry = Self::default();
        for descriptor in descriptors {
            registry.add(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a new descriptor. Rebuilds the ordered view before returning.
    pub fn add(&mut self, descriptor: ModelDescriptor) -> Result<()> {
        if self.descriptors.iter().any(|d| d.name == descriptor.name) {
            return Err(RegistryError::DuplicateName(descriptor.name));
        }
        self.descriptors.push(descriptor);
        self.rebuild_ordered_view();
        Ok(())
    }

    /// All descriptors in insertion order, enabled or not (used by the
    /// diagnostic dump in the operational surface).
    pub fn all(&self) -> &[ModelDescriptor] {
        &self.descriptors
    }

    /// Enabled descriptors in ascending-priority order, ties broken by
    /// insertion order.
    pub fn enabled_ordered(&self) -> Vec<&ModelDescriptor> {
        self.enabled_ordered
            .iter()
            .map(|&i| &self.descriptors[i])
            .collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&ModelDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn enable(&mut self, name: &str) -> Result<()> {
        self.with_descriptor_mut(name, |d| d.enabled = true)
    }

    pub fn disable(&mut self, name: &str) -> Result<()> {
        self.with_descriptor_mut(name, |d| d.enabled = false)
    }

    pub fn set_priority(&mut self, name: &str, priority: u32) -> Result<()> {
        self.with_descriptor_mut(name, |d| d.priority = priority)
    }

    fn with_descriptor_mut(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut ModelDescriptor),
    ) -> Result<()> {
        let descriptor = self
            .descriptors
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        f(descriptor);
        self.rebuild_ordered_view();
        Ok(())
    }

    /// Whether at least one enabled descriptor has its credential configured.
    /// Feeds the health snapshot's `api_key_configured` field.
    pub fn any_credential_configured(&self) -> bool {
        self.enabled_ordered()
            .iter()
            .any(|d| d.credential_configured())
    }

    fn rebuild_ordered_view(&mut self) {
        let mut indices: Vec<usize> = self
            .descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.enabled)
            .map(|(i, _)| i)
            .collect();
        // `sort_by_key` is stable, preserving insertion order on ties.
        indices.sort_by_key(|&i| self.descriptors[i].priority);
        self.enabled_ordered = indices;
    }
}
