//! # Pagefab Plugins
//!
//! Plugin bundles and the registry set they populate.
//!
//! A [`PluginDefinition`] groups components, actions and collections that are
//! enabled together. [`Registries::load_plugin`] registers the whole bundle
//! as one unit: every entry is pre-checked against the current stores (and
//! against the bundle itself) before anything registers, so a failed load
//! leaves the registries exactly as they were and "is plugin X active" stays
//! a single boolean for the host.
//!
//! Registration is an explicit, ordered initialization phase performed at
//! start-up, before any tree editing. Nothing registers as an import-time
//! side effect.

mod builtins;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use pagefab_registry::{
    ActionDefinition, ActionRegistry, CollectionDefinition, CollectionRegistry,
    ComponentDefinition, ComponentRegistry, RegistryError,
};

pub use builtins::standard_plugin;

/// An atomic group of registry entries enabled as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginDefinition {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentDefinition>,
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
    #[serde(default)]
    pub collections: Vec<CollectionDefinition>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PluginError {
    /// At least one bundle entry clashes with an existing definition or with
    /// another entry of the same bundle. Lists every clash; nothing was
    /// registered.
    #[error("Plugin '{plugin}' not loaded, conflicting definitions: {}", conflicts.join(", "))]
    Conflict {
        plugin: String,
        conflicts: Vec<String>,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The composed vocabulary of one host process.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub components: ComponentRegistry,
    pub actions: ActionRegistry,
    pub collections: CollectionRegistry,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registries pre-loaded with the standard component/action bundle.
    pub fn with_standard() -> Result<Self, PluginError> {
        let mut registries = Self::new();
        registries.load_plugin(standard_plugin())?;
        Ok(registries)
    }

    /// Load a bundle, all-or-nothing.
    pub fn load_plugin(&mut self, plugin: PluginDefinition) -> Result<(), PluginError> {
        let conflicts = self.find_conflicts(&plugin);
        if !conflicts.is_empty() {
            return Err(PluginError::Conflict {
                plugin: plugin.name,
                conflicts,
            });
        }

        let (component_count, action_count, collection_count) = (
            plugin.components.len(),
            plugin.actions.len(),
            plugin.collections.len(),
        );

        for component in plugin.components {
            self.components.register(component)?;
        }
        for action in plugin.actions {
            self.actions.register(action)?;
        }
        for collection in plugin.collections {
            self.collections.register(collection)?;
        }

        info!(
            plugin = %plugin.name,
            components = component_count,
            actions = action_count,
            collections = collection_count,
            "loaded plugin bundle"
        );
        Ok(())
    }

    fn find_conflicts(&self, plugin: &PluginDefinition) -> Vec<String> {
        let mut conflicts = Vec::new();
        let mut bundle_keys = HashSet::new();

        for component in &plugin.components {
            let key = component.component_type.as_str();
            if self.components.contains(key) || !bundle_keys.insert(("component", key)) {
                conflicts.push(format!("component '{key}'"));
            }
        }
        for action in &plugin.actions {
            let key = action.action_type.as_str();
            if self.actions.contains(key) || !bundle_keys.insert(("action", key)) {
                conflicts.push(format!("action '{key}'"));
            }
        }
        for collection in &plugin.collections {
            let key = collection.id.as_str();
            if self.collections.contains(key) || !bundle_keys.insert(("collection", key)) {
                conflicts.push(format!("collection '{key}'"));
            }
        }

        conflicts
    }
}
