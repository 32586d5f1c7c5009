use std::collections::HashMap;

use tracing::{debug, warn};

use crate::modal::{ModalConfig, ModalId};

/// Resolved configuration of every modal in a section.
///
/// Registering an id that is already present replaces the old entry
/// wholesale; the two configurations are never merged. This happens when a
/// section is initialized twice or two containers share an id, and it is
/// logged at `warn` rather than rejected.
#[derive(Debug, Default)]
pub struct ModalRegistry {
    modals: HashMap<ModalId, ModalConfig>,
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a modal, returning the configuration it replaced, if any.
    pub fn register(&mut self, id: ModalId, config: ModalConfig) -> Option<ModalConfig> {
        debug!("Registering modal '{}' on element {}", id, config.element);
        let previous = self.modals.insert(id.clone(), config);
        if previous.is_some() {
            warn!("Modal '{}' registered twice, previous configuration replaced", id);
        }
        previous
    }

    pub fn lookup(&self, id: &ModalId) -> Option<&ModalConfig> {
        self.modals.get(id)
    }

    pub fn ids(&self) -> Vec<&ModalId> {
        let mut ids: Vec<_> = self.modals.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.modals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modals.is_empty()
    }
}
