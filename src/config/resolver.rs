use tracing::warn;

use crate::config::{ActionTable, DEFAULT_MODAL_KEY, HandlerSpec, ModalAction, SectionConfig};
use crate::modal::{CallbackRegistry, Handler, ModalSettings, ModalsSettings};

/// Turns handler tables from the configuration file into modal settings,
/// looking callback names up in a [`CallbackRegistry`].
pub struct SettingsResolver {
    callbacks: CallbackRegistry,
}

impl SettingsResolver {
    pub const fn new(callbacks: CallbackRegistry) -> Self {
        Self { callbacks }
    }

    /// Settings for one modal. A callback name that is not registered is
    /// logged and left unset, so the key falls through to the defaults.
    pub fn modal_settings(&self, table: &ActionTable) -> ModalSettings {
        let mut settings = ModalSettings::new();
        for action in ModalAction::ALL {
            let handler = match table.get(action) {
                None => continue,
                Some(HandlerSpec::Close) => Handler::Close,
                Some(HandlerSpec::Callback(name)) => match self.callbacks.get(name) {
                    Some(handler) => handler,
                    None => {
                        warn!(
                            "Unknown callback '{}' for {}, available: {:?}",
                            name,
                            action.handler_key(),
                            self.callbacks.names()
                        );
                        continue;
                    }
                },
            };
            settings.set(action, handler);
        }
        settings
    }

    /// Settings for a section's modals component.
    pub fn section_settings(&self, section: &SectionConfig) -> ModalsSettings {
        let mut settings = ModalsSettings::new();
        for (key, table) in &section.modals {
            let modal = self.modal_settings(table);
            if key == DEFAULT_MODAL_KEY {
                settings.default = modal;
            } else {
                settings.set_modal_key(key.clone(), modal);
            }
        }
        settings
    }
}
