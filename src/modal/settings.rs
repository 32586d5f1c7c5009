use std::collections::HashMap;

use crate::config::ModalAction;
use crate::modal::{Handler, ModalId};
use crate::page::ComponentSettings;

/// Partial handler table. `None` means "not specified here".
#[derive(Debug, Clone, Default)]
pub struct ModalSettings {
    pub on_confirm: Option<Handler>,
    pub on_cancel: Option<Handler>,
    pub on_close: Option<Handler>,
    pub on_escape: Option<Handler>,
    pub on_wrapper_click: Option<Handler>,
}

impl ModalSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn get(&self, action: ModalAction) -> Option<&Handler> {
        match action {
            ModalAction::Confirm => self.on_confirm.as_ref(),
            ModalAction::Cancel => self.on_cancel.as_ref(),
            ModalAction::Close => self.on_close.as_ref(),
            ModalAction::Escape => self.on_escape.as_ref(),
            ModalAction::WrapperClick => self.on_wrapper_click.as_ref(),
        }
    }

    pub fn set(&mut self, action: ModalAction, handler: Handler) {
        let slot = match action {
            ModalAction::Confirm => &mut self.on_confirm,
            ModalAction::Cancel => &mut self.on_cancel,
            ModalAction::Close => &mut self.on_close,
            ModalAction::Escape => &mut self.on_escape,
            ModalAction::WrapperClick => &mut self.on_wrapper_click,
        };
        *slot = Some(handler);
    }

    #[must_use]
    pub fn with(mut self, action: ModalAction, handler: Handler) -> Self {
        self.set(action, handler);
        self
    }

    /// Keys set in `self` win; the rest come from `base`.
    #[must_use]
    pub fn layered_over(&self, base: &Self) -> Self {
        let mut merged = base.clone();
        for action in ModalAction::ALL {
            if let Some(handler) = self.get(action) {
                merged.set(action, handler.clone());
            }
        }
        merged
    }
}

/// Settings a section holds for its modals.
#[derive(Debug, Clone, Default)]
pub struct ModalsSettings {
    /// Applied to every modal in the section before its own settings.
    pub default: ModalSettings,
    modals: HashMap<String, ModalSettings>,
}

impl ComponentSettings for ModalsSettings {
    const NAME: &'static str = "modals";
}

impl ModalsSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// User settings for one modal, keyed by the camel-cased id.
    pub fn set_modal(&mut self, id: &ModalId, settings: ModalSettings) {
        self.modals.insert(id.settings_key(), settings);
    }

    /// Store settings under an already camel-cased key.
    pub fn set_modal_key(&mut self, key: impl Into<String>, settings: ModalSettings) {
        self.modals.insert(key.into(), settings);
    }

    pub fn modal(&self, id: &ModalId) -> Option<&ModalSettings> {
        self.modals.get(&id.settings_key())
    }
}
