//! Resolution of a modal's handler table.

use crate::config::ModalAction;
use crate::modal::{Handler, ModalSettings};
use crate::page::ElementId;

/// Fully resolved configuration of one modal: every action has a handler.
#[derive(Debug, Clone)]
pub struct ModalConfig {
    pub element: ElementId,
    pub on_confirm: Handler,
    pub on_cancel: Handler,
    pub on_close: Handler,
    pub on_escape: Handler,
    pub on_wrapper_click: Handler,
}

impl ModalConfig {
    pub const fn handler(&self, action: ModalAction) -> &Handler {
        match action {
            ModalAction::Confirm => &self.on_confirm,
            ModalAction::Cancel => &self.on_cancel,
            ModalAction::Close => &self.on_close,
            ModalAction::Escape => &self.on_escape,
            ModalAction::WrapperClick => &self.on_wrapper_click,
        }
    }
}

/// Shallow merge of `user` over `defaults`.
///
/// Keys are taken from `user` first, then `defaults`; anything left
/// unspecified resolves to [`Handler::Close`].
pub fn resolve(
    defaults: &ModalSettings,
    user: Option<&ModalSettings>,
    element: ElementId,
) -> ModalConfig {
    let merged = user.map_or_else(|| defaults.clone(), |user| user.layered_over(defaults));
    let pick = |action: ModalAction| merged.get(action).cloned().unwrap_or(Handler::Close);

    ModalConfig {
        element,
        on_confirm: pick(ModalAction::Confirm),
        on_cancel: pick(ModalAction::Cancel),
        on_close: pick(ModalAction::Close),
        on_escape: pick(ModalAction::Escape),
        on_wrapper_click: pick(ModalAction::WrapperClick),
    }
}
