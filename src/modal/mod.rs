//! Modal dialogs attached to page sections.
//!
//! - [`resolve`] - merges default and user handler tables into a [`ModalConfig`]
//! - [`ModalRegistry`] - resolved configuration per modal id
//! - [`VisibilityController`] - open/closed state, scroll lock and focus
//! - [`MediaBridge`] - video players for video-backed modals
//! - [`ActionDispatcher`] - routes trigger actions to the owning modal's handler
//! - [`Modals`] - per-section component tying the above together
//!
//! Only one modal per page is expected to be open at a time. The page scroll
//! lock is a single flag, so closing any modal unlocks the page even if
//! another modal is still open.

mod component;
mod dispatch;
mod handler;
mod media;
mod registry;
mod resolver;
mod settings;
mod visibility;

use std::fmt;

use serde::Serialize;

pub use component::{ClickOutcome, ModalSnapshot, Modals};
pub use dispatch::{ActionDispatcher, Click, Dispatch, IgnoreReason};
pub use handler::{CallbackOutcome, CallbackRegistry, Handler, ModalCallback};
pub use media::{
    MediaBridge, PLAYER_HOST_PREFIX, PlayerOptions, PlayerState, VIDEO_MODAL_PREFIX, VideoId,
    VideoPlatform, VideoPlayer, is_video_url,
};
pub use registry::ModalRegistry;
pub use resolver::{ModalConfig, resolve};
pub use settings::{ModalSettings, ModalsSettings};
pub use visibility::VisibilityController;

use crate::page::{ElementId, Namespace};

/// Identifier of a modal, unique within its section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModalId(String);

impl ModalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which user settings for this modal are stored: the id with
    /// `-x` sequences folded into `X` (`video-modal` becomes `videoModal`).
    pub fn settings_key(&self) -> String {
        let mut key = String::with_capacity(self.0.len());
        let mut chars = self.0.chars().peekable();
        while let Some(c) = chars.next() {
            match chars.peek() {
                Some(next) if c == '-' && next.is_ascii_alphanumeric() => {
                    key.push(next.to_ascii_uppercase());
                    chars.next();
                }
                _ => key.push(c),
            }
        }
        key
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A modal as handed to callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalHandle {
    pub id: ModalId,
    pub element: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Class added to a wrapper while its modal is open.
pub const OPENED_CLASS: &str = "opened";

/// Namespaced attribute and class names used in modal markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalNames {
    /// Class of the generated wrapper around each modal.
    pub wrapper_class: String,
    /// Attribute carrying a modal container's id.
    pub id_attr: String,
    /// Attribute on open-triggers naming a modal id or a video URL.
    pub open_attr: String,
    /// Attribute on action triggers naming a [`crate::config::ModalAction`].
    pub action_attr: String,
    /// Flag attribute marking video triggers and video modals.
    pub video_attr: String,
}

impl ModalNames {
    pub fn new(namespace: &Namespace) -> Self {
        Self {
            wrapper_class: namespace.name("modal-wrapper"),
            id_attr: namespace.data_attr("modal-id"),
            open_attr: namespace.data_attr("modal-open"),
            action_attr: namespace.data_attr("modal-action"),
            video_attr: namespace.data_attr("modal-youtube"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_key() {
        assert_eq!(ModalId::new("video-modal").settings_key(), "videoModal");
        assert_eq!(ModalId::new("newsletter").settings_key(), "newsletter");
        assert_eq!(ModalId::new("sign-up-2").settings_key(), "signUp2");
        assert_eq!(ModalId::new("trailing-").settings_key(), "trailing-");
    }

    #[test]
    fn test_names_are_namespaced() {
        let names = ModalNames::new(&Namespace::new("imm"));
        assert_eq!(names.wrapper_class, "imm-modal-wrapper");
        assert_eq!(names.id_attr, "data-imm-modal-id");
        assert_eq!(names.open_attr, "data-imm-modal-open");
        assert_eq!(names.action_attr, "data-imm-modal-action");
        assert_eq!(names.video_attr, "data-imm-modal-youtube");
    }
}
