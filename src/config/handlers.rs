use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ModalAction;

/// Handler value as written in the configuration file.
///
/// ```toml
/// on_cancel = "close"
/// on_confirm = { callback = "log" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerSpec {
    Close,
    Callback(String),
}

/// Per-modal handler overrides. Unset keys fall through to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTable {
    #[serde(default, alias = "onConfirm", skip_serializing_if = "Option::is_none")]
    pub on_confirm: Option<HandlerSpec>,
    #[serde(default, alias = "onCancel", skip_serializing_if = "Option::is_none")]
    pub on_cancel: Option<HandlerSpec>,
    #[serde(default, alias = "onClose", skip_serializing_if = "Option::is_none")]
    pub on_close: Option<HandlerSpec>,
    #[serde(default, alias = "onEscape", skip_serializing_if = "Option::is_none")]
    pub on_escape: Option<HandlerSpec>,
    #[serde(default, alias = "onWrapperClick", skip_serializing_if = "Option::is_none")]
    pub on_wrapper_click: Option<HandlerSpec>,
}

impl ActionTable {
    pub const fn get(&self, action: ModalAction) -> Option<&HandlerSpec> {
        match action {
            ModalAction::Confirm => self.on_confirm.as_ref(),
            ModalAction::Cancel => self.on_cancel.as_ref(),
            ModalAction::Close => self.on_close.as_ref(),
            ModalAction::Escape => self.on_escape.as_ref(),
            ModalAction::WrapperClick => self.on_wrapper_click.as_ref(),
        }
    }
}

/// Key under a section's `modals` table that applies to every modal.
pub const DEFAULT_MODAL_KEY: &str = "default";

/// Component configuration for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Handler tables keyed by camel-cased modal id, plus an optional
    /// [`DEFAULT_MODAL_KEY`] entry.
    #[serde(default)]
    pub modals: BTreeMap<String, ActionTable>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_parsing() {
        let table: ActionTable = toml::from_str(
            r#"
            on_cancel = "close"
            onConfirm = { callback = "log" }
            "#,
        )
        .unwrap();

        assert_eq!(table.get(ModalAction::Cancel), Some(&HandlerSpec::Close));
        assert_eq!(
            table.get(ModalAction::Confirm),
            Some(&HandlerSpec::Callback("log".to_string()))
        );
        assert_eq!(table.get(ModalAction::Escape), None);
    }

    #[test]
    fn test_unknown_handler_rejected() {
        let result: Result<ActionTable, _> = toml::from_str(r#"on_close = "explode""#);
        assert!(result.is_err());
    }
}
