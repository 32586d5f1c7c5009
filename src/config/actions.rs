use std::fmt;
use std::str::FromStr;

/// Actions a trigger element can request from its modal.
///
/// Markup names them in camel case (`confirm`, `wrapperClick`); each one is
/// bound to the matching `on*` handler key of a modal's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalAction {
    Confirm,
    Cancel,
    Close,
    Escape,
    WrapperClick,
}

impl ModalAction {
    pub const ALL: [Self; 5] = [
        Self::Confirm,
        Self::Cancel,
        Self::Close,
        Self::Escape,
        Self::WrapperClick,
    ];

    /// Name used in trigger markup.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Close => "close",
            Self::Escape => "escape",
            Self::WrapperClick => "wrapperClick",
        }
    }

    /// Configuration key of the handler bound to this action.
    pub const fn handler_key(self) -> &'static str {
        match self {
            Self::Confirm => "onConfirm",
            Self::Cancel => "onCancel",
            Self::Close => "onClose",
            Self::Escape => "onEscape",
            Self::WrapperClick => "onWrapperClick",
        }
    }
}

impl FromStr for ModalAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s.trim())
            .ok_or_else(|| format!("Unknown modal action: {s}"))
    }
}

impl fmt::Display for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(ModalAction::from_str("confirm").unwrap(), ModalAction::Confirm);
        assert_eq!(
            ModalAction::from_str("wrapperClick").unwrap(),
            ModalAction::WrapperClick
        );
        assert!(ModalAction::from_str("open").is_err());
        assert!(ModalAction::from_str("WrapperClick").is_err());
    }

    #[test]
    fn test_handler_keys() {
        let keys: Vec<_> = ModalAction::ALL.iter().map(|a| a.handler_key()).collect();
        assert_eq!(
            keys,
            vec!["onConfirm", "onCancel", "onClose", "onEscape", "onWrapperClick"]
        );
    }
}
