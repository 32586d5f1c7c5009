use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::info;

use crate::modal::ModalHandle;

/// What a callback wants done with its modal after it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackOutcome {
    /// Leave the modal as it is.
    #[default]
    Keep,
    /// Run the modal's close path.
    Close,
}

pub type ModalCallback = Rc<dyn Fn(&ModalHandle) -> CallbackOutcome>;

/// Behaviour bound to one modal action.
#[derive(Clone)]
pub enum Handler {
    /// Close the modal.
    Close,
    /// Hand the modal to user code. The modal is only closed if the callback
    /// returns [`CallbackOutcome::Close`].
    Callback(ModalCallback),
}

impl Handler {
    pub fn callback(f: impl Fn(&ModalHandle) -> CallbackOutcome + 'static) -> Self {
        Self::Callback(Rc::new(f))
    }

    pub const fn is_close(&self) -> bool {
        matches!(self, Self::Close)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Close => f.write_str("Close"),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Named callbacks that configuration files can refer to.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, ModalCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the callbacks the command line exposes:
    ///
    /// - `log` - log the action and keep the modal open
    /// - `dismiss` - log the action and close the modal
    /// - `keep` - do nothing
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("log", |modal| {
            info!("Callback invoked for modal '{}'", modal.id);
            CallbackOutcome::Keep
        });
        registry.register("dismiss", |modal| {
            info!("Dismissing modal '{}' from callback", modal.id);
            CallbackOutcome::Close
        });
        registry.register("keep", |_| CallbackOutcome::Keep);
        registry
    }

    /// Register a callback. A callback with the same name is replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&ModalHandle) -> CallbackOutcome + 'static,
    ) {
        self.callbacks.insert(name.into(), Rc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.callbacks.get(name).cloned().map(Handler::Callback)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.callbacks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &self.names())
            .finish()
    }
}
