use std::str::FromStr;

use tracing::debug;

use crate::config::ModalAction;
use crate::modal::{
    CallbackOutcome, Handler, MediaBridge, ModalHandle, ModalId, ModalNames, ModalRegistry,
    VisibilityController,
};
use crate::page::{Document, ElementId, Page};

/// A click on a trigger element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    /// Element whose handler is running.
    pub trigger: ElementId,
    /// Element the click originated on, possibly a descendant of `trigger`.
    pub target: ElementId,
}

impl Click {
    /// A click that originated on the trigger itself.
    pub const fn direct(trigger: ElementId) -> Self {
        Self {
            trigger,
            target: trigger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The trigger names an action that does not exist.
    UnknownAction(String),
    /// A wrapper click that bubbled up from the modal's content.
    BubbledClick,
    /// No modal container could be found for the trigger.
    NoOwningModal,
    /// The owning container's id was never registered.
    UnknownModal(ModalId),
}

/// What the dispatcher did with an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The handler was `Close` and the modal was closed.
    Closed(ModalId),
    /// A callback ran. The modal was closed only if it returned `Close`.
    Callback {
        modal: ModalId,
        outcome: CallbackOutcome,
    },
    Ignored(IgnoreReason),
}

/// Routes trigger actions to the handler configured on the owning modal.
#[derive(Debug)]
pub struct ActionDispatcher {
    names: ModalNames,
}

impl ActionDispatcher {
    pub fn new(names: ModalNames) -> Self {
        Self { names }
    }

    /// Handle an action given by its markup name.
    pub fn handle(
        &self,
        action_name: &str,
        click: Click,
        page: &mut Page,
        registry: &ModalRegistry,
        visibility: &mut VisibilityController,
        media: &mut MediaBridge,
    ) -> Dispatch {
        match ModalAction::from_str(action_name) {
            Ok(action) => self.dispatch(action, click, page, registry, visibility, media),
            Err(_) => {
                debug!("Ignoring unknown modal action '{}'", action_name);
                Dispatch::Ignored(IgnoreReason::UnknownAction(action_name.to_string()))
            }
        }
    }

    /// Resolve the owning modal of `click` and run its handler for `action`.
    pub fn dispatch(
        &self,
        action: ModalAction,
        click: Click,
        page: &mut Page,
        registry: &ModalRegistry,
        visibility: &mut VisibilityController,
        media: &mut MediaBridge,
    ) -> Dispatch {
        if action == ModalAction::WrapperClick && click.target != click.trigger {
            return Dispatch::Ignored(IgnoreReason::BubbledClick);
        }

        let Some(container) = self.owning_modal(&page.document, action, click.trigger) else {
            debug!("No modal owns trigger {} for action '{}'", click.trigger, action);
            return Dispatch::Ignored(IgnoreReason::NoOwningModal);
        };
        let Some(id) = page
            .document
            .attr(container, &self.names.id_attr)
            .map(ModalId::new)
        else {
            return Dispatch::Ignored(IgnoreReason::NoOwningModal);
        };
        let Some(config) = registry.lookup(&id) else {
            debug!("Action '{}' targets unregistered modal '{}'", action, id);
            return Dispatch::Ignored(IgnoreReason::UnknownModal(id));
        };
        let handle = ModalHandle {
            id: id.clone(),
            element: config.element,
        };

        debug!("Dispatching '{}' to modal '{}'", action, id);
        match config.handler(action).clone() {
            Handler::Close => {
                visibility.close(&id, page, registry, media);
                Dispatch::Closed(id)
            }
            Handler::Callback(callback) => {
                let outcome = callback(&handle);
                if outcome == CallbackOutcome::Close {
                    visibility.close(&id, page, registry, media);
                }
                Dispatch::Callback { modal: id, outcome }
            }
        }
    }

    /// Modal container an action applies to.
    ///
    /// A wrapper click belongs to the modal inside the wrapper; every other
    /// action belongs to the nearest container enclosing the trigger.
    pub fn owning_modal(
        &self,
        document: &Document,
        action: ModalAction,
        trigger: ElementId,
    ) -> Option<ElementId> {
        let id_attr = &self.names.id_attr;
        let is_modal = |doc: &Document, e: ElementId| doc.has_attr(e, id_attr);
        match action {
            ModalAction::WrapperClick => document.find(trigger, is_modal).into_iter().next(),
            _ => document.closest(trigger, is_modal),
        }
    }
}
