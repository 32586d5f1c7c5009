use std::collections::HashMap;

use tracing::{debug, info};

use crate::modal::{MediaBridge, ModalId, ModalNames, ModalRegistry, ModalState, OPENED_CLASS};
use crate::page::Page;

/// Tracks which modals are open and applies the page-level side effects of
/// opening and closing them.
///
/// `Closed --open()--> Open --close()--> Closed`. Both transitions are
/// idempotent: repeating one settles in the same state.
#[derive(Debug)]
pub struct VisibilityController {
    names: ModalNames,
    states: HashMap<ModalId, ModalState>,
}

impl VisibilityController {
    pub fn new(names: ModalNames) -> Self {
        Self {
            names,
            states: HashMap::new(),
        }
    }

    /// Start tracking a modal in the closed state.
    pub fn track(&mut self, id: ModalId) {
        self.states.insert(id, ModalState::Closed);
    }

    pub fn state(&self, id: &ModalId) -> ModalState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// The open modal, if any. With several open, the first by id.
    pub fn open_modal(&self) -> Option<&ModalId> {
        self.states
            .iter()
            .filter(|(_, state)| **state == ModalState::Open)
            .map(|(id, _)| id)
            .min()
    }

    /// Open a modal: mark its wrapper, lock page scroll and focus the modal.
    ///
    /// Opening an open modal repeats the side effects, which leaves the page
    /// as it was apart from moving focus back into the modal.
    pub fn open(&mut self, id: &ModalId, page: &mut Page, registry: &ModalRegistry) -> bool {
        let Some(config) = registry.lookup(id) else {
            debug!("Ignoring open for unknown modal '{}'", id);
            return false;
        };
        let element = config.element;

        info!("Opening modal '{}'", id);
        self.states.insert(id.clone(), ModalState::Open);

        let wrapper_class = &self.names.wrapper_class;
        if let Some(wrapper) = page
            .document
            .closest(element, |doc, e| doc.has_class(e, wrapper_class))
        {
            page.document.add_class(wrapper, OPENED_CLASS);
        }
        page.scroll_lock().lock();
        page.document.focus(element);
        true
    }

    /// Close a modal and clean up after it.
    ///
    /// Every step runs regardless of the others: unmark the wrapper, stop
    /// and rewind the video, unlock page scroll, focus the page's scroll
    /// container and scroll the modal back to its top.
    pub fn close(
        &mut self,
        id: &ModalId,
        page: &mut Page,
        registry: &ModalRegistry,
        media: &mut MediaBridge,
    ) -> bool {
        let Some(config) = registry.lookup(id) else {
            debug!("Ignoring close for unknown modal '{}'", id);
            return false;
        };
        let element = config.element;

        info!("Closing modal '{}'", id);
        self.states.insert(id.clone(), ModalState::Closed);

        let wrapper_class = &self.names.wrapper_class;
        match page
            .document
            .closest(element, |doc, e| doc.has_class(e, wrapper_class))
        {
            Some(wrapper) => page.document.remove_class(wrapper, OPENED_CLASS),
            None => debug!("Modal '{}' has no wrapper to unmark", id),
        }

        if page.document.attr(element, &self.names.video_attr) == Some("true") {
            media.stop(id);
        }

        page.scroll_lock().unlock();
        let container = page.scroll_container();
        page.document.focus(container);
        page.document.set_scroll_top(element, 0);
        true
    }
}
