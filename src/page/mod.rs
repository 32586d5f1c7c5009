//! Page model consumed by the modal subsystem.
//!
//! - [`Document`] - element tree with attributes, classes, focus and scroll offsets
//! - [`Namespace`] - maps logical names to prefixed attribute/class names
//! - [`ScrollLock`] - page scroll lock contract
//! - [`Section`] - a page region with its typed per-component settings

mod dom;
mod namespace;
mod scroll;
mod section;

pub use dom::{Document, ElementId};
pub use namespace::{DEFAULT_PREFIX, Namespace};
pub use scroll::{HtmlScrollLock, ScrollLock};
pub use section::{ComponentSettings, Section, SectionSettings};

/// A document together with the page-wide services components share.
pub struct Page {
    pub document: Document,
    pub namespace: Namespace,
    scroll_lock: Box<dyn ScrollLock>,
    scroll_container: ElementId,
}

impl Page {
    /// Create a page with an `html > body` skeleton; `body` is the primary
    /// scroll container.
    pub fn new(namespace: Namespace) -> Self {
        Self::with_scroll_lock(namespace, Box::new(HtmlScrollLock::default()))
    }

    pub fn with_scroll_lock(namespace: Namespace, scroll_lock: Box<dyn ScrollLock>) -> Self {
        let mut document = Document::new();
        let body = document.create_element("body");
        document.append_child(document.root(), body);
        Self {
            document,
            namespace,
            scroll_lock,
            scroll_container: body,
        }
    }

    pub const fn scroll_container(&self) -> ElementId {
        self.scroll_container
    }

    pub fn scroll_lock(&mut self) -> &mut dyn ScrollLock {
        self.scroll_lock.as_mut()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    /// Append a new `section` element to the scroll container.
    pub fn add_section(&mut self, name: impl Into<String>) -> Section {
        let name = name.into();
        let element = self.document.create_element("section");
        self.document.set_attr(element, "id", name.clone());
        self.document.append_child(self.scroll_container, element);
        Section::new(name, element)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("namespace", &self.namespace)
            .field("scroll_locked", &self.is_scroll_locked())
            .field("scroll_container", &self.scroll_container)
            .finish_non_exhaustive()
    }
}
