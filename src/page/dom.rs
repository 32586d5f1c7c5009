//! Arena-backed element tree.
//!
//! The modal subsystem only needs a small slice of a document: parent/child
//! links, attributes, classes, keyboard focus and per-element scroll offsets.
//! Elements are never removed, so an [`ElementId`] stays valid for the life
//! of the [`Document`] that created it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    scroll_top: u32,
}

impl Element {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            classes: BTreeSet::new(),
            scroll_top: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    focused: Option<ElementId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding a single `html` root element.
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("html")],
            root: ElementId(0),
            focused: None,
        }
    }

    pub const fn root(&self) -> ElementId {
        self.root
    }

    /// Create a detached element. Attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: impl Into<String>) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::new(tag));
        id
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    /// Insert `wrapper` at `target`'s position and move `target` inside it.
    pub fn wrap(&mut self, target: ElementId, wrapper: ElementId) {
        self.detach(wrapper);
        if let Some(parent) = self.elements[target.0].parent {
            let siblings = &mut self.elements[parent.0].children;
            if let Some(index) = siblings.iter().position(|&c| c == target) {
                siblings[index] = wrapper;
            }
            self.elements[wrapper.0].parent = Some(parent);
            self.elements[target.0].parent = None;
        }
        self.append_child(wrapper, target);
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.elements[id.0].parent.take() {
            self.elements[parent.0].children.retain(|&c| c != id);
        }
    }

    pub fn tag(&self, id: ElementId) -> &str {
        &self.elements[id.0].tag
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements[id.0].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id.0].children
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements[id.0].attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, id: ElementId, name: &str) -> bool {
        self.elements[id.0].attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, id: ElementId, name: impl Into<String>, value: impl Into<String>) {
        self.elements[id.0]
            .attributes
            .insert(name.into(), value.into());
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements[id.0].classes.contains(class)
    }

    pub fn add_class(&mut self, id: ElementId, class: impl Into<String>) {
        self.elements[id.0].classes.insert(class.into());
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.elements[id.0].classes.remove(class);
    }

    pub fn scroll_top(&self, id: ElementId) -> u32 {
        self.elements[id.0].scroll_top
    }

    pub fn set_scroll_top(&mut self, id: ElementId, offset: u32) {
        self.elements[id.0].scroll_top = offset;
    }

    pub const fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn focus(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    /// Nearest element starting at `id` itself and walking up that satisfies `predicate`.
    pub fn closest(
        &self,
        id: ElementId,
        predicate: impl Fn(&Self, ElementId) -> bool,
    ) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if predicate(self, candidate) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// All descendants of `root` (excluding `root`) in document order that satisfy `predicate`.
    pub fn find(
        &self,
        root: ElementId,
        predicate: impl Fn(&Self, ElementId) -> bool,
    ) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if predicate(self, id) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        found
    }

    /// First element anywhere in the document whose `id` attribute equals `html_id`.
    pub fn element_by_html_id(&self, html_id: &str) -> Option<ElementId> {
        let root = self.root;
        if self.attr(root, "id") == Some(html_id) {
            return Some(root);
        }
        self.find(root, |doc, id| doc.attr(id, "id") == Some(html_id))
            .into_iter()
            .next()
    }
}
