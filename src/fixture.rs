//! Page fixtures: markup and a scripted event sequence, loaded from JSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::page::{ElementId, Page, Section};

/// An element and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFixture {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub children: Vec<Self>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFixture {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<NodeFixture>,
}

/// One step of a scripted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Click the element with this html id. `target` defaults to the element itself.
    Click {
        element: String,
        #[serde(default)]
        target: Option<String>,
    },
    /// Click the wrapper of a modal. `target` defaults to the wrapper itself.
    ClickWrapper {
        modal: String,
        #[serde(default)]
        target: Option<String>,
    },
    Escape,
    /// The video platform's readiness signal.
    VideoReady,
    /// A player state report, using the platform's numeric codes.
    VideoState { video: String, code: i32 },
    Wait { ms: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub sections: Vec<SectionFixture>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl PageFixture {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read page fixture {}", path.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("Invalid page fixture {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build every section into `page`.
    pub fn build(&self, page: &mut Page) -> Vec<Section> {
        self.sections
            .iter()
            .map(|fixture| {
                let section = page.add_section(fixture.name.clone());
                for node in &fixture.elements {
                    build_node(page, section.element, node);
                }
                debug!(
                    "Built section '{}' with {} top-level element(s)",
                    fixture.name,
                    fixture.elements.len()
                );
                section
            })
            .collect()
    }
}

fn build_node(page: &mut Page, parent: ElementId, node: &NodeFixture) -> ElementId {
    let doc = &mut page.document;
    let element = doc.create_element(node.tag.clone());
    if let Some(id) = &node.id {
        doc.set_attr(element, "id", id.clone());
    }
    for (name, value) in &node.attributes {
        doc.set_attr(element, name.clone(), value.clone());
    }
    for class in &node.classes {
        doc.add_class(element, class.clone());
    }
    doc.append_child(parent, element);

    for child in &node.children {
        build_node(page, element, child);
    }
    element
}
