use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::page::ElementId;

/// Settings owned by a section on behalf of one component.
pub trait ComponentSettings: Any {
    /// Component name, used in logs.
    const NAME: &'static str;
}

/// Typed per-component settings map.
///
/// Each component stores exactly one settings value, keyed by its type, and
/// reads it back through [`SectionSettings::get`].
#[derive(Default)]
pub struct SectionSettings {
    entries: HashMap<TypeId, Box<dyn Any>>,
}

impl SectionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store settings for a component, replacing any previous value.
    pub fn insert<T: ComponentSettings>(&mut self, settings: T) {
        debug!("Storing settings for component '{}'", T::NAME);
        self.entries.insert(TypeId::of::<T>(), Box::new(settings));
    }

    pub fn get<T: ComponentSettings>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|settings| settings.downcast_ref::<T>())
    }

    /// Settings for `T`, inserting `T::default()` first if none are stored.
    pub fn get_or_default<T: ComponentSettings + Default>(&mut self) -> &mut T {
        self.entries
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut::<T>()
            .unwrap_or_else(|| unreachable!("settings are keyed by their own TypeId"))
    }
}

impl fmt::Debug for SectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionSettings")
            .field("components", &self.entries.len())
            .finish()
    }
}

/// A page section that components attach to.
#[derive(Debug)]
pub struct Section {
    pub name: String,
    pub element: ElementId,
    pub settings: SectionSettings,
}

impl Section {
    pub fn new(name: impl Into<String>, element: ElementId) -> Self {
        Self {
            name: name.into(),
            element,
            settings: SectionSettings::new(),
        }
    }
}
