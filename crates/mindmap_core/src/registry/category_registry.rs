//! Category archetype registry.

use crate::model::archetype::{Archetype, Rgb, ShapeKind, DEFAULT_ARCHETYPE};
use crate::model::node::Node;
use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Built-in category names.
pub const CATEGORY_TRIGGER: &str = "Trigger";
pub const CATEGORY_EVENT_THOUGHT: &str = "Event/Thought";
pub const CATEGORY_THEME: &str = "Theme";
pub const CATEGORY_FEELING: &str = "Feeling";
pub const CATEGORY_EVIDENCE: &str = "Evidence";
pub const CATEGORY_QUESTIONS: &str = "Questions";
pub const CATEGORY_SOLUTIONS: &str = "Solutions";
pub const CATEGORY_RAW_EMOTION: &str = "Raw Emotion";

const BUILTIN_CATEGORIES: &[(&str, Archetype)] = &[
    (
        CATEGORY_TRIGGER,
        Archetype::new(ShapeKind::Octahedron, 1.0, Rgb(0xff0000)),
    ),
    (
        CATEGORY_EVENT_THOUGHT,
        Archetype::new(ShapeKind::Sphere, 1.0, Rgb(0x00ff00)),
    ),
    (
        CATEGORY_THEME,
        Archetype::new(ShapeKind::Dodecahedron, 1.3, Rgb(0x0000ff)),
    ),
    (
        CATEGORY_FEELING,
        Archetype::new(ShapeKind::Icosahedron, 1.2, Rgb(0xffff00)),
    ),
    (
        CATEGORY_EVIDENCE,
        Archetype::new(ShapeKind::Sphere, 1.0, Rgb::WHITE),
    ),
    (
        CATEGORY_QUESTIONS,
        Archetype::new(ShapeKind::Sphere, 1.0, Rgb(0xff00ff)),
    ),
    (
        CATEGORY_SOLUTIONS,
        Archetype::new(ShapeKind::Sphere, 1.0, Rgb(0x00ffff)),
    ),
    (
        CATEGORY_RAW_EMOTION,
        Archetype::new(ShapeKind::Torus, 1.0, Rgb(0xffa500)),
    ),
];

/// Category registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRegistryError {
    EmptyName,
    Duplicate(String),
}

impl Display for CategoryRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "category name must not be blank"),
            Self::Duplicate(name) => write!(f, "category already registered: {name}"),
        }
    }
}

impl Error for CategoryRegistryError {}

/// Maps category names to archetypes.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    archetypes: BTreeMap<String, Archetype>,
    order: Vec<String>,
    fallback: Archetype,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl CategoryRegistry {
    /// Registry without any category; everything resolves to the fallback.
    pub fn empty() -> Self {
        Self {
            archetypes: BTreeMap::new(),
            order: Vec::new(),
            fallback: DEFAULT_ARCHETYPE,
        }
    }

    /// Registry preloaded with the built-in mind-map palette.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (name, archetype) in BUILTIN_CATEGORIES {
            registry.archetypes.insert((*name).to_string(), *archetype);
            registry.order.push((*name).to_string());
        }
        registry
    }

    /// Registers one custom category.
    pub fn register(
        &mut self,
        name: &str,
        archetype: Archetype,
    ) -> Result<(), CategoryRegistryError> {
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(CategoryRegistryError::EmptyName);
        }
        if self.archetypes.contains_key(normalized) {
            return Err(CategoryRegistryError::Duplicate(normalized.to_string()));
        }
        self.archetypes.insert(normalized.to_string(), archetype);
        self.order.push(normalized.to_string());
        Ok(())
    }

    /// Resolves a category, falling back to the default archetype.
    pub fn resolve(&self, category: &str) -> &Archetype {
        match self.archetypes.get(category) {
            Some(archetype) => archetype,
            None => {
                debug!("event=category_fallback module=registry status=ok");
                &self.fallback
            }
        }
    }

    pub fn is_known(&self, category: &str) -> bool {
        self.archetypes.contains_key(category)
    }

    /// Registered categories in registration order.
    pub fn known_categories(&self) -> &[String] {
        &self.order
    }

    pub fn fallback(&self) -> &Archetype {
        &self.fallback
    }

    /// Distinct categories used by `nodes`, in first-seen order.
    ///
    /// Unknown categories are reported as well; the list reflects the graph,
    /// not the registry.
    pub fn categories_in_use<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for node in nodes {
            if seen.insert(node.category.as_str()) {
                ordered.push(node.category.clone());
            }
        }
        ordered
    }
}
