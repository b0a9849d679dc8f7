use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::foundation::value::Value;
use crate::svg::selector::Selector;

/// Control/value semantics of a declared property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// Free text.
    Text,
    /// One color out of a palette.
    Color,
    /// Number within bounds.
    Range,
    /// One string out of a list.
    Select,
    /// A `type` the parser does not know. Kept so the UI can report it.
    Unknown(String),
}

impl PropertyKind {
    /// Parse the `type` attribute. Empty input means text.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "text" => Self::Text,
            "color" => Self::Color,
            "range" => Self::Range,
            "select" => Self::Select,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Name as written in schema markup.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Color => "color",
            Self::Range => "range",
            Self::Select => "select",
            Self::Unknown(raw) => raw,
        }
    }
}

impl Serialize for PropertyKind {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

/// Where a property's value is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// CSS custom property such as `--frame-rotation`.
    StyleVar(String),
    /// Element inside the frame document.
    Element(Selector),
    /// Empty or unrecognized target; the applier ignores it.
    Unsupported(String),
}

impl Target {
    /// Classify a raw `target` attribute.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("--") && raw.len() > 2 {
            return Self::StyleVar(raw.to_owned());
        }
        if raw.starts_with('#') || raw.starts_with('.') {
            if let Some(sel) = Selector::parse(raw) {
                return Self::Element(sel);
            }
        }
        Self::Unsupported(raw.to_owned())
    }

    /// Target as written in schema markup.
    pub fn to_markup(&self) -> String {
        match self {
            Self::StyleVar(name) => name.clone(),
            Self::Element(sel) => sel.to_string(),
            Self::Unsupported(raw) => raw.clone(),
        }
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_markup())
    }
}

/// Range bounds. Invalid or missing values fall back to `0`, `100` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeBounds {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Step between values.
    pub step: f64,
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

/// Attribute sentinel meaning "replace the element's text".
pub const TEXT_CONTENT_ATTR: &str = "textContent";

/// One declared, user-editable facet of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    /// Unique name inside the schema; also the state key.
    pub name: String,
    /// Control and value semantics.
    pub kind: PropertyKind,
    /// Where the value is written.
    pub target: Target,
    /// Attribute to set on an element target ([`TEXT_CONTENT_ATTR`] for text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Default value; a number for range properties.
    pub default_value: Value,
    /// Control label.
    pub label: String,
    /// Suffix appended when the value is written into the document.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit: String,
    /// Range bounds (range properties only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeBounds>,
    /// Select options in declaration order (select properties only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Named palette (color properties only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<String>,
}

impl PropertyDescriptor {
    /// Whether the applier replaces the target element's text.
    pub fn writes_text_content(&self) -> bool {
        self.attribute.as_deref() == Some(TEXT_CONTENT_ATTR)
    }

    /// Companion state key holding [`crate::TextStyles`] for this property.
    pub fn styles_key(&self) -> String {
        format!("{}Styles", self.name)
    }

    /// `value` followed by the unit suffix.
    pub fn with_unit(&self, value: &Value) -> String {
        format!("{value}{}", self.unit)
    }
}

/// Ordered mapping of property name to descriptor, in declaration order.
///
/// A schema is built once per frame load and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    properties: IndexMap<String, PropertyDescriptor>,
}

impl Schema {
    /// Insert a descriptor. A duplicate name replaces the earlier descriptor in place.
    pub(crate) fn insert(&mut self, descriptor: PropertyDescriptor) {
        self.properties.insert(descriptor.name.clone(), descriptor);
    }

    /// Copy of the schema keeping only descriptors for which `keep` holds, in order.
    pub(crate) fn filtered(&self, keep: impl Fn(&PropertyDescriptor) -> bool) -> Schema {
        let mut out = Schema::default();
        for prop in self.iter() {
            if keep(prop) {
                out.insert(prop.clone());
            }
        }
        out
    }

    /// Descriptor by name.
    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the schema declares no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.values()
    }

    /// Property names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// `(name, default)` pairs in declaration order, for seeding state.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, Value)> {
        self.iter()
            .map(|p| (p.name.as_str(), p.default_value.clone()))
    }

    /// First descriptor writing to `target` (as written in markup).
    pub fn find_by_target(&self, target: &str) -> Option<&PropertyDescriptor> {
        self.iter().find(|p| p.target.to_markup() == target)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(self.properties.values())
    }
}
