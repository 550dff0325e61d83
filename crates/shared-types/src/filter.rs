//! Filter controls, legend classification and click-derived filter values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Line separator used inside a datum's hover text.
pub const CUSTOMDATA_LINE_SEPARATOR: &str = "<br>";

/// Separator between a hover-text field name and its value.
pub const CUSTOMDATA_FIELD_SEPARATOR: char = ':';

/// The form controls that make up the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterControl {
    NodeType,
    Relationship,
    Layout,
}

impl FilterControl {
    pub const ALL: [FilterControl; 3] = [
        FilterControl::NodeType,
        FilterControl::Relationship,
        FilterControl::Layout,
    ];
}

impl fmt::Display for FilterControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterControl::NodeType => write!(f, "node type"),
            FilterControl::Relationship => write!(f, "relationship"),
            FilterControl::Layout => write!(f, "layout"),
        }
    }
}

/// What a legend entry filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    NodeType,
    Relationship,
}

impl FilterKind {
    /// Legend groups are headed "Node Types" / "Relationship Types"; any
    /// heading mentioning `Node` is a node group.
    pub fn from_heading(heading: &str) -> Self {
        if heading.contains("Node") {
            FilterKind::NodeType
        } else {
            FilterKind::Relationship
        }
    }

    pub fn control(self) -> FilterControl {
        match self {
            FilterKind::NodeType => FilterControl::NodeType,
            FilterKind::Relationship => FilterControl::Relationship,
        }
    }
}

/// A clickable `.legend-item`: its `span` label and the text of the group
/// heading it sits under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub heading: String,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            heading: heading.into(),
        }
    }

    pub fn kind(&self) -> FilterKind {
        FilterKind::from_heading(&self.heading)
    }

    pub fn label(&self) -> &str {
        self.label.trim()
    }
}

/// Filter value read out of a clicked datum's hover text.
///
/// The hover text is a display string, not structured data. The value is the
/// part after the first `:` of the first `<br>`-separated line, trimmed. No
/// markup is stripped: the server renders `<b>Label:</b> Person`, which
/// yields `</b> Person`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection(String);

impl FilterSelection {
    /// Returns `None` when the first line has no `:` or the value is blank.
    pub fn from_customdata(customdata: &str) -> Option<Self> {
        let first_line = customdata.split(CUSTOMDATA_LINE_SEPARATOR).next()?;
        let value = first_line.split(CUSTOMDATA_FIELD_SEPARATOR).nth(1)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Layout algorithms offered by the `#layoutType` selector. The layout itself
/// is computed server side; this only names the choice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    KamadaKawai,
    Spring,
    Circular,
    Other(String),
}

impl LayoutKind {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "kamada_kawai" | "" => LayoutKind::KamadaKawai,
            "spring" => LayoutKind::Spring,
            "circular" => LayoutKind::Circular,
            other => LayoutKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LayoutKind::KamadaKawai => "kamada_kawai",
            LayoutKind::Spring => "spring",
            LayoutKind::Circular => "circular",
            LayoutKind::Other(value) => value,
        }
    }
}
