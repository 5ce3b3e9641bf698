//! Closed set of primitive type tags.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Type tag of a primitive.
///
/// Classification passes only ever rewrite this tag. Detector labels that
/// the pipeline does not interpret are kept verbatim in [`Kind::Raw`];
/// labels produced by the compound matcher live in [`Kind::Compound`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    Rectangle,
    Container,
    Row,
    Panel,
    Navigation,
    Footer,
    Image,
    Button,
    Dropdown,
    TextInput,
    Header,
    Paragraph,
    /// Corner marker drawn inside image placeholders.
    Triangle,
    /// Crossing diagonals centred in an image placeholder.
    CenteredIntersection,
    Intersection,
    CenteredLine,
    HorizontalLine,
    Point,
    Compound(String),
    Raw(String),
}

impl Kind {
    /// Parse a detector or configuration label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "rectangle" => Self::Rectangle,
            "container" => Self::Container,
            "row" => Self::Row,
            "panel" => Self::Panel,
            "navigation" => Self::Navigation,
            "footer" => Self::Footer,
            "image" => Self::Image,
            "button" => Self::Button,
            "dropdown" => Self::Dropdown,
            "text_input" | "textInput" => Self::TextInput,
            "header" => Self::Header,
            "paragraph" => Self::Paragraph,
            "triangle" => Self::Triangle,
            "centered_intersection" => Self::CenteredIntersection,
            "intersection" => Self::Intersection,
            "centered_line" => Self::CenteredLine,
            "horizontal_line" => Self::HorizontalLine,
            "point" => Self::Point,
            other => Self::Raw(other.to_owned()),
        }
    }

    /// Canonical label, as used in configuration tables and the compound DSL.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Container => "container",
            Self::Row => "row",
            Self::Panel => "panel",
            Self::Navigation => "navigation",
            Self::Footer => "footer",
            Self::Image => "image",
            Self::Button => "button",
            Self::Dropdown => "dropdown",
            Self::TextInput => "textInput",
            Self::Header => "header",
            Self::Paragraph => "paragraph",
            Self::Triangle => "triangle",
            Self::CenteredIntersection => "centered_intersection",
            Self::Intersection => "intersection",
            Self::CenteredLine => "centered_line",
            Self::HorizontalLine => "horizontal_line",
            Self::Point => "point",
            Self::Compound(label) | Self::Raw(label) => label,
        }
    }

    /// Containers and rows: the kinds that group other primitives.
    pub fn is_container_like(&self) -> bool {
        matches!(self, Self::Container | Self::Row)
    }
}

impl From<String> for Kind {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Compound(label) | Kind::Raw(label) => label,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
