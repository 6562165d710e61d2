use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Response of `GET /v1/files/:key`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub document: Option<Node>,
    /// Local styles keyed by style id, in the order the API sent them
    #[serde(default)]
    pub styles: IndexMap<String, StyleDefinition>,
    /// Components keyed by node id
    #[serde(default)]
    pub components: IndexMap<String, Component>,
}

/// Generic node in the document tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    /// Text style payload, only present on TEXT nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Value>>,
    /// Lower-cased style category (`fill`, `text`, ...) to style id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<IndexMap<String, String>>,
}

impl Node {
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn fills(&self) -> &[Paint] {
        self.fills.as_deref().unwrap_or_default()
    }

    /// The style id this node uses for the given category key, if any.
    pub fn style_id(&self, category: &str) -> Option<&str> {
        self.styles
            .as_ref()
            .and_then(|styles| styles.get(category))
            .map(String::as_str)
    }

    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }
}

/// A fill or stroke. Only `type` and `imageRef` are interpreted, everything
/// else is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Paint {
    pub const IMAGE: &'static str = "IMAGE";

    /// The image reference when this is an image paint with a non-empty ref.
    pub fn image_ref(&self) -> Option<&str> {
        if self.paint_type != Self::IMAGE {
            return None;
        }
        self.image_ref.as_deref().filter(|r| !r.is_empty())
    }
}

/// Style category
///
/// Categories the API adds later decode as `Other` with their raw name kept,
/// so they still match nodes referencing them under the lower-cased name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StyleType {
    Fill,
    Text,
    Effect,
    Grid,
    Other(String),
}

impl StyleType {
    /// Key under which nodes reference a style of this category.
    pub fn lookup_key(&self) -> Cow<'_, str> {
        match self {
            StyleType::Fill => Cow::Borrowed("fill"),
            StyleType::Text => Cow::Borrowed("text"),
            StyleType::Effect => Cow::Borrowed("effect"),
            StyleType::Grid => Cow::Borrowed("grid"),
            StyleType::Other(raw) => Cow::Owned(raw.to_lowercase()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StyleType::Fill => "FILL",
            StyleType::Text => "TEXT",
            StyleType::Effect => "EFFECT",
            StyleType::Grid => "GRID",
            StyleType::Other(raw) => raw,
        }
    }
}

impl From<String> for StyleType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "FILL" => StyleType::Fill,
            "TEXT" => StyleType::Text,
            "EFFECT" => StyleType::Effect,
            "GRID" => StyleType::Grid,
            _ => StyleType::Other(raw),
        }
    }
}

impl From<StyleType> for String {
    fn from(style_type: StyleType) -> Self {
        match style_type {
            StyleType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the file-level `styles` map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDefinition {
    pub key: String,
    pub name: String,
    pub style_type: StyleType,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Published style returned by `GET /v1/styles/:key`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMetadata {
    pub key: String,
    #[serde(default, alias = "file_key")]
    pub file_key: Option<String>,
    #[serde(default, alias = "node_id")]
    pub node_id: Option<String>,
    #[serde(alias = "style_type")]
    pub style_type: StyleType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "thumbnail_url")]
    pub thumbnail_url: Option<String>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StyleResponse {
    pub meta: StyleMetadata,
}

/// Entry of the file-level `components` map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Response of `GET /v1/images/:key`
#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub err: Option<String>,
    #[serde(default)]
    pub images: IndexMap<String, Option<String>>,
}

/// Error body the API sends alongside non-success statuses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub err: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self, fallback: String) -> String {
        self.err.or(self.message).unwrap_or(fallback)
    }
}

/// Render format for exported node images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpg,
    Png,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            "pdf" => Ok(ImageFormat::Pdf),
            other => Err(format!("unsupported image format: {}", other)),
        }
    }
}

/// Export options forwarded to the images endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageOptions {
    pub format: Option<ImageFormat>,
    pub scale: Option<f64>,
}

impl ImageOptions {
    pub const MIN_SCALE: f64 = 0.01;
    pub const MAX_SCALE: f64 = 4.0;

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
}
