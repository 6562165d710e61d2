use dropit_client::{Paint, StyleType};
use serde::Serialize;
use serde_json::Value;

/// An image paint found on a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFill {
    pub node_id: String,
    pub image_ref: String,
    pub name: String,
}

/// An image fill joined with its rendered URL
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImage {
    pub node_id: String,
    pub name: String,
    /// `None` when the API returned no URL for the node
    pub image_url: Option<String>,
}

/// Attributes of the node that uses a style, picked by style category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleDetails {
    Fills {
        fills: Vec<Paint>,
    },
    Text {
        #[serde(rename = "textStyle")]
        text_style: Option<Value>,
    },
    Effects {
        effects: Vec<Value>,
    },
    Empty {},
}

/// A local style definition with the details of its first user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub style_id: String,
    pub style_key: String,
    pub name: String,
    pub style_type: StyleType,
    pub remote: bool,
    pub description: String,
    pub details: Option<StyleDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScreenKind {
    Frame,
    Group,
}

/// A top-level frame or group on a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: String,
    pub name: String,
    pub kind: ScreenKind,
    pub page_id: String,
    pub page_name: String,
    pub styles: Vec<ResolvedStyle>,
    pub images: Vec<ResolvedImage>,
}

/// Everything extracted from one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub name: String,
    pub screens: Vec<Screen>,
    pub styles: Vec<ResolvedStyle>,
    pub images: Vec<ResolvedImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    pub node_id: String,
    pub key: String,
    pub name: String,
    pub description: String,
}
