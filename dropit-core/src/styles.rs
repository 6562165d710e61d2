// Local style resolution
//
// Nodes reference styles through their `styles` map, keyed by the lower-cased
// style category. A style definition is matched to the first node in
// pre-order whose entry for the style's own category equals the style id,
// and that node's fills, text style or effects become the style details.

use crate::model::{ResolvedStyle, StyleDetails};
use crate::walker::PreOrder;
use dropit_client::{Node, StyleDefinition, StyleType};
use indexmap::IndexMap;
use tracing::debug;

/// First node below the document root that uses the style.
///
/// Only the first pre-order match is considered.
pub fn find_style_node<'a>(
    document: &'a Node,
    style_id: &str,
    style_type: &StyleType,
) -> Option<&'a Node> {
    let key = style_type.lookup_key();
    PreOrder::over(document.children()).find(|node| node.style_id(&key) == Some(style_id))
}

/// Every node below the document root that uses the style, pre-order.
pub fn style_usages<'a>(
    document: &'a Node,
    style_id: &str,
    style_type: &StyleType,
) -> Vec<&'a Node> {
    let key = style_type.lookup_key();
    PreOrder::over(document.children())
        .filter(|node| node.style_id(&key) == Some(style_id))
        .collect()
}

/// The attributes of `node` that carry a style of the given category.
pub fn style_details(node: &Node, style_type: &StyleType) -> StyleDetails {
    match style_type {
        StyleType::Fill => StyleDetails::Fills {
            fills: node.fills().to_vec(),
        },
        StyleType::Text => StyleDetails::Text {
            text_style: node.style.clone(),
        },
        StyleType::Effect => StyleDetails::Effects {
            effects: node.effects.clone().unwrap_or_default(),
        },
        StyleType::Grid | StyleType::Other(_) => StyleDetails::Empty {},
    }
}

pub fn resolve_style(
    style_id: &str,
    definition: &StyleDefinition,
    document: &Node,
) -> ResolvedStyle {
    let details = find_style_node(document, style_id, &definition.style_type)
        .map(|node| style_details(node, &definition.style_type));

    if details.is_none() {
        debug!("No node uses style {} ({})", definition.name, style_id);
    }

    ResolvedStyle {
        style_id: style_id.to_string(),
        style_key: definition.key.clone(),
        name: definition.name.clone(),
        style_type: definition.style_type.clone(),
        remote: definition.remote,
        description: definition.description.clone().unwrap_or_default(),
        details,
    }
}

/// Resolve every definition of the style map, keeping the map's order.
pub fn resolve_styles(
    styles: &IndexMap<String, StyleDefinition>,
    document: &Node,
) -> Vec<ResolvedStyle> {
    styles
        .iter()
        .map(|(style_id, definition)| resolve_style(style_id, definition, document))
        .collect()
}
