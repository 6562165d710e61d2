// Document tree walking: pages, screens and image fills

use crate::model::ImageFill;
use dropit_client::Node;
use std::collections::HashSet;
use tracing::debug;

pub const PAGE: &str = "CANVAS";
pub const FRAME: &str = "FRAME";
pub const GROUP: &str = "GROUP";

/// Root children that are pages, in document order
pub fn pages(document: &Node) -> Vec<&Node> {
    document
        .children()
        .iter()
        .filter(|node| node.is_type(PAGE))
        .collect()
}

/// Page children that are frames or groups, in document order
pub fn screens(page: &Node) -> Vec<&Node> {
    page.children()
        .iter()
        .filter(|node| node.is_type(FRAME) || node.is_type(GROUP))
        .collect()
}

/// Depth-first pre-order iterator over a forest of nodes.
///
/// Uses an explicit stack, so arbitrarily deep trees do not grow the call
/// stack. The tree is owned data and therefore acyclic.
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrder<'a> {
    pub fn over(nodes: &'a [Node]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// `node` followed by everything below it, pre-order
pub fn descendants(node: &Node) -> PreOrder<'_> {
    PreOrder { stack: vec![node] }
}

/// Ids of `node` and every node below it
pub fn subtree_ids(node: &Node) -> HashSet<&str> {
    descendants(node).map(|n| n.id.as_str()).collect()
}

/// Every image fill below the document root, in pre-order.
///
/// A node carrying several image paints yields one record per paint.
pub fn image_fills(document: &Node) -> Vec<ImageFill> {
    let fills: Vec<ImageFill> = PreOrder::over(document.children())
        .flat_map(|node| {
            node.fills().iter().filter_map(move |paint| {
                paint.image_ref().map(|image_ref| ImageFill {
                    node_id: node.id.clone(),
                    image_ref: image_ref.to_string(),
                    name: node.name.clone(),
                })
            })
        })
        .collect();

    debug!("Found {} image fills in {}", fills.len(), document.name);
    fills
}
