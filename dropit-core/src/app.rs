// App assembly and read-only accessors over a remote document

use crate::error::{DropitError, Result};
use crate::images::resolve_images;
use crate::model::{App, ComponentSummary, ResolvedImage, ResolvedStyle, Screen, ScreenKind};
use crate::styles::resolve_styles;
use crate::walker::{self, FRAME};
use dropit_client::{FigmaClient, FigmaFile, ImageOptions, Node, StyleMetadata};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::info;

/// Fetch a document, mapping failures to [`DropitError::DocumentFetch`].
pub async fn fetch_document(client: &FigmaClient, file_id: &str) -> Result<FigmaFile> {
    client
        .fetch_file(file_id)
        .await
        .map_err(|source| DropitError::DocumentFetch {
            file_id: file_id.to_string(),
            source,
        })
}

/// The document root, or [`DropitError::InvalidDocument`] when the response
/// carried none.
pub fn document_root<'a>(file: &'a FigmaFile, file_id: &str) -> Result<&'a Node> {
    file.document.as_ref().ok_or_else(|| {
        DropitError::InvalidDocument(format!("file {} has no document root", file_id))
    })
}

/// Build the whole [`App`] for a document.
///
/// Either every remote call succeeds and a complete app is returned, or the
/// first failure is returned.
pub async fn build_app(client: &FigmaClient, file_id: &str) -> Result<App> {
    info!("Building app for file {}", file_id);

    let file = fetch_document(client, file_id).await?;
    let document = document_root(&file, file_id)?;

    let styles = resolve_styles(&file.styles, document);
    let fills = walker::image_fills(document);
    let images = resolve_images(client, file_id, &fills, &ImageOptions::default()).await?;

    let mut screens = Vec::new();
    for page in walker::pages(document) {
        for screen in walker::screens(page) {
            screens.push(assemble_screen(page, screen, &styles, &images));
        }
    }

    info!(
        "Built app '{}': {} screens, {} styles, {} images",
        file.name,
        screens.len(),
        styles.len(),
        images.len()
    );

    Ok(App {
        name: file.name.clone(),
        screens,
        styles,
        images,
    })
}

/// Scope the document-wide style and image lists to one screen's subtree.
fn assemble_screen(
    page: &Node,
    screen: &Node,
    styles: &[ResolvedStyle],
    images: &[ResolvedImage],
) -> Screen {
    let ids = walker::subtree_ids(screen);
    let used_styles: HashSet<&str> = walker::descendants(screen)
        .filter_map(|node| node.styles.as_ref())
        .flat_map(|styles| styles.values().map(String::as_str))
        .collect();

    Screen {
        id: screen.id.clone(),
        name: screen.name.clone(),
        kind: if screen.is_type(FRAME) {
            ScreenKind::Frame
        } else {
            ScreenKind::Group
        },
        page_id: page.id.clone(),
        page_name: page.name.clone(),
        styles: styles
            .iter()
            .filter(|style| used_styles.contains(style.style_id.as_str()))
            .cloned()
            .collect(),
        images: images
            .iter()
            .filter(|image| ids.contains(image.node_id.as_str()))
            .cloned()
            .collect(),
    }
}

/// Resolved images of a document, rendered with the given options.
pub async fn list_images(
    client: &FigmaClient,
    file_id: &str,
    options: &ImageOptions,
) -> Result<Vec<ResolvedImage>> {
    let file = fetch_document(client, file_id).await?;
    let document = document_root(&file, file_id)?;
    let fills = walker::image_fills(document);
    resolve_images(client, file_id, &fills, options).await
}

pub async fn list_components(client: &FigmaClient, file_id: &str) -> Result<Vec<ComponentSummary>> {
    let file = fetch_document(client, file_id).await?;
    Ok(file
        .components
        .into_iter()
        .map(|(node_id, component)| ComponentSummary {
            node_id,
            key: component.key,
            name: component.name,
            description: component.description,
        })
        .collect())
}

pub async fn list_styles(client: &FigmaClient, file_id: &str) -> Result<Vec<ResolvedStyle>> {
    let file = fetch_document(client, file_id).await?;
    let document = document_root(&file, file_id)?;
    Ok(resolve_styles(&file.styles, document))
}

pub async fn fetch_style(client: &FigmaClient, key: &str) -> Result<StyleMetadata> {
    client
        .fetch_style(key)
        .await
        .map_err(|source| DropitError::StyleFetch {
            key: key.to_string(),
            source,
        })
}

/// Rendered image URLs for an explicit list of node ids.
pub async fn images_by_ids(
    client: &FigmaClient,
    file_id: &str,
    node_ids: &[String],
    options: &ImageOptions,
) -> Result<IndexMap<String, Option<String>>> {
    client
        .fetch_image_urls(file_id, node_ids, options)
        .await
        .map_err(|source| DropitError::ImageFetch {
            file_id: file_id.to_string(),
            source,
        })
}
