use crate::error::{DropitError, Result};
use crate::model::{ImageFill, ResolvedImage};
use dropit_client::{FigmaClient, ImageOptions};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Join image fills with the URL map returned by the images endpoint.
///
/// Fills whose node is missing from the map, or mapped to null, get no URL.
pub fn join_image_urls(
    fills: &[ImageFill],
    urls: &IndexMap<String, Option<String>>,
) -> Vec<ResolvedImage> {
    fills
        .iter()
        .map(|fill| {
            let image_url = urls.get(&fill.node_id).cloned().flatten();
            if image_url.is_none() {
                warn!("No image URL for node {} ({})", fill.node_id, fill.name);
            }
            ResolvedImage {
                node_id: fill.node_id.clone(),
                name: fill.name.clone(),
                image_url,
            }
        })
        .collect()
}

/// Resolve image fills to public URLs with a single batched request.
///
/// Node ids are sent in fill order without deduplication. Nothing is
/// requested when there are no fills.
pub async fn resolve_images(
    client: &FigmaClient,
    file_id: &str,
    fills: &[ImageFill],
    options: &ImageOptions,
) -> Result<Vec<ResolvedImage>> {
    if fills.is_empty() {
        debug!("No image fills in {}, skipping image request", file_id);
        return Ok(Vec::new());
    }

    let node_ids: Vec<String> = fills.iter().map(|fill| fill.node_id.clone()).collect();
    let urls = client
        .fetch_image_urls(file_id, &node_ids, options)
        .await
        .map_err(|source| DropitError::ImageFetch {
            file_id: file_id.to_string(),
            source,
        })?;

    Ok(join_image_urls(fills, &urls))
}
