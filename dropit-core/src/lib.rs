//! Dropit core
//!
//! Walks a Figma document tree and reshapes it into an [`App`]: the screens
//! of every page, the file's local styles with the attributes of the node
//! that uses them, and every image fill resolved to a public URL.
//!
//! - [`walker`] - pages, screens and image fills of a document tree
//! - [`styles`] - matching style definitions to the nodes that use them
//! - [`images`] - batched image URL resolution
//! - [`app`] - orchestration and read-only accessors

pub mod app;
pub mod error;
pub mod images;
pub mod model;
pub mod styles;
pub mod walker;

pub use app::{
    build_app, fetch_document, fetch_style, images_by_ids, list_components, list_images,
    list_styles,
};
pub use dropit_client::{FigmaClient, ImageFormat, ImageOptions};
pub use error::{DropitError, ErrorKind, Result};
pub use model::{
    App, ComponentSummary, ImageFill, ResolvedImage, ResolvedStyle, Screen, ScreenKind,
    StyleDetails,
};
