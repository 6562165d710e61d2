pub mod client;
pub mod error;
pub mod model;

pub use client::{DEFAULT_BASE_URL, FigmaClient};
pub use error::{ClientError, Result};
pub use model::{
    Component, FigmaFile, ImageFormat, ImageOptions, Node, Paint, StyleDefinition, StyleMetadata,
    StyleType,
};
