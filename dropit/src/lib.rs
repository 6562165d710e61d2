pub mod handlers;

// Re-export the helpers the binary and tests lean on
pub use handlers::{
    Session, emit, expand_output_path, image_options, parse_node_ids, render_json, write_output,
};
