//! File input and output
//!
//! Provides:
//! - RON/JSON mesh documents and unwrap result files
//! - glTF mesh import
//! - PNG previews of UV layouts

mod document;
mod gltf;
mod preview;

pub use self::gltf::load_gltf;
pub use document::{DocumentError, DocumentFormat, MeshDocument, load_result, save_result};
pub use preview::{PreviewStyle, render_preview, save_preview};
