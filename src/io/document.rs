//! Mesh documents and result files
//!
//! Supports saving and loading meshes with their unwrap settings in RON
//! (Rusty Object Notation) or JSON, picked by file extension.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::UnwrapConfig;
use crate::mesh::{FaceId, PolyMesh};
use crate::unwrap::{FaceUnwrapper, UnwrapError, UnwrapResult};

/// On-disk formats understood by the tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Rusty Object Notation (`.ron`)
    Ron,
    /// JSON (`.json`)
    Json,
    /// glTF 2.0, text or binary (`.gltf`, `.glb`); import only
    Gltf,
}

impl DocumentFormat {
    /// Detect the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or unknown
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "ron" => Ok(Self::Ron),
            "json" => Ok(Self::Json),
            "gltf" | "glb" => Ok(Self::Gltf),
            _ => Err(DocumentError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A mesh together with the settings to unwrap it with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDocument {
    /// Document name
    pub name: String,
    /// Document version for compatibility
    pub version: u32,
    /// The mesh to unwrap
    pub mesh: PolyMesh,
    /// Unwrap settings
    #[serde(default)]
    pub config: UnwrapConfig,
}

impl MeshDocument {
    /// Create a document with default settings
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: PolyMesh) -> Self {
        Self {
            name: name.into(),
            version: 1,
            mesh,
            config: UnwrapConfig::default(),
        }
    }

    /// Set the unwrap settings
    #[must_use]
    pub fn with_config(mut self, config: UnwrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Unwrap every live face of the mesh, in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the configured island policy rejects the layout
    pub fn unwrap_mesh(&self) -> Result<UnwrapResult<FaceId>, UnwrapError> {
        let faces: Vec<FaceId> = self.mesh.face_ids().collect();
        FaceUnwrapper::new(&self.mesh, &faces)
            .with_config(self.config.clone())
            .unwrap_to_square()
    }

    /// Load a document, picking RON or JSON by extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not RON or JSON, or
    /// fails to deserialize
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        match DocumentFormat::from_path(path)? {
            DocumentFormat::Ron => Self::load_ron(path),
            DocumentFormat::Json => Self::load_json(path),
            DocumentFormat::Gltf => Err(DocumentError::UnsupportedFormat(format!(
                "{} is a glTF file, import it instead",
                path.display()
            ))),
        }
    }

    /// Save the document, picking RON or JSON by extension
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not RON or JSON, or the file
    /// cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        write_document(self, path)
    }

    /// Load a document from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        read_with(path, |content| {
            ron::from_str(content).map_err(|e| DocumentError::DeserializeError(e.to_string()))
        })
    }

    /// Load a document from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        read_with(path, |content| {
            serde_json::from_str(content)
                .map_err(|e| DocumentError::DeserializeError(e.to_string()))
        })
    }
}

/// Save an unwrap result, picking RON or JSON by extension
///
/// # Errors
///
/// Returns an error if the extension is not RON or JSON, or the file cannot
/// be written
pub fn save_result<F: Serialize>(
    result: &UnwrapResult<F>,
    path: impl AsRef<Path>,
) -> Result<(), DocumentError> {
    write_document(result, path)
}

/// Load an unwrap result, picking RON or JSON by extension
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not RON or JSON, or fails
/// to deserialize
pub fn load_result<F: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<UnwrapResult<F>, DocumentError> {
    let path = path.as_ref();
    match DocumentFormat::from_path(path)? {
        DocumentFormat::Ron => read_with(path, |content| {
            ron::from_str(content).map_err(|e| DocumentError::DeserializeError(e.to_string()))
        }),
        DocumentFormat::Json => read_with(path, |content| {
            serde_json::from_str(content)
                .map_err(|e| DocumentError::DeserializeError(e.to_string()))
        }),
        DocumentFormat::Gltf => Err(DocumentError::UnsupportedFormat(path.display().to_string())),
    }
}

fn read_with<T>(
    path: impl AsRef<Path>,
    parse: impl FnOnce(&str) -> Result<T, DocumentError>,
) -> Result<T, DocumentError> {
    let content = fs::read_to_string(path).map_err(|e| DocumentError::IoError(e.to_string()))?;
    parse(&content)
}

fn write_document<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let content = match DocumentFormat::from_path(path)? {
        DocumentFormat::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
            .map_err(|e| DocumentError::SerializeError(e.to_string()))?,
        DocumentFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| DocumentError::SerializeError(e.to_string()))?,
        DocumentFormat::Gltf => {
            return Err(DocumentError::UnsupportedFormat(format!(
                "cannot write glTF: {}",
                path.display()
            )));
        }
    };

    fs::write(path, content).map_err(|e| DocumentError::IoError(e.to_string()))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

/// Errors that can occur while reading or writing files
#[derive(Debug, Clone)]
pub enum DocumentError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
    /// glTF import error
    ImportError(String),
    /// Image encoding error
    ImageError(String),
    /// File extension not recognized
    UnsupportedFormat(String),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
            Self::ImportError(e) => write!(f, "Import error: {e}"),
            Self::ImageError(e) => write!(f, "Image error: {e}"),
            Self::UnsupportedFormat(e) => write!(f, "Unsupported format: {e}"),
        }
    }
}

impl std::error::Error for DocumentError {}
