//! Idol catalog: manifest-driven, decoded eagerly at startup.
//!
//! `idols.json` in the assets directory lists the available idols. Every
//! asset is decoded to RGB at load time, so the catalog is immutable and
//! safe to share read-only across concurrent requests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Failed to read idol image {path}: {source}")]
    AssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode idol image: {0}")]
    AssetDecode(#[from] image::ImageError),

    #[error("Duplicate idol id {0} in manifest")]
    DuplicateId(u32),
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    id: u32,
    name: String,
    file: String,
    size: String,
}

/// One idol: metadata, the original encoded bytes (served as-is), and the
/// decoded RGB buffer fed to the pipeline.
pub struct IdolAsset {
    pub id: u32,
    pub name: String,
    pub size_label: String,
    pub content_type: &'static str,
    bytes: Vec<u8>,
    image: RgbImage,
}

impl IdolAsset {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        size_label: impl Into<String>,
        content_type: &'static str,
        bytes: Vec<u8>,
    ) -> Result<Self, CatalogError> {
        let image = image::load_from_memory(&bytes)?.to_rgb8();
        Ok(Self {
            id,
            name: name.into(),
            size_label: size_label.into(),
            content_type,
            bytes,
            image,
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub struct IdolCatalog {
    assets: HashMap<u32, IdolAsset>,
}

impl IdolCatalog {
    /// Load the catalog from `dir/idols.json`, decoding every asset.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let manifest_path = dir.join("idols.json");
        let raw = std::fs::read(&manifest_path).map_err(|source| CatalogError::Manifest {
            path: manifest_path.clone(),
            source,
        })?;
        let entries: Vec<ManifestEntry> = serde_json::from_slice(&raw)?;

        let mut assets = HashMap::with_capacity(entries.len());
        for entry in entries {
            let path = dir.join(&entry.file);
            let bytes = std::fs::read(&path).map_err(|source| CatalogError::AssetRead {
                path: path.clone(),
                source,
            })?;
            let asset = IdolAsset::new(
                entry.id,
                entry.name,
                entry.size,
                content_type_for(&entry.file),
                bytes,
            )?;
            if assets.insert(entry.id, asset).is_some() {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }

        info!(count = assets.len(), "idol catalog loaded");
        Ok(Self { assets })
    }

    /// Build a catalog from already-constructed assets.
    pub fn from_assets(assets: impl IntoIterator<Item = IdolAsset>) -> Self {
        Self {
            assets: assets.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    pub fn get(&self, id: u32) -> Option<&IdolAsset> {
        self.assets.get(&id)
    }

    /// All idols, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &IdolAsset> {
        let mut assets: Vec<&IdolAsset> = self.assets.values().collect();
        assets.sort_by_key(|a| a.id);
        assets.into_iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn content_type_for(file: &str) -> &'static str {
    if file.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}
