//! Loads the word catalog from the exported JSON files at startup.

use std::path::Path;

use vocab_core::Catalog;

use crate::error::{ApiError, Result};

/// Read both partitions and build the catalog.
pub async fn load_catalog(kid_path: &Path, adult_path: &Path) -> Result<Catalog> {
    let kid_json = read(kid_path).await?;
    let adult_json = read(adult_path).await?;

    let catalog = Catalog::from_json(&kid_json, &adult_json)?;

    tracing::info!(
        kid = catalog.kid_words().len(),
        adult = catalog.adult_words().len(),
        "Loaded word catalog"
    );

    Ok(catalog)
}

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read {}: {}", path.display(), e)))
}
