use super::GeneratedImage;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Writes generated images as PNG files into one output directory.
pub struct PngExporter {
    output_dir: PathBuf,
}

impl PngExporter {
    pub fn new(output_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Re-encodes `image` as PNG and writes it as `file_name`, returning the
    /// full path.
    pub async fn save(&self, image: &GeneratedImage, file_name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);

        tokio::task::spawn_blocking({
            let image = image.clone();
            let path = path.clone();
            move || -> Result<()> {
                let png = image.to_png()?;
                std::fs::write(&path, png)?;
                Ok(())
            }
        })
        .await
        .map_err(|e| Error::Invariant(format!("PNG export task join error: {}", e)))??;

        tracing::info!("Saved image to {}", path.display());
        Ok(path)
    }
}
