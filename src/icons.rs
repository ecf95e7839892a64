//! hicolor icon theme installation
//!
//! Decodes one source image and writes a square PNG for every size in
//! `ICON_SIZES` under `~/.local/share/icons/hicolor/<N>x<N>/apps/`.

use crate::error::{IoResultExt, Result, SetupError};
use crate::layout::{ICON_SIZES, InstallLayout};
use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};

/// Write resized copies of `source` into the icon theme tree.
///
/// Returns the paths written, smallest size first.
pub fn install_icons(layout: &InstallLayout, source: &Path) -> Result<Vec<PathBuf>> {
    let image = image::open(source).map_err(|e| SetupError::Image {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(ICON_SIZES.len());
    for &size in ICON_SIZES {
        let dir = layout.icon_dir(size);
        fs::create_dir_all(&dir).fs_context("create directory", &dir)?;

        let dest = layout.icon_path(size);
        image
            .resize_exact(size, size, FilterType::Lanczos3)
            .save_with_format(&dest, image::ImageFormat::Png)
            .map_err(|e| SetupError::Image {
                path: dest.clone(),
                source: e,
            })?;
        log::debug!("Wrote {}x{} icon to {}", size, size, dest.display());
        written.push(dest);
    }

    Ok(written)
}
