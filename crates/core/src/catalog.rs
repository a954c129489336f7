//! Overlay catalog
//!
//! Read-only lookup from a [`SelectionKey`] to its overlay image on disk.
//! Overlays live at `<OVERLAY_DIR>/<asset_name>.png`. Assets are loaded on
//! demand and every resolve returns a freshly decoded copy, so callers can
//! never mutate catalog state. A missing file is a normal, typed outcome:
//! the operator forgot to drop the asset in, the user gets told which one.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::config;
use crate::error::{AppError, AppResult};
use crate::selection::SelectionKey;

/// A decoded overlay image, ready for compositing
#[derive(Debug, Clone)]
pub struct OverlayAsset {
    pub key: SelectionKey,
    pub image: RgbaImage,
}

/// Filesystem-backed overlay lookup
///
/// Stateless apart from the root path; safe to share across concurrent
/// sessions behind an `Arc`.
#[derive(Debug, Clone)]
pub struct OverlayCatalog {
    root: PathBuf,
}

impl OverlayCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Catalog rooted at the configured OVERLAY_DIR.
    pub fn from_env() -> Self {
        Self::new(config::OVERLAY_DIR.as_str())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic on-disk location for a selection.
    pub fn path_for(&self, key: SelectionKey) -> PathBuf {
        self.root.join(format!("{}.png", key.asset_name()))
    }

    /// Loads and decodes the overlay for `key`.
    ///
    /// # Errors
    /// * `AppError::AssetNotFound` - no overlay file exists for the key
    /// * `AppError::Decode` - the file exists but is not a decodable image
    /// * `AppError::Io` - any other filesystem failure
    pub fn resolve(&self, key: SelectionKey) -> AppResult<OverlayAsset> {
        let path = self.path_for(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Overlay asset missing: {} (looked at {})", key, path.display());
                return Err(AppError::AssetNotFound(key.asset_name().to_string()));
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let image = image::load_from_memory(&bytes).map_err(AppError::Decode)?.to_rgba8();

        log::debug!(
            "Resolved overlay {}: {}x{} ({} bytes on disk)",
            key,
            image.width(),
            image.height(),
            bytes.len()
        );

        Ok(OverlayAsset { key, image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Region;
    use std::io::Cursor;

    fn write_test_overlay(dir: &Path, key: SelectionKey, w: u32, h: u32) {
        let img = RgbaImage::from_pixel(w, h, image::Rgba([0, 0, 255, 128]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        std::fs::write(dir.join(format!("{}.png", key.asset_name())), buf.into_inner()).unwrap();
    }

    #[test]
    fn test_path_for_derives_from_asset_name() {
        let catalog = OverlayCatalog::new("overlays");
        assert_eq!(
            catalog.path_for(SelectionKey::BusinessTrip(Region::Dubai)),
            PathBuf::from("overlays/business_trip_dubai.png")
        );
    }

    #[test]
    fn test_resolve_existing_overlay() {
        let dir = tempfile::tempdir().unwrap();
        write_test_overlay(dir.path(), SelectionKey::Vacation, 64, 48);

        let catalog = OverlayCatalog::new(dir.path());
        let asset = catalog.resolve(SelectionKey::Vacation).unwrap();
        assert_eq!(asset.key, SelectionKey::Vacation);
        assert_eq!((asset.image.width(), asset.image.height()), (64, 48));
    }

    #[test]
    fn test_resolve_missing_overlay_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = OverlayCatalog::new(dir.path());

        match catalog.resolve(SelectionKey::DayOff) {
            Err(AppError::AssetNotFound(name)) => assert_eq!(name, "day_off"),
            other => panic!("expected AssetNotFound, got {:?}", other.map(|a| a.key)),
        }
    }

    #[test]
    fn test_resolve_corrupt_overlay_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("day_off.png"), b"definitely not a png").unwrap();

        let catalog = OverlayCatalog::new(dir.path());
        assert!(matches!(catalog.resolve(SelectionKey::DayOff), Err(AppError::Decode(_))));
    }
}
