//! Decoded image store.
//!
//! Loading happens on the CPU side only; the driver uploads ready images to
//! the canvas separately. Failures are permanent and keep their message, so
//! a missing file is reported once and never retried every frame.

use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Ready,
    Failed,
}

pub struct LoadedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

enum AssetEntry {
    Ready(LoadedImage),
    Failed(String),
}

#[derive(Default)]
pub struct AssetStore {
    entries: HashMap<String, AssetEntry>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an image file and file it under `id`. A second call with the
    /// same id returns the existing outcome without touching the disk.
    pub fn load_image(&mut self, id: &str, path: &Path) -> LoadState {
        if let Some(entry) = self.entries.get(id) {
            return match entry {
                AssetEntry::Ready(_) => LoadState::Ready,
                AssetEntry::Failed(_) => LoadState::Failed,
            };
        }

        let entry = match Self::decode(path) {
            Ok(img) => {
                log::info!("loaded image '{id}' ({}x{})", img.width, img.height);
                AssetEntry::Ready(img)
            }
            Err(message) => {
                log::warn!("image '{id}' failed to load: {message}");
                AssetEntry::Failed(message)
            }
        };
        let state = match entry {
            AssetEntry::Ready(_) => LoadState::Ready,
            AssetEntry::Failed(_) => LoadState::Failed,
        };
        self.entries.insert(id.to_string(), entry);
        state
    }

    fn decode(path: &Path) -> Result<LoadedImage, String> {
        let image = image::open(path)
            .map_err(|e| format!("{}: {e}", path.display()))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Ok(LoadedImage {
            pixels: image.into_raw(),
            width,
            height,
        })
    }

    pub fn state(&self, id: &str) -> LoadState {
        match self.entries.get(id) {
            None => LoadState::NotLoaded,
            Some(AssetEntry::Ready(_)) => LoadState::Ready,
            Some(AssetEntry::Failed(_)) => LoadState::Failed,
        }
    }

    pub fn image(&self, id: &str) -> Option<&LoadedImage> {
        match self.entries.get(id) {
            Some(AssetEntry::Ready(img)) => Some(img),
            _ => None,
        }
    }

    pub fn failure(&self, id: &str) -> Option<&str> {
        match self.entries.get(id) {
            Some(AssetEntry::Failed(message)) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        std::env::temp_dir().join(format!("bh_assets_{}_{}_{}", std::process::id(), nanos, name))
    }

    #[test]
    fn missing_file_fails_with_path_in_message() {
        let mut store = AssetStore::new();
        let path = temp_path("missing.png");
        assert_eq!(store.load_image("player", &path), LoadState::Failed);
        assert_eq!(store.state("player"), LoadState::Failed);
        let message = store.failure("player").unwrap();
        assert!(message.contains("missing.png"));
        assert!(store.image("player").is_none());
    }

    #[test]
    fn decodes_a_png_from_disk() {
        let path = temp_path("tile.png");
        image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let mut store = AssetStore::new();
        assert_eq!(store.load_image("tile", &path), LoadState::Ready);
        let img = store.image("tile").unwrap();
        assert_eq!((img.width, img.height), (2, 3));
        assert_eq!(img.pixels.len(), 2 * 3 * 4);
        assert_eq!(&img.pixels[0..4], &[10, 20, 30, 255]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn failure_is_permanent_even_if_file_appears_later() {
        let path = temp_path("late.png");
        let mut store = AssetStore::new();
        assert_eq!(store.load_image("late", &path), LoadState::Failed);

        image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();
        assert_eq!(store.load_image("late", &path), LoadState::Failed);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unknown_id_reports_not_loaded() {
        let store = AssetStore::new();
        assert_eq!(store.state("nope"), LoadState::NotLoaded);
    }
}
