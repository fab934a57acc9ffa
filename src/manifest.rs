//! Browser extension manifest fragment for the generated icons
//!
//! The fragment mirrors the `icons` and `action.default_icon` keys of an
//! extension `manifest.json`, plus an `active_icons` map for the icon set the
//! extension swaps in at runtime. It is written next to the icons so it can be
//! pasted into the real manifest.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};

pub const MANIFEST_FILE: &str = "icons.json";

/// Icon paths keyed by pixel size, serialized in ascending size order
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct IconSet(BTreeMap<u32, String>);

impl IconSet {
    pub fn insert(&mut self, size: u32, path: String) {
        self.0.insert(size, path);
    }

    pub fn get(&self, size: u32) -> Option<&str> {
        self.0.get(&size).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct Action {
    pub default_icon: IconSet,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct IconManifest {
    pub icons: IconSet,
    pub action: Action,
    pub active_icons: IconSet,
}

impl IconManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the normal icon of `size`; it is used for both `icons` and the toolbar action
    pub fn add_normal(&mut self, size: u32, path: String) {
        self.icons.insert(size, path.clone());
        self.action.default_icon.insert(size, path);
    }

    pub fn add_active(&mut self, size: u32, path: String) {
        self.active_icons.insert(size, path);
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize icon manifest")
    }

    pub fn write_to(&self, out_dir: &Path) -> Result<()> {
        let manifest_path = out_dir.join(MANIFEST_FILE);
        std::fs::write(&manifest_path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
        Ok(())
    }
}

/// Path of `file_name` as referenced from the directory that contains `out_dir`
pub fn manifest_path(out_dir: &Path, file_name: &str) -> String {
    match out_dir.file_name() {
        Some(dir) => format!("{}/{file_name}", dir.to_string_lossy()),
        None => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_path() {
        assert_eq!(manifest_path(Path::new("icons"), "icon16.png"), "icons/icon16.png");
        assert_eq!(
            manifest_path(Path::new("/tmp/build/assets"), "icon16-active.png"),
            "assets/icon16-active.png"
        );
        assert_eq!(manifest_path(Path::new("/"), "icon16.png"), "icon16.png");
    }

    #[test]
    fn test_normal_icons_fill_both_maps() {
        let mut manifest = IconManifest::new();
        manifest.add_normal(16, "icons/icon16.png".to_string());

        assert_eq!(manifest.icons.get(16), Some("icons/icon16.png"));
        assert_eq!(manifest.action.default_icon.get(16), Some("icons/icon16.png"));
        assert!(manifest.active_icons.is_empty());
    }

    #[test]
    fn test_json_layout_and_size_order() {
        let mut manifest = IconManifest::new();
        for size in [128, 16, 48, 32] {
            manifest.add_normal(size, format!("icons/icon{size}.png"));
            manifest.add_active(size, format!("icons/icon{size}-active.png"));
        }

        let json = manifest.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["icons"]["16"], "icons/icon16.png");
        assert_eq!(value["action"]["default_icon"]["128"], "icons/icon128.png");
        assert_eq!(value["active_icons"]["48"], "icons/icon48-active.png");

        // BTreeMap keys serialize in numeric order
        let pos_16 = json.find("\"16\"").unwrap();
        let pos_32 = json.find("\"32\"").unwrap();
        let pos_128 = json.find("\"128\"").unwrap();
        assert!(pos_16 < pos_32 && pos_32 < pos_128);
    }
}
