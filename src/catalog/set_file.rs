use serde::Deserialize;

use crate::error::CatalogError;
use crate::platform::Platform;
use crate::session::ShortcutRecord;

/// On-disk form of a shortcut set
#[derive(Deserialize, Clone, Debug)]
pub struct ShortcutSetFile {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub shortcuts: Vec<ShortcutEntry>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ShortcutEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub action: String,
    #[serde(default)]
    pub windows: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
}

impl ShortcutEntry {
    /// Answer key for `platform`. Mac falls back to the Windows binding.
    pub fn keys_for(&self, platform: Platform) -> Option<&str> {
        let keys = match platform {
            Platform::Mac => self.mac.as_deref().or(self.windows.as_deref()),
            Platform::Windows => self.windows.as_deref(),
        };
        keys.filter(|k| !k.trim().is_empty())
    }
}

impl ShortcutSetFile {
    pub fn parse(origin: &str, json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Questions for `platform`, in file order. Shortcuts without a binding are left out.
    pub fn records(&self, platform: Platform) -> Vec<ShortcutRecord> {
        self.shortcuts
            .iter()
            .filter_map(|entry| {
                entry
                    .keys_for(platform)
                    .map(|keys| ShortcutRecord::new(entry.action.clone(), keys))
            })
            .collect()
    }
}
