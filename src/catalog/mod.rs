pub mod set_file;

use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::platform::Platform;
use crate::session::ShortcutRecord;

pub use set_file::{ShortcutEntry, ShortcutSetFile};

static SETS_DIR: Dir = include_dir!("src/sets");

/// What the menu needs to show about a set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutSetInfo {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub size: usize,
}

/// Supplies shortcut sets and their questions
pub trait ShortcutSource {
    /// Available sets, grouped by category
    fn sets(&self) -> Vec<ShortcutSetInfo>;

    /// Ordered questions of `set_id` as answered on `platform`
    fn shortcuts(
        &self,
        set_id: &str,
        platform: Platform,
    ) -> Result<Vec<ShortcutRecord>, CatalogError>;
}

/// Shortcut sets held in memory, either compiled in or read from a directory
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sets: Vec<ShortcutSetFile>,
}

impl Catalog {
    /// Sets bundled with the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        let files = SETS_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .map(|f| {
                let origin = f.path().display().to_string();
                let json = f.contents_utf8().unwrap_or_default();
                ShortcutSetFile::parse(&origin, json)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_sets(files))
    }

    /// Every `*.json` file in `dir`. Files that cannot be read or parsed are skipped with a
    /// warning; only a missing or unreadable directory is an error.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut sets = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !matches!(path.extension(), Some(ext) if ext == "json") {
                continue;
            }

            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping shortcut set");
                    continue;
                }
            };
            match ShortcutSetFile::parse(&path.display().to_string(), &json) {
                Ok(set) => sets.push(set),
                Err(e) => warn!(error = %e, "skipping shortcut set"),
            }
        }

        Ok(Self::from_sets(sets))
    }

    /// The first set wins when ids collide; survivors are sorted by category, then name.
    pub fn from_sets(sets: Vec<ShortcutSetFile>) -> Self {
        let sets: Vec<ShortcutSetFile> = sets
            .into_iter()
            .unique_by(|s| s.id.clone())
            .sorted_by(|a, b| {
                a.category
                    .cmp(&b.category)
                    .then_with(|| a.name.cmp(&b.name))
            })
            .collect();
        debug!(count = sets.len(), "shortcut catalog loaded");
        Self { sets }
    }

    pub fn get(&self, set_id: &str) -> Option<&ShortcutSetFile> {
        self.sets.iter().find(|s| s.id == set_id)
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }
}

impl ShortcutSource for Catalog {
    fn sets(&self) -> Vec<ShortcutSetInfo> {
        self.sets
            .iter()
            .map(|s| ShortcutSetInfo {
                id: s.id.clone(),
                name: s.name.clone(),
                category: s.category.clone(),
                description: s.description.clone(),
                size: s.shortcuts.len(),
            })
            .collect()
    }

    fn shortcuts(
        &self,
        set_id: &str,
        platform: Platform,
    ) -> Result<Vec<ShortcutRecord>, CatalogError> {
        self.get(set_id)
            .map(|set| set.records(platform))
            .ok_or_else(|| CatalogError::UnknownSet(set_id.to_string()))
    }
}

/// Distinct categories in display order
pub fn categories(sets: &[ShortcutSetInfo]) -> Vec<&str> {
    sets.iter().map(|s| s.category.as_str()).unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MAX_QUESTIONS;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn set_json(id: &str, category: &str) -> String {
        format!(
            r#"{{ "id": "{id}", "name": "{id} set", "category": "{category}",
                 "shortcuts": [ {{ "action": "Copy", "windows": "Ctrl+C", "mac": "Cmd+C" }} ] }}"#
        )
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());

        let sets = catalog.sets();
        assert!(sets.iter().any(|s| s.id == "system"));
        assert!(sets.iter().all(|s| s.size > 0));
    }

    #[test]
    fn test_embedded_sets_have_enough_questions() {
        let catalog = Catalog::embedded().unwrap();
        for info in catalog.sets() {
            for platform in [Platform::Mac, Platform::Windows] {
                let records = catalog.shortcuts(&info.id, platform).unwrap();
                assert!(
                    records.len() >= MAX_QUESTIONS,
                    "{} has {} questions on {platform}",
                    info.id,
                    records.len()
                );
            }
        }
    }

    #[test]
    fn test_embedded_system_set_per_platform() {
        let catalog = Catalog::embedded().unwrap();
        let windows = catalog.shortcuts("system", Platform::Windows).unwrap();
        let mac = catalog.shortcuts("system", Platform::Mac).unwrap();

        assert_eq!(windows[0], ShortcutRecord::new("Copy", "Ctrl+C"));
        assert_eq!(mac[0], ShortcutRecord::new("Copy", "Cmd+C"));
    }

    #[test]
    fn test_unknown_set() {
        let catalog = Catalog::embedded().unwrap();
        assert_matches!(
            catalog.shortcuts("nope", Platform::Windows),
            Err(CatalogError::UnknownSet(id)) if id == "nope"
        );
    }

    #[test]
    fn test_sets_are_grouped_by_category() {
        let catalog = Catalog::from_sets(vec![
            ShortcutSetFile::parse("b", &set_json("zed", "Editors")).unwrap(),
            ShortcutSetFile::parse("a", &set_json("chrome", "Browsers")).unwrap(),
            ShortcutSetFile::parse("c", &set_json("helix", "Editors")).unwrap(),
        ]);
        let sets = catalog.sets();
        let ids: Vec<&str> = sets.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["chrome", "helix", "zed"]);
        assert_eq!(categories(&sets), vec!["Browsers", "Editors"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first_in_input_order() {
        let catalog = Catalog::from_sets(vec![
            ShortcutSetFile::parse("a", &set_json("dup", "Zeta")).unwrap(),
            ShortcutSetFile::parse("b", &set_json("dup", "Alpha")).unwrap(),
            ShortcutSetFile::parse("c", &set_json("other", "Beta")).unwrap(),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("dup").unwrap().category, "Zeta");

        let ids: Vec<String> = catalog.sets().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["other", "dup"]);
    }

    #[test]
    fn test_from_dir_reads_json_and_skips_broken_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.json"), set_json("one", "Misc")).unwrap();
        fs::write(dir.path().join("broken.json"), "not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = Catalog::from_dir(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.shortcuts("one", Platform::Mac).unwrap(),
            vec![ShortcutRecord::new("Copy", "Cmd+C")]
        );
    }

    #[test]
    fn test_from_dir_skips_unreadable_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.json"), set_json("good", "Misc")).unwrap();
        fs::write(dir.path().join("latin1.json"), b"{ \"name\": \"caf\xe9\" }").unwrap();

        let catalog = Catalog::from_dir(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("good").is_some());
    }

    #[test]
    fn test_from_missing_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert_matches!(Catalog::from_dir(&missing), Err(CatalogError::Io { .. }));
    }
}
