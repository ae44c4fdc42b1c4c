//! Per-user project flags: favorites, likes, read markers and voyage requests.
//!
//! Persisted as one JSON document at `~/.project-library/flags.json`. Each
//! list keeps insertion order and never holds the same id twice.

use std::path::{Path, PathBuf};

use library_core::error::{LibraryError, Result};
use library_core::models::Project;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fold UTF-16 code units as `h = (h << shift) - h + c` in wrapping 32-bit
/// arithmetic, i.e. `h * (2^shift - 1) + c`.
pub fn id_hash(id: &str, shift: u32) -> i32 {
    id.encode_utf16().fold(0i32, |h, c| {
        (h << shift).wrapping_sub(h).wrapping_add(i32::from(c))
    })
}

/// Stable pseudo-random base for the like counter, 10..=100.
pub fn base_like_count(id: &str) -> u32 {
    (id_hash(id, 3) % 91).unsigned_abs() + 10
}

/// Stable pseudo-random base for the voyage counter, 5..=50.
pub fn base_voyage_count(id: &str) -> u32 {
    (id_hash(id, 5) % 46).unsigned_abs() + 5
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagStore {
    favorites: Vec<String>,
    likes: Vec<String>,
    read: Vec<String>,
    voyage: Vec<String>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

fn insert(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|x| x == id) {
        return false;
    }
    list.push(id.to_string());
    true
}

fn remove(list: &mut Vec<String>, id: &str) -> bool {
    let before = list.len();
    list.retain(|x| x != id);
    list.len() != before
}

/// Returns the new membership state.
fn toggle(list: &mut Vec<String>, id: &str) -> bool {
    if remove(list, id) {
        false
    } else {
        insert(list, id)
    }
}

impl FlagStore {
    /// `~/.project-library/flags.json`.
    pub fn default_path() -> PathBuf {
        Self::path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".project-library").join("flags.json")
    }

    /// An empty store that will be saved to `path`.
    pub fn at(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            ..Default::default()
        }
    }

    /// Load the store at `path`; a missing file is an empty store.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::at(path));
        }
        let content = std::fs::read_to_string(path).map_err(|source| LibraryError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut store: FlagStore = serde_json::from_str(&content)?;
        store.path = Some(path.to_path_buf());
        debug!(
            "Loaded flags from {}: {} favorites, {} likes, {} read, {} voyage",
            path.display(),
            store.favorites.len(),
            store.likes.len(),
            store.read.len(),
            store.voyage.len()
        );
        Ok(store)
    }

    /// Atomically write the store back to the path it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| LibraryError::Config("flag store has no backing file".to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    // ── Favorites ─────────────────────────────────────────────────────────────

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|x| x == id)
    }

    pub fn add_favorite(&mut self, id: &str) -> bool {
        insert(&mut self.favorites, id)
    }

    pub fn remove_favorite(&mut self, id: &str) -> bool {
        remove(&mut self.favorites, id)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        toggle(&mut self.favorites, id)
    }

    pub fn favorite_ids(&self) -> &[String] {
        &self.favorites
    }

    /// Favorite projects in catalog order.
    pub fn favorites<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.is_favorite(&p.id)).collect()
    }

    // ── Likes ─────────────────────────────────────────────────────────────────

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|x| x == id)
    }

    pub fn add_like(&mut self, id: &str) -> bool {
        insert(&mut self.likes, id)
    }

    pub fn remove_like(&mut self, id: &str) -> bool {
        remove(&mut self.likes, id)
    }

    pub fn toggle_like(&mut self, id: &str) -> bool {
        toggle(&mut self.likes, id)
    }

    /// Simulated like counter including this user's like.
    pub fn like_count(&self, id: &str) -> u32 {
        base_like_count(id) + u32::from(self.is_liked(id))
    }

    // ── Read markers ──────────────────────────────────────────────────────────

    pub fn is_read(&self, id: &str) -> bool {
        self.read.iter().any(|x| x == id)
    }

    /// Returns `true` the first time a project is marked.
    pub fn mark_read(&mut self, id: &str) -> bool {
        insert(&mut self.read, id)
    }

    // ── Voyage requests ───────────────────────────────────────────────────────

    pub fn has_voyage_request(&self, id: &str) -> bool {
        self.voyage.iter().any(|x| x == id)
    }

    pub fn add_voyage_request(&mut self, id: &str) -> bool {
        insert(&mut self.voyage, id)
    }

    pub fn remove_voyage_request(&mut self, id: &str) -> bool {
        remove(&mut self.voyage, id)
    }

    pub fn toggle_voyage_request(&mut self, id: &str) -> bool {
        toggle(&mut self.voyage, id)
    }

    /// Simulated voyage vote counter including this user's vote.
    pub fn voyage_vote_count(&self, id: &str) -> u32 {
        base_voyage_count(id) + u32::from(self.has_voyage_request(id))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── Hashing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_id_hash_small_ids() {
        // "0001": ((48·7 + 48)·7 + 48)·7 + 49
        assert_eq!(id_hash("0001", 3), 19_201);
        assert_eq!(id_hash("0001", 5), 1_477_633);
        assert_eq!(id_hash("", 5), 0);
    }

    #[test]
    fn test_id_hash_wraps() {
        let long = "项目编号-0123456789-abcdefghij-0123456789";
        let h = id_hash(long, 5);
        // Wrapping arithmetic must not panic and must stay deterministic.
        assert_eq!(h, id_hash(long, 5));
    }

    #[test]
    fn test_base_counts() {
        assert_eq!(base_like_count("0001"), 10);
        assert_eq!(base_like_count("0002"), 11);
        assert_eq!(base_voyage_count("0001"), 26);
        assert_eq!(base_voyage_count("0002"), 27);
    }

    #[test]
    fn test_base_counts_in_range() {
        for id in ["0001", "0042", "0999", "项目", "x-very-long-identifier-0000000000"] {
            let likes = base_like_count(id);
            let votes = base_voyage_count(id);
            assert!((10..=100).contains(&likes), "{id} → {likes}");
            assert!((5..=50).contains(&votes), "{id} → {votes}");
        }
    }

    // ── Toggles ───────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_favorite() {
        let mut store = FlagStore::default();
        assert!(store.toggle_favorite("0001"));
        assert!(store.is_favorite("0001"));
        assert!(!store.toggle_favorite("0001"));
        assert!(!store.is_favorite("0001"));
    }

    #[test]
    fn test_add_is_idempotent_and_ordered() {
        let mut store = FlagStore::default();
        assert!(store.add_favorite("0002"));
        assert!(store.add_favorite("0001"));
        assert!(!store.add_favorite("0002"));
        assert_eq!(store.favorite_ids(), ["0002", "0001"]);
        assert!(store.remove_favorite("0002"));
        assert!(!store.remove_favorite("0002"));
    }

    #[test]
    fn test_like_adds_one() {
        let mut store = FlagStore::default();
        assert_eq!(store.like_count("0001"), 10);
        store.toggle_like("0001");
        assert_eq!(store.like_count("0001"), 11);
        store.remove_like("0001");
        assert_eq!(store.like_count("0001"), 10);
    }

    #[test]
    fn test_voyage_vote_adds_one() {
        let mut store = FlagStore::default();
        store.add_voyage_request("0001");
        assert_eq!(store.voyage_vote_count("0001"), 27);
        assert!(!store.toggle_voyage_request("0001"));
        assert_eq!(store.voyage_vote_count("0001"), 26);
    }

    #[test]
    fn test_mark_read() {
        let mut store = FlagStore::default();
        assert!(!store.is_read("0003"));
        assert!(store.mark_read("0003"));
        assert!(!store.mark_read("0003"));
        assert!(store.is_read("0003"));
    }

    #[test]
    fn test_favorites_in_catalog_order() {
        let projects: Vec<Project> = ["0003", "0002", "0001"]
            .iter()
            .map(|id| Project {
                id: id.to_string(),
                ..Default::default()
            })
            .collect();
        let mut store = FlagStore::default();
        store.add_favorite("0001");
        store.add_favorite("0003");
        let ids: Vec<&str> = store.favorites(&projects).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["0003", "0001"]);
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    #[test]
    fn test_save_and_reload() {
        let tmp = TempDir::new().expect("tempdir");
        let path = FlagStore::path_in(tmp.path());

        let mut store = FlagStore::load_from(&path).expect("load empty");
        store.add_favorite("0001");
        store.add_like("0002");
        store.mark_read("0003");
        store.add_voyage_request("0004");
        store.save().expect("save");

        let loaded = FlagStore::load_from(&path).expect("reload");
        assert!(loaded.is_favorite("0001"));
        assert!(loaded.is_liked("0002"));
        assert!(loaded.is_read("0003"));
        assert!(loaded.has_voyage_request("0004"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_partial_document() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("flags.json");
        std::fs::write(&path, r#"{ "likes": ["0007"] }"#).expect("write");

        let store = FlagStore::load_from(&path).expect("load");
        assert!(store.is_liked("0007"));
        assert!(store.favorite_ids().is_empty());
    }

    #[test]
    fn test_load_corrupt_document_errors() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("flags.json");
        std::fs::write(&path, "{oops").expect("write");
        assert!(matches!(
            FlagStore::load_from(&path),
            Err(LibraryError::JsonParse(_))
        ));
    }

    #[test]
    fn test_save_without_path_errors() {
        let store = FlagStore::default();
        assert!(matches!(store.save(), Err(LibraryError::Config(_))));
    }
}
