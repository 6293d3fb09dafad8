//! Subtopic rotation: a fixed theme list plus a flat-file history of picks.
//!
//! The history file is a JSON array of strings, read and written wholesale.
//! A missing or unparsable file is treated as an empty history; the store
//! never fails a pick because of a bad file.

use std::{fs, path::PathBuf};

use rand::seq::SliceRandom;

use crate::Result;

/// Fixed content themes used to seed generation prompts.
pub const SUBTOPICS: &[&str] = &[
    "новинки косметики 2024",
    "уход за кожей зимой",
    "антивозрастной уход за кожей",
    "макияж для разных типов лица",
    "натуральные ингредиенты в косметике",
];

/// Flat-file store of already-used subtopics.
///
/// Single writer assumed (one bot process); the read-modify-write is not
/// atomic.
#[derive(Clone, Debug)]
pub struct TopicStore {
    path: PathBuf,
}

impl TopicStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Pick a subtopic not used in the current cycle.
    ///
    /// Once every fixed subtopic has been used, the history resets and the
    /// next pick comes from the full list again.
    pub fn pick_unique(&self) -> Result<String> {
        let mut used = self.load_used();

        let mut available: Vec<&str> = SUBTOPICS
            .iter()
            .copied()
            .filter(|t| !used.iter().any(|u| u == t))
            .collect();

        if available.is_empty() {
            used.clear();
            available = SUBTOPICS.to_vec();
        }

        let pick = available
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(SUBTOPICS[0])
            .to_string();

        used.push(pick.clone());
        self.save_used(&used)?;

        Ok(pick)
    }

    /// Clear the usage history.
    pub fn reset(&self) -> Result<()> {
        self.save_used(&[])
    }

    fn load_used(&self) -> Vec<String> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|txt| serde_json::from_str::<Vec<String>>(&txt).ok())
            .unwrap_or_default()
    }

    fn save_used(&self, used: &[String]) -> Result<()> {
        let json = serde_json::to_string(used)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scratch_store(tag: &str) -> TopicStore {
        let dir = PathBuf::from(format!("/tmp/glowbot-topics-{}-{tag}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        TopicStore::new(dir.join("used_topics.json"))
    }

    #[test]
    fn never_repeats_within_a_cycle() {
        let store = scratch_store("cycle");

        let mut seen = HashSet::new();
        for _ in 0..SUBTOPICS.len() {
            let pick = store.pick_unique().unwrap();
            assert!(seen.insert(pick), "subtopic repeated before exhaustion");
        }
        assert_eq!(seen.len(), SUBTOPICS.len());
    }

    #[test]
    fn resets_after_exhaustion() {
        let store = scratch_store("reset");

        for _ in 0..SUBTOPICS.len() {
            store.pick_unique().unwrap();
        }

        // Next pick starts a fresh cycle from the full list.
        let pick = store.pick_unique().unwrap();
        assert!(SUBTOPICS.contains(&pick.as_str()));

        let used: Vec<String> =
            serde_json::from_str(&fs::read_to_string(store.path.clone()).unwrap()).unwrap();
        assert_eq!(used, vec![pick]);
    }

    #[test]
    fn corrupt_history_reads_as_empty() {
        let store = scratch_store("corrupt");
        fs::write(&store.path, "{not json at all").unwrap();

        let pick = store.pick_unique().unwrap();
        assert!(SUBTOPICS.contains(&pick.as_str()));

        let used: Vec<String> =
            serde_json::from_str(&fs::read_to_string(store.path.clone()).unwrap()).unwrap();
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = scratch_store("missing");
        assert!(store.load_used().is_empty());
    }

    #[test]
    fn manual_reset_clears_history() {
        let store = scratch_store("manual-reset");
        store.pick_unique().unwrap();
        store.reset().unwrap();
        assert!(store.load_used().is_empty());
    }
}
