//! Persisted high score
//!
//! A single integer in LocalStorage. Read once at startup, written only
//! when a run beats it. Writes are best effort.

use crate::platform::KeyValueStore;

/// Where the best floored score lives in storage.
///
/// The value itself is `GameState::high_score`; this only reads it at
/// startup and writes it back when a run raises it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    key: String,
}

impl HighScore {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored score. Missing or malformed values count as zero.
    pub fn load(&self, store: &dyn KeyValueStore) -> u64 {
        let value = store.get(&self.key).map(|raw| parse_score(&raw)).unwrap_or(0);
        if value > 0 {
            log::info!("Loaded high score {}", value);
        } else {
            log::info!("No high score found, starting fresh");
        }
        value
    }

    /// Write a new best score. A failed write is logged and otherwise ignored.
    pub fn persist(&self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        match store.set(&self.key, &score.to_string()) {
            Ok(()) => {
                log::info!("New high score {} saved", score);
                true
            }
            Err(e) => {
                log::warn!("Could not save high score {}: {}", score, e);
                false
            }
        }
    }
}

/// Parse a stored score. Accepts integers and finite non-negative decimals
/// (floored); everything else is zero.
fn parse_score(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return v;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.floor() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::new("hs").load(&store), 0);
    }

    #[test]
    fn test_load_malformed_is_zero() {
        for raw in ["", "abc", "-5", "NaN", "inf"] {
            let store = MemoryStore::with("hs", raw);
            assert_eq!(HighScore::new("hs").load(&store), 0, "raw = {raw:?}");
        }
    }

    #[test]
    fn test_load_valid() {
        let hs = HighScore::new("hs");
        assert_eq!(hs.load(&MemoryStore::with("hs", "81")), 81);
        assert_eq!(hs.load(&MemoryStore::with("hs", " 12.9 ")), 12);
    }

    #[test]
    fn test_persist_writes_key() {
        let mut store = MemoryStore::new();
        let hs = HighScore::new("hs");
        assert!(hs.persist(75, &mut store));
        assert_eq!(store.get("hs").as_deref(), Some("75"));
        assert_eq!(store.writes, 1);
        assert_eq!(hs.load(&store), 75);
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        let hs = HighScore::new("hs");
        assert!(!hs.persist(9, &mut store));
        assert_eq!(store.get("hs"), None);
    }
}
