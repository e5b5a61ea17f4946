//! Best completion times
//!
//! Persisted to LocalStorage, tracks the 10 fastest full runs.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_BEST_TIMES: usize = 10;

/// A single completed-run entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestTimeEntry {
    /// Run duration in seconds
    pub time_secs: f32,
    /// Wall touches before this run finished
    pub resets: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Fastest-run leaderboard, sorted ascending by time
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestTimes {
    pub entries: Vec<BestTimeEntry>,
}

impl BestTimes {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ray_maze_best_times";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a time qualifies for the leaderboard
    pub fn qualifies(&self, time_secs: f32) -> bool {
        if time_secs <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_BEST_TIMES {
            return true;
        }
        // Must beat the slowest kept entry
        self.entries
            .last()
            .map(|e| time_secs < e.time_secs)
            .unwrap_or(true)
    }

    /// Get the rank a time would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, time_secs: f32) -> Option<usize> {
        if !self.qualifies(time_secs) {
            return None;
        }
        let rank = self.entries.iter().position(|e| time_secs < e.time_secs);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a completed run (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_time(&mut self, time_secs: f32, resets: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(time_secs) {
            return None;
        }

        let entry = BestTimeEntry {
            time_secs,
            resets,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| time_secs < e.time_secs);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_BEST_TIMES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fastest recorded run (if any)
    pub fn best(&self) -> Option<f32> {
        self.entries.first().map(|e| e.time_secs)
    }

    /// Load best times from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(times) = serde_json::from_str::<BestTimes>(&json) {
                    log::info!("Loaded {} best times", times.entries.len());
                    return times;
                }
            }
        }

        log::info!("No best times found, starting fresh");
        Self::new()
    }

    /// Save best times to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best times saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Format a run duration as m:ss.t
pub fn format_time(time_secs: f32) -> String {
    let mins = (time_secs / 60.0).floor() as u32;
    let secs = time_secs - mins as f32 * 60.0;
    format!("{}:{:04.1}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_qualifies() {
        let times = BestTimes::new();
        assert!(times.is_empty());
        assert!(times.qualifies(30.0));
        assert!(!times.qualifies(0.0));
    }

    #[test]
    fn test_add_keeps_ascending_order() {
        let mut times = BestTimes::new();
        assert_eq!(times.add_time(30.0, 2, 0.0), Some(1));
        assert_eq!(times.add_time(10.0, 0, 0.0), Some(1));
        assert_eq!(times.add_time(20.0, 1, 0.0), Some(2));

        let recorded: Vec<f32> = times.entries.iter().map(|e| e.time_secs).collect();
        assert_eq!(recorded, vec![10.0, 20.0, 30.0]);
        assert_eq!(times.best(), Some(10.0));
    }

    #[test]
    fn test_full_table_rejects_slower() {
        let mut times = BestTimes::new();
        for i in 0..MAX_BEST_TIMES {
            times.add_time(10.0 + i as f32, 0, 0.0);
        }
        assert!(!times.qualifies(100.0));
        assert_eq!(times.add_time(100.0, 0, 0.0), None);

        // A faster run bumps the slowest out
        assert_eq!(times.add_time(5.0, 0, 0.0), Some(1));
        assert_eq!(times.entries.len(), MAX_BEST_TIMES);
        assert_eq!(times.best(), Some(5.0));
    }

    #[test]
    fn test_potential_rank() {
        let mut times = BestTimes::new();
        times.add_time(10.0, 0, 0.0);
        times.add_time(20.0, 0, 0.0);
        assert_eq!(times.potential_rank(5.0), Some(1));
        assert_eq!(times.potential_rank(15.0), Some(2));
        assert_eq!(times.potential_rank(25.0), Some(3));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(9.96), "0:10.0");
        assert_eq!(format_time(75.3), "1:15.3");
    }
}
