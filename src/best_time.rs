//! Best survival time
//!
//! A single millisecond count persisted to LocalStorage as a JSON number.

use crate::platform::storage::KeyValueStore;

/// Longest run survived, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestTime {
    pub ms: u64,
}

impl BestTime {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "asteroid_dodge_best_time";

    pub fn new(ms: u64) -> Self {
        Self { ms }
    }

    /// Parse a stored value; anything unusable is `None`
    ///
    /// Accepts integer or fractional JSON numbers. Negative values are
    /// rejected rather than clamped.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = serde_json::from_str::<f64>(raw.trim()).ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(Self::new(value.round() as u64))
    }

    /// Load the best time from storage (0 if absent or unreadable)
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => match Self::parse(&raw) {
                Some(best) => {
                    log::info!("Loaded best time: {} ms", best.ms);
                    best
                }
                None => {
                    log::info!("Stored best time unreadable, starting from 0");
                    Self::default()
                }
            },
            None => {
                log::info!("No best time found, starting fresh");
                Self::default()
            }
        }
    }

    /// Save the best time to storage
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(&self.ms) {
            Ok(json) => {
                if store.set(Self::STORAGE_KEY, &json) {
                    log::info!("Best time saved ({} ms)", self.ms);
                } else {
                    log::warn!("Best time could not be written");
                }
            }
            Err(e) => log::warn!("Best time serialization failed: {}", e),
        }
    }
}
