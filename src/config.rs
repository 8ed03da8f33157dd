// Difficulty presets and best-time record persistence.
// Records are stored as TOML in the platform config directory.

use chrono::Local;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Difficulty presets and custom settings (rows, cols, mines).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,                    // 9x9, 10 mines
    Intermediate,                // 16x16, 40 mines
    Expert,                      // 16x30, 99 mines
    Custom(usize, usize, usize),
}

impl Difficulty {
    /// Map the `-d` flag levels 1-3 to presets.
    pub fn preset(level: u8) -> Difficulty {
        match level {
            1 => Difficulty::Beginner,
            2 => Difficulty::Intermediate,
            _ => Difficulty::Expert,
        }
    }

    /// Board dimensions and mine count for this difficulty.
    pub fn params(&self) -> (usize, usize, usize) {
        match self {
            Difficulty::Beginner => (9, 9, 10),
            Difficulty::Intermediate => (16, 16, 40),
            Difficulty::Expert => (16, 30, 99),
            Difficulty::Custom(rows, cols, mines) => (*rows, *cols, *mines),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Expert => "Expert",
            Difficulty::Custom(_, _, _) => "Custom",
        }
    }
}

/// Record entry for best completion time.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Record {
    pub secs: u64,
    pub date: String, // YYYY-MM-DD
}

/// Persisted best times, one slot per preset difficulty. Custom boards
/// are not comparable across runs and are never recorded.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub best_beginner: Option<Record>,
    pub best_intermediate: Option<Record>,
    pub best_expert: Option<Record>,
}

impl Config {
    fn slot(&mut self, difficulty: &Difficulty) -> Option<&mut Option<Record>> {
        match difficulty {
            Difficulty::Beginner => Some(&mut self.best_beginner),
            Difficulty::Intermediate => Some(&mut self.best_intermediate),
            Difficulty::Expert => Some(&mut self.best_expert),
            Difficulty::Custom(_, _, _) => None,
        }
    }

    /// Best time in seconds for a difficulty, if one is recorded.
    pub fn best(&self, difficulty: &Difficulty) -> Option<u64> {
        match difficulty {
            Difficulty::Beginner => self.best_beginner.as_ref().map(|r| r.secs),
            Difficulty::Intermediate => self.best_intermediate.as_ref().map(|r| r.secs),
            Difficulty::Expert => self.best_expert.as_ref().map(|r| r.secs),
            Difficulty::Custom(_, _, _) => None,
        }
    }

    /// Store a completion time if it beats the current record. Returns
    /// true when a new record was written.
    pub fn record_win(&mut self, difficulty: &Difficulty, secs: u64) -> bool {
        let date = Local::now().format("%Y-%m-%d").to_string();
        match self.slot(difficulty) {
            Some(slot) if slot.as_ref().map_or(true, |r| secs < r.secs) => {
                *slot = Some(Record { secs, date });
                true
            }
            _ => false,
        }
    }
}

/// Platform config file location, e.g. ~/.config/tsweep/tsweep.toml on
/// Linux. None when no home directory can be determined.
pub fn config_path() -> Option<PathBuf> {
    let name = env!("CARGO_PKG_NAME");
    ProjectDirs::from("io", name, name)
        .map(|proj| proj.config_dir().join(format!("{name}.toml")))
}

/// Load records from disk, falling back to an empty set on any failure.
pub fn load_or_create() -> Config {
    if let Some(path) = config_path() {
        if let Ok(s) = fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<Config>(&s) {
                return cfg;
            }
        }
    }
    Config::default()
}

/// Persist records; failures are ignored since losing a best time must
/// never take the game down.
pub fn save(cfg: &Config) {
    if let Some(path) = config_path() {
        if let Ok(s) = toml::to_string(cfg) {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = fs::write(&path, s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_levels_match_the_classic_layouts() {
        assert_eq!(Difficulty::preset(1).params(), (9, 9, 10));
        assert_eq!(Difficulty::preset(2).params(), (16, 16, 40));
        assert_eq!(Difficulty::preset(3).params(), (16, 30, 99));
    }

    #[test]
    fn record_win_keeps_only_the_best_time() {
        let mut cfg = Config::default();
        assert!(cfg.record_win(&Difficulty::Beginner, 40));
        assert!(!cfg.record_win(&Difficulty::Beginner, 50));
        assert!(cfg.record_win(&Difficulty::Beginner, 30));
        assert_eq!(cfg.best(&Difficulty::Beginner), Some(30));
    }

    #[test]
    fn custom_boards_are_never_recorded() {
        let mut cfg = Config::default();
        assert!(!cfg.record_win(&Difficulty::Custom(5, 5, 3), 10));
        assert_eq!(cfg.best(&Difficulty::Custom(5, 5, 3)), None);
    }
}
