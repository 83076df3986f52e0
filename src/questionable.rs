use crate::constants::{CONFIG_DIR, QUESTIONABLE_DIRECTORY_NAMES, QUESTIONABLE_NAMES_FILE};
use crate::matching;
use std::fs;
use std::io::{BufRead, BufReader};

/// Generic directory names ("bin", "data", ...) whose presence is weak
/// evidence either way. A directory counts as questionable when its name
/// contains a listed entry or is itself contained by one.
pub struct QuestionableNames {
    names: Vec<String>,
}

impl QuestionableNames {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn defaults() -> Self {
        Self::new(
            QUESTIONABLE_DIRECTORY_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        )
    }

    /// Built-in defaults plus the operator override file, if one exists.
    /// Returns just the defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        let mut list = Self::defaults();

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join(CONFIG_DIR).join(QUESTIONABLE_NAMES_FILE);
            if path.exists()
                && let Ok(file) = fs::File::open(path)
            {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    let trimmed = line.trim();
                    // Skip empty lines and comments
                    if !trimmed.is_empty() && !trimmed.starts_with('#') {
                        list.names.push(trimmed.to_string());
                    }
                }
            }
        }

        list
    }

    pub fn matches(&self, name: &str) -> bool {
        matching::overlaps_any(name, &self.names)
    }
}
