use std::path::Path;

use anyhow::Context;
use sapper_core::{Difficulty, DifficultyTable};
use serde::Deserialize;

/// Contents of the `--config` file.
///
/// ```toml
/// seed = 1234
///
/// [[difficulty]]
/// name = "Tiny"
/// mines = 3
/// edge = 4
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub seed: Option<u64>,
    pub difficulty: Option<Vec<Difficulty>>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Configured presets, the built-in ones when the file lists none.
    pub fn difficulties(&self) -> sapper_core::Result<DifficultyTable> {
        match &self.difficulty {
            Some(entries) => DifficultyTable::new(entries.clone()),
            None => Ok(DifficultyTable::default()),
        }
    }
}
