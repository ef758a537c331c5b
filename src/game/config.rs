use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the grid simulation
///
/// Every field has a default and every value is clamped rather than
/// rejected: a bad input must never abort a training loop mid-episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Width of the grid in tiles
    pub grid_width: usize,
    /// Height of the grid in tiles
    pub grid_height: usize,
    /// Requested snake length at spawn; clamped to half the grid width
    /// at init so the snake always fits without self-overlap
    pub initial_length: usize,

    // Reward shaping
    /// Bonus for eating food, also the numerator of the per-tick
    /// distance shaping term
    pub food_reward: f32,
    /// Flat reward added every tick (negative values penalize idling)
    pub living_bonus: f32,
    /// Base penalty on death, scaled by how much the snake had grown
    pub death_penalty: f32,
    /// Deduction per empty tile the body has fully enclosed
    pub gap_penalty: f32,
    /// Scale of the radial distance reward; zero disables it
    pub dist_reward_scale: f32,

    /// Tick count at which an episode reports truncation
    pub max_steps: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 40,
            initial_length: 4,
            food_reward: 2.0,
            living_bonus: 0.0,
            death_penalty: -1.0,
            gap_penalty: 5.0,
            dist_reward_scale: 20.0,
            max_steps: 500,
        }
    }
}

impl SimConfig {
    /// Create a configuration with a custom grid size
    ///
    /// Dimensions are clamped to at least one tile and the distance
    /// reward scale follows the grid perimeter, `(width + height) / 4`.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            grid_width: width,
            grid_height: height,
            dist_reward_scale: ((width + height) / 4) as f32,
            ..Default::default()
        }
    }

    /// A small 10x10 grid, handy for tests
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config at {:?}", path))
    }

    /// Save the configuration as pretty-printed JSON
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 40);
        assert_eq!(config.initial_length, 4);
        assert_eq!(config.food_reward, 2.0);
        assert_eq!(config.living_bonus, 0.0);
        assert_eq!(config.death_penalty, -1.0);
        assert_eq!(config.gap_penalty, 5.0);
        assert_eq!(config.dist_reward_scale, 20.0);
        assert_eq!(config.max_steps, 500);
    }

    #[test]
    fn test_custom_grid() {
        let config = SimConfig::new(15, 25);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 25);
        assert_eq!(config.dist_reward_scale, 10.0);
    }

    #[test]
    fn test_degenerate_dimensions_are_clamped() {
        let config = SimConfig::new(0, 0);
        assert_eq!(config.grid_width, 1);
        assert_eq!(config.grid_height, 1);
    }

    #[test]
    fn test_small_config() {
        let config = SimConfig::small();
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, 10);
        assert_eq!(config.dist_reward_scale, 5.0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("configs").join("sim.json");

        let mut config = SimConfig::small();
        config.food_reward = 3.5;
        config.max_steps = 123;
        config.save(&path).unwrap();

        let loaded = SimConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = SimConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
