//! Session configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Where content lives and how the session's randomness is seeded.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub data_dir: PathBuf,
    /// Fixed seed for loot and chest rolls. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: game_content::bundled_data_dir(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `GAME_DATA_DIR`
    /// - `GAME_SEED`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("GAME_DATA_DIR") {
            config.data_dir = dir;
        }

        if let Some(seed) = read_env::<u64>("GAME_SEED") {
            config.seed = Some(seed);
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
