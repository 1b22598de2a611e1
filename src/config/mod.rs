//! Configuration management.
//!
//! Everything comes from environment variables, read once at startup into
//! a plain `Config` value that is passed into the components that need it.
//! The remote mirror is optional: if any required mirror variable is
//! missing, the store runs in local-file-only mode with no error.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::mirror::{DEFAULT_API_URL, DEFAULT_BRANCH};

/// Data directory override.
pub const ENV_DATA_DIR: &str = "HABIT_DATA_DIR";

/// Required mirror settings: remote owner, repository, and access token.
pub const ENV_MIRROR_OWNER: &str = "HABIT_MIRROR_OWNER";
pub const ENV_MIRROR_REPO: &str = "HABIT_MIRROR_REPO";
pub const ENV_MIRROR_TOKEN: &str = "HABIT_MIRROR_TOKEN";

/// Optional mirror settings with defaults.
pub const ENV_MIRROR_BRANCH: &str = "HABIT_MIRROR_BRANCH";
pub const ENV_MIRROR_URL: &str = "HABIT_MIRROR_URL";
pub const ENV_MIRROR_HABITS_PATH: &str = "HABIT_MIRROR_HABITS_PATH";
pub const ENV_MIRROR_CHECKINS_PATH: &str = "HABIT_MIRROR_CHECKINS_PATH";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the local table files.
    pub data_dir: PathBuf,

    /// Remote mirror settings, `None` in local-only mode.
    pub mirror: Option<MirrorConfig>,
}

/// Settings for one remote content repository.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub branch: String,
    /// Base URL of the content API.
    pub api_url: String,
    /// Remote path of the habit table.
    pub habits_path: String,
    /// Remote path of the check-in table.
    pub checkins_path: String,
}

impl Config {
    /// Loads configuration from the environment.
    pub fn load() -> Result<Self> {
        let data_dir = match env::var(ENV_DATA_DIR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .context("Could not find home directory")?
                .join(".habit-tracker"),
        };

        Ok(Self {
            data_dir,
            mirror: mirror_from_env(),
        })
    }

    /// Local path of the habit table.
    pub fn habits_file(&self) -> PathBuf {
        self.data_dir.join("habits.csv")
    }

    /// Local path of the check-in table.
    pub fn checkins_file(&self) -> PathBuf {
        self.data_dir.join("checkins.csv")
    }
}

fn mirror_from_env() -> Option<MirrorConfig> {
    let owner = non_empty_var(ENV_MIRROR_OWNER);
    let repo = non_empty_var(ENV_MIRROR_REPO);
    let token = non_empty_var(ENV_MIRROR_TOKEN);

    let present = [&owner, &repo, &token]
        .iter()
        .filter(|v| v.is_some())
        .count();
    if present > 0 && present < 3 {
        tracing::warn!(
            "Mirror configuration incomplete ({ENV_MIRROR_OWNER}, {ENV_MIRROR_REPO} and \
             {ENV_MIRROR_TOKEN} are all required); running local-only"
        );
    }

    Some(build_mirror(
        owner?,
        repo?,
        token?,
        non_empty_var(ENV_MIRROR_BRANCH),
        non_empty_var(ENV_MIRROR_URL),
        non_empty_var(ENV_MIRROR_HABITS_PATH),
        non_empty_var(ENV_MIRROR_CHECKINS_PATH),
    ))
}

/// Assembles a mirror config, filling defaults for the optional settings.
fn build_mirror(
    owner: String,
    repo: String,
    token: String,
    branch: Option<String>,
    api_url: Option<String>,
    habits_path: Option<String>,
    checkins_path: Option<String>,
) -> MirrorConfig {
    MirrorConfig {
        owner,
        repo,
        token,
        branch: branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        habits_path: habits_path.unwrap_or_else(|| "data/habits.csv".to_string()),
        checkins_path: checkins_path.unwrap_or_else(|| "data/checkins.csv".to_string()),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mirror_applies_defaults() {
        let mirror = build_mirror(
            "alice".to_string(),
            "habits".to_string(),
            "tok".to_string(),
            None,
            None,
            None,
            None,
        );
        assert_eq!(mirror.branch, DEFAULT_BRANCH);
        assert_eq!(mirror.api_url, DEFAULT_API_URL);
        assert_eq!(mirror.habits_path, "data/habits.csv");
        assert_eq!(mirror.checkins_path, "data/checkins.csv");
    }

    #[test]
    fn test_build_mirror_keeps_overrides() {
        let mirror = build_mirror(
            "alice".to_string(),
            "habits".to_string(),
            "tok".to_string(),
            Some("develop".to_string()),
            Some("http://localhost:9000".to_string()),
            Some("tables/h.csv".to_string()),
            Some("tables/c.csv".to_string()),
        );
        assert_eq!(mirror.branch, "develop");
        assert_eq!(mirror.api_url, "http://localhost:9000");
        assert_eq!(mirror.habits_path, "tables/h.csv");
        assert_eq!(mirror.checkins_path, "tables/c.csv");
    }

    #[test]
    fn test_table_file_paths() {
        let config = Config {
            data_dir: PathBuf::from("/data"),
            mirror: None,
        };
        assert_eq!(config.habits_file(), PathBuf::from("/data/habits.csv"));
        assert_eq!(config.checkins_file(), PathBuf::from("/data/checkins.csv"));
    }
}
