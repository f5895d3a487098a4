//! Configuration loading for `excerpt`.
//!
//! Settings are merged from, in increasing order of precedence:
//!
//! 1. built-in defaults,
//! 2. the user's configuration directory (`config.toml`, `config.yaml` or
//!    `config.json` under e.g. `~/.config/excerpt/`),
//! 3. a file named explicitly by the caller,
//! 4. `EXCERPT_*` environment variables (`EXCERPT_LIMIT`, `EXCERPT_SUFFIX`,
//!    `EXCERPT_SUFFIX_POLICY`).

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use excerpt_truncate::{SuffixPolicy, Truncator};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "EXCERPT_";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of visible characters to keep.
    pub limit: usize,
    /// Appended after the last kept character, before closing tags.
    pub suffix: String,
    pub suffix_policy: SuffixPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self { limit: 200, suffix: "…".to_string(), suffix_policy: SuffixPolicy::Always }
    }
}

impl Config {
    /// Load configuration from every source, with `explicit` (if given) taking
    /// precedence over the user's configuration directory.
    ///
    /// # Errors
    ///
    /// - [`NotFound`](ErrorKind::NotFound) if `explicit` doesn't exist,
    /// - [`UnsupportedFormat`](ErrorKind::UnsupportedFormat) if its extension
    ///   isn't `toml`, `yaml`/`yml` or `json`,
    /// - [`Invalid`](ErrorKind::Invalid) if the merged values don't deserialize.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(user_config_dir().as_deref(), explicit)
    }

    fn load_from(user_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = user_dir {
            debug!(dir = %dir.display(), "merging user configuration");
            figment = figment
                .merge(Toml::file(dir.join("config.toml")))
                .merge(Yaml::file(dir.join("config.yaml")))
                .merge(Json::file(dir.join("config.json")));
        }
        if let Some(path) = explicit {
            figment = merge_file(figment, path)?;
        }
        figment.merge(Env::prefixed(ENV_PREFIX)).extract().or_raise(|| ErrorKind::Invalid)
    }

    pub fn truncator(&self) -> Truncator {
        Truncator::new(self.limit)
            .with_suffix(self.suffix.clone())
            .with_suffix_policy(self.suffix_policy)
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.is_file() {
        exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
    }
    debug!(path = %path.display(), "merging configuration file");
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    Ok(match extension.as_str() {
        "toml" => figment.merge(Toml::file(path)),
        "yaml" | "yml" => figment.merge(Yaml::file(path)),
        "json" => figment.merge(Json::file(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(extension)),
    })
}

/// Per-user configuration directory, if the platform has one.
pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "excerpt").map(|dirs| dirs.config_dir().to_path_buf())
}
