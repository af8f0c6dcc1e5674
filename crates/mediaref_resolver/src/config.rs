//! Resolver configuration.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from mediaref.toml)
//! - User overrides (~/.config/mediaref/mediaref.toml, then ./mediaref.toml)

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use mediaref_error::{ConfigError, ConfigErrorKind, MediaRefError, MediaRefResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Settings of a resolver session.
///
/// # Example
///
/// ```
/// use mediaref_resolver::ResolverConfig;
///
/// let config = ResolverConfig::default().with_base_url("https://media.example.org/");
/// assert_eq!(config.media_base_url(), "https://media.example.org/media");
/// assert!(*config.follow_links());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_", into)]
#[builder(default)]
pub struct ResolverConfig {
    /// Scheme and host of the media server
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Path segment between host and media paths
    #[serde(default = "default_url_fill_in")]
    url_fill_in: String,

    /// Whether linked assets are resolved too
    #[serde(default = "default_follow_links")]
    follow_links: bool,
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_url_fill_in() -> String {
    "media".to_string()
}

fn default_follow_links() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            url_fill_in: default_url_fill_in(),
            follow_links: default_follow_links(),
        }
    }
}

impl ResolverConfig {
    /// Prefix of every asset URL: `{base_url}/{url_fill_in}`.
    pub fn media_base_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let fill_in = self.url_fill_in.trim_matches('/');
        if fill_in.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, fill_in)
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MediaRefResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                MediaRefError::from(ConfigError::new(ConfigErrorKind::Unreadable(format!(
                    "{}: {}",
                    path.as_ref().display(),
                    e
                ))))
            })?
            .try_deserialize()
            .map_err(|e| {
                MediaRefError::from(ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mediaref_resolver::ResolverConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ResolverConfig::load()?;
    /// println!("Assets live under {}", config.media_base_url());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> MediaRefResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../mediaref.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/mediaref/mediaref.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("mediaref").required(false));

        builder
            .build()
            .map_err(|e| {
                MediaRefError::from(ConfigError::new(ConfigErrorKind::Unreadable(format!(
                    "layered sources: {}",
                    e
                ))))
            })?
            .try_deserialize()
            .map_err(|e| {
                MediaRefError::from(ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))
            })
    }
}
