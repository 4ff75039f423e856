use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_COMPRESSED_EXTENSION: &str = ".z78";
const DEFAULT_DECOMPRESSED_EXTENSION: &str = ".txt";

/// Which way a file is being transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Compress,
    Decompress,
}

/// Output file extensions used when no explicit output path is given.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ExtensionSettings {
    /// Extension for compressed output (default ".z78")
    #[serde(default)]
    pub compressed: Option<String>,
    /// Extension for decompressed output (default ".txt")
    #[serde(default)]
    pub decompressed: Option<String>,
}

/// Global settings for lz78.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    /// Maximum input size in bytes, 0 = unlimited
    #[serde(default)]
    pub max_size: Option<usize>,
}

/// Configuration loaded from TOML files.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Lz78Config {
    #[serde(default)]
    pub extensions: ExtensionSettings,
    #[serde(default)]
    pub settings: Settings,
}

impl Lz78Config {
    /// Parses a configuration from TOML content. Missing keys stay unset.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in configuration bundled with the library.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../../lz78.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads configuration from a custom file path.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in defaults (from library)
    /// 2. `~/.config/lz78/config.toml` (user overrides)
    /// 3. `./lz78.toml` (project-local overrides)
    ///
    /// Later layers override earlier ones key by key. A layer that fails to
    /// load is skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("lz78").join("config.toml");
            config.merge_optional(&user_config_path);
        }

        config.merge_optional(Path::new("lz78.toml"));

        Ok(config)
    }

    fn merge_optional(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(layer) => {
                debug!(path = %path.display(), "loaded config layer");
                self.merge(layer);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config layer");
            }
        }
    }

    /// Merges another configuration into this one.
    ///
    /// Keys set in `other` win over keys in `self`.
    pub fn merge(&mut self, other: Lz78Config) {
        if other.extensions.compressed.is_some() {
            self.extensions.compressed = other.extensions.compressed;
        }
        if other.extensions.decompressed.is_some() {
            self.extensions.decompressed = other.extensions.decompressed;
        }
        if other.settings.max_size.is_some() {
            self.settings.max_size = other.settings.max_size;
        }
    }

    /// Extension given to output files produced in `direction`.
    pub fn extension(&self, direction: Direction) -> &str {
        match direction {
            Direction::Compress => self
                .extensions
                .compressed
                .as_deref()
                .unwrap_or(DEFAULT_COMPRESSED_EXTENSION),
            Direction::Decompress => self
                .extensions
                .decompressed
                .as_deref()
                .unwrap_or(DEFAULT_DECOMPRESSED_EXTENSION),
        }
    }

    /// Input size limit in bytes; 0 means unlimited.
    pub fn max_size(&self) -> usize {
        self.settings.max_size.unwrap_or(0)
    }

    /// Derives the output path for `input` when none was given.
    ///
    /// A trailing 4-character extension (a dot and three characters, such as
    /// `.txt`) is replaced by the configured extension; otherwise the
    /// extension is appended.
    ///
    /// # Example
    ///
    /// ```
    /// use lz78::{Direction, Lz78Config};
    /// use std::path::{Path, PathBuf};
    ///
    /// let config = Lz78Config::load_default().unwrap();
    /// assert_eq!(
    ///     config.default_output_path(Path::new("notes.txt"), Direction::Compress),
    ///     PathBuf::from("notes.z78")
    /// );
    /// ```
    pub fn default_output_path(&self, input: &Path, direction: Direction) -> PathBuf {
        let extension = self.extension(direction);
        let Some(name) = input.file_name().map(|n| n.to_string_lossy()) else {
            return PathBuf::from(format!("{}{}", input.display(), extension));
        };

        let split = name.len().saturating_sub(4);
        let stem = if name.len() > 4
            && name.is_char_boundary(split)
            && name[split..].starts_with('.')
        {
            &name[..split]
        } else {
            &name[..]
        };

        input.with_file_name(format!("{}{}", stem, extension))
    }
}
