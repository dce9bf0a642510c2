//! Application configuration for html2ipynb.
//!
//! User config lives at `~/.html2ipynb/html2ipynb.toml`.
//! CLI flags override config file values, which override defaults.
//! The conversion core never reads this itself; the CLI resolves it and
//! passes plain options down.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Html2IpynbError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "html2ipynb.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".html2ipynb";

/// Largest accepted JSON indent width.
const MAX_INDENT: usize = 8;

// ---------------------------------------------------------------------------
// Config structs (matching html2ipynb.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output formatting and write policy.
    #[serde(default)]
    pub output: OutputConfig,

    /// Extraction settings.
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON indent width in spaces.
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Replace an existing `.ipynb` next to the input.
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            overwrite: true,
        }
    }
}

fn default_indent() -> usize {
    1
}
fn default_true() -> bool {
    true
}

/// `[extract]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Which exporter markup convention to expect.
    #[serde(default)]
    pub profile: ProfileChoice,
}

/// Exporter markup selection: detect automatically or force one convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileChoice {
    /// Try the lab markup first, fall back to classic.
    #[default]
    Auto,
    /// JupyterLab-style `jp-*` classes.
    Lab,
    /// Classic notebook `cell` / `text_cell` / `code_cell` classes.
    Classic,
}

impl std::fmt::Display for ProfileChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Auto => "auto",
            Self::Lab => "lab",
            Self::Classic => "classic",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ProfileChoice {
    type Err = Html2IpynbError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "lab" | "jupyterlab" => Ok(Self::Lab),
            "classic" | "notebook" => Ok(Self::Classic),
            other => Err(Html2IpynbError::config(format!(
                "unknown profile '{other}': expected auto, lab, or classic"
            ))),
        }
    }
}

impl AppConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.output.indent > MAX_INDENT {
            return Err(Html2IpynbError::config(format!(
                "output.indent must be at most {MAX_INDENT}, got {}",
                self.output.indent
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.html2ipynb/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Html2IpynbError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.html2ipynb/html2ipynb.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Html2IpynbError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        Html2IpynbError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| Html2IpynbError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| Html2IpynbError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| Html2IpynbError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
