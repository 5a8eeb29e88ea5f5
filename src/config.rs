//! Layered configuration.
//!
//! Priority, highest first:
//!   1. CLI flags (`--pdfcrack`, `--json`) and `PDFCRACK_BIN`, applied by the binary
//!   2. `{project_root}/.pdfcrack-runner/config.toml`, where the project root is
//!      the nearest ancestor of the cwd holding `.pdfcrack-runner/` or `.git`
//!   3. `{user_dir}/config.toml`
//!   4. Built-in defaults
//!
//! ```toml
//! [pdfcrack]
//! command = "nice -n 19 pdfcrack"
//!
//! [output]
//! json = true
//! ```

use std::path::{Path, PathBuf};

pub const DEFAULT_COMMAND: &str = "pdfcrack";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Launch command; the first word is the program.
    pub command: String,
    /// Report results as JSON instead of plain text.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            json: false,
        }
    }
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    pdfcrack: Option<PdfcrackSection>,
    output: Option<OutputSection>,
}

#[derive(serde::Deserialize)]
struct PdfcrackSection {
    command: Option<String>,
}

#[derive(serde::Deserialize)]
struct OutputSection {
    json: Option<bool>,
}

/// Returns the user-level config directory.
///
/// `PDFCRACK_RUNNER_HOME`, when set and non-empty, replaces the platform
/// default of `{config_dir}/pdfcrack-runner`.
pub fn user_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("PDFCRACK_RUNNER_HOME")
        && !home.is_empty()
    {
        return Some(PathBuf::from(home));
    }
    dirs::config_dir().map(|d| d.join("pdfcrack-runner"))
}

/// Parse a config file. A missing file is silently skipped; an unreadable
/// or malformed one is skipped with a warning.
fn read_config(path: &Path) -> Option<ConfigFile> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("ignoring {}: {e}", path.display());
            return None;
        }
    };
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!("ignoring invalid config {}: {e}", path.display());
            None
        }
    }
}

/// Walk up from `dir` to the nearest ancestor containing `.pdfcrack-runner/` or `.git`.
/// Falls back to `dir` itself if neither is found.
pub fn project_root_for(dir: &Path) -> PathBuf {
    let mut current = dir.to_path_buf();
    loop {
        if current.join(".pdfcrack-runner").is_dir() || current.join(".git").exists() {
            return current;
        }
        if !current.pop() {
            break;
        }
    }
    dir.to_path_buf()
}

impl Config {
    /// Load using the project root above the current directory and the user
    /// config directory.
    pub fn load() -> Self {
        let root = std::env::current_dir()
            .ok()
            .map(|cwd| project_root_for(&cwd));
        let global = user_dir().map(|d| d.join("config.toml"));
        Self::load_from(root.as_deref(), global.as_deref())
    }

    /// Load from explicit locations. Project settings win over global ones,
    /// key by key.
    pub fn load_from(project_root: Option<&Path>, global_config: Option<&Path>) -> Self {
        let project = project_root
            .and_then(|root| read_config(&root.join(".pdfcrack-runner").join("config.toml")))
            .unwrap_or_default();
        let global = global_config.and_then(read_config).unwrap_or_default();

        let command_of = |f: &ConfigFile| {
            f.pdfcrack
                .as_ref()
                .and_then(|s| s.command.clone())
                .filter(|c| !c.trim().is_empty())
        };
        let json_of = |f: &ConfigFile| f.output.as_ref().and_then(|s| s.json);

        let defaults = Self::default();
        Self {
            command: command_of(&project)
                .or_else(|| command_of(&global))
                .unwrap_or(defaults.command),
            json: json_of(&project)
                .or_else(|| json_of(&global))
                .unwrap_or(defaults.json),
        }
    }

    /// Apply command-line overrides on top of the file configuration.
    #[must_use]
    pub fn with_overrides(mut self, command: Option<String>, json: bool) -> Self {
        if let Some(command) = command.filter(|c| !c.trim().is_empty()) {
            self.command = command;
        }
        self.json |= json;
        self
    }
}
