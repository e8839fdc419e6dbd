//! Configuration module for valentine-hub.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use valentine_app::AppConfig;

pub mod keybindings;

pub use keybindings::{Action, KeyBindingsConfig, ViewType};

/// Whole configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Timing, evasion and link settings.
    #[serde(flatten)]
    pub app: AppConfig,
    /// TUI configuration.
    #[serde(default)]
    pub tui: TuiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Keybindings configuration.
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

impl Config {
    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.app.validate()?;
        keybindings::validate_keybindings_config(&self.tui.keybindings)
    }
}

/// Returns the default configuration file path.
///
/// On Linux: `~/.config/valentine-hub/config.toml`
/// On macOS: `~/Library/Application Support/valentine-hub/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("valentine-hub").join("config.toml"))
}

/// Load configuration from a TOML file.
///
/// # Returns
/// - `Ok(Some(config))` if the file exists and was successfully parsed
/// - `Ok(None)` if the file does not exist
/// - `Err(_)` if there was an error reading or parsing the file
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Load and validate, falling back to defaults when no file exists.
pub fn load_validated(path: Option<&Path>) -> Result<Config> {
    let config = load_config(path)?.unwrap_or_default();
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Generate default configuration as TOML string.
pub fn generate_default_config_toml() -> Result<String> {
    let toml_str =
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default configuration")?;

    let header = r#"# valentine-hub Configuration
#
# [timing]      reveal_step_ms, confirmation_ms (confirmation must be longer)
# [evasion]     half_width, half_height, scale_step, max_scale
# [link]        origin used for invitation links
#
# [tui.keybindings.*]
# Each action can have multiple key bindings.
#
# Supported key formats:
# - Single characters: "j", "k", "a", "1"
# - Special keys: "Enter", "Esc", "Tab", "Space", "Backspace", "Delete"
# - Arrow keys: "Up", "Down", "Left", "Right"
# - Modified keys: "Ctrl+c", "Alt+k"
#
# A keybinding section that is present must list every action it contains.

"#;

    Ok(format!("{header}{toml_str}"))
}

/// Write the default configuration file.
pub fn init_config(output: Option<&Path>, force: bool) -> Result<()> {
    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| anyhow!("Could not determine config directory"))?,
    };
    let stdin = io::stdin();
    let mut out = io::stdout();
    write_default_config(&output_path, force, &mut stdin.lock(), &mut out)
}

fn write_default_config(
    path: &Path,
    force: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    if path.exists() && !force && !confirm_overwrite(path, input, out)? {
        writeln!(out, "Aborted.")?;
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = generate_default_config_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    writeln!(out, "✓ Wrote configuration file: {}", path.display())?;
    writeln!(out, "Restart `valentine tui` to apply changes.")?;
    Ok(())
}

fn confirm_overwrite(path: &Path, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "File already exists: {}\nOverwrite? [y/N]: ", path.display())?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn default_document_round_trips() {
        let text = generate_default_config_toml().unwrap();
        assert!(text.starts_with("# valentine-hub Configuration"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.app, AppConfig::default());
        parsed.validate().unwrap();
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).unwrap().is_none());
        assert_eq!(
            load_validated(Some(&dir.path().join("absent.toml"))).unwrap().app,
            AppConfig::default()
        );
    }

    #[test]
    fn partial_document_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[timing]\nreveal_step_ms = 500\nconfirmation_ms = 900\n\n[tui.keybindings.landing]\naccept = [\"a\"]\ndecline = [\"d\"]\n",
        )
        .unwrap();

        let config = load_validated(Some(&path)).unwrap();
        assert_eq!(config.app.timing.reveal_step_ms, 500);
        assert!((config.app.evasion.max_scale - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.tui.keybindings.landing.accept, vec!["a"]);
        assert_eq!(config.tui.keybindings.global.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timing]\nreveal_step_ms = 500\nconfirmation_ms = 100\n").unwrap();
        assert!(load_validated(Some(&path)).is_err());

        std::fs::write(&path, "[timing\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn init_asks_before_overwriting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut out = Vec::new();
        write_default_config(&path, false, &mut Cursor::new(""), &mut out).unwrap();
        assert!(path.exists());

        std::fs::write(&path, "# mine\n").unwrap();
        let mut out = Vec::new();
        write_default_config(&path, false, &mut Cursor::new("n\n"), &mut out).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
        assert!(String::from_utf8(out).unwrap().contains("Aborted."));

        let mut out = Vec::new();
        write_default_config(&path, false, &mut Cursor::new("yes\n"), &mut out).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("# valentine-hub"));

        std::fs::write(&path, "# mine\n").unwrap();
        let mut out = Vec::new();
        write_default_config(&path, true, &mut Cursor::new(""), &mut out).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("# valentine-hub"));
    }
}
