//! Terminal ownership for the TUI and the external editor hand-off.

use std::env;
use std::fs;
use std::io::{self, Stdout, Write};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tempfile::Builder;

pub(super) type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Editor variables, most specific first.
const EDITOR_VARS: [&str; 3] = ["VALENTINE_EDITOR", "VISUAL", "EDITOR"];
const FALLBACK_EDITOR: &str = "vi";

/// Take over stdout for drawing.
pub(super) fn open() -> Result<TuiTerminal> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    acquire(&mut terminal)?;
    Ok(terminal)
}

/// Give the screen back to the shell while `f` runs, then take it again.
pub(super) fn with_terminal_suspended<T>(
    terminal: &mut TuiTerminal,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    release(terminal)?;
    let result = f();
    acquire(terminal)?;
    result
}

fn acquire(terminal: &mut TuiTerminal) -> Result<()> {
    execute!(terminal.backend_mut(), EnterAlternateScreen).context("failed to enter alternate screen")?;
    enable_raw_mode().context("failed to enable raw mode")?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    Ok(())
}

pub(super) fn release(terminal: &mut TuiTerminal) -> Result<()> {
    terminal.show_cursor()?;
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("failed to leave alternate screen")?;
    Ok(())
}

/// External editor invocation, already split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct EditorCommand {
    pub(super) program: String,
    pub(super) args: Vec<String>,
}

impl EditorCommand {
    pub(super) fn from_env() -> Result<Self> {
        Self::resolve(|name| env::var(name).ok())
    }

    /// First non-blank editor variable reported by `lookup`, else `vi`.
    pub(super) fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let line = EDITOR_VARS
            .iter()
            .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| FALLBACK_EDITOR.to_owned());
        Self::parse(&line)
    }

    pub(super) fn parse(line: &str) -> Result<Self> {
        let mut words = shell_words::split(line)
            .map_err(|err| anyhow!("cannot parse editor command {line:?}: {err}"))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| anyhow!("editor command is empty"))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Open `initial` in the editor and return the saved text.
    pub(super) fn edit(&self, initial: &str) -> Result<String> {
        let mut draft = Builder::new()
            .prefix("valentine-")
            .suffix(".txt")
            .tempfile()
            .context("failed to create a draft file")?;
        draft
            .write_all(initial.as_bytes())
            .context("failed to write the draft file")?;
        draft.flush().context("failed to flush the draft file")?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(draft.path())
            .status()
            .with_context(|| format!("failed to start editor {}", self.program))?;
        if !status.success() {
            return Err(anyhow!("editor {} exited abnormally ({status})", self.program));
        }

        fs::read_to_string(draft.path()).context("failed to read the edited draft")
    }
}
