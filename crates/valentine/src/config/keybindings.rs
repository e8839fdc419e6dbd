//! Keybindings configuration for the TUI.

#![allow(clippy::uninlined_format_args, clippy::enum_glob_use)]

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Keybindings for every screen of the TUI.
///
/// A section left out of the file keeps its defaults; a section that is
/// present must define all of its actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingsConfig {
    /// Keys available everywhere.
    pub global: GlobalKeyBindings,
    /// Landing page.
    pub landing: LandingKeyBindings,
    /// Official proposal.
    pub proposal: ProposalKeyBindings,
    /// Dashboard hub.
    pub dashboard: DashboardKeyBindings,
    /// Letter studio.
    pub letter: LetterKeyBindings,
    /// Date planner.
    pub planner: PlannerKeyBindings,
    /// Bouquet builder.
    pub bouquet: BouquetKeyBindings,
    /// Memory curator.
    pub memories: MemoriesKeyBindings,
}

/// Keys available on every screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Go back one level.
    pub back: Vec<String>,
}

/// Landing page keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingKeyBindings {
    /// Say yes and open the proposal.
    pub accept: Vec<String>,
    /// Try to decline.
    pub decline: Vec<String>,
}

/// Official proposal keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalKeyBindings {
    /// Say yes.
    pub accept: Vec<String>,
    /// Open or close the share panel.
    pub toggle_share: Vec<String>,
    /// Edit the partner name of the invitation.
    pub edit_partner: Vec<String>,
    /// Edit the sender name of the invitation.
    pub edit_sender: Vec<String>,
    /// Copy the invitation link.
    pub copy_link: Vec<String>,
}

/// Dashboard keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardKeyBindings {
    /// Open the letter studio.
    pub letter: Vec<String>,
    /// Open the memory curator.
    pub memories: Vec<String>,
    /// Open the date planner.
    pub planner: Vec<String>,
    /// Open the bouquet builder.
    pub bouquet: Vec<String>,
    /// Forget everything and start over.
    pub reset: Vec<String>,
}

/// Letter studio keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterKeyBindings {
    /// Edit the recipient name.
    pub edit_name: Vec<String>,
    /// Edit the shared memories.
    pub edit_memories: Vec<String>,
    /// Switch to the next tone.
    pub cycle_tone: Vec<String>,
    /// Write the letter.
    pub generate: Vec<String>,
    /// Copy the letter.
    pub copy: Vec<String>,
    /// Copy a message-compose link for the letter.
    pub share: Vec<String>,
}

/// Date planner keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerKeyBindings {
    /// Edit the date preferences.
    pub edit_preferences: Vec<String>,
    /// Plan the date.
    pub generate: Vec<String>,
}

/// Bouquet builder keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BouquetKeyBindings {
    /// Move down the catalogue.
    pub down: Vec<String>,
    /// Move up the catalogue.
    pub up: Vec<String>,
    /// Add or remove the highlighted flower.
    pub toggle: Vec<String>,
    /// Send the bouquet.
    pub send: Vec<String>,
}

/// Memory curator keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoriesKeyBindings {
    /// Pick a photo from disk.
    pub choose_photo: Vec<String>,
    /// Edit the context of the photo.
    pub edit_context: Vec<String>,
    /// Caption the photo.
    pub generate: Vec<String>,
}

impl Default for GlobalKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Ctrl+c"],
            back: vec_of_strings!["Esc", "Backspace"],
        }
    }
}

impl Default for LandingKeyBindings {
    fn default() -> Self {
        Self {
            accept: vec_of_strings!["y", "Y", "Enter"],
            decline: vec_of_strings!["n", "N"],
        }
    }
}

impl Default for ProposalKeyBindings {
    fn default() -> Self {
        Self {
            accept: vec_of_strings!["y", "Y", "Enter"],
            toggle_share: vec_of_strings!["s", "S"],
            edit_partner: vec_of_strings!["t", "T"],
            edit_sender: vec_of_strings!["f", "F"],
            copy_link: vec_of_strings!["c", "C"],
        }
    }
}

impl Default for DashboardKeyBindings {
    fn default() -> Self {
        Self {
            letter: vec_of_strings!["1", "l"],
            memories: vec_of_strings!["2", "m"],
            planner: vec_of_strings!["3", "p"],
            bouquet: vec_of_strings!["4", "b"],
            reset: vec_of_strings!["X"],
        }
    }
}

impl Default for LetterKeyBindings {
    fn default() -> Self {
        Self {
            edit_name: vec_of_strings!["n"],
            edit_memories: vec_of_strings!["m"],
            cycle_tone: vec_of_strings!["t", "Tab"],
            generate: vec_of_strings!["g", "Enter"],
            copy: vec_of_strings!["c"],
            share: vec_of_strings!["w"],
        }
    }
}

impl Default for PlannerKeyBindings {
    fn default() -> Self {
        Self {
            edit_preferences: vec_of_strings!["e"],
            generate: vec_of_strings!["g", "Enter"],
        }
    }
}

impl Default for BouquetKeyBindings {
    fn default() -> Self {
        Self {
            down: vec_of_strings!["j", "Down"],
            up: vec_of_strings!["k", "Up"],
            toggle: vec_of_strings!["Space"],
            send: vec_of_strings!["Enter"],
        }
    }
}

impl Default for MemoriesKeyBindings {
    fn default() -> Self {
        Self {
            choose_photo: vec_of_strings!["o"],
            edit_context: vec_of_strings!["e"],
            generate: vec_of_strings!["g", "Enter"],
        }
    }
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Enter" -> `KeyCode::Enter`
/// - "Ctrl+c" -> `KeyCode::Char('c')` with CONTROL modifier
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    let parts: Vec<&str> = s.split('+').collect();
    let Some((&key_part, modifier_parts)) = parts.split_last() else {
        bail!("Empty key string");
    };

    let mut modifiers = KeyModifiers::NONE;
    for &modifier in modifier_parts {
        match modifier {
            "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
            "Alt" => modifiers |= KeyModifiers::ALT,
            "Shift" => modifiers |= KeyModifiers::SHIFT,
            other => bail!("Unknown modifier: {}", other),
        }
    }

    let code = parse_key_code(key_part)?;
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Space" => Ok(KeyCode::Char(' ')),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "Delete" => Ok(KeyCode::Delete),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        other => bail!("Unknown key: {}", other),
    }
}

/// Screen a binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    /// Every screen.
    Global,
    /// Landing page.
    Landing,
    /// Official proposal.
    Proposal,
    /// Dashboard.
    Dashboard,
    /// Letter studio.
    Letter,
    /// Date planner.
    Planner,
    /// Bouquet builder.
    Bouquet,
    /// Memory curator.
    Memories,
}

impl ViewType {
    const SCREENS: [Self; 7] = [
        Self::Landing,
        Self::Proposal,
        Self::Dashboard,
        Self::Letter,
        Self::Planner,
        Self::Bouquet,
        Self::Memories,
    ];

    const fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Landing => "landing",
            Self::Proposal => "proposal",
            Self::Dashboard => "dashboard",
            Self::Letter => "letter",
            Self::Planner => "planner",
            Self::Bouquet => "bouquet",
            Self::Memories => "memories",
        }
    }
}

/// Action that can be performed on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Global
    /// Quit the application.
    Quit,
    /// Go back.
    Back,

    // Landing and proposal
    /// Say yes.
    Accept,
    /// Try to say no.
    Decline,
    /// Toggle the share panel.
    ToggleShare,
    /// Edit the invitation partner name.
    EditPartner,
    /// Edit the invitation sender name.
    EditSender,
    /// Copy the invitation link.
    CopyLink,

    // Dashboard
    /// Open the letter studio.
    OpenLetter,
    /// Open the memory curator.
    OpenMemories,
    /// Open the date planner.
    OpenPlanner,
    /// Open the bouquet builder.
    OpenBouquet,
    /// Clear stored preferences.
    Reset,

    // Tools
    /// Edit the letter recipient.
    EditName,
    /// Edit the letter memories.
    EditMemories,
    /// Next letter tone.
    CycleTone,
    /// Run the generator.
    Generate,
    /// Copy the result.
    Copy,
    /// Copy a share link for the result.
    Share,
    /// Edit the planner preferences.
    EditPreferences,
    /// Move down.
    Down,
    /// Move up.
    Up,
    /// Add or remove a flower.
    Toggle,
    /// Send the bouquet.
    Send,
    /// Choose a photo.
    ChoosePhoto,
    /// Edit the photo context.
    EditContext,
}

impl KeyBindingsConfig {
    /// Check if a key event matches a configured action on a screen.
    pub fn matches(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        self.get_keys(view, action)
            .iter()
            .filter_map(|key_str| parse_key(key_str).ok())
            .any(|expected| Self::key_event_matches(&expected, key))
    }

    fn key_event_matches(expected: &KeyEvent, actual: &KeyEvent) -> bool {
        if expected.code != actual.code {
            return false;
        }
        // Terminals report upper-case letters with SHIFT set.
        let ignored = match actual.code {
            KeyCode::Char(c) if c.is_uppercase() => KeyModifiers::SHIFT,
            _ => KeyModifiers::NONE,
        };
        expected.modifiers.difference(ignored) == actual.modifiers.difference(ignored)
    }

    fn get_keys(&self, view: ViewType, action: Action) -> &[String] {
        use Action::*;
        use ViewType::*;

        match (view, action) {
            (Global, Quit) => &self.global.quit,
            (Global, Back) => &self.global.back,

            (Landing, Accept) => &self.landing.accept,
            (Landing, Decline) => &self.landing.decline,

            (Proposal, Accept) => &self.proposal.accept,
            (Proposal, ToggleShare) => &self.proposal.toggle_share,
            (Proposal, EditPartner) => &self.proposal.edit_partner,
            (Proposal, EditSender) => &self.proposal.edit_sender,
            (Proposal, CopyLink) => &self.proposal.copy_link,

            (Dashboard, OpenLetter) => &self.dashboard.letter,
            (Dashboard, OpenMemories) => &self.dashboard.memories,
            (Dashboard, OpenPlanner) => &self.dashboard.planner,
            (Dashboard, OpenBouquet) => &self.dashboard.bouquet,
            (Dashboard, Reset) => &self.dashboard.reset,

            (Letter, EditName) => &self.letter.edit_name,
            (Letter, EditMemories) => &self.letter.edit_memories,
            (Letter, CycleTone) => &self.letter.cycle_tone,
            (Letter, Generate) => &self.letter.generate,
            (Letter, Copy) => &self.letter.copy,
            (Letter, Share) => &self.letter.share,

            (Planner, EditPreferences) => &self.planner.edit_preferences,
            (Planner, Generate) => &self.planner.generate,

            (Bouquet, Down) => &self.bouquet.down,
            (Bouquet, Up) => &self.bouquet.up,
            (Bouquet, Toggle) => &self.bouquet.toggle,
            (Bouquet, Send) => &self.bouquet.send,

            (Memories, ChoosePhoto) => &self.memories.choose_photo,
            (Memories, EditContext) => &self.memories.edit_context,
            (Memories, Generate) => &self.memories.generate,

            _ => &[],
        }
    }

    fn bindings(&self, view: ViewType) -> Vec<(&'static str, &[String])> {
        match view {
            ViewType::Global => vec![("quit", &self.global.quit), ("back", &self.global.back)],
            ViewType::Landing => vec![
                ("accept", &self.landing.accept),
                ("decline", &self.landing.decline),
            ],
            ViewType::Proposal => vec![
                ("accept", &self.proposal.accept),
                ("toggle_share", &self.proposal.toggle_share),
                ("edit_partner", &self.proposal.edit_partner),
                ("edit_sender", &self.proposal.edit_sender),
                ("copy_link", &self.proposal.copy_link),
            ],
            ViewType::Dashboard => vec![
                ("letter", &self.dashboard.letter),
                ("memories", &self.dashboard.memories),
                ("planner", &self.dashboard.planner),
                ("bouquet", &self.dashboard.bouquet),
                ("reset", &self.dashboard.reset),
            ],
            ViewType::Letter => vec![
                ("edit_name", &self.letter.edit_name),
                ("edit_memories", &self.letter.edit_memories),
                ("cycle_tone", &self.letter.cycle_tone),
                ("generate", &self.letter.generate),
                ("copy", &self.letter.copy),
                ("share", &self.letter.share),
            ],
            ViewType::Planner => vec![
                ("edit_preferences", &self.planner.edit_preferences),
                ("generate", &self.planner.generate),
            ],
            ViewType::Bouquet => vec![
                ("down", &self.bouquet.down),
                ("up", &self.bouquet.up),
                ("toggle", &self.bouquet.toggle),
                ("send", &self.bouquet.send),
            ],
            ViewType::Memories => vec![
                ("choose_photo", &self.memories.choose_photo),
                ("edit_context", &self.memories.edit_context),
                ("generate", &self.memories.generate),
            ],
        }
    }

    /// Help line for a screen, global keys last.
    pub fn help_text(&self, view: ViewType) -> String {
        let mut parts: Vec<String> = if view == ViewType::Global {
            Vec::new()
        } else {
            self.bindings(view)
                .into_iter()
                .map(|(name, keys)| format!("{}:{}", Self::format_first_key(keys), name.replace('_', " ")))
                .collect()
        };
        parts.push(format!("{}:back", Self::format_first_key(&self.global.back)));
        parts.push(format!("{}:quit", Self::format_first_key(&self.global.quit)));
        parts.join("  ")
    }

    /// First configured key of an action, formatted for display.
    pub fn first_key(&self, view: ViewType, action: Action) -> Option<String> {
        self.get_keys(view, action)
            .first()
            .map(|k| Self::format_key_display(k))
    }

    fn format_first_key(keys: &[String]) -> String {
        keys.first()
            .map_or_else(|| "?".to_string(), |k| Self::format_key_display(k))
    }

    fn format_key_display(key: &str) -> String {
        match key {
            "Enter" => "↵".to_string(),
            "Backspace" => "BS".to_string(),
            "Delete" => "Del".to_string(),
            "Space" => "␣".to_string(),
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "PageUp" => "PgUp".to_string(),
            "PageDown" => "PgDn".to_string(),
            other if other.starts_with("Ctrl+") || other.starts_with("Alt+") => other.replace('+', "-"),
            other => other.to_string(),
        }
    }
}

/// Validate the keybindings configuration.
///
/// Checks for:
/// - Empty key bindings
/// - Invalid key expressions
/// - Key conflicts within a screen, global keys included
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    let global = config.bindings(ViewType::Global);
    validate_view_keybindings(ViewType::Global.name(), &global)?;

    for view in ViewType::SCREENS {
        let mut bindings = config.bindings(view);
        validate_view_keybindings(view.name(), &bindings)?;
        bindings.extend(global.iter().copied());
        check_conflicts(view.name(), &bindings)?;
    }
    Ok(())
}

fn validate_view_keybindings(view_name: &str, bindings: &[(&'static str, &[String])]) -> Result<()> {
    for (action, keys) in bindings {
        if keys.is_empty() {
            bail!("{}.{} must have at least one key binding", view_name, action);
        }
        for key in *keys {
            parse_key(key).with_context(|| format!("Invalid key '{}' in {}.{}", key, view_name, action))?;
        }
    }
    Ok(())
}

fn check_conflicts(view_name: &str, bindings: &[(&'static str, &[String])]) -> Result<()> {
    let mut key_to_actions: HashMap<&str, Vec<&str>> = HashMap::new();
    for (action, keys) in bindings {
        for key in *keys {
            key_to_actions.entry(key.as_str()).or_default().push(action);
        }
    }

    let mut conflicts: Vec<_> = key_to_actions
        .into_iter()
        .filter(|(_, actions)| actions.len() > 1)
        .collect();
    conflicts.sort_unstable();
    if let Some((key, actions)) = conflicts.first() {
        bail!(
            "Key '{}' is bound to multiple actions in {}: {:?}",
            key,
            view_name,
            actions
        );
    }
    Ok(())
}
