use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use valentine_app::{PreferenceStore, data_url, image_mime};
use valentine_core::Clock;

use super::super::editor::{field_editor_template, parse_field_editor_output, parse_line_editor_output};
use super::super::terminal::{EditorCommand, TuiTerminal, with_terminal_suspended};
use super::super::view::{Ui, UiAction};

pub(super) fn handle_ui_action<S: PreferenceStore, C: Clock>(
    terminal: &mut TuiTerminal,
    ui: &mut Ui<S, C>,
    action: UiAction,
) -> Result<()> {
    let editor = EditorCommand::from_env()?;
    let template = ui.editor_template(action);
    let raw = with_terminal_suspended(terminal, || editor.edit(&template))?;
    ui.apply_editor_output(action, &raw)
}

impl<S: PreferenceStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn editor_template(&self, action: UiAction) -> String {
        let draft = self.container.proposal().map(|p| p.draft());
        let tools = &self.tools;
        let photo = tools
            .memories
            .photo
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let (prompt, current) = match action {
            UiAction::EditPartner => (
                "Who is the invitation for?",
                draft.map(|d| d.partner.clone()).unwrap_or_default(),
            ),
            UiAction::EditSender => (
                "Who is asking?",
                draft.map(|d| d.sender.clone()).unwrap_or_default(),
            ),
            UiAction::EditLetterName => ("Who are you writing to?", tools.letter.request.name.clone()),
            UiAction::EditLetterMemories => (
                "Special memories to weave into the letter",
                tools.letter.request.memories.clone(),
            ),
            UiAction::EditSharePhone => ("Phone number to share the letter with", String::new()),
            UiAction::EditPlannerPreferences => (
                "Describe the date you dream of (places, food, mood)",
                tools.planner.preferences.clone(),
            ),
            UiAction::ChooseMemoryPhoto => ("Path to the photo", photo),
            UiAction::EditMemoryContext => (
                "Where was this, and what made it special?",
                tools.memories.context.clone(),
            ),
        };
        field_editor_template(prompt, &current)
    }

    /// Apply text returned by the editor. Blank input cancels.
    pub(in crate::tui) fn apply_editor_output(&mut self, action: UiAction, raw: &str) -> Result<()> {
        let parsed = match action {
            UiAction::EditLetterMemories | UiAction::EditPlannerPreferences | UiAction::EditMemoryContext => {
                parse_field_editor_output(raw)
            }
            _ => parse_line_editor_output(raw),
        };
        let Some(text) = parsed else {
            self.info("Nothing changed");
            return Ok(());
        };

        match action {
            UiAction::EditPartner | UiAction::EditSender => {
                let Some(session) = self.container.proposal_mut() else {
                    return Err(anyhow!("the proposal is no longer open"));
                };
                let draft = session.draft_mut();
                if action == UiAction::EditPartner {
                    draft.partner = text;
                } else {
                    draft.sender = text;
                }
            }
            UiAction::EditLetterName => self.tools.letter.request.name = text,
            UiAction::EditLetterMemories => self.tools.letter.request.memories = text,
            UiAction::EditSharePhone => self.share_letter(&text),
            UiAction::EditPlannerPreferences => self.tools.planner.preferences = text,
            UiAction::ChooseMemoryPhoto => self.load_photo(PathBuf::from(text))?,
            UiAction::EditMemoryContext => self.tools.memories.context = text,
        }
        Ok(())
    }

    fn load_photo(&mut self, path: PathBuf) -> Result<()> {
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(image_mime)
            .ok_or_else(|| anyhow!("{} is not a supported image", path.display()))?;
        let bytes = read_photo(&path)?;
        let memories = &mut self.tools.memories;
        memories.image = Some(data_url(mime, &bytes));
        memories.caption = None;
        memories.photo = Some(path);
        self.info("Photo loaded");
        Ok(())
    }
}

fn read_photo(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
