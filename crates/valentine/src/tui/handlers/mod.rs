use anyhow::Result;
use valentine_app::PreferenceStore;
use valentine_core::Clock;

use super::terminal::TuiTerminal;
use super::view::{Ui, UiAction};

pub(super) mod edit;
pub(super) mod navigation;
pub(super) mod tools;

pub(super) fn handle_ui_action<S: PreferenceStore, C: Clock>(
    terminal: &mut TuiTerminal,
    ui: &mut Ui<S, C>,
    action: UiAction,
) -> Result<()> {
    edit::handle_ui_action(terminal, ui, action)
}
