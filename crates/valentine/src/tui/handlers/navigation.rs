use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::debug;
use valentine_app::PreferenceStore;
use valentine_core::{Clock, View};

use super::super::view::{Ui, UiAction};
use crate::config::{Action, ViewType};

impl<S: PreferenceStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if self.keybindings.matches(ViewType::Global, Action::Quit, &key) {
            self.should_quit = true;
            return None;
        }

        let action = if self.keybindings.matches(ViewType::Global, Action::Back, &key) {
            self.go_back();
            None
        } else {
            match self.view_type() {
                ViewType::Landing => self.handle_landing_key(&key),
                ViewType::Proposal => self.handle_proposal_key(&key),
                ViewType::Dashboard => self.handle_dashboard_key(&key),
                ViewType::Letter => self.handle_letter_key(&key),
                ViewType::Planner => self.handle_planner_key(&key),
                ViewType::Bouquet => self.handle_bouquet_key(&key),
                ViewType::Memories => self.handle_memories_key(&key),
                ViewType::Global => None,
            }
        };
        self.sync_view();
        action
    }

    fn is(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        self.keybindings.matches(view, action, key)
    }

    fn go_back(&mut self) {
        match self.container.view() {
            View::OfficialProposal => {
                if self.container.proposal().is_some_and(|p| p.is_share_open()) {
                    self.container.toggle_share();
                }
            }
            view if view.is_tool() => {
                self.container.navigate(View::Dashboard);
            }
            _ => {}
        }
    }

    fn handle_landing_key(&mut self, key: &KeyEvent) -> Option<UiAction> {
        if self.is(ViewType::Landing, Action::Accept, key) {
            self.container.start_proposal();
        } else if self.is(ViewType::Landing, Action::Decline, key) {
            if let Some(offset) = self.container.decline_attempt(&mut *self.rng) {
                debug!(x = offset.x, y = offset.y, "decline dodged");
            }
        }
        None
    }

    fn handle_proposal_key(&mut self, key: &KeyEvent) -> Option<UiAction> {
        let share_open = self.container.proposal().is_some_and(|p| p.is_share_open());

        if self.is(ViewType::Proposal, Action::Accept, key) {
            if self.container.accept_proposal() {
                self.info("It's official! Opening your hub...");
            }
            return None;
        }
        if self.is(ViewType::Proposal, Action::ToggleShare, key) {
            self.container.toggle_share();
            return None;
        }
        if !share_open {
            return None;
        }
        if self.is(ViewType::Proposal, Action::EditPartner, key) {
            return Some(UiAction::EditPartner);
        }
        if self.is(ViewType::Proposal, Action::EditSender, key) {
            return Some(UiAction::EditSender);
        }
        if self.is(ViewType::Proposal, Action::CopyLink, key) {
            self.copy_invitation_link();
        }
        None
    }

    fn handle_dashboard_key(&mut self, key: &KeyEvent) -> Option<UiAction> {
        let targets = [
            (Action::OpenLetter, View::LetterStudio),
            (Action::OpenMemories, View::MemoryCurator),
            (Action::OpenPlanner, View::DatePlanner),
            (Action::OpenBouquet, View::BouquetBuilder),
        ];
        if let Some((_, view)) = targets
            .into_iter()
            .find(|(action, _)| self.is(ViewType::Dashboard, *action, key))
        {
            self.container.navigate(view);
        } else if self.is(ViewType::Dashboard, Action::Reset, key) {
            self.container.reset();
            self.info("Everything forgotten. Back to the beginning.");
        }
        None
    }

    fn handle_letter_key(&mut self, key: &KeyEvent) -> Option<UiAction> {
        if self.is(ViewType::Letter, Action::EditName, key) {
            return Some(UiAction::EditLetterName);
        }
        if self.is(ViewType::Letter, Action::EditMemories, key) {
            return Some(UiAction::EditLetterMemories);
        }
        if self.is(ViewType::Letter, Action::CycleTone, key) {
            let tone = &mut self.tools.letter.request.tone;
            *tone = tone.next();
        } else if self.is(ViewType::Letter, Action::Generate, key) {
            self.write_letter();
        } else if self.is(ViewType::Letter, Action::Copy, key) {
            self.copy_letter();
        } else if self.is(ViewType::Letter, Action::Share, key) {
            if self.tools.letter.letter.is_some() {
                return Some(UiAction::EditSharePhone);
            }
            self.error("Write a letter before sharing it");
        }
        None
    }

    fn handle_planner_key(&mut self, key: &KeyEvent) -> Option<UiAction> {
        if self.is(ViewType::Planner, Action::EditPreferences, key) {
            return Some(UiAction::EditPlannerPreferences);
        }
        if self.is(ViewType::Planner, Action::Generate, key) {
            self.plan_date();
        }
        None
    }

    fn handle_bouquet_key(&mut self, key: &KeyEvent) -> Option<UiAction> {
        if self.is(ViewType::Bouquet, Action::Down, key) {
            self.move_bouquet_cursor(1);
        } else if self.is(ViewType::Bouquet, Action::Up, key) {
            self.move_bouquet_cursor(-1);
        } else if self.is(ViewType::Bouquet, Action::Toggle, key) {
            self.toggle_flower();
        } else if self.is(ViewType::Bouquet, Action::Send, key) {
            self.send_bouquet();
        }
        None
    }

    fn handle_memories_key(&mut self, key: &KeyEvent) -> Option<UiAction> {
        if self.is(ViewType::Memories, Action::ChoosePhoto, key) {
            return Some(UiAction::ChooseMemoryPhoto);
        }
        if self.is(ViewType::Memories, Action::EditContext, key) {
            return Some(UiAction::EditMemoryContext);
        }
        if self.is(ViewType::Memories, Action::Generate, key) {
            self.caption_memory();
        }
        None
    }
}
