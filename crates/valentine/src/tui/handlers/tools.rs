use valentine_app::PreferenceStore;
use valentine_core::bouquet::{CATALOGUE, MAX_FLOWERS};
use valentine_core::{Clock, Toggle};

use super::super::view::Ui;

impl<S: PreferenceStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn copy_invitation_link(&mut self) {
        match self.container.draft_invitation_link() {
            Some(Ok(url)) => match self.clipboard.set_text(url.as_str()) {
                Ok(()) => self.info("Link copied!"),
                Err(err) => self.error(format!("Could not copy the link: {err}")),
            },
            Some(Err(err)) => self.error(format!("Could not build the link: {err}")),
            None => {}
        }
    }

    pub(in crate::tui) fn write_letter(&mut self) {
        match self.generator.generate_letter(&self.tools.letter.request) {
            Ok(letter) => {
                self.tools.letter.letter = Some(letter);
                self.info("Your letter is ready");
            }
            Err(err) => self.error(format!("Could not write the letter: {err}")),
        }
    }

    pub(in crate::tui) fn copy_letter(&mut self) {
        let Some(letter) = self.tools.letter.letter.as_deref() else {
            self.error("Nothing to copy yet");
            return;
        };
        match self.clipboard.set_text(letter) {
            Ok(()) => self.info("Letter copied!"),
            Err(err) => self.error(format!("Could not copy the letter: {err}")),
        }
    }

    /// Copy a message-compose link carrying the letter for `phone`.
    pub(in crate::tui) fn share_letter(&mut self, phone: &str) {
        let Some(letter) = self.tools.letter.letter.as_deref() else {
            self.error("Write a letter before sharing it");
            return;
        };
        let url = match valentine_core::link::share_link(phone, letter) {
            Ok(url) => url,
            Err(err) => {
                self.error(format!("Could not build the share link: {err}"));
                return;
            }
        };
        match self.clipboard.set_text(url.as_str()) {
            Ok(()) => self.info("Share link copied!"),
            Err(err) => self.error(format!("Could not copy the share link: {err}")),
        }
    }

    pub(in crate::tui) fn plan_date(&mut self) {
        match self.generator.generate_date_plan(&self.tools.planner.preferences) {
            Ok(plan) => {
                self.info(format!("Planned: {}", plan.title));
                self.tools.planner.plan = Some(plan);
            }
            Err(err) => self.error(format!("Could not plan the date: {err}")),
        }
    }

    pub(in crate::tui) fn move_bouquet_cursor(&mut self, delta: isize) {
        let state = &mut self.tools.bouquet;
        state.cursor = state
            .cursor
            .saturating_add_signed(delta)
            .min(CATALOGUE.len() - 1);
    }

    pub(in crate::tui) fn toggle_flower(&mut self) {
        let state = &mut self.tools.bouquet;
        if state.bouquet.is_sent() {
            return;
        }
        let Some(id) = CATALOGUE.get(state.cursor).map(|flower| flower.id) else {
            return;
        };
        match state.bouquet.toggle(id) {
            Toggle::Added | Toggle::Removed | Toggle::Unknown => {}
            Toggle::Full => self.error(format!("A bouquet holds at most {MAX_FLOWERS} flowers")),
        }
    }

    pub(in crate::tui) fn send_bouquet(&mut self) {
        if self.tools.bouquet.bouquet.send() {
            self.info("Bouquet sent!");
        } else {
            self.error("Pick at least one flower first");
        }
    }

    pub(in crate::tui) fn caption_memory(&mut self) {
        let memories = &self.tools.memories;
        let Some(image) = memories.image.as_deref() else {
            self.error("Choose a photo first");
            return;
        };
        match self.generator.curate_memory(image, &memories.context) {
            Ok(caption) => {
                self.tools.memories.caption = Some(caption);
                self.info("Memory captured");
            }
            Err(err) => self.error(format!("Could not caption the memory: {err}")),
        }
    }
}
