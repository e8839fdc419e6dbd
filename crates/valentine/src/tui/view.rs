use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::RngCore;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
};
use valentine_app::{ContentGenerator, PreferenceStore, ViewContainer};
use valentine_core::{Bouquet, Clock, DatePlan, LetterRequest, View};

use super::clipboard::{ClipboardSink, default_clipboard};
use super::constants::{STATUS_FOOTER_HEIGHT, UI_MESSAGE_TTL_SECS};
use crate::config::{KeyBindingsConfig, ViewType};

/// Letter studio inputs and output.
#[derive(Debug, Default)]
pub(super) struct LetterState {
    pub(super) request: LetterRequest,
    pub(super) letter: Option<String>,
}

/// Date planner inputs and output.
#[derive(Debug, Default)]
pub(super) struct PlannerState {
    pub(super) preferences: String,
    pub(super) plan: Option<DatePlan>,
}

/// Bouquet selection plus the highlighted catalogue row.
#[derive(Debug, Default)]
pub(super) struct BouquetState {
    pub(super) bouquet: Bouquet,
    pub(super) cursor: usize,
}

/// Memory curator inputs and output.
#[derive(Debug, Default)]
pub(super) struct MemoriesState {
    pub(super) photo: Option<PathBuf>,
    pub(super) image: Option<String>,
    pub(super) context: String,
    pub(super) caption: Option<String>,
}

/// Local state of the four dashboard tools. Each tool starts fresh on entry.
#[derive(Debug, Default)]
pub(super) struct ToolState {
    pub(super) letter: LetterState,
    pub(super) planner: PlannerState,
    pub(super) bouquet: BouquetState,
    pub(super) memories: MemoriesState,
}

impl ToolState {
    fn reset_for(&mut self, view: View) {
        match view {
            View::LetterStudio => self.letter = LetterState::default(),
            View::DatePlanner => self.planner = PlannerState::default(),
            View::BouquetBuilder => self.bouquet = BouquetState::default(),
            View::MemoryCurator => self.memories = MemoriesState::default(),
            _ => {}
        }
    }
}

pub(super) struct Ui<S: PreferenceStore, C: Clock> {
    pub(super) container: ViewContainer<S, C>,
    pub(super) generator: Box<dyn ContentGenerator>,
    pub(super) rng: Box<dyn RngCore>,
    pub(super) clipboard: Box<dyn ClipboardSink>,
    pub(super) keybindings: KeyBindingsConfig,
    pub(super) tools: ToolState,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    shown: View,
}

impl<S: PreferenceStore, C: Clock> Ui<S, C> {
    pub(super) fn new(
        container: ViewContainer<S, C>,
        generator: Box<dyn ContentGenerator>,
        keybindings: KeyBindingsConfig,
    ) -> Self {
        let clipboard = default_clipboard();
        Self::with_parts(container, generator, Box::new(rand::rng()), clipboard, keybindings)
    }

    pub(super) fn with_parts(
        container: ViewContainer<S, C>,
        generator: Box<dyn ContentGenerator>,
        rng: Box<dyn RngCore>,
        clipboard: Box<dyn ClipboardSink>,
        keybindings: KeyBindingsConfig,
    ) -> Self {
        let shown = container.view();
        let mut ui = Self {
            container,
            generator,
            rng,
            clipboard,
            keybindings,
            tools: ToolState::default(),
            message: None,
            should_quit: false,
            shown,
        };
        ui.tools.reset_for(shown);
        ui
    }

    /// Pick up a view change made by the container and prepare the new screen.
    pub(super) fn sync_view(&mut self) {
        let view = self.container.view();
        if view != self.shown {
            self.tools.reset_for(view);
            self.shown = view;
        }
    }

    pub(super) const fn view_type(&self) -> ViewType {
        match self.shown {
            View::Landing => ViewType::Landing,
            View::OfficialProposal => ViewType::Proposal,
            View::Dashboard => ViewType::Dashboard,
            View::LetterStudio => ViewType::Letter,
            View::DatePlanner => ViewType::Planner,
            View::BouquetBuilder => ViewType::Bouquet,
            View::MemoryCurator => ViewType::Memories,
        }
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(STATUS_FOOTER_HEIGHT)])
            .split(f.area());

        match self.shown {
            View::Landing => self.draw_landing(f, chunks[0]),
            View::OfficialProposal => self.draw_proposal(f, chunks[0]),
            View::Dashboard => self.draw_dashboard(f, chunks[0]),
            View::LetterStudio => self.draw_letter(f, chunks[0]),
            View::DatePlanner => self.draw_planner(f, chunks[0]),
            View::BouquetBuilder => self.draw_bouquet(f, chunks[0]),
            View::MemoryCurator => self.draw_memories(f, chunks[0]),
        }
        self.draw_status(f, chunks[1]);
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    /// Drive timers and expire the status message.
    pub(super) fn tick(&mut self) {
        if let Some(view) = self.container.poll() {
            self.sync_view();
            if view == View::Dashboard {
                self.info(self.container.greeting());
            }
        }
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
    }
}

/// Work that needs the terminal handed over to an external editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UiAction {
    EditPartner,
    EditSender,
    EditLetterName,
    EditLetterMemories,
    EditSharePhone,
    EditPlannerPreferences,
    ChooseMemoryPhoto,
    EditMemoryContext,
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
