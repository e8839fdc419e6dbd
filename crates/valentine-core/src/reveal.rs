//! Timed line-by-line reveal that ends in the proposal question.

use std::time::{Duration, Instant};

use crate::timer::OneShotTimer;

/// Delay between two revealed lines.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(3500);

/// Fixed, ordered lines of the proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealScript {
    lines: Vec<String>,
}

impl RevealScript {
    /// The proposal script, addressing `partner` on the second line when known.
    #[must_use]
    pub fn proposal(partner: Option<&str>) -> Self {
        let second = partner.filter(|name| !name.is_empty()).map_or_else(
            || "Every thread seems to have led me directly to you.".to_owned(),
            |name| format!("Every thread seems to have led me directly to you, {name}."),
        );
        let lines = vec![
            "In the grand tapestry of existence...".to_owned(),
            second,
            "From the first smile we shared, to the quiet moments that now define us.".to_owned(),
            "I've realized that 'home' isn't a place, but a person.".to_owned(),
            "You are my North Star, my sanctuary, and my greatest adventure.".to_owned(),
            "Every heartbeat of mine carries a message meant only for your ears.".to_owned(),
            "I promise to choose you, every single day, in every single lifetime.".to_owned(),
            "And so, with all that I am and all that I will ever be...".to_owned(),
            "I have one final, beautiful question to ask.".to_owned(),
        ];
        Self { lines }
    }

    /// Script made of arbitrary lines.
    #[must_use]
    pub const fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the script has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Position of the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Showing lines up to and including `step`.
    Revealing(usize),
    /// Every line shown; the question is on screen.
    Asking,
}

/// How a visible line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// The line currently being revealed.
    Current,
    /// A line revealed earlier.
    Past,
}

/// Drives a [`RevealScript`] one line per timer firing.
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    script: RevealScript,
    state: RevealState,
    timer: OneShotTimer,
    step_delay: Duration,
}

impl RevealSequencer {
    /// Sequencer at `Revealing(0)` with no timer armed yet.
    #[must_use]
    pub fn new(script: RevealScript, step_delay: Duration) -> Self {
        let state = if script.is_empty() {
            RevealState::Asking
        } else {
            RevealState::Revealing(0)
        };
        Self {
            script,
            state,
            timer: OneShotTimer::idle(),
            step_delay,
        }
    }

    /// Restart from the first line. Any pending firing is discarded first.
    pub fn start(&mut self, now: Instant) {
        self.timer.cancel();
        if self.script.is_empty() {
            self.state = RevealState::Asking;
            return;
        }
        self.state = RevealState::Revealing(0);
        self.timer.arm(now, self.step_delay);
    }

    /// Stop advancing. No transition fires after this call until `start`.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// Advance by at most one step if the pending timer is due.
    ///
    /// Returns the new state when a transition happened.
    pub fn poll(&mut self, now: Instant) -> Option<RevealState> {
        let RevealState::Revealing(step) = self.state else {
            return None;
        };
        if !self.timer.fire_if_due(now) {
            return None;
        }
        let next = step + 1;
        if next >= self.script.len() {
            self.state = RevealState::Asking;
        } else {
            self.state = RevealState::Revealing(next);
            self.timer.arm(now, self.step_delay);
        }
        Some(self.state)
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> RevealState {
        self.state
    }

    /// Whether the question is on screen.
    #[must_use]
    pub const fn is_asking(&self) -> bool {
        matches!(self.state, RevealState::Asking)
    }

    /// Whether a step is scheduled.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Script being revealed.
    #[must_use]
    pub const fn script(&self) -> &RevealScript {
        &self.script
    }

    /// Progress as `step`, where the script length stands for `Asking`.
    #[must_use]
    pub fn step(&self) -> usize {
        match self.state {
            RevealState::Revealing(step) => step,
            RevealState::Asking => self.script.len(),
        }
    }

    /// Lines visible so far with their presentation.
    pub fn visible_lines(&self) -> impl Iterator<Item = (&str, Emphasis)> + '_ {
        let step = self.step();
        self.script
            .lines()
            .iter()
            .take((step + 1).min(self.script.len()))
            .enumerate()
            .map(move |(index, line)| {
                let emphasis = if index == step { Emphasis::Current } else { Emphasis::Past };
                (line.as_str(), emphasis)
            })
    }
}
