//! Local state of the official proposal view.

use std::time::{Duration, Instant};

use valentine_core::{
    OneShotTimer, PersistedPreferences, RevealScript, RevealSequencer, RevealState,
};

use crate::config::TimingConfig;

/// Where the proposal view is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalPhase {
    /// Lines are still appearing, or the question is being asked.
    Reveal(RevealState),
    /// The user said yes; the dashboard opens when the confirmation timer fires.
    Accepted,
}

/// Something the container must react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The reveal moved on.
    Advanced(RevealState),
    /// The acceptance screen has been shown long enough.
    ConfirmationElapsed,
}

/// Names typed into the share panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareDraft {
    /// Partner name for the invitation link.
    pub partner: String,
    /// Sender name for the invitation link.
    pub sender: String,
}

/// One visit of the proposal view. Dropping or cancelling it disarms both timers.
#[derive(Debug, Clone)]
pub struct ProposalSession {
    sequencer: RevealSequencer,
    confirmation: OneShotTimer,
    confirmation_delay: Duration,
    accepted: bool,
    share_open: bool,
    draft: ShareDraft,
    partner_name: Option<String>,
    sender_name: Option<String>,
}

impl ProposalSession {
    /// Session for the given preferences, not yet started.
    #[must_use]
    pub fn new(prefs: &PersistedPreferences, timing: &TimingConfig) -> Self {
        let script = RevealScript::proposal(prefs.partner_name.as_deref());
        Self {
            sequencer: RevealSequencer::new(script, timing.reveal_step()),
            confirmation: OneShotTimer::idle(),
            confirmation_delay: timing.confirmation(),
            accepted: false,
            share_open: false,
            draft: ShareDraft {
                partner: prefs.partner_name.clone().unwrap_or_default(),
                sender: prefs.sender_name.clone().unwrap_or_default(),
            },
            partner_name: prefs.partner_name.clone(),
            sender_name: prefs.sender_name.clone(),
        }
    }

    /// Begin the reveal.
    pub fn start(&mut self, now: Instant) {
        self.confirmation.cancel();
        self.accepted = false;
        self.sequencer.start(now);
    }

    /// Disarm every timer. Nothing fires afterwards.
    pub fn cancel(&mut self) {
        self.sequencer.cancel();
        self.confirmation.cancel();
    }

    /// Drive whichever timer is relevant to the current phase.
    pub fn poll(&mut self, now: Instant) -> Option<SessionEvent> {
        if self.accepted {
            return self
                .confirmation
                .fire_if_due(now)
                .then_some(SessionEvent::ConfirmationElapsed);
        }
        self.sequencer.poll(now).map(SessionEvent::Advanced)
    }

    /// Say yes. Only possible while the question is asked, and only once.
    pub fn accept(&mut self, now: Instant) -> bool {
        if self.accepted || !self.sequencer.is_asking() {
            return false;
        }
        self.accepted = true;
        self.share_open = false;
        self.confirmation.arm(now, self.confirmation_delay);
        true
    }

    /// Open or close the share panel while the question is asked.
    pub fn toggle_share(&mut self) -> bool {
        if self.accepted || !self.sequencer.is_asking() {
            return false;
        }
        self.share_open = !self.share_open;
        true
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> ProposalPhase {
        if self.accepted {
            ProposalPhase::Accepted
        } else {
            ProposalPhase::Reveal(self.sequencer.state())
        }
    }

    /// Reveal progress.
    #[must_use]
    pub const fn sequencer(&self) -> &RevealSequencer {
        &self.sequencer
    }

    /// Whether the share panel is open.
    #[must_use]
    pub const fn is_share_open(&self) -> bool {
        self.share_open
    }

    /// Names typed into the share panel.
    #[must_use]
    pub const fn draft(&self) -> &ShareDraft {
        &self.draft
    }

    /// Mutable access to the share panel names.
    pub const fn draft_mut(&mut self) -> &mut ShareDraft {
        &mut self.draft
    }

    /// Partner addressed by the script, if known.
    #[must_use]
    pub fn partner_name(&self) -> Option<&str> {
        self.partner_name.as_deref()
    }

    /// Sender signing the question, if known.
    #[must_use]
    pub fn sender_name(&self) -> Option<&str> {
        self.sender_name.as_deref()
    }

    /// Whether any timer is pending.
    #[must_use]
    pub const fn has_pending_timer(&self) -> bool {
        self.sequencer.is_armed() || self.confirmation.is_armed()
    }
}

impl Drop for ProposalSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valentine_core::{Clock, ManualClock};

    const TIMING: TimingConfig = TimingConfig {
        reveal_step_ms: 10,
        confirmation_ms: 50,
    };

    fn asking_session(clock: &ManualClock) -> ProposalSession {
        let mut session = ProposalSession::new(&PersistedPreferences::default(), &TIMING);
        session.start(clock.now());
        while !session.sequencer().is_asking() {
            clock.advance(TIMING.reveal_step());
            session.poll(clock.now());
        }
        session
    }

    #[test]
    fn accept_is_rejected_while_revealing() {
        let clock = ManualClock::new();
        let mut session = ProposalSession::new(&PersistedPreferences::default(), &TIMING);
        session.start(clock.now());
        assert!(!session.accept(clock.now()));
        assert!(!session.toggle_share());
        assert_eq!(session.phase(), ProposalPhase::Reveal(RevealState::Revealing(0)));
    }

    #[test]
    fn confirmation_fires_once_after_delay() {
        let clock = ManualClock::new();
        let mut session = asking_session(&clock);
        assert!(session.accept(clock.now()));
        assert!(!session.accept(clock.now()));
        assert_eq!(session.phase(), ProposalPhase::Accepted);

        clock.advance(TIMING.confirmation() - Duration::from_millis(1));
        assert_eq!(session.poll(clock.now()), None);
        clock.advance(Duration::from_millis(1));
        assert_eq!(session.poll(clock.now()), Some(SessionEvent::ConfirmationElapsed));
        assert_eq!(session.poll(clock.now()), None);
    }

    #[test]
    fn cancel_suppresses_pending_confirmation() {
        let clock = ManualClock::new();
        let mut session = asking_session(&clock);
        session.accept(clock.now());
        session.cancel();
        clock.advance(TIMING.confirmation() * 2);
        assert_eq!(session.poll(clock.now()), None);
        assert!(!session.has_pending_timer());
    }

    #[test]
    fn share_panel_toggles_and_closes_on_accept() {
        let clock = ManualClock::new();
        let mut session = asking_session(&clock);
        assert!(session.toggle_share());
        assert!(session.is_share_open());
        session.accept(clock.now());
        assert!(!session.is_share_open());
    }

    #[test]
    fn draft_starts_from_stored_names() {
        let prefs = PersistedPreferences {
            accepted: false,
            partner_name: Some("Jordan".into()),
            sender_name: Some("Casey".into()),
        };
        let session = ProposalSession::new(&prefs, &TIMING);
        assert_eq!(session.draft().partner, "Jordan");
        assert_eq!(session.sender_name(), Some("Casey"));
        assert!(session.sequencer().script().lines()[1].contains("Jordan"));
    }
}
