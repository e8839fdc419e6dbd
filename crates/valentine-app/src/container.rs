//! Owner of the active view and everything that decides it.

use rand::Rng;
use tracing::{debug, info};
use url::Url;
use valentine_core::{
    Clock, EvasionState, LinkError, Location, Offset, PersistedPreferences, View, link, route,
};

use crate::config::AppConfig;
use crate::proposal::{ProposalSession, SessionEvent};
use crate::store::PreferenceStore;

/// Reconciles the address, stored preferences, and per-view local state into
/// one current [`View`].
///
/// The container is single-threaded: callers feed it input events and call
/// [`ViewContainer::poll`] from the same loop.
pub struct ViewContainer<S: PreferenceStore, C: Clock> {
    store: S,
    clock: C,
    config: AppConfig,
    location: Location,
    current: Option<View>,
    evasion: EvasionState,
    proposal: Option<ProposalSession>,
}

impl<S: PreferenceStore, C: Clock> ViewContainer<S, C> {
    /// Container with no view entered yet. Call [`ViewContainer::startup`] next.
    pub fn new(store: S, clock: C, config: AppConfig) -> Self {
        let evasion = EvasionState::new(config.evasion);
        Self {
            store,
            clock,
            config,
            location: Location::default(),
            current: None,
            evasion,
            proposal: None,
        }
    }

    /// Resolve the initial view from the launch address.
    pub fn startup(&mut self, location: Location) -> View {
        self.location = location;
        self.resolve()
    }

    /// React to the fragment changing underneath us.
    pub fn on_fragment_change(&mut self, fragment: &str) -> View {
        fragment
            .strip_prefix('#')
            .unwrap_or(fragment)
            .clone_into(&mut self.location.fragment);
        self.resolve()
    }

    /// Point the fragment at `view` and resolve again.
    pub fn navigate(&mut self, view: View) -> View {
        self.location = self.location.with_fragment(view);
        self.resolve()
    }

    /// Landing page "yes": go to the official proposal.
    pub fn start_proposal(&mut self) -> View {
        self.navigate(View::OfficialProposal)
    }

    /// Landing page decline attempt. Ignored on other views.
    pub fn decline_attempt<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Offset> {
        (self.view() == View::Landing).then(|| self.evasion.on_decline_attempt(rng))
    }

    /// Say yes to the official proposal.
    ///
    /// The acceptance flag is written before this returns; the dashboard opens
    /// once the confirmation timer fires in [`ViewContainer::poll`].
    pub fn accept_proposal(&mut self) -> bool {
        let now = self.clock.now();
        let Some(session) = self.proposal.as_mut() else {
            return false;
        };
        if !session.accept(now) {
            return false;
        }
        self.store.set_accepted();
        info!("proposal accepted");
        true
    }

    /// Open or close the share panel of the proposal.
    pub fn toggle_share(&mut self) -> bool {
        self.proposal.as_mut().is_some_and(ProposalSession::toggle_share)
    }

    /// Invitation link for the given names on the configured origin.
    ///
    /// # Errors
    /// Returns an error when the configured origin is not an absolute URL.
    pub fn invitation_link(&self, partner: &str, sender: &str) -> Result<Url, LinkError> {
        link::encode(partner, sender, &self.config.link.origin)
    }

    /// Invitation link built from the share panel draft.
    ///
    /// # Errors
    /// Returns an error when the configured origin is not an absolute URL.
    pub fn draft_invitation_link(&self) -> Option<Result<Url, LinkError>> {
        self.proposal
            .as_ref()
            .map(|session| self.invitation_link(&session.draft().partner, &session.draft().sender))
    }

    /// Fire due timers. Returns the new view when a timer caused navigation.
    pub fn poll(&mut self) -> Option<View> {
        let now = self.clock.now();
        let event = self.proposal.as_mut()?.poll(now)?;
        match event {
            SessionEvent::Advanced(state) => {
                debug!(?state, "reveal advanced");
                None
            }
            SessionEvent::ConfirmationElapsed => Some(self.navigate(View::Dashboard)),
        }
    }

    /// Forget everything: clear storage and the address, back to the landing page.
    pub fn reset(&mut self) -> View {
        self.store.reset();
        self.location = Location::default();
        info!("preferences reset");
        self.leave();
        self.enter(View::Landing, &PersistedPreferences::default());
        View::Landing
    }

    /// Active view. Before startup this is the landing page.
    #[must_use]
    pub fn view(&self) -> View {
        self.current.unwrap_or(View::Landing)
    }

    /// Current address.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Stored preferences.
    #[must_use]
    pub fn preferences(&self) -> PersistedPreferences {
        self.store.get()
    }

    /// Name to greet on the dashboard.
    #[must_use]
    pub fn greeting(&self) -> String {
        self.store.get().partner_name.map_or_else(
            || "Midnight Romance".to_owned(),
            |name| format!("Welcome, {name}"),
        )
    }

    /// Landing page interaction state.
    #[must_use]
    pub const fn evasion(&self) -> &EvasionState {
        &self.evasion
    }

    /// Proposal state while the official proposal is shown.
    #[must_use]
    pub const fn proposal(&self) -> Option<&ProposalSession> {
        self.proposal.as_ref()
    }

    /// Mutable proposal state while the official proposal is shown.
    pub const fn proposal_mut(&mut self) -> Option<&mut ProposalSession> {
        self.proposal.as_mut()
    }

    /// Backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration.
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Capture invitation names, then derive and enter the view. The store
    /// write completes before the view changes.
    fn resolve(&mut self) -> View {
        self.capture_names();
        let prefs = self.store.get();
        let view = route::resolve(&self.location.fragment, &self.location.query, &prefs);
        if self.current != Some(view) {
            self.leave();
            self.enter(view, &prefs);
        }
        view
    }

    fn capture_names(&self) {
        let names = link::decode(&self.location.query);
        if names.is_empty() {
            return;
        }
        let stored = self.store.get();
        if stored.names_match(names.to.as_deref(), names.from.as_deref()) {
            return;
        }
        debug!(to = ?names.to, from = ?names.from, "capturing invitation names");
        self.store.set_names(names.to.as_deref(), names.from.as_deref());
    }

    fn leave(&mut self) {
        if let Some(mut session) = self.proposal.take() {
            session.cancel();
        }
    }

    fn enter(&mut self, view: View, prefs: &PersistedPreferences) {
        debug!(from = ?self.current, to = %view, "entering view");
        match view {
            View::Landing => self.evasion.reset(),
            View::OfficialProposal => {
                let mut session = ProposalSession::new(prefs, &self.config.timing);
                session.start(self.clock.now());
                self.proposal = Some(session);
            }
            _ => {}
        }
        self.current = Some(view);
    }
}
