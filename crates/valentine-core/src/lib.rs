//! Domain types and state machines for valentine-hub.
//!
//! Everything here is pure: no storage, no terminal, no network. The
//! application layer feeds it the current address, stored preferences, a
//! clock, and a random source.

/// Virtual bouquet selection.
pub mod bouquet;
/// Content-generation payloads.
pub mod content;
/// Decline-button evasion.
pub mod evasion;
/// Invitation and share links.
pub mod link;
/// Persisted preference record.
pub mod prefs;
/// Timed reveal of the proposal script.
pub mod reveal;
/// View resolution.
pub mod route;
/// Clocks and one-shot timers.
pub mod timer;
/// View tags.
pub mod view;

pub use bouquet::{Bouquet, Flower, Toggle};
pub use content::{DatePlan, LetterRequest, Tone};
pub use evasion::{EvasionConfig, EvasionState, Offset};
pub use link::{InviteNames, LinkError, Location, QueryParams};
pub use prefs::PersistedPreferences;
pub use reveal::{Emphasis, RevealScript, RevealSequencer, RevealState};
pub use route::resolve;
pub use timer::{Clock, ManualClock, OneShotTimer, SystemClock};
pub use view::View;
