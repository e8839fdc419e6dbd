//! Application layer logic for valentine-hub.
//!
//! This crate wires the pure state machines of `valentine-core` to durable
//! storage, configuration, and the content-generation collaborator. The
//! terminal front end only talks to [`ViewContainer`].

pub mod config;
pub mod container;
pub mod generator;
pub mod proposal;
pub mod store;

// Re-exports for convenience
pub use config::{AppConfig, ConfigError, LinkConfig, TimingConfig};
pub use container::ViewContainer;
pub use generator::{ContentGenerator, TemplateGenerator, data_url, image_mime};
pub use proposal::{ProposalPhase, ProposalSession, SessionEvent, ShareDraft};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, StoreError};
