//! Non-interactive subcommands.

use std::io::Write;

use anyhow::{Context, Result};
use valentine_app::PreferenceStore;
use valentine_core::{Location, link, resolve};

use crate::config::Config;

/// Print an invitation link for `to`/`from`.
pub fn print_link(
    config: &Config,
    to: &str,
    from: &str,
    origin: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let origin = origin.unwrap_or(&config.app.link.origin);
    let url = link::encode(to, from, origin).context("Failed to build invitation link")?;
    writeln!(out, "{url}")?;
    Ok(())
}

/// Print a message-compose link for `text`.
pub fn print_share(phone: &str, text: &str, out: &mut impl Write) -> Result<()> {
    let url = link::share_link(phone, text).context("Failed to build share link")?;
    writeln!(out, "{url}")?;
    Ok(())
}

/// Print the stored preferences and the view a plain launch would open.
pub fn print_status<S: PreferenceStore>(store: &S, out: &mut impl Write) -> Result<()> {
    let prefs = store.get();
    let start = Location::default();
    let view = resolve(&start.fragment, &start.query, &prefs);
    writeln!(out, "accepted: {}", prefs.accepted)?;
    writeln!(out, "partner:  {}", prefs.partner_name.as_deref().unwrap_or("-"))?;
    writeln!(out, "sender:   {}", prefs.sender_name.as_deref().unwrap_or("-"))?;
    writeln!(out, "opens:    {} (#{})", view.title(), view.tag())?;
    Ok(())
}

/// Forget the acceptance and both names.
pub fn reset<S: PreferenceStore>(store: &S, out: &mut impl Write) -> Result<()> {
    store.reset();
    writeln!(out, "✓ Preferences cleared")?;
    Ok(())
}
