//! Derivation of the active [`View`] from the address and stored preferences.

use crate::link::QueryParams;
use crate::prefs::PersistedPreferences;
use crate::view::View;

/// Resolve the view for `fragment`, `query`, and `prefs`.
///
/// Priority: a known fragment tag, then `view=official`, then the stored
/// acceptance flag, then the landing page. Unknown fragments fall through
/// exactly like an empty one. A leading `#` is ignored.
#[must_use]
pub fn resolve(fragment: &str, query: &QueryParams, prefs: &PersistedPreferences) -> View {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if let Some(view) = View::from_tag(fragment) {
        return view;
    }
    if query.wants_official() {
        return View::OfficialProposal;
    }
    if prefs.accepted {
        return View::Dashboard;
    }
    View::Landing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(accepted: bool) -> PersistedPreferences {
        PersistedPreferences {
            accepted,
            ..PersistedPreferences::default()
        }
    }

    fn official() -> QueryParams {
        QueryParams {
            view: Some("official".into()),
            ..QueryParams::default()
        }
    }

    #[test]
    fn explicit_fragment_wins_over_everything() {
        for view in View::ALL {
            assert_eq!(resolve(view.tag(), &official(), &prefs(true)), view);
            assert_eq!(resolve(&format!("#{}", view.tag()), &QueryParams::default(), &prefs(false)), view);
        }
    }

    #[test]
    fn unknown_fragments_behave_like_empty() {
        for fragment in ["settings", "Dashboard", "dashboard/", " proposal", "%20", "#"] {
            for accepted in [false, true] {
                for query in [QueryParams::default(), official()] {
                    assert_eq!(
                        resolve(fragment, &query, &prefs(accepted)),
                        resolve("", &query, &prefs(accepted)),
                        "fragment {fragment:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn empty_address_depends_on_acceptance() {
        assert_eq!(resolve("", &QueryParams::default(), &prefs(true)), View::Dashboard);
        assert_eq!(resolve("", &QueryParams::default(), &prefs(false)), View::Landing);
    }

    #[test]
    fn official_query_ignores_acceptance() {
        assert_eq!(resolve("", &official(), &prefs(false)), View::OfficialProposal);
        assert_eq!(resolve("", &official(), &prefs(true)), View::OfficialProposal);
    }

    #[test]
    fn other_view_params_are_ignored() {
        let query = QueryParams {
            view: Some("dashboard".into()),
            ..QueryParams::default()
        };
        assert_eq!(resolve("", &query, &prefs(false)), View::Landing);
    }
}
