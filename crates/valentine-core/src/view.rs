use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level screen of the application. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Fresh visitor entry point with the evasive decline button.
    #[serde(rename = "proposal")]
    Landing,
    /// Timed reveal ending in the "will you be mine" question.
    OfficialProposal,
    /// Hub unlocked after acceptance.
    Dashboard,
    /// Love letter generator.
    #[serde(rename = "letter")]
    LetterStudio,
    /// Date plan generator.
    #[serde(rename = "planner")]
    DatePlanner,
    /// Virtual bouquet arrangement.
    #[serde(rename = "bouquet")]
    BouquetBuilder,
    /// Photo caption generator.
    #[serde(rename = "memories")]
    MemoryCurator,
}

impl View {
    /// Every view in route order.
    pub const ALL: [Self; 7] = [
        Self::Landing,
        Self::OfficialProposal,
        Self::Dashboard,
        Self::LetterStudio,
        Self::DatePlanner,
        Self::BouquetBuilder,
        Self::MemoryCurator,
    ];

    /// Fragment tag used to route to this view.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Landing => "proposal",
            Self::OfficialProposal => "official-proposal",
            Self::Dashboard => "dashboard",
            Self::LetterStudio => "letter",
            Self::DatePlanner => "planner",
            Self::BouquetBuilder => "bouquet",
            Self::MemoryCurator => "memories",
        }
    }

    /// Look up a view by its fragment tag. Unknown tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.tag() == tag)
    }

    /// Human-readable title shown in headers.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Landing => "Will you be my Valentine?",
            Self::OfficialProposal => "The Official Proposal",
            Self::Dashboard => "Love Hub",
            Self::LetterStudio => "Love Letter Studio",
            Self::DatePlanner => "Magic Date Planner",
            Self::BouquetBuilder => "Virtual Bouquet",
            Self::MemoryCurator => "Memory Curator",
        }
    }

    /// Tools reachable from the dashboard.
    #[must_use]
    pub const fn is_tool(self) -> bool {
        matches!(
            self,
            Self::LetterStudio | Self::DatePlanner | Self::BouquetBuilder | Self::MemoryCurator
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_tag() {
        for view in View::ALL {
            assert_eq!(View::from_tag(view.tag()), Some(view));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(View::from_tag("settings"), None);
        assert_eq!(View::from_tag(""), None);
        assert_eq!(View::from_tag("Dashboard"), None);
    }

    #[test]
    fn serde_uses_route_tags() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&View::Landing)?, "\"proposal\"");
        assert_eq!(serde_json::to_string(&View::OfficialProposal)?, "\"official-proposal\"");
        let parsed: View = serde_json::from_str("\"memories\"")?;
        assert_eq!(parsed, View::MemoryCurator);
        Ok(())
    }

    #[test]
    fn only_dashboard_cards_are_tools() {
        let tools: Vec<_> = View::ALL.into_iter().filter(|view| view.is_tool()).collect();
        assert_eq!(tools.len(), 4);
        assert!(!View::Dashboard.is_tool());
    }
}
