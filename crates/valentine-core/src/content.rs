//! Payloads exchanged with the content-generation collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured date plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePlan {
    /// Plan headline.
    pub title: String,
    /// Ordered activities.
    pub activities: Vec<String>,
    /// Mood of the evening.
    pub vibe: String,
    /// Extra gesture to add.
    pub surprise_tip: String,
}

impl DatePlan {
    /// Plan used when a structured response cannot be parsed.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            title: "A Night Under the Stars".to_owned(),
            activities: vec![
                "Stargazing".to_owned(),
                "Picnic".to_owned(),
                "Slow Dancing".to_owned(),
            ],
            vibe: "Intimate and serene".to_owned(),
            surprise_tip: "Bring a warm blanket and their favorite dessert.".to_owned(),
        }
    }

    /// Parse a JSON plan, substituting [`DatePlan::fallback`] on failure.
    #[must_use]
    pub fn parse_or_fallback(json: &str) -> Self {
        serde_json::from_str(json.trim()).unwrap_or_else(|_| Self::fallback())
    }
}

/// Register of a generated letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Passionate and intense.
    #[default]
    Passionate,
    /// Sweet and innocent.
    Sweet,
    /// Funny and playful.
    Funny,
    /// Poetic and deep.
    Poetic,
}

impl Tone {
    /// Every tone in menu order.
    pub const ALL: [Self; 4] = [Self::Passionate, Self::Sweet, Self::Funny, Self::Poetic];

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passionate => "passionate",
            Self::Sweet => "sweet",
            Self::Funny => "funny",
            Self::Poetic => "poetic",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passionate => "Passionate & Intense",
            Self::Sweet => "Sweet & Innocent",
            Self::Funny => "Funny & Playful",
            Self::Poetic => "Poetic & Deep",
        }
    }

    /// Next tone in menu order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Passionate => Self::Sweet,
            Self::Sweet => Self::Funny,
            Self::Funny => Self::Poetic,
            Self::Poetic => Self::Passionate,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs of the letter studio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterRequest {
    /// Recipient.
    pub name: String,
    /// Shared memories to weave in.
    pub memories: String,
    /// Register.
    pub tone: Tone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_plan() {
        let plan = DatePlan::parse_or_fallback(
            r#" {"title":"Jazz & Waves","activities":["Beach walk","Live jazz"],"vibe":"Breezy","surpriseTip":"Hide a note"} "#,
        );
        assert_eq!(plan.title, "Jazz & Waves");
        assert_eq!(plan.activities.len(), 2);
        assert_eq!(plan.surprise_tip, "Hide a note");
    }

    #[test]
    fn malformed_plan_falls_back() {
        assert_eq!(DatePlan::parse_or_fallback("{}"), DatePlan::fallback());
        assert_eq!(DatePlan::parse_or_fallback("not json"), DatePlan::fallback());
        assert_eq!(DatePlan::parse_or_fallback(""), DatePlan::fallback());
    }

    #[test]
    fn tone_cycles_through_menu() {
        let mut tone = Tone::default();
        for expected in [Tone::Sweet, Tone::Funny, Tone::Poetic, Tone::Passionate] {
            tone = tone.next();
            assert_eq!(tone, expected);
        }
    }
}
