//! Invitation links, query/fragment parsing, and outbound share links.

use thiserror::Error;
use url::{Url, form_urlencoded};

use crate::view::View;

/// Query value of `view` that forces the official proposal.
pub const OFFICIAL_VIEW_PARAM: &str = "official";
/// Base of the message-compose deep link.
pub const SHARE_BASE: &str = "https://wa.me/";

/// Errors raised while building links.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The origin could not be parsed as an absolute URL.
    #[error("invalid origin {origin:?}: {source}")]
    InvalidOrigin {
        /// Origin as supplied by the caller.
        origin: String,
        /// Parser failure.
        source: url::ParseError,
    },

    /// The origin cannot carry a path/query (e.g. `mailto:`).
    #[error("origin {0:?} cannot carry query parameters")]
    NotHierarchical(String),

    /// A location string could not be parsed.
    #[error("invalid location {input:?}: {source}")]
    InvalidLocation {
        /// Location as supplied by the caller.
        input: String,
        /// Parser failure.
        source: url::ParseError,
    },
}

/// Query parameters the router understands. Values are kept verbatim,
/// including empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// `to=` partner name.
    pub to: Option<String>,
    /// `from=` sender name.
    pub from: Option<String>,
    /// `view=` entry override.
    pub view: Option<String>,
}

impl QueryParams {
    /// Parse a query string with or without its leading `?`. When a key
    /// repeats, the first value wins.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "to" => &mut params.to,
                "from" => &mut params.from,
                "view" => &mut params.view,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// True when `view=official` is present.
    #[must_use]
    pub fn wants_official(&self) -> bool {
        self.view.as_deref() == Some(OFFICIAL_VIEW_PARAM)
    }

    /// True when no parameter is present at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.to.is_none() && self.from.is_none() && self.view.is_none()
    }
}

/// Fragment plus query of the current address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Text after `#`, without the `#`.
    pub fragment: String,
    /// Parsed query parameters.
    pub query: QueryParams,
}

impl Location {
    /// Parse an absolute URL or a relative `?query#fragment` reference.
    ///
    /// # Errors
    /// Returns [`LinkError::InvalidLocation`] when the input is not a URL reference.
    pub fn try_parse(input: &str) -> Result<Self, LinkError> {
        let invalid = |source| LinkError::InvalidLocation {
            input: input.to_owned(),
            source,
        };
        let base = Url::parse("app://local/").map_err(invalid)?;
        let url = Url::options().base_url(Some(&base)).parse(input.trim()).map_err(invalid)?;
        Ok(Self {
            fragment: url.fragment().unwrap_or_default().to_owned(),
            query: url.query().map(QueryParams::parse).unwrap_or_default(),
        })
    }

    /// Like [`Location::try_parse`], falling back to an empty location.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::try_parse(input).unwrap_or_default()
    }

    /// Location pointing at a view through its fragment, keeping the query.
    #[must_use]
    pub fn with_fragment(&self, view: View) -> Self {
        Self {
            fragment: view.tag().to_owned(),
            query: self.query.clone(),
        }
    }
}

/// Names carried by an invitation link. Empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteNames {
    /// Partner name from `to=`.
    pub to: Option<String>,
    /// Sender name from `from=`.
    pub from: Option<String>,
}

impl InviteNames {
    /// True when neither name is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.to.is_none() && self.from.is_none()
    }
}

/// Build an invitation link on top of `origin`.
///
/// Any query or fragment already on `origin` is replaced. A missing name is
/// written as an empty parameter.
///
/// # Errors
/// Returns an error when `origin` is not an absolute hierarchical URL.
pub fn encode(partner: &str, sender: &str, origin: &str) -> Result<Url, LinkError> {
    let mut url = Url::parse(origin).map_err(|source| LinkError::InvalidOrigin {
        origin: origin.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(LinkError::NotHierarchical(origin.to_owned()));
    }
    let query = format!(
        "view={OFFICIAL_VIEW_PARAM}&to={}&from={}",
        encode_component(partner),
        encode_component(sender)
    );
    url.set_query(Some(&query));
    url.set_fragment(Some(View::OfficialProposal.tag()));
    Ok(url)
}

/// Percent-encode a query value, spaces as `%20` rather than `+`.
fn encode_component(value: &str) -> String {
    // A literal `+` is already escaped as `%2B`, so every `+` left is a space.
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Extract invitation names from parsed query parameters.
#[must_use]
pub fn decode(params: &QueryParams) -> InviteNames {
    let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
    InviteNames {
        to: non_empty(&params.to),
        from: non_empty(&params.from),
    }
}

/// Message-compose deep link for `text`, addressed to the digits of `phone`.
///
/// # Errors
/// Never fails for inputs produced by this function; the `Result` mirrors the
/// parser signature.
pub fn share_link(phone: &str, text: &str) -> Result<Url, LinkError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let target = format!("{SHARE_BASE}{digits}");
    let mut url = Url::parse(&target).map_err(|source| LinkError::InvalidOrigin {
        origin: target.clone(),
        source,
    })?;
    url.query_pairs_mut().append_pair("text", text);
    Ok(url)
}
