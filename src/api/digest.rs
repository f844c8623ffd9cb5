//! Digest retrieval.
//!
//! Digests are generated by the service as a side effect of the read —
//! there is no separate mutation endpoint, so "generate" and "reload" are
//! the same request.

use std::fmt;

use super::{ApiClient, ApiError};
use crate::api::types::DigestContent;

/// Digest period. Parsed leniently from CLI input; anything unrecognized
/// is rejected before a request is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestPeriod {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl DigestPeriod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for DigestPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// `GET /digest/{period}`.
pub fn fetch_digest(client: &ApiClient, period: DigestPeriod) -> Result<DigestContent, ApiError> {
    client.get_json(&format!("/digest/{period}"), &[])
}
