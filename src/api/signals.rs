//! Signal listing accessors.

use super::{ApiClient, ApiError, push_param, push_text_param};
use crate::api::types::{ProcessedSignal, RawSignal};

/// Filter for both signal listings. Unset fields are omitted from the
/// query string entirely.
#[derive(Debug, Clone, Default)]
pub struct SignalFilter {
    pub limit: Option<u32>,
    pub source_type: Option<String>,
    pub days: Option<u32>,
}

impl SignalFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_param(&mut query, "limit", self.limit);
        push_text_param(&mut query, "source_type", self.source_type.as_deref());
        push_param(&mut query, "days", self.days);
        query
    }
}

/// `GET /signals` — signals after pipeline processing.
pub fn fetch_signals(
    client: &ApiClient,
    filter: &SignalFilter,
) -> Result<Vec<ProcessedSignal>, ApiError> {
    client.get_json("/signals", &filter.to_query())
}

/// `GET /signals/raw` — collection records before processing.
pub fn fetch_raw_signals(
    client: &ApiClient,
    filter: &SignalFilter,
) -> Result<Vec<RawSignal>, ApiError> {
    client.get_json("/signals/raw", &filter.to_query())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_empty_query() {
        assert!(SignalFilter::default().to_query().is_empty());
    }

    #[test]
    fn full_filter_builds_all_pairs_in_order() {
        let filter = SignalFilter {
            limit: Some(50),
            source_type: Some("reddit".to_string()),
            days: Some(7),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("limit", "50".to_string()),
                ("source_type", "reddit".to_string()),
                ("days", "7".to_string()),
            ]
        );
    }

    #[test]
    fn blank_source_type_is_omitted() {
        let filter = SignalFilter {
            source_type: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.to_query().is_empty());
    }
}
