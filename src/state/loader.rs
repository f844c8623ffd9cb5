//! Filtered-collection loader with generation tokens.
//!
//! Every list view runs the same cycle: a fetch is issued on first render
//! and re-issued whenever the active filter set changes. The view renders
//! a placeholder while loading, the collection once loaded, and an error
//! card on failure — loaded-empty and errored are structurally distinct
//! states, so "no data" and "fetch failed" can never be confused.
//!
//! Responses are not guaranteed to resolve in request order. Each
//! [`Loader::begin`] increments a monotonic generation counter and hands
//! out a ticket; [`Loader::complete`] applies a result only when its
//! ticket still matches the current generation. A fetch superseded by a
//! newer one is discarded on arrival, whatever it carried.

use crate::api::ApiError;

/// Render state of one view's data.
#[derive(Debug)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,
    /// A fetch is in flight — render the placeholder, not stale data.
    Loading,
    /// The last issued fetch succeeded.
    Loaded(T),
    /// The last issued fetch failed.
    Errored(ApiError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Errored(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Ticket identifying one issued fetch. Only the ticket matching the
/// loader's current generation may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// One view's loader instance.
#[derive(Debug)]
pub struct Loader<T> {
    state: LoadState<T>,
    generation: u64,
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Loader<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data()
    }

    /// Start a new fetch: supersede any in-flight one and enter `Loading`.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a fetch result. Returns `false` when the ticket was
    /// superseded by a newer [`begin`](Self::begin) — the result is
    /// discarded and the state is left untouched.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<T, ApiError>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.state = match result {
            Ok(data) => LoadState::Loaded(data),
            Err(cause) => LoadState::Errored(cause),
        };
        true
    }

    /// Run one full begin → fetch → complete cycle synchronously.
    pub fn load_with(&mut self, fetch: impl FnOnce() -> Result<T, ApiError>) -> &LoadState<T> {
        let ticket = self.begin();
        let result = fetch();
        self.complete(ticket, result);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_err() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    #[test]
    fn starts_idle() {
        let loader: Loader<Vec<u32>> = Loader::new();
        assert!(matches!(loader.state(), LoadState::Idle));
        assert!(loader.data().is_none());
    }

    #[test]
    fn begin_enters_loading_and_hides_data() {
        let mut loader = Loader::new();
        let t = loader.begin();
        loader.complete(t, Ok(vec![1, 2, 3]));
        assert_eq!(loader.data(), Some(&vec![1, 2, 3]));

        loader.begin();
        assert!(loader.state().is_loading());
        assert!(loader.data().is_none());
    }

    #[test]
    fn success_replaces_collection_atomically() {
        let mut loader = Loader::new();
        let t = loader.begin();
        assert!(loader.complete(t, Ok(vec!["a"])));

        let t = loader.begin();
        assert!(loader.complete(t, Ok(vec!["b", "c"])));
        assert_eq!(loader.data(), Some(&vec!["b", "c"]));
    }

    #[test]
    fn failure_drops_data_and_keeps_cause() {
        let mut loader = Loader::new();
        let t = loader.begin();
        loader.complete(t, Ok(vec![1]));

        let t = loader.begin();
        loader.complete(t, Err::<Vec<i32>, _>(status_err()));
        assert!(loader.data().is_none());
        assert_eq!(loader.state().error().and_then(ApiError::status), Some(500));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut loader = Loader::new();
        let first = loader.begin();
        let second = loader.begin();

        // Second (current) fetch resolves first.
        assert!(loader.complete(second, Ok(vec!["fresh"])));
        // First resolves late and must not overwrite.
        assert!(!loader.complete(first, Ok(vec!["stale"])));
        assert_eq!(loader.data(), Some(&vec!["fresh"]));
    }

    #[test]
    fn stale_error_does_not_clobber_fresh_data() {
        let mut loader = Loader::new();
        let first = loader.begin();
        let second = loader.begin();

        assert!(loader.complete(second, Ok(vec![42])));
        assert!(!loader.complete(first, Err::<Vec<i32>, _>(status_err())));
        assert_eq!(loader.data(), Some(&vec![42]));
    }

    #[test]
    fn load_with_runs_one_cycle() {
        let mut loader = Loader::new();
        let state = loader.load_with(|| Ok::<_, ApiError>(vec![7]));
        assert_eq!(state.data(), Some(&vec![7]));
    }

    #[test]
    fn loaded_empty_is_not_an_error() {
        let mut loader = Loader::new();
        loader.load_with(|| Ok::<Vec<u8>, ApiError>(Vec::new()));
        assert!(loader.state().error().is_none());
        assert_eq!(loader.data(), Some(&Vec::new()));
    }
}
