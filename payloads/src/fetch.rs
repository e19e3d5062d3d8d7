//! State carried by a fetch hook between renders.

/// `{data, loading, error}` for one fetch hook instance.
///
/// `data` and `error` are never both set.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSnapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchSnapshot<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T> FetchSnapshot<T> {
    /// No request key: nothing to fetch.
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    /// First load, or the request key changed.
    pub fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    /// Manual refetch of the same request; rows stay on screen meanwhile.
    pub fn refetching(self) -> Self {
        Self {
            data: self.data,
            loading: true,
            error: None,
        }
    }

    pub fn resolved(value: T) -> Self {
        Self {
            data: Some(value),
            loading: false,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(message.into()),
        }
    }

    pub fn settle<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::resolved(value),
            Err(e) => Self::failed(e.to_string()),
        }
    }

    /// Loading with nothing to show yet.
    pub fn is_initial_loading(&self) -> bool {
        self.loading && self.data.is_none()
    }
}

/// Identifies one issued request within a [`RequestSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic request counter for a single fetch hook.
///
/// Each fetch takes a ticket before it starts. When the response arrives it
/// is only applied if no later ticket has been issued since, so a slow
/// response for page 2 can never overwrite a fast one for page 3.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Make every outstanding ticket stale without starting a new request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// `Some(value)` if `ticket` is still the latest request.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding superseded response"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_never_holds_data_and_error() {
        let pending = FetchSnapshot::<u32>::pending();
        assert!(pending.is_initial_loading());

        let ok = FetchSnapshot::settle::<String>(Ok(7));
        assert_eq!(ok.data, Some(7));
        assert!(!ok.loading);

        let refetch = ok.refetching();
        assert_eq!(refetch.data, Some(7));
        assert!(refetch.loading && !refetch.is_initial_loading());

        let failed = FetchSnapshot::<u32>::settle(Err("Network error"));
        assert_eq!(failed.data, None);
        assert_eq!(failed.error.as_deref(), Some("Network error"));

        let retried = failed.refetching();
        assert!(retried.error.is_none());
    }

    #[test]
    fn idle_does_nothing() {
        let idle = FetchSnapshot::<u32>::default();
        assert_eq!(idle, FetchSnapshot::idle());
        assert!(!idle.loading);
    }

    #[test]
    fn only_latest_ticket_is_applied() {
        let mut sequence = RequestSequence::default();
        let page_two = sequence.issue();
        let page_three = sequence.issue();

        // page 3 answers first, page 2 straggles in afterwards
        assert_eq!(sequence.accept(page_three, "page 3"), Some("page 3"));
        assert_eq!(sequence.accept(page_two, "page 2"), None);
    }

    #[test]
    fn invalidate_discards_everything_in_flight() {
        let mut sequence = RequestSequence::default();
        let ticket = sequence.issue();
        sequence.invalidate();
        assert!(!sequence.is_current(ticket));
        let next = sequence.issue();
        assert!(sequence.is_current(next));
    }
}
