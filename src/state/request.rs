// Stale-response guard for async feature fetches.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out monotonically increasing tickets. Only the latest ticket is
/// current; `invalidate` retires every outstanding one (used on unmount).
#[derive(Default, Debug)]
pub struct RequestTracker {
    latest: u64,
    closed: bool,
}

impl RequestTracker {
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.closed = false;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.closed && ticket.0 == self.latest
    }

    pub fn invalidate(&mut self) {
        self.closed = true;
    }
}

/// Fetch bookkeeping for one toggleable map layer. The effect calls `sync`
/// whenever the center or toggle changes and `accept` when a response lands.
#[derive(Default, Debug)]
pub struct LayerFetch {
    requests: RequestTracker,
}

impl LayerFetch {
    /// Ticket for a new fetch, or `None` when the layer is off. Turning the
    /// layer off retires the in-flight request; the caller clears the layer.
    pub fn sync(&mut self, enabled: bool) -> Option<Ticket> {
        if enabled {
            Some(self.requests.begin())
        } else {
            self.requests.invalidate();
            None
        }
    }

    /// The response payload if it may still be shown.
    pub fn accept<T>(&self, ticket: Ticket, payload: T) -> Option<T> {
        self.requests.is_current(ticket).then_some(payload)
    }

    pub fn close(&mut self) {
        self.requests.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Drives a layer the way the overlay effect does and returns what it shows.
    fn land(
        fetch: &LayerFetch,
        shown: &mut Vec<&'static str>,
        ticket: Ticket,
        points: Vec<&'static str>,
    ) {
        if let Some(points) = fetch.accept(ticket, points) {
            *shown = points;
        }
    }

    #[test]
    fn late_response_for_old_center_is_discarded() {
        let mut t = RequestTracker::default();
        let x = t.begin();
        let y = t.begin();
        // Y resolves first and is applied; X arrives afterwards.
        assert!(t.is_current(y));
        assert!(!t.is_current(x));
    }

    #[test]
    fn invalidate_retires_in_flight_ticket() {
        let mut t = RequestTracker::default();
        let a = t.begin();
        t.invalidate();
        assert!(!t.is_current(a));
        let b = t.begin();
        assert!(t.is_current(b));
    }

    #[test]
    fn newer_center_wins_over_late_response() {
        let mut fetch = LayerFetch::default();
        let mut shown = Vec::new();
        let x = fetch.sync(true).unwrap();
        let y = fetch.sync(true).unwrap();
        land(&fetch, &mut shown, y, vec!["y"]);
        land(&fetch, &mut shown, x, vec!["x"]);
        assert_eq!(shown, vec!["y"]);
    }

    #[test]
    fn response_after_toggle_off_leaves_layer_empty() {
        let mut fetch = LayerFetch::default();
        let mut shown = Vec::new();
        let t = fetch.sync(true).unwrap();
        assert_eq!(fetch.sync(false), None);
        land(&fetch, &mut shown, t, vec!["park"]);
        assert!(shown.is_empty());
    }

    #[test]
    fn toggle_back_on_only_accepts_new_ticket() {
        let mut fetch = LayerFetch::default();
        let mut shown = Vec::new();
        let old = fetch.sync(true).unwrap();
        fetch.sync(false);
        let new = fetch.sync(true).unwrap();
        land(&fetch, &mut shown, old, vec!["old"]);
        assert!(shown.is_empty());
        land(&fetch, &mut shown, new, vec!["new"]);
        assert_eq!(shown, vec!["new"]);
    }

    #[test]
    fn close_discards_in_flight_response() {
        let mut fetch = LayerFetch::default();
        let t = fetch.sync(true).unwrap();
        fetch.close();
        assert_eq!(fetch.accept(t, 1), None);
    }
}
