/// Trailing-edge debouncer keyed by generation tickets.
///
/// Every `push` supersedes the previous value and hands out a new ticket.
/// The host arms a timer per ticket; when a timer fires, only the newest
/// ticket yields the value, so a burst of events collapses into one action
/// carrying the last value.
#[derive(Debug)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Debouncer {
            generation: 0,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Pending value if `ticket` is still the newest one.
    pub fn take(&mut self, ticket: u64) -> Option<T> {
        if ticket != self.generation {
            return None;
        }
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_yields_last_value_once() {
        let mut debouncer = Debouncer::new();
        let tickets: Vec<u64> = (0..10).map(|i| debouncer.push(i)).collect();

        let fired: Vec<i32> = tickets.iter().filter_map(|&t| debouncer.take(t)).collect();
        assert_eq!(fired, vec![9]);
        assert_eq!(debouncer.take(tickets[9]), None);
    }

    #[test]
    fn ticket_fires_only_once() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.push("a");
        assert_eq!(debouncer.take(ticket), Some("a"));
        assert_eq!(debouncer.take(ticket), None);
    }

    #[test]
    fn cancel_drops_pending() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.push(1);
        debouncer.cancel();
        assert_eq!(debouncer.take(ticket), None);

        let next = debouncer.push(2);
        assert!(next > ticket);
        assert_eq!(debouncer.take(next), Some(2));
    }
}
