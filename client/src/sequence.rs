use std::cell::Cell;

/// Ticket handed out for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic request counter used to drop out-of-order responses.
///
/// Each refresh takes a ticket before it awaits the store; when the response arrives
/// it is applied only if no newer ticket was issued in the meantime.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: Cell<u64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        Ticket(next)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.issued.get() == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_newest_ticket_is_latest() {
        let seq = Sequencer::new();
        let a = seq.issue();
        assert!(seq.is_latest(a));
        let b = seq.issue();
        assert!(!seq.is_latest(a));
        assert!(seq.is_latest(b));
        assert!(a < b);
    }
}
