/// Decides when the probe sends its close frame.
///
/// Sending the close does not end the session: the reader keeps going until
/// the server answers with its own close frame or the stream ends.
#[derive(Debug, Default)]
pub struct ExitPlan {
    limit: Option<usize>,
    applied: usize,
    closing: bool,
}

impl ExitPlan {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            applied: 0,
            closing: false,
        }
    }

    /// Count one update if `updated`. True exactly once, when the limit is
    /// reached and the close should be sent.
    pub fn record(&mut self, updated: bool) -> bool {
        if updated {
            self.applied += 1;
        }
        if !self.closing && self.limit.is_some_and(|n| self.applied >= n) {
            self.closing = true;
            return true;
        }
        false
    }

    /// Ctrl-C. True when the close should be sent; false when one was
    /// already sent and the probe should stop waiting.
    pub fn interrupt(&mut self) -> bool {
        !std::mem::replace(&mut self.closing, true)
    }

    pub fn closing(&self) -> bool {
        self.closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_once_when_limit_reached() {
        let mut plan = ExitPlan::new(Some(2));
        assert!(!plan.record(true));
        assert!(!plan.record(false));
        assert!(plan.record(true));
        assert!(plan.closing());
        // Updates still arriving before the server's close reply
        assert!(!plan.record(true));
    }

    #[test]
    fn zero_limit_closes_right_away() {
        let mut plan = ExitPlan::new(Some(0));
        assert!(plan.record(false));
    }

    #[test]
    fn no_limit_never_closes_on_its_own() {
        let mut plan = ExitPlan::new(None);
        for _ in 0..100 {
            assert!(!plan.record(true));
        }
        assert!(!plan.closing());
    }

    #[test]
    fn second_interrupt_stops_waiting() {
        let mut plan = ExitPlan::new(None);
        assert!(plan.interrupt());
        assert!(!plan.interrupt());
    }

    #[test]
    fn interrupt_after_limit_stops_waiting() {
        let mut plan = ExitPlan::new(Some(1));
        assert!(plan.record(true));
        assert!(!plan.interrupt());
    }
}
