//! Per-operation request state machine: `Idle → Loading → {Succeeded, Failed}`.
//!
//! Each issued request gets a sequence number. Only the completion of the most
//! recently issued request is accepted; completions of superseded requests are
//! dropped, so a slow early response can never overwrite a newer one.

/// Sequence number identifying one issued request.
pub type RequestSeq = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

/// Outcome of offering a completion to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    phase: RequestPhase,
    latest: RequestSeq,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RequestPhase::Loading
    }

    /// Error text of the last settled request, if it failed.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            RequestPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Most recently issued sequence number (0 before the first request).
    pub fn latest(&self) -> RequestSeq {
        self.latest
    }

    /// Issue a new request. Clears any previous error.
    pub fn begin(&mut self) -> RequestSeq {
        self.latest += 1;
        self.phase = RequestPhase::Loading;
        self.latest
    }

    /// Settle request `seq` successfully.
    pub fn succeed(&mut self, seq: RequestSeq) -> Settlement {
        self.settle(seq, RequestPhase::Succeeded)
    }

    /// Settle request `seq` with an error message.
    pub fn fail(&mut self, seq: RequestSeq, message: impl Into<String>) -> Settlement {
        self.settle(seq, RequestPhase::Failed(message.into()))
    }

    /// Back to `Idle`, forgetting any error. In-flight requests become stale.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.phase = RequestPhase::Idle;
    }

    fn settle(&mut self, seq: RequestSeq, phase: RequestPhase) -> Settlement {
        if seq != self.latest || !self.is_loading() {
            return Settlement::Stale;
        }
        self.phase = phase;
        Settlement::Applied
    }
}
