//! The human-facing approval boundary.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender};
use std::time::Duration;

use tracing::warn;

use shelfwise_advisory::Recommendation;

/// Operator response to one recommendation.
///
/// A timed-out wait resolves as a rejection (an unapproved action is never
/// applied) but is reported distinctly in the run outcome.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
    TimedOut,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved)
    }
}

/// Presents recommendations to an operator and collects decisions.
///
/// Synchronous from the orchestrator's perspective: `request_decision`
/// blocks until a decision is available (or the implementation's timeout
/// elapses). Any implementation honoring this contract works: CLI prompt,
/// GUI dialog, or remote approval API.
pub trait ApprovalGateway {
    fn request_decision(&self, recommendation: &Recommendation) -> Decision;
}

impl<T: ApprovalGateway + ?Sized> ApprovalGateway for std::sync::Arc<T> {
    fn request_decision(&self, recommendation: &Recommendation) -> Decision {
        (**self).request_decision(recommendation)
    }
}

impl<T: ApprovalGateway + ?Sized> ApprovalGateway for Box<T> {
    fn request_decision(&self, recommendation: &Recommendation) -> Decision {
        (**self).request_decision(recommendation)
    }
}

/// Gateway answering from a pre-programmed script.
///
/// Used in tests and batch mode. Decisions are consumed front-to-back; an
/// exhausted script rejects, so nothing unapproved ever slips through.
/// Every recommendation presented is recorded for later assertions.
#[derive(Debug)]
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Decision>>,
    /// Answer once the script runs out.
    default: Decision,
    presented: Mutex<Vec<Recommendation>>,
}

impl ScriptedGateway {
    pub fn new(script: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            default: Decision::Rejected,
            presented: Mutex::new(Vec::new()),
        }
    }

    /// Approve everything.
    pub fn approve_all() -> Self {
        Self::new([]).with_default(Decision::Approved)
    }

    pub fn with_default(mut self, default: Decision) -> Self {
        self.default = default;
        self
    }

    /// Recommendations presented so far, in presentation order.
    pub fn presented(&self) -> Vec<Recommendation> {
        self.presented.lock().expect("presented lock poisoned").clone()
    }
}

impl ApprovalGateway for ScriptedGateway {
    fn request_decision(&self, recommendation: &Recommendation) -> Decision {
        self.presented
            .lock()
            .expect("presented lock poisoned")
            .push(recommendation.clone());
        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or(self.default)
    }
}

/// One in-flight approval request handed to the operator side.
#[derive(Debug)]
pub struct ApprovalRequest {
    pub recommendation: Recommendation,
    reply: SyncSender<Decision>,
}

impl ApprovalRequest {
    /// Send the operator's decision back to the waiting orchestrator.
    pub fn respond(self, decision: Decision) {
        // The orchestrator may have given up already (timeout); that's fine.
        let _ = self.reply.send(decision);
    }
}

/// Gateway bridging to an operator thread over a channel.
///
/// `request_decision` forwards the recommendation and waits up to the
/// configured timeout for a reply; an elapsed timeout resolves `TimedOut`.
#[derive(Debug)]
pub struct ChannelGateway {
    requests: Sender<ApprovalRequest>,
    timeout: Duration,
}

impl ChannelGateway {
    /// Create a gateway plus the receiving end the operator loop consumes.
    pub fn new(timeout: Duration) -> (Self, Receiver<ApprovalRequest>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                requests: tx,
                timeout,
            },
            rx,
        )
    }
}

impl ApprovalGateway for ChannelGateway {
    fn request_decision(&self, recommendation: &Recommendation) -> Decision {
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        let request = ApprovalRequest {
            recommendation: recommendation.clone(),
            reply: reply_tx,
        };

        if self.requests.send(request).is_err() {
            warn!(product_id = %recommendation.product_id, "operator side disconnected; rejecting");
            return Decision::Rejected;
        }

        match reply_rx.recv_timeout(self.timeout) {
            Ok(decision) => decision,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    product_id = %recommendation.product_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "approval timed out; resolving as rejection"
                );
                Decision::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => Decision::Rejected,
        }
    }
}
