//! Shared fixtures for app integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use risk_lens_app::{WorkflowController, spawn_submission_worker};
use risk_lens_submit::{
    SubmissionEnvelope, SubmitClient, SubmitError, SubmitTransport, TransportReply,
};

/// Transport that counts calls and replays scripted replies in order.
///
/// The last scripted reply is repeated once the script runs out.
#[derive(Debug)]
pub struct ScriptedTransport {
    calls: AtomicU32,
    replies: Mutex<Vec<(u16, String)>>,
    last_body: Mutex<Option<Vec<u8>>>,
}

impl ScriptedTransport {
    /// Creates a transport replying with the given status/body pairs.
    #[allow(dead_code)]
    pub fn new(replies: Vec<(u16, &str)>) -> Self {
        Self {
            calls: AtomicU32::new(0),
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|(status, body)| (status, body.to_string()))
                    .collect(),
            ),
            last_body: Mutex::new(None),
        }
    }

    /// Returns how many envelopes were sent.
    #[allow(dead_code)]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns the body bytes of the most recent envelope.
    #[allow(dead_code)]
    pub fn last_body(&self) -> Option<Vec<u8>> {
        self.last_body.lock().expect("body lock should work").clone()
    }
}

impl SubmitTransport for ScriptedTransport {
    fn send(&self, envelope: &SubmissionEnvelope) -> Result<TransportReply, SubmitError> {
        let call_index = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        *self.last_body.lock().expect("body lock should work") = Some(envelope.body.clone());

        let replies = self.replies.lock().expect("reply lock should work");
        let (status, body) = replies
            .get(call_index)
            .or_else(|| replies.last())
            .cloned()
            .expect("scripted transport needs at least one reply");

        Ok(TransportReply { status, body })
    }
}

/// Builds a controller wired to the given transport.
#[allow(dead_code)]
pub fn controller_with_transport(transport: Arc<ScriptedTransport>) -> WorkflowController {
    let client = SubmitClient::new("http://localhost:5050/analyze", transport)
        .expect("client should build");
    let runtime = spawn_submission_worker(client).expect("worker should spawn");
    WorkflowController::new(runtime)
}

/// Fills the form with the canonical valid fixture measurements.
#[allow(dead_code)]
pub fn fill_valid_form(controller: &mut WorkflowController) {
    controller.form_mut().set_age("45");
    controller.form_mut().set_glucose_level("90");
    controller.form_mut().set_blood_pressure("120");
}
