//! Mock collaborators for submission tests
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use event_signup::error::{Error, Result};
use event_signup::recaptcha::TokenProvider;
use event_signup::rpc::RpcTransport;
use event_signup::submit::{SubmissionObserver, SubmissionState};
use event_signup::types::{SubmissionPayload, SubmissionResponse, TokenResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};

/// Shared ordering log across mocks
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: &str) {
        self.0.lock().unwrap().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

// =============================================================================
// Token provider
// =============================================================================

/// Token provider with a configurable result and call tracking
pub struct MockTokenProvider {
    result: Mutex<TokenResult>,
    calls: Mutex<Vec<String>>,
    loaded: AtomicBool,
    delay: Mutex<Option<Duration>>,
    log: CallLog,
}

impl MockTokenProvider {
    pub fn new(log: CallLog) -> Self {
        Self {
            result: Mutex::new(TokenResult::Token("abc".to_string())),
            calls: Mutex::new(Vec::new()),
            loaded: AtomicBool::new(false),
            delay: Mutex::new(None),
            log,
        }
    }

    /// Set the result of subsequent `get_token` calls
    pub fn set_result(&self, result: TokenResult) {
        *self.result.lock().unwrap() = result;
    }

    /// Make `get_token` sleep before answering
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Actions `get_token` was called with
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for MockTokenProvider {
    async fn load(&self) {
        self.loaded.store(true, Ordering::SeqCst);
    }

    async fn get_token(&self, action: &str) -> TokenResult {
        self.calls.lock().unwrap().push(action.to_string());
        self.log.push("token");
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.result.lock().unwrap().clone()
    }
}

// =============================================================================
// Transport
// =============================================================================

/// Call record for `submit`
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitCall {
    pub endpoint: String,
    pub payload: serde_json::Value,
}

enum Failure {
    Transport(String),
    Rpc(i64, String),
}

/// Transport with call tracking, error injection, and an optional hold
///
/// When held, `submit` records the call, signals `started`, then waits
/// for `release` before answering.
pub struct MockTransport {
    response: Mutex<SubmissionResponse>,
    failure: Mutex<Option<Failure>>,
    calls: Mutex<Vec<SubmitCall>>,
    held: AtomicBool,
    gate: Semaphore,
    started: Notify,
    log: CallLog,
}

impl MockTransport {
    pub fn new(response: SubmissionResponse, log: CallLog) -> Self {
        Self {
            response: Mutex::new(response),
            failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            held: AtomicBool::new(false),
            gate: Semaphore::new(0),
            started: Notify::new(),
            log,
        }
    }

    // === Error injection ===

    /// Make `submit` fail with a transport error
    pub fn fail_transport(&self, msg: &str) {
        *self.failure.lock().unwrap() = Some(Failure::Transport(msg.to_string()));
    }

    /// Make `submit` fail with a JSON-RPC error
    pub fn fail_rpc(&self, code: i64, msg: &str) {
        *self.failure.lock().unwrap() = Some(Failure::Rpc(code, msg.to_string()));
    }

    /// Let `submit` succeed again
    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    // === Hold ===

    /// Make `submit` wait for `release`
    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Let one held `submit` answer
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Wait until a `submit` call has been recorded
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    // === Call verification ===

    pub fn get_calls(&self) -> Vec<SubmitCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionResponse> {
        self.calls.lock().unwrap().push(SubmitCall {
            endpoint: endpoint.to_string(),
            payload: serde_json::to_value(payload).unwrap(),
        });
        self.log.push("submit");
        self.started.notify_one();

        if self.held.load(Ordering::SeqCst) {
            self.gate.acquire().await.unwrap().forget();
        }

        match self.failure.lock().unwrap().as_ref() {
            Some(Failure::Transport(msg)) => return Err(Error::Transport(msg.clone())),
            Some(Failure::Rpc(code, msg)) => {
                return Err(Error::Rpc {
                    code: *code,
                    message: msg.clone(),
                });
            }
            None => {}
        }

        Ok(self.response.lock().unwrap().clone())
    }
}

// =============================================================================
// Observer
// =============================================================================

/// Observer collecting state transitions
#[derive(Default)]
pub struct RecordingObserver {
    states: Mutex<Vec<SubmissionState>>,
    requests: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn states(&self) -> Vec<SubmissionState> {
        self.states.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.states.lock().unwrap().clear();
    }
}

#[async_trait]
impl SubmissionObserver for RecordingObserver {
    async fn on_state(&self, state: SubmissionState) {
        self.states.lock().unwrap().push(state);
    }

    async fn on_request(&self, endpoint: &str, _payload: &SubmissionPayload) {
        self.requests.lock().unwrap().push(endpoint.to_string());
    }

    async fn on_response(&self, _response: &SubmissionResponse) {}

    async fn on_error(&self, error: &Error) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}
