//! Registration RPC transport
//!
//! Provides the seam between the submission flow and the network.

mod jsonrpc;

pub use jsonrpc::JsonRpcTransport;

use crate::error::Result;
use crate::types::{SubmissionPayload, SubmissionResponse};
use async_trait::async_trait;

/// Transport posting a registration payload to an endpoint
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Send the payload and decode the server's response
    async fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionResponse>;
}
