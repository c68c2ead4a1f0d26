//! Etherscan API response types.
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! { "status": "1", "message": "OK", "result": "..." }
//! ```
//!
//! `status` is `"1"` on success and `"0"` otherwise; the interesting text is
//! always in `result`. Classification is substring based because Etherscan
//! reports every state through free-form messages.

use serde::Deserialize;

/// Common response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct EtherscanResponse {
    pub status: String,

    #[serde(default)]
    pub message: String,

    /// GUID, status text or error text depending on the endpoint
    #[serde(default)]
    pub result: serde_json::Value,
}

impl EtherscanResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    /// `result` as text (non-string results are rendered as JSON).
    pub fn result_text(&self) -> String {
        match &self.result {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => self.message.clone(),
            other => other.to_string(),
        }
    }
}

/// Outcome of a `verifysourcecode` submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Accepted; poll with this GUID
    Submitted(String),
    /// Source already verified on the explorer
    AlreadyVerified,
    /// Explorer has not indexed the bytecode yet; resubmit later
    NotIndexed,
    /// Any other failure
    Rejected(String),
}

impl From<EtherscanResponse> for SubmitStatus {
    fn from(response: EtherscanResponse) -> Self {
        let text = response.result_text();

        if response.is_ok() {
            return SubmitStatus::Submitted(text);
        }

        let lower = text.to_lowercase();
        if lower.contains("already verified") {
            SubmitStatus::AlreadyVerified
        } else if lower.contains("unable to locate contractcode") {
            SubmitStatus::NotIndexed
        } else {
            SubmitStatus::Rejected(text)
        }
    }
}

/// Outcome of a `checkverifystatus` poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Verified,
    AlreadyVerified,
    /// Still queued, or the poll itself was throttled
    Pending,
    Failed(String),
}

impl From<EtherscanResponse> for CheckStatus {
    fn from(response: EtherscanResponse) -> Self {
        let text = response.result_text();
        let lower = text.to_lowercase();

        if lower.contains("already verified") {
            CheckStatus::AlreadyVerified
        } else if response.is_ok() {
            CheckStatus::Verified
        } else if lower.contains("pending in queue")
            || lower.contains("in progress")
            || lower.contains("rate limit")
        {
            CheckStatus::Pending
        } else {
            CheckStatus::Failed(text)
        }
    }
}
