//! Etherscan HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use deploy_core::{SourceVerifier, VerificationError, VerificationOutcome, VerificationRequest};

use super::types::{CheckStatus, EtherscanResponse, SubmitStatus};
use crate::artifact::{ArtifactError, ContractArtifact};
use crate::config::EvmConfig;
use crate::contracts::encode_constructor_args;

const DEFAULT_SUBMIT_ATTEMPTS: u32 = 5;
const DEFAULT_STATUS_CHECKS: u32 = 20;

/// Source metadata submitted for verification.
#[derive(Debug, Clone)]
pub struct VerificationSource {
    /// `<sourceName>:<contractName>`
    pub contract_name: String,

    /// `v<solcLongVersion>`
    pub compiler_version: String,

    /// Standard-JSON compiler input
    pub standard_json_input: String,
}

impl VerificationSource {
    pub fn from_artifact(artifact: &ContractArtifact) -> Result<Self, ArtifactError> {
        let build_info = artifact.build_info()?;

        Ok(Self {
            contract_name: artifact.fully_qualified_name(),
            compiler_version: build_info.compiler_version(),
            standard_json_input: build_info.standard_json_input(),
        })
    }
}

/// Where the verifier gets its source metadata from.
#[derive(Debug, Clone)]
enum SourceLoader {
    Artifact(ContractArtifact),
    Loaded(VerificationSource),
}

/// Etherscan verifier (API v2, one endpoint for every chain).
pub struct EtherscanVerifier {
    /// API endpoint
    api_url: String,

    /// API key; verification fails without one
    api_key: Option<String>,

    /// Target chain
    chain_id: u64,

    /// Source metadata, read lazily so local runs don't need build-info
    source: SourceLoader,

    /// HTTP client
    http_client: reqwest::Client,

    poll_interval: Duration,
    max_submit_attempts: u32,
    max_status_checks: u32,
}

impl EtherscanVerifier {
    /// Create a verifier for `chain_id` using the endpoint and key from `config`.
    pub fn from_artifact(config: &EvmConfig, chain_id: u64, artifact: &ContractArtifact) -> Self {
        Self::with_loader(config, chain_id, SourceLoader::Artifact(artifact.clone()))
    }

    /// Create a verifier with already-loaded source metadata.
    pub fn with_source(config: &EvmConfig, chain_id: u64, source: VerificationSource) -> Self {
        Self::with_loader(config, chain_id, SourceLoader::Loaded(source))
    }

    fn with_loader(config: &EvmConfig, chain_id: u64, source: SourceLoader) -> Self {
        Self {
            api_url: config.etherscan_api_url.clone(),
            api_key: config.etherscan_api_key.clone(),
            chain_id,
            source,
            http_client: reqwest::Client::new(),
            poll_interval: config.poll_interval,
            max_submit_attempts: DEFAULT_SUBMIT_ATTEMPTS,
            max_status_checks: DEFAULT_STATUS_CHECKS,
        }
    }

    /// Set the interval between resubmissions and status checks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set retry bounds.
    pub fn with_limits(mut self, submit_attempts: u32, status_checks: u32) -> Self {
        self.max_submit_attempts = submit_attempts.max(1);
        self.max_status_checks = status_checks.max(1);
        self
    }

    fn load_source(&self) -> Result<VerificationSource, VerificationError> {
        match &self.source {
            SourceLoader::Loaded(source) => Ok(source.clone()),
            SourceLoader::Artifact(artifact) => VerificationSource::from_artifact(artifact)
                .map_err(|e| VerificationError::Source(e.to_string())),
        }
    }

    async fn submit(
        &self,
        api_key: &str,
        source: &VerificationSource,
        request: &VerificationRequest,
    ) -> Result<SubmitStatus, VerificationError> {
        let contract_address = request.address.to_string();
        let constructor_args = hex::encode(encode_constructor_args(&request.constructor_args));
        let chain_id = self.chain_id.to_string();

        let form = [
            ("apikey", api_key),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", contract_address.as_str()),
            ("sourceCode", source.standard_json_input.as_str()),
            ("codeformat", "solidity-standard-json-input"),
            ("contractname", source.contract_name.as_str()),
            ("compilerversion", source.compiler_version.as_str()),
            // Etherscan's spelling
            ("constructorArguements", constructor_args.as_str()),
        ];

        tracing::debug!(
            address = %request.address,
            contract = %source.contract_name,
            compiler = %source.compiler_version,
            "Submitting source for verification"
        );

        let response = self
            .http_client
            .post(&self.api_url)
            .query(&[("chainid", chain_id.as_str())])
            .form(&form)
            .send()
            .await
            .map_err(|e| VerificationError::Transport(e.to_string()))?;

        Ok(SubmitStatus::from(Self::parse(response).await?))
    }

    async fn check_status(
        &self,
        api_key: &str,
        guid: &str,
    ) -> Result<CheckStatus, VerificationError> {
        let chain_id = self.chain_id.to_string();

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("chainid", chain_id.as_str()),
                ("apikey", api_key),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await
            .map_err(|e| VerificationError::Transport(e.to_string()))?;

        Ok(CheckStatus::from(Self::parse(response).await?))
    }

    async fn parse(response: reqwest::Response) -> Result<EtherscanResponse, VerificationError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| VerificationError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(VerificationError::Transport(format!(
                "Etherscan returned status {}: {}",
                status, text
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            VerificationError::Transport(format!("Unexpected Etherscan response {}: {}", text, e))
        })
    }
}

#[async_trait]
impl SourceVerifier for EtherscanVerifier {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerificationError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(VerificationError::MissingApiKey)?;
        let source = self.load_source()?;

        let mut guid = None;
        for attempt in 1..=self.max_submit_attempts {
            match self.submit(api_key, &source, request).await? {
                SubmitStatus::Submitted(id) => {
                    guid = Some(id);
                    break;
                }
                SubmitStatus::AlreadyVerified => return Ok(VerificationOutcome::AlreadyVerified),
                SubmitStatus::NotIndexed => {
                    tracing::debug!(attempt, "Bytecode not indexed by explorer yet");
                    if attempt < self.max_submit_attempts {
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
                SubmitStatus::Rejected(reason) => return Err(VerificationError::Rejected(reason)),
            }
        }

        let guid = guid.ok_or(VerificationError::Timeout {
            attempts: self.max_submit_attempts,
        })?;
        tracing::debug!(%guid, "Verification submitted");

        for check in 1..=self.max_status_checks {
            tokio::time::sleep(self.poll_interval).await;

            match self.check_status(api_key, &guid).await? {
                CheckStatus::Verified => return Ok(VerificationOutcome::Verified),
                CheckStatus::AlreadyVerified => return Ok(VerificationOutcome::AlreadyVerified),
                CheckStatus::Pending => tracing::debug!(check, "Verification pending"),
                CheckStatus::Failed(reason) => return Err(VerificationError::Rejected(reason)),
            }
        }

        Err(VerificationError::Timeout {
            attempts: self.max_status_checks,
        })
    }

    fn explorer(&self) -> &str {
        "Etherscan"
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::Address;
    use deploy_core::ConstructorArgs;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn source() -> VerificationSource {
        VerificationSource {
            contract_name: "contracts/GeomeanOracleHook.sol:GeomeanOracleHook".to_string(),
            compiler_version: "v0.8.24+commit.e11b9ed9".to_string(),
            standard_json_input: r#"{"language":"Solidity"}"#.to_string(),
        }
    }

    fn request() -> VerificationRequest {
        VerificationRequest {
            address: Address::repeat_byte(0xab),
            constructor_args: ConstructorArgs::new(
                Address::repeat_byte(1),
                Address::repeat_byte(2),
            ),
        }
    }

    fn verifier(server: &MockServer, api_key: Option<&str>) -> EtherscanVerifier {
        let mut config = EvmConfig::new("sepolia");
        config.etherscan_api_url = format!("{}/v2/api", server.uri());
        config.etherscan_api_key = api_key.map(str::to_string);

        EtherscanVerifier::with_source(&config, 11_155_111, source())
            .with_poll_interval(Duration::from_millis(1))
            .with_limits(3, 3)
    }

    fn body(status: &str, result: &str) -> serde_json::Value {
        serde_json::json!({ "status": status, "message": "", "result": result })
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let server = MockServer::start().await;
        let result = verifier(&server, None).verify(&request()).await;
        assert!(matches!(result, Err(VerificationError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_verify_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(query_param("chainid", "11155111"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("1", "guid-1")))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(query_param("guid", "guid-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("0", "Pending in queue")))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(query_param("guid", "guid-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("1", "Pass - Verified")))
            .mount(&server)
            .await;

        let outcome = verifier(&server, Some("KEY")).verify(&request()).await.unwrap();
        assert_eq!(outcome, VerificationOutcome::Verified);
    }

    #[tokio::test]
    async fn test_already_verified_on_submit() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body("0", "Contract source code already verified")),
            )
            .mount(&server)
            .await;

        let outcome = verifier(&server, Some("KEY")).verify(&request()).await.unwrap();
        assert_eq!(outcome, VerificationOutcome::AlreadyVerified);
    }

    #[tokio::test]
    async fn test_resubmits_until_indexed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body("0", "Unable to locate ContractCode at 0xab")),
            )
            .up_to_n_times(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("1", "guid-2")))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("1", "Pass - Verified")))
            .mount(&server)
            .await;

        let outcome = verifier(&server, Some("KEY")).verify(&request()).await.unwrap();
        assert_eq!(outcome, VerificationOutcome::Verified);
    }

    #[tokio::test]
    async fn test_never_indexed_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body("0", "Unable to locate ContractCode at 0xab")),
            )
            .expect(3)
            .mount(&server)
            .await;

        let result = verifier(&server, Some("KEY")).verify(&request()).await;
        assert!(matches!(result, Err(VerificationError::Timeout { attempts: 3 })));
    }

    #[tokio::test]
    async fn test_rate_limited_poll_keeps_waiting() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("1", "guid-4")))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body("0", "Max rate limit reached, please use API Key")),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("1", "Pass - Verified")))
            .mount(&server)
            .await;

        let outcome = verifier(&server, Some("KEY")).verify(&request()).await.unwrap();
        assert_eq!(outcome, VerificationOutcome::Verified);
    }

    #[tokio::test]
    async fn test_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("1", "guid-3")))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(body("0", "Fail - Unable to verify")),
            )
            .mount(&server)
            .await;

        let result = verifier(&server, Some("KEY")).verify(&request()).await;
        match result {
            Err(VerificationError::Rejected(reason)) => {
                assert!(reason.contains("Unable to verify"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let result = verifier(&server, Some("KEY")).verify(&request()).await;
        assert!(matches!(result, Err(VerificationError::Transport(_))));
    }

    #[test]
    fn test_explorer_name() {
        let verifier = EtherscanVerifier::with_source(&EvmConfig::new("mainnet"), 1, source());
        assert_eq!(verifier.explorer(), "Etherscan");
    }
}
