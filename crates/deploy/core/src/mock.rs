//! Mock chain for testing without network.

use std::sync::{Arc, Mutex};

use alloy_primitives::{Address, B256};
use async_trait::async_trait;

use crate::traits::{ContractDeployer, DeploymentError, SourceVerifier, VerificationError};
use crate::types::{ConstructorArgs, PendingDeployment, VerificationOutcome, VerificationRequest};

/// A call observed by [`MockChain`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Deploy(ConstructorArgs),
    WaitForConfirmations { address: Address, confirmations: u64 },
    Verify(VerificationRequest),
}

/// In-memory deployer and verifier.
///
/// Records every call in a single shared log so tests can assert on ordering
/// across both traits.
#[derive(Clone)]
pub struct MockChain {
    calls: Arc<Mutex<Vec<MockCall>>>,
    deployed_address: Address,
    fail_deploy: bool,
    fail_confirmations: bool,
    fail_verify: bool,
    already_verified: bool,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            deployed_address: Address::repeat_byte(0xab),
            fail_deploy: false,
            fail_confirmations: false,
            fail_verify: false,
            already_verified: false,
        }
    }

    pub fn fail_deploy(mut self) -> Self {
        self.fail_deploy = true;
        self
    }

    pub fn fail_confirmations(mut self) -> Self {
        self.fail_confirmations = true;
        self
    }

    pub fn fail_verify(mut self) -> Self {
        self.fail_verify = true;
        self
    }

    pub fn already_verified(mut self) -> Self {
        self.already_verified = true;
        self
    }

    pub fn deployed_address(&self) -> Address {
        self.deployed_address
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn verify_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Verify(_)))
            .count()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractDeployer for MockChain {
    async fn deploy(&self, args: &ConstructorArgs) -> Result<PendingDeployment, DeploymentError> {
        self.record(MockCall::Deploy(*args));

        if self.fail_deploy {
            return Err(DeploymentError::Transport("mock deployment failure".to_string()));
        }

        Ok(PendingDeployment {
            address: self.deployed_address,
            transaction_hash: B256::repeat_byte(0x01),
            block_number: 100,
        })
    }

    async fn wait_for_confirmations(
        &self,
        deployment: &PendingDeployment,
        confirmations: u64,
    ) -> Result<(), DeploymentError> {
        self.record(MockCall::WaitForConfirmations {
            address: deployment.address,
            confirmations,
        });

        if self.fail_confirmations {
            return Err(DeploymentError::Confirmations(
                "mock confirmation failure".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl SourceVerifier for MockChain {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerificationError> {
        self.record(MockCall::Verify(request.clone()));

        if self.fail_verify {
            return Err(VerificationError::Rejected(
                "mock verification failure".to_string(),
            ));
        }

        if self.already_verified {
            Ok(VerificationOutcome::AlreadyVerified)
        } else {
            Ok(VerificationOutcome::Verified)
        }
    }

    fn explorer(&self) -> &str {
        "MockExplorer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chain_records_calls() {
        let chain = MockChain::new();
        let args = ConstructorArgs::new(Address::repeat_byte(1), Address::repeat_byte(2));

        let deployment = chain.deploy(&args).await.unwrap();
        assert_eq!(deployment.address, chain.deployed_address());

        chain.wait_for_confirmations(&deployment, 3).await.unwrap();

        let request = VerificationRequest {
            address: deployment.address,
            constructor_args: args,
        };
        let outcome = chain.verify(&request).await.unwrap();
        assert_eq!(outcome, VerificationOutcome::Verified);

        assert_eq!(
            chain.calls(),
            vec![
                MockCall::Deploy(args),
                MockCall::WaitForConfirmations {
                    address: deployment.address,
                    confirmations: 3,
                },
                MockCall::Verify(request),
            ]
        );
        assert_eq!(chain.explorer(), "MockExplorer");
    }
}
