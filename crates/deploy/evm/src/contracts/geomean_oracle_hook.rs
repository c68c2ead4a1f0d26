//! GeomeanOracleHook constructor encoding.
//!
//! The hook takes two addresses, in this order:
//! `constructor(IVault vault, address allowedPoolFactory)`.

use alloy::primitives::Bytes;
use alloy::sol;
use alloy::sol_types::SolConstructor;
use deploy_core::ConstructorArgs;

sol! {
    #[allow(missing_docs)]
    #[derive(Debug)]
    contract GeomeanOracleHook {
        constructor(address vault, address allowedPoolFactory);
    }
}

/// ABI-encode the constructor arguments (two left-padded 32-byte words).
pub fn encode_constructor_args(args: &ConstructorArgs) -> Vec<u8> {
    GeomeanOracleHook::constructorCall {
        vault: args.vault,
        allowedPoolFactory: args.allowed_pool_factory,
    }
    .abi_encode()
}

/// Creation code followed by the encoded constructor arguments.
pub fn deploy_code(bytecode: &[u8], args: &ConstructorArgs) -> Bytes {
    let encoded = encode_constructor_args(args);
    let mut code = Vec::with_capacity(bytecode.len() + encoded.len());
    code.extend_from_slice(bytecode);
    code.extend_from_slice(&encoded);
    code.into()
}
