//! Loading of the compiled token contract.

use {
    alloy::{json_abi::{Constructor, JsonAbi}, primitives::Bytes},
    anyhow::{Context, Result, anyhow, ensure},
    std::path::Path,
};

/// Constructor parameter types the deployer knows how to fill:
/// `(name, symbol, initialSupply)`.
const EXPECTED_CONSTRUCTOR: [&str; 3] = ["string", "string", "uint256"];

/// ABI constructor and creation bytecode of the token contract.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub constructor: Constructor,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn load(abi_path: &Path, bytecode_path: &Path) -> Result<Self> {
        let abi = std::fs::read_to_string(abi_path)
            .with_context(|| format!("failed to read ABI from {}", abi_path.display()))?;
        let bytecode = std::fs::read_to_string(bytecode_path).with_context(|| {
            format!("failed to read bytecode from {}", bytecode_path.display())
        })?;
        Self::from_parts(&abi, &bytecode)
    }

    /// Accepts either a bare ABI array or a compiler artifact object with an
    /// `abi` field.
    pub fn from_parts(abi: &str, bytecode: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(abi).context("ABI is not JSON")?;
        let value = match value {
            serde_json::Value::Object(mut artifact) => artifact
                .remove("abi")
                .ok_or_else(|| anyhow!("artifact object has no `abi` field"))?,
            value => value,
        };
        let abi: JsonAbi = serde_json::from_value(value).context("invalid ABI")?;

        let constructor = abi
            .constructor()
            .cloned()
            .ok_or_else(|| anyhow!("ABI has no constructor"))?;
        let types: Vec<_> = constructor.inputs.iter().map(|p| p.ty.as_str()).collect();
        ensure!(
            types == EXPECTED_CONSTRUCTOR,
            "constructor takes ({}), expected ({})",
            types.join(", "),
            EXPECTED_CONSTRUCTOR.join(", "),
        );

        let bytecode: Bytes = bytecode.trim().parse().context("bytecode is not hex")?;
        ensure!(!bytecode.is_empty(), "bytecode is empty");

        Ok(Self {
            constructor,
            bytecode,
        })
    }
}
