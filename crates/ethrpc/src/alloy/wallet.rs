use {
    alloy::signers::local::PrivateKeySigner,
    anyhow::{Context, Result},
};

/// Parses a hex encoded secp256k1 private key, with or without `0x` prefix.
pub fn signer_from_private_key(private_key: &str) -> Result<PrivateKeySigner> {
    let key = private_key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);
    key.parse::<PrivateKeySigner>()
        .context("private key is not a valid 32 byte hex string")
}
