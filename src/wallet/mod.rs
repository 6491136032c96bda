//! In-process Ethereum wallet
//!
//! [`LocalWallet`] holds a secp256k1 private key and implements [`Signer`]
//! with `personal_sign` semantics (EIP-191 version `0x45`), so login can run
//! without a browser wallet: scripts, bots, tests.

use crate::auth::Signer;
use crate::error::SignerError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use std::fmt;
use tiny_keccak::{Hasher, Keccak};

/// Keccak-256 digest
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Digest signed by `personal_sign`:
/// `keccak256("\x19Ethereum Signed Message:\n" ++ len(message) ++ message)`
pub fn hash_message(message: &str) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(b"\x19Ethereum Signed Message:\n");
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message.as_bytes());
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// EIP-55 mixed-case rendering of a 20-byte address
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn address_bytes(key: &VerifyingKey) -> [u8; 20] {
    // Uncompressed SEC1 point: 0x04 || x || y
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the checksummed address that produced a `personal_sign` signature
pub fn recover_address(message: &str, signature: &str) -> Result<String, SignerError> {
    let bytes = hex::decode(signature.trim_start_matches("0x"))
        .map_err(|e| SignerError::new(format!("signature is not hex: {e}")))?;
    if bytes.len() != 65 {
        return Err(SignerError::new(format!(
            "signature must be 65 bytes, got {}",
            bytes.len()
        )));
    }

    let v = bytes[64];
    let recovery_id = RecoveryId::from_byte(if v >= 27 { v - 27 } else { v })
        .ok_or_else(|| SignerError::new(format!("invalid recovery id: {v}")))?;
    let sig = Signature::from_slice(&bytes[..64])
        .map_err(|e| SignerError::new(format!("invalid signature: {e}")))?;

    let key = VerifyingKey::recover_from_prehash(&hash_message(message), &sig, recovery_id)
        .map_err(|e| SignerError::new(format!("public key recovery failed: {e}")))?;
    Ok(to_checksum_address(&address_bytes(&key)))
}

/// Wallet backed by a private key held in memory
#[derive(Clone)]
pub struct LocalWallet {
    signing_key: SigningKey,
    address: String,
}

impl LocalWallet {
    /// Create from a 32-byte private key
    pub fn from_bytes(private_key: &[u8]) -> Result<Self, SignerError> {
        let signing_key = SigningKey::from_slice(private_key)
            .map_err(|_| SignerError::new("invalid secp256k1 private key"))?;
        let address = to_checksum_address(&address_bytes(signing_key.verifying_key()));
        Ok(LocalWallet {
            signing_key,
            address,
        })
    }

    /// Create from a hex private key, with or without `0x`
    pub fn from_private_key_hex(private_key: &str) -> Result<Self, SignerError> {
        let bytes = hex::decode(private_key.trim().trim_start_matches("0x"))
            .map_err(|_| SignerError::new("private key is not hex"))?;
        Self::from_bytes(&bytes)
    }

    /// EIP-55 checksummed address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// `personal_sign` signature as `0x` + hex(r || s || v), with v in {27, 28}
    pub fn sign_personal(&self, message: &str) -> Result<String, SignerError> {
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(&hash_message(message))
            .map_err(|e| SignerError::new(format!("signing failed: {e}")))?;

        let mut bytes = Vec::with_capacity(65);
        bytes.extend_from_slice(&sig.to_bytes());
        bytes.push(recovery_id.to_byte() + 27);
        Ok(format!("0x{}", hex::encode(bytes)))
    }
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Signer for LocalWallet {
    async fn get_address(&self) -> Result<String, SignerError> {
        Ok(self.address.clone())
    }

    async fn sign_message(&self, message: &str) -> Result<String, SignerError> {
        self.sign_personal(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

    #[test]
    fn test_address_from_private_key() {
        let wallet = LocalWallet::from_private_key_hex(PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address(), ADDRESS);

        let mut one = [0u8; 32];
        one[31] = 1;
        let wallet = LocalWallet::from_bytes(&one).unwrap();
        assert_eq!(wallet.address(), "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
    }

    #[test]
    fn test_checksum_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let mut bytes = [0u8; 20];
            hex::decode_to_slice(expected[2..].to_lowercase(), &mut bytes).unwrap();
            assert_eq!(to_checksum_address(&bytes), expected);
        }
    }

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_signature_recovers_signer() {
        let wallet = LocalWallet::from_private_key_hex(PRIVATE_KEY).unwrap();
        let signature = wallet.sign_personal("Nonce: 1234").unwrap();

        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 2 + 130);
        let v = u8::from_str_radix(&signature[130..], 16).unwrap();
        assert!(v == 27 || v == 28);

        assert_eq!(recover_address("Nonce: 1234", &signature).unwrap(), ADDRESS);
        assert_ne!(recover_address("Nonce: 1235", &signature).unwrap(), ADDRESS);
    }

    #[test]
    fn test_signing_is_deterministic() {
        let wallet = LocalWallet::from_private_key_hex(PRIVATE_KEY).unwrap();
        assert_eq!(
            wallet.sign_personal("hello").unwrap(),
            wallet.sign_personal("hello").unwrap()
        );
    }

    #[test]
    fn test_signer_trait() {
        let wallet = LocalWallet::from_private_key_hex(PRIVATE_KEY).unwrap();
        let address = tokio_test::block_on(wallet.get_address()).unwrap();
        let signature = tokio_test::block_on(wallet.sign_message("gm")).unwrap();
        assert_eq!(address, ADDRESS);
        assert_eq!(recover_address("gm", &signature).unwrap(), ADDRESS);
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(LocalWallet::from_private_key_hex("0xnothex").is_err());
        assert!(LocalWallet::from_bytes(&[0u8; 32]).is_err());
        assert!(LocalWallet::from_bytes(&[1u8; 16]).is_err());
        assert!(recover_address("gm", "0x1234").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = LocalWallet::from_private_key_hex(PRIVATE_KEY).unwrap();
        let rendered = format!("{wallet:?}");
        assert!(rendered.contains(ADDRESS));
        assert!(!rendered.contains("4c0883a6"));
    }
}
