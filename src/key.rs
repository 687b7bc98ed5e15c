use log::info;
use rand::rngs::OsRng;
use rcgen::KeyPair;
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;

use crate::error::{CsrError, Result};

/// Smallest RSA modulus the SHA-512 signer accepts.
pub const MIN_KEY_SIZE: u32 = 2048;
/// Largest RSA modulus the SHA-512 signer accepts.
pub const MAX_KEY_SIZE: u32 = 4096;

/// A freshly generated RSA key, ready to sign requests with SHA-512.
pub struct RsaSigningKey {
    key_pair: KeyPair,
    private_key_pem: String,
    bits: usize,
}

impl RsaSigningKey {
    /// Generate a key of `key_size` bits. Sizes outside
    /// [`MIN_KEY_SIZE`]..=[`MAX_KEY_SIZE`] are rejected before any work is done.
    pub fn generate(key_size: u32) -> Result<Self> {
        validate_key_size(key_size)?;

        info!("Generating {key_size} bit RSA key");
        let private_key = RsaPrivateKey::new(&mut OsRng, key_size as usize)
            .map_err(|source| CsrError::KeyGeneration { source })?;
        Self::from_private_key(&private_key)
    }

    pub fn from_private_key(private_key: &RsaPrivateKey) -> Result<Self> {
        let pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|source| CsrError::KeyEncoding { source })?;
        let key_pair = KeyPair::from_pem_and_sign_algo(&pem, &rcgen::PKCS_RSA_SHA512)
            .map_err(|source| CsrError::Request { source })?;

        Ok(Self {
            key_pair,
            private_key_pem: pem.as_str().to_owned(),
            bits: private_key.n().bits(),
        })
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// PKCS#8 PEM encoding of the private key.
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    pub fn bits(&self) -> usize {
        self.bits
    }
}

fn validate_key_size(key_size: u32) -> Result<()> {
    if key_size == 0 {
        return Err(CsrError::InvalidParameter {
            name: "key_size",
            reason: "must be a positive number of bits".to_string(),
        });
    }
    if !(MIN_KEY_SIZE..=MAX_KEY_SIZE).contains(&key_size) {
        return Err(CsrError::InvalidParameter {
            name: "key_size",
            reason: format!(
                "{key_size} bits is outside the supported range {MIN_KEY_SIZE}..={MAX_KEY_SIZE}"
            ),
        });
    }
    Ok(())
}
