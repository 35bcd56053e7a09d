//! Email hashing and reversible opaque codes.
//!
//! Emails are persisted only as an HMAC-SHA256 under a configured secret and
//! used purely as a lookup key. The verification/reset code is the inverse
//! path: AES-256-CBC over `email ++ " " ++ random padding`, hex-encoded, so
//! the server can recover the address from the code alone. The random
//! padding makes every issued code distinct for the same email.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use anyhow::{Context, Result};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Keyed hash of an email address. This is the only stored form of the
/// address and the unique lookup key for users.
pub fn hash_email(secret: &str, email: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(email.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Symmetric cipher for opaque verification/reset codes.
#[derive(Clone)]
pub struct CodeCipher {
    key: [u8; 32],
    iv: [u8; 16],
}

impl CodeCipher {
    /// Build from hex-encoded key (32 bytes) and IV (16 bytes).
    pub fn from_hex(key_hex: &str, iv_hex: &str) -> Result<Self> {
        let key_bytes = hex::decode(key_hex).context("ENCRYPTION_KEY must be valid hex")?;
        let iv_bytes = hex::decode(iv_hex).context("ENCRYPTION_IV must be valid hex")?;

        let key: [u8; 32] = key_bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("ENCRYPTION_KEY must be 32 bytes"))?;
        let iv: [u8; 16] = iv_bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("ENCRYPTION_IV must be 16 bytes"))?;

        Ok(Self { key, iv })
    }

    /// Issue a fresh opaque code binding `email`.
    pub fn issue(&self, email: &str) -> String {
        let mut padding = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut padding);

        let plaintext = format!("{} {}", email, hex::encode(padding));
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &self.iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        hex::encode(ciphertext)
    }

    /// Recover the email bound by `code`. Returns `None` for anything that
    /// does not decrypt cleanly back to `email ++ " " ++ padding`.
    pub fn recover(&self, code: &str) -> Option<String> {
        let ciphertext = hex::decode(code).ok()?;
        let plaintext = Aes256CbcDec::new(&self.key.into(), &self.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .ok()?;

        let decoded = String::from_utf8(plaintext).ok()?;
        let email = decoded.split(' ').next()?;
        if email.is_empty() {
            return None;
        }
        Some(email.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher() -> CodeCipher {
        CodeCipher::from_hex(
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
            "000102030405060708090a0b0c0d0e0f",
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_recover_roundtrip() {
        let cipher = test_cipher();
        let code = cipher.issue("alice@example.com");
        assert_eq!(cipher.recover(&code), Some("alice@example.com".to_string()));
    }

    #[test]
    fn test_codes_are_unique_per_issue() {
        let cipher = test_cipher();
        let a = cipher.issue("alice@example.com");
        let b = cipher.issue("alice@example.com");
        assert_ne!(a, b);
        assert_eq!(cipher.recover(&a), cipher.recover(&b));
    }

    #[test]
    fn test_tampered_code_does_not_recover_the_email() {
        let cipher = test_cipher();
        let code = cipher.issue("alice@example.com");

        // Truncating breaks the block length, so decryption must fail.
        let truncated = &code[..code.len() - 2];
        assert_eq!(cipher.recover(truncated), None);

        // Flipping ciphertext bytes must never yield the original address.
        let mut flipped = code.clone();
        let replacement = if code.starts_with('0') { '1' } else { '0' };
        flipped.replace_range(0..1, &replacement.to_string());
        assert_ne!(
            cipher.recover(&flipped),
            Some("alice@example.com".to_string())
        );
    }

    #[test]
    fn test_garbage_input_fails() {
        let cipher = test_cipher();
        assert_eq!(cipher.recover(""), None);
        assert_eq!(cipher.recover("not-hex!"), None);
        assert_eq!(cipher.recover("deadbeef"), None);
    }

    #[test]
    fn test_wrong_key_does_not_recover() {
        let cipher = test_cipher();
        let other = CodeCipher::from_hex(
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            "000102030405060708090a0b0c0d0e0f",
        )
        .unwrap();

        let code = cipher.issue("alice@example.com");
        assert_ne!(other.recover(&code), Some("alice@example.com".to_string()));
    }

    #[test]
    fn test_hash_email_is_keyed_and_stable() {
        let a = hash_email("secret", "alice@example.com");
        let b = hash_email("secret", "alice@example.com");
        let c = hash_email("other-secret", "alice@example.com");
        assert_eq!(a, b);
        assert_ne!(a, c);
        // 32-byte digest, hex-encoded.
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_rejects_bad_key_material() {
        assert!(CodeCipher::from_hex("zz", "00").is_err());
        assert!(CodeCipher::from_hex("00ff", "000102030405060708090a0b0c0d0e0f").is_err());
    }
}
