use crate::engine::GameState;
use crate::results::{DecodeError, SverdleError};
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;
use std::result::Result;

const TOKEN_VERSION: u8 = 1;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Turns a [`GameState`] into an opaque text token, and back.
///
/// Tokens are the bincode-encoded state sealed with ChaCha20-Poly1305, so a client holding one
/// can neither read the answer nor alter any part of the state without detection. The layout is
/// `version || nonce || ciphertext`, hex-encoded, with the version bound as associated data.
#[derive(Clone)]
pub struct TokenCodec {
    cipher: ChaCha20Poly1305,
}

impl TokenCodec {
    /// Creates a codec whose key is derived from the given passphrase. Servers sharing a
    /// passphrase can read each other's tokens.
    pub fn from_secret(secret: &str) -> TokenCodec {
        let key = Sha256::digest(secret.as_bytes());
        TokenCodec::from_key(key.into())
    }

    /// Creates a codec with the given 256-bit key.
    pub fn from_key(key: [u8; 32]) -> TokenCodec {
        TokenCodec {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key)),
        }
    }

    /// Creates a codec with a random key.
    pub fn generate() -> TokenCodec {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        TokenCodec::from_key(key)
    }

    /// Seals the state into a token.
    pub fn encode(&self, state: &GameState) -> Result<String, SverdleError> {
        let plaintext =
            bincode::serialize(state).map_err(|e| SverdleError::Encode(e.to_string()))?;
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        let ciphertext = self
            .cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &plaintext,
                    aad: &[TOKEN_VERSION],
                },
            )
            .map_err(|e| SverdleError::Encode(e.to_string()))?;

        let mut token = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
        token.push(TOKEN_VERSION);
        token.extend_from_slice(&nonce);
        token.extend_from_slice(&ciphertext);
        Ok(hex::encode(token))
    }

    /// Opens a token produced by [`TokenCodec::encode`] with the same key.
    ///
    /// The restored state is checked for internal consistency, so a successful decode never
    /// yields a state with an empty answer or with guesses that don't match it.
    pub fn decode(&self, token: &str) -> Result<GameState, DecodeError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DecodeError::Missing);
        }
        // Only lower-case hex, so each token has exactly one spelling.
        if !token
            .bytes()
            .all(|digit| matches!(digit, b'0'..=b'9' | b'a'..=b'f'))
        {
            return Err(DecodeError::Malformed);
        }
        let bytes = hex::decode(token).map_err(|_| DecodeError::Malformed)?;
        if bytes.len() < 1 + NONCE_LEN + TAG_LEN {
            return Err(DecodeError::Malformed);
        }
        let (version, rest) = bytes.split_at(1);
        if version[0] != TOKEN_VERSION {
            return Err(DecodeError::UnsupportedVersion(version[0]));
        }
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: version,
                },
            )
            .map_err(|_| DecodeError::Authentication)?;
        let state: GameState =
            bincode::deserialize(&plaintext).map_err(|e| DecodeError::Payload(e.to_string()))?;
        state.check_consistency()?;
        Ok(state)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
