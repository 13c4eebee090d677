//! AES block cipher implementations
//!
//! This module implements the Advanced Encryption Standard (AES) block
//! cipher as specified in FIPS 197, for 128-, 192-, and 256-bit keys.
//!
//! Two interchangeable engines sit behind one dispatching type:
//! - a software engine using the classic T-table algorithm, and
//! - a hardware engine using AES-NI round instructions on x86-64.
//!
//! The backend is chosen once, at key setup, from a CPUID feature probe and
//! stays fixed for the lifetime of the instance. Both engines expand the
//! same round-key schedule and produce bit-identical output for every
//! input.
//!
//! ## Side-channel note
//!
//! The T-table path performs key- and data-dependent table lookups and is
//! therefore not constant-time with respect to cache behavior. Deployments
//! that must resist cache-timing attacks should run where the hardware
//! engine is selected.

mod cpu;
#[cfg(target_arch = "x86_64")]
mod ni;
mod soft;
mod tables;

pub use cpu::cpu_supports_aes;

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{AesVariant, BlockCipher, CipherAlgorithm};
use crate::error::Result;
use crate::types::KeyBytes;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-128 key size in bytes
pub const AES128_KEY_SIZE: usize = 16;

/// AES-192 key size in bytes
pub const AES192_KEY_SIZE: usize = 24;

/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;

/// Engine selected at key setup
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
enum Backend {
    Soft(soft::SoftAes),
    #[cfg(target_arch = "x86_64")]
    Ni(ni::NiAes),
}

fn select_backend(key: &[u8]) -> Result<Backend> {
    #[cfg(target_arch = "x86_64")]
    {
        if cpu_supports_aes() {
            return Ok(Backend::Ni(ni::NiAes::new(key)?));
        }
    }
    Ok(Backend::Soft(soft::SoftAes::new(key)?))
}

/// AES engine for any key size, with runtime backend dispatch
///
/// Construction expands the key schedule once; `encrypt_block` and
/// `decrypt_block` then process one 16-byte block per call, in place.
/// The engine is immutable after key setup, so a shared instance may be
/// used from multiple threads concurrently. Re-keying through
/// [`set_key`](Aes::set_key) requires exclusive access.
///
/// ```
/// use aes_core::Aes;
///
/// let aes = Aes::new(&[0u8; 16]).unwrap();
/// let mut block = *b"attack at dawn!!";
/// aes.encrypt_block(&mut block).unwrap();
/// aes.decrypt_block(&mut block).unwrap();
/// assert_eq!(&block, b"attack at dawn!!");
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes {
    backend: Backend,
}

impl Aes {
    /// Create an engine from a 16-, 24-, or 32-byte key.
    ///
    /// Any other key length is rejected with a parameter error and no
    /// engine is produced.
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Aes {
            backend: select_backend(key)?,
        })
    }

    /// Create an engine pinned to the software backend.
    ///
    /// Used to cross-check the hardware path.
    #[cfg(test)]
    pub(crate) fn new_software(key: &[u8]) -> Result<Self> {
        Ok(Aes {
            backend: Backend::Soft(soft::SoftAes::new(key)?),
        })
    }

    /// Replace the key, leaving the engine as if freshly constructed.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        *self = Aes::new(key)?;
        Ok(())
    }

    /// Encrypt a single 16-byte block in place
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        match &self.backend {
            Backend::Soft(engine) => engine.encrypt_block(block),
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(engine) => engine.encrypt_block(block),
        }
    }

    /// Decrypt a single 16-byte block in place
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        match &self.backend {
            Backend::Soft(engine) => engine.decrypt_block(block),
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(engine) => engine.decrypt_block(block),
        }
    }

    /// Key length in bytes (16, 24, or 32)
    pub fn key_len(&self) -> usize {
        match &self.backend {
            Backend::Soft(engine) => engine.key_len(),
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(engine) => engine.key_len(),
        }
    }

    /// Block length in bytes (always 16)
    pub fn block_len(&self) -> usize {
        AES_BLOCK_SIZE
    }

    /// Number of rounds for the keyed variant (10, 12, or 14)
    pub fn rounds(&self) -> usize {
        match &self.backend {
            Backend::Soft(engine) => engine.rounds(),
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(engine) => engine.rounds(),
        }
    }

    /// True when the AES-NI backend was selected at key setup
    #[cfg(test)]
    fn is_hardware_accelerated(&self) -> bool {
        match &self.backend {
            Backend::Soft(_) => false,
            #[cfg(target_arch = "x86_64")]
            Backend::Ni(_) => true,
        }
    }
}

/// Type-level constants for AES-128
pub enum Aes128Algorithm {}

impl CipherAlgorithm for Aes128Algorithm {
    const KEY_SIZE: usize = AES128_KEY_SIZE;
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn name() -> &'static str {
        "AES-128"
    }
}

impl AesVariant for Aes128Algorithm {
    const ROUNDS: usize = 10;
}

/// Type-level constants for AES-192
pub enum Aes192Algorithm {}

impl CipherAlgorithm for Aes192Algorithm {
    const KEY_SIZE: usize = AES192_KEY_SIZE;
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn name() -> &'static str {
        "AES-192"
    }
}

impl AesVariant for Aes192Algorithm {
    const ROUNDS: usize = 12;
}

/// Type-level constants for AES-256
pub enum Aes256Algorithm {}

impl CipherAlgorithm for Aes256Algorithm {
    const KEY_SIZE: usize = AES256_KEY_SIZE;
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn name() -> &'static str {
        "AES-256"
    }
}

impl AesVariant for Aes256Algorithm {
    const ROUNDS: usize = 14;
}

macro_rules! define_typed_aes {
    ($name:ident, $algorithm:ty, $key_size:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name {
            inner: Aes,
        }

        impl CipherAlgorithm for $name {
            const KEY_SIZE: usize = <$algorithm>::KEY_SIZE;
            const BLOCK_SIZE: usize = <$algorithm>::BLOCK_SIZE;

            fn name() -> &'static str {
                <$algorithm>::name()
            }
        }

        impl BlockCipher for $name {
            type Algorithm = $algorithm;
            type Key = KeyBytes<$key_size>;

            fn new(key: &Self::Key) -> Self {
                // The key type guarantees a valid length, so expansion
                // cannot fail.
                let inner = Aes::new(key.as_ref()).expect("AES key expansion should not fail");
                $name { inner }
            }

            fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
                self.inner.encrypt_block(block)
            }

            fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
                self.inner.decrypt_block(block)
            }

            fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key {
                KeyBytes::random(rng)
            }
        }
    };
}

define_typed_aes!(
    Aes128,
    Aes128Algorithm,
    16,
    "AES-128 block cipher with a type-enforced 16-byte key"
);
define_typed_aes!(
    Aes192,
    Aes192Algorithm,
    24,
    "AES-192 block cipher with a type-enforced 24-byte key"
);
define_typed_aes!(
    Aes256,
    Aes256Algorithm,
    32,
    "AES-256 block cipher with a type-enforced 32-byte key"
);
