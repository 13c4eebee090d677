//! Key containers for the cipher engines

use core::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-size key material, zeroized on drop
///
/// Wraps the raw bytes of an AES key so the typed ciphers can enforce the
/// key length at compile time instead of validating a bare slice. Equality
/// runs in constant time and `Debug` never prints the bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyBytes<const N: usize>([u8; N]);

impl<const N: usize> KeyBytes<N> {
    /// Wrap an existing byte array
    pub fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Draw fresh key material from the given RNG
    pub fn random<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; N];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for KeyBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsMut<[u8]> for KeyBytes<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> PartialEq for KeyBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.0[..].ct_eq(&other.0[..]))
    }
}

impl<const N: usize> Eq for KeyBytes<N> {}

impl<const N: usize> fmt::Debug for KeyBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyBytes<{}>(..)", N)
    }
}
