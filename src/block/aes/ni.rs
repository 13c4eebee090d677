//! Hardware AES engine backed by the AES-NI instruction set
//!
//! Round-key material is identical to the software engine's: the portable
//! key schedule runs first and its words are serialized per round, so both
//! backends are byte-for-byte interchangeable. Decryption uses the
//! equivalent inverse cipher, with the middle round keys pre-transformed by
//! `aesimc` at key setup.
//!
//! Every function that touches an AES intrinsic is gated behind
//! `#[target_feature(enable = "aes")]` and is only reached through the
//! dispatcher after `cpu_supports_aes()` returned true.

use core::arch::x86_64::{
    __m128i, _mm_aesdec_si128, _mm_aesdeclast_si128, _mm_aesenc_si128, _mm_aesenclast_si128,
    _mm_aesimc_si128, _mm_loadu_si128, _mm_storeu_si128, _mm_xor_si128,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::soft;
use super::AES_BLOCK_SIZE;
use crate::error::{Error, Result};

/// Round keys for the largest variant, AES-256: Nr + 1 = 15.
const MAX_ROUND_KEYS: usize = 15;

/// Hardware AES engine holding per-round encryption and decryption keys
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct NiAes {
    ek: [[u8; 16]; MAX_ROUND_KEYS],
    dk: [[u8; 16]; MAX_ROUND_KEYS],
    rounds: usize,
}

impl NiAes {
    /// Expand the key and pre-transform the decryption round keys.
    ///
    /// Callers must have confirmed AES-NI support via `cpu_supports_aes`.
    pub(crate) fn new(key: &[u8]) -> Result<Self> {
        let mut ek_words = [0u32; soft::MAX_SCHEDULE_WORDS];
        let rounds = soft::expand_forward(key, &mut ek_words)?;

        let mut ek = [[0u8; 16]; MAX_ROUND_KEYS];
        for r in 0..=rounds {
            for c in 0..4 {
                ek[r][c * 4..c * 4 + 4].copy_from_slice(&ek_words[4 * r + c].to_be_bytes());
            }
        }
        ek_words.zeroize();

        // Equivalent inverse cipher: InvMixColumns every middle round key,
        // keep rounds 0 and Nr as-is.
        let mut dk = ek;
        for rk in dk.iter_mut().take(rounds).skip(1) {
            // SAFETY: the dispatcher only constructs this engine after a
            // positive AES-NI check.
            *rk = unsafe { inv_mix_round_key(rk) };
        }

        Ok(NiAes { ek, dk, rounds })
    }

    /// Encrypt a single 16-byte block in place
    pub(crate) fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        Error::check_length("AES block", block.len(), AES_BLOCK_SIZE)?;
        // SAFETY: AES-NI availability was checked at construction.
        unsafe { self.encrypt_inner(block) };
        Ok(())
    }

    /// Decrypt a single 16-byte block in place
    pub(crate) fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        Error::check_length("AES block", block.len(), AES_BLOCK_SIZE)?;
        // SAFETY: AES-NI availability was checked at construction.
        unsafe { self.decrypt_inner(block) };
        Ok(())
    }

    #[target_feature(enable = "aes")]
    unsafe fn encrypt_inner(&self, block: &mut [u8]) {
        let mut state = _mm_loadu_si128(block.as_ptr() as *const __m128i);

        state = _mm_xor_si128(state, load_round_key(&self.ek[0]));
        for r in 1..self.rounds {
            state = _mm_aesenc_si128(state, load_round_key(&self.ek[r]));
        }
        state = _mm_aesenclast_si128(state, load_round_key(&self.ek[self.rounds]));

        _mm_storeu_si128(block.as_mut_ptr() as *mut __m128i, state);
    }

    #[target_feature(enable = "aes")]
    unsafe fn decrypt_inner(&self, block: &mut [u8]) {
        let mut state = _mm_loadu_si128(block.as_ptr() as *const __m128i);

        state = _mm_xor_si128(state, load_round_key(&self.dk[self.rounds]));
        for r in (1..self.rounds).rev() {
            state = _mm_aesdec_si128(state, load_round_key(&self.dk[r]));
        }
        state = _mm_aesdeclast_si128(state, load_round_key(&self.dk[0]));

        _mm_storeu_si128(block.as_mut_ptr() as *mut __m128i, state);
    }

    /// Round count Nr for the keyed variant
    pub(crate) fn rounds(&self) -> usize {
        self.rounds
    }

    /// Key length in bytes for the keyed variant
    pub(crate) fn key_len(&self) -> usize {
        match self.rounds {
            10 => 16,
            12 => 24,
            _ => 32,
        }
    }
}

/// Load one stored round key into a vector register
#[inline(always)]
unsafe fn load_round_key(round_key: &[u8; 16]) -> __m128i {
    _mm_loadu_si128(round_key.as_ptr() as *const __m128i)
}

/// Apply InvMixColumns to a round key via `aesimc`
#[target_feature(enable = "aes")]
unsafe fn inv_mix_round_key(round_key: &[u8; 16]) -> [u8; 16] {
    let transformed = _mm_aesimc_si128(load_round_key(round_key));
    let mut out = [0u8; 16];
    _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, transformed);
    out
}
