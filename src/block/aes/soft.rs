//! Software AES engine using the T-table algorithm
//!
//! The state is held as four big-endian 32-bit column words. Middle rounds
//! fold SubBytes, ShiftRows, and MixColumns into four table lookups per
//! output column; the final round substitutes through the plain S-boxes.
//! Decryption runs the equivalent inverse cipher (FIPS 197 §5.3.5): the
//! middle-round keys of the inverse schedule are pre-transformed with
//! InvMixColumns so the `DEC` tables can be used throughout.
//!
//! Table lookups are data-dependent, so this path is not constant-time
//! with respect to cache behavior. Callers that need resistance to cache
//! timing attacks should rely on the hardware engine.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::tables::{
    DEC0, DEC1, DEC2, DEC3, ENC0, ENC1, ENC2, ENC3, INV_SBOX, RCON, SBOX,
};
use super::AES_BLOCK_SIZE;
use crate::error::{Error, Result};

/// Round-key words for the largest variant, AES-256: (14 + 1) * 4.
pub(crate) const MAX_SCHEDULE_WORDS: usize = 60;

/// Map a key length in bytes to (Nk, Nr)
pub(crate) fn key_params(len: usize) -> Result<(usize, usize)> {
    match len {
        16 => Ok((4, 10)),
        24 => Ok((6, 12)),
        32 => Ok((8, 14)),
        _ => Err(Error::param(
            "AES key",
            "length must be 16, 24, or 32 bytes",
        )),
    }
}

/// Read column `column` of a buffer as a big-endian 32-bit word
#[inline(always)]
fn load_word(buffer: &[u8], column: usize) -> u32 {
    let i = column * 4;
    ((buffer[i] as u32) << 24)
        | ((buffer[i + 1] as u32) << 16)
        | ((buffer[i + 2] as u32) << 8)
        | (buffer[i + 3] as u32)
}

/// Write `word` into column `column` of a buffer, most significant byte first
#[inline(always)]
fn store_word(word: u32, column: usize, out: &mut [u8]) {
    let i = column * 4;
    out[i] = (word >> 24) as u8;
    out[i + 1] = (word >> 16) as u8;
    out[i + 2] = (word >> 8) as u8;
    out[i + 3] = word as u8;
}

/// Rotate a word left by 8 bits (one byte)
#[inline(always)]
fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

/// Substitute each byte of a word through the forward S-box
#[inline(always)]
fn sub_word(word: u32) -> u32 {
    ((SBOX[(word >> 24) as usize] as u32) << 24)
        | ((SBOX[(word >> 16) as usize & 0xff] as u32) << 16)
        | ((SBOX[(word >> 8) as usize & 0xff] as u32) << 8)
        | (SBOX[word as usize & 0xff] as u32)
}

/// AddRoundKey is a plain XOR; named to keep the round functions legible
/// against the FIPS 197 pseudocode
#[inline(always)]
fn add_round_key(state: u32, round_key: u32) -> u32 {
    state ^ round_key
}

/// SubBytes + ShiftRows + MixColumns for output column `column`, as four
/// T-table lookups. The column offsets realize the row shifts.
#[inline(always)]
fn mix_col_shift_row(column: usize, state: &[u32; 4]) -> u32 {
    ENC0[(state[column] >> 24) as usize]
        ^ ENC1[(state[(column + 1) & 3] >> 16) as usize & 0xff]
        ^ ENC2[(state[(column + 2) & 3] >> 8) as usize & 0xff]
        ^ ENC3[state[(column + 3) & 3] as usize & 0xff]
}

/// InvSubBytes + InvShiftRows + InvMixColumns for output column `column`.
/// The reversed column offsets realize the inverse row shifts.
#[inline(always)]
fn inv_mix_col_shift_row(column: usize, state: &[u32; 4]) -> u32 {
    DEC0[(state[column] >> 24) as usize]
        ^ DEC1[(state[(column + 3) & 3] >> 16) as usize & 0xff]
        ^ DEC2[(state[(column + 2) & 3] >> 8) as usize & 0xff]
        ^ DEC3[state[(column + 1) & 3] as usize & 0xff]
}

/// SubBytes + ShiftRows for output column `column` (final encryption round,
/// no MixColumns)
#[inline(always)]
fn sub_bytes_shift_rows(column: usize, state: &[u32; 4]) -> u32 {
    ((SBOX[(state[column] >> 24) as usize] as u32) << 24)
        | ((SBOX[(state[(column + 1) & 3] >> 16) as usize & 0xff] as u32) << 16)
        | ((SBOX[(state[(column + 2) & 3] >> 8) as usize & 0xff] as u32) << 8)
        | (SBOX[state[(column + 3) & 3] as usize & 0xff] as u32)
}

/// InvSubBytes + InvShiftRows for output column `column` (final decryption
/// round)
#[inline(always)]
fn inv_sub_bytes_shift_rows(column: usize, state: &[u32; 4]) -> u32 {
    ((INV_SBOX[(state[column] >> 24) as usize] as u32) << 24)
        | ((INV_SBOX[(state[(column + 3) & 3] >> 16) as usize & 0xff] as u32) << 16)
        | ((INV_SBOX[(state[(column + 2) & 3] >> 8) as usize & 0xff] as u32) << 8)
        | (INV_SBOX[state[(column + 1) & 3] as usize & 0xff] as u32)
}

/// InvMixColumns on a word that has NOT been through InvSubBytes.
///
/// The `DEC` tables bake in the inverse S-box, so indexing them through the
/// forward S-box cancels the substitution and leaves pure InvMixColumns.
/// Used to derive the middle round keys of the inverse schedule.
#[inline(always)]
pub(crate) fn fast_inv_mix_column(word: u32) -> u32 {
    DEC0[SBOX[(word >> 24) as usize] as usize]
        ^ DEC1[SBOX[(word >> 16) as usize & 0xff] as usize]
        ^ DEC2[SBOX[(word >> 8) as usize & 0xff] as usize]
        ^ DEC3[SBOX[word as usize & 0xff] as usize]
}

/// Expand a 16/24/32-byte key into the forward round-key schedule
/// (FIPS 197 Figure 11). Returns the round count Nr.
pub(crate) fn expand_forward(key: &[u8], ek: &mut [u32; MAX_SCHEDULE_WORDS]) -> Result<usize> {
    let (nk, nr) = key_params(key.len())?;
    let total_words = 4 * (nr + 1);

    for i in 0..nk {
        ek[i] = load_word(key, i);
    }

    for i in nk..total_words {
        let mut temp = ek[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ RCON[i / nk];
        } else if nk == 8 && i % nk == 4 {
            temp = sub_word(temp);
        }
        ek[i] = ek[i - nk] ^ temp;
    }

    Ok(nr)
}

/// Derive the inverse schedule for the equivalent inverse cipher: middle
/// round keys get InvMixColumns applied word-wise, rounds 0 and Nr are
/// carried over unchanged (FIPS 197 Figure 15).
pub(crate) fn expand_inverse(
    ek: &[u32; MAX_SCHEDULE_WORDS],
    rounds: usize,
    dk: &mut [u32; MAX_SCHEDULE_WORDS],
) {
    let total_words = 4 * (rounds + 1);
    dk[..total_words].copy_from_slice(&ek[..total_words]);

    for i in 4..4 * rounds {
        dk[i] = fast_inv_mix_column(ek[i]);
    }
}

/// Software AES engine holding the expanded forward and inverse schedules
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct SoftAes {
    ek: [u32; MAX_SCHEDULE_WORDS],
    dk: [u32; MAX_SCHEDULE_WORDS],
    rounds: usize,
}

impl SoftAes {
    /// Expand the key into both schedules
    pub(crate) fn new(key: &[u8]) -> Result<Self> {
        let mut ek = [0u32; MAX_SCHEDULE_WORDS];
        let rounds = expand_forward(key, &mut ek)?;

        let mut dk = [0u32; MAX_SCHEDULE_WORDS];
        expand_inverse(&ek, rounds, &mut dk);

        Ok(SoftAes { ek, dk, rounds })
    }

    /// Encrypt a single 16-byte block in place
    pub(crate) fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        Error::check_length("AES block", block.len(), AES_BLOCK_SIZE)?;

        let mut s = [0u32; 4];
        for c in 0..4 {
            s[c] = add_round_key(load_word(block, c), self.ek[c]);
        }

        for r in 1..self.rounds {
            let rk = &self.ek[4 * r..4 * r + 4];
            s = [
                mix_col_shift_row(0, &s) ^ rk[0],
                mix_col_shift_row(1, &s) ^ rk[1],
                mix_col_shift_row(2, &s) ^ rk[2],
                mix_col_shift_row(3, &s) ^ rk[3],
            ];
        }

        // Final round uses the S-box directly
        let rk = &self.ek[4 * self.rounds..4 * self.rounds + 4];
        s = [
            sub_bytes_shift_rows(0, &s) ^ rk[0],
            sub_bytes_shift_rows(1, &s) ^ rk[1],
            sub_bytes_shift_rows(2, &s) ^ rk[2],
            sub_bytes_shift_rows(3, &s) ^ rk[3],
        ];

        for c in 0..4 {
            store_word(s[c], c, block);
        }
        Ok(())
    }

    /// Decrypt a single 16-byte block in place
    pub(crate) fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        Error::check_length("AES block", block.len(), AES_BLOCK_SIZE)?;

        // Round 0 uses the last forward round key, untouched in the
        // inverse schedule.
        let mut s = [0u32; 4];
        let rk = &self.dk[4 * self.rounds..4 * self.rounds + 4];
        for c in 0..4 {
            s[c] = add_round_key(load_word(block, c), rk[c]);
        }

        for r in (1..self.rounds).rev() {
            let rk = &self.dk[4 * r..4 * r + 4];
            s = [
                inv_mix_col_shift_row(0, &s) ^ rk[0],
                inv_mix_col_shift_row(1, &s) ^ rk[1],
                inv_mix_col_shift_row(2, &s) ^ rk[2],
                inv_mix_col_shift_row(3, &s) ^ rk[3],
            ];
        }

        // Final round uses the inverse S-box directly
        let rk = &self.dk[..4];
        s = [
            inv_sub_bytes_shift_rows(0, &s) ^ rk[0],
            inv_sub_bytes_shift_rows(1, &s) ^ rk[1],
            inv_sub_bytes_shift_rows(2, &s) ^ rk[2],
            inv_sub_bytes_shift_rows(3, &s) ^ rk[3],
        ];

        for c in 0..4 {
            store_word(s[c], c, block);
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_expansion_fips197_appendix_a1() {
        // Key expansion walkthrough for the AES-128 cipher key
        // 2b7e151628aed2a6abf7158809cf4f3c.
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let mut ek = [0u32; MAX_SCHEDULE_WORDS];
        let rounds = expand_forward(&key, &mut ek).unwrap();
        assert_eq!(rounds, 10);
        assert_eq!(ek[0], 0x2b7e1516);
        assert_eq!(ek[4], 0xa0fafe17);
        assert_eq!(ek[10], 0x5935807a);
        assert_eq!(ek[43], 0xb6630ca6);
    }

    #[test]
    fn key_expansion_fips197_appendix_a3() {
        // AES-256 schedule exercises the extra SubWord at i mod 8 == 4.
        let key = [
            0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d,
            0x77, 0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3,
            0x09, 0x14, 0xdf, 0xf4,
        ];
        let mut ek = [0u32; MAX_SCHEDULE_WORDS];
        let rounds = expand_forward(&key, &mut ek).unwrap();
        assert_eq!(rounds, 14);
        assert_eq!(ek[8], 0x9ba35411);
        assert_eq!(ek[12], 0xa8b09c1a);
        assert_eq!(ek[59], 0x706c631e);
    }

    #[test]
    fn inverse_schedule_copies_first_and_last_rounds() {
        let key = [0x42u8; 16];
        let mut ek = [0u32; MAX_SCHEDULE_WORDS];
        let rounds = expand_forward(&key, &mut ek).unwrap();
        let mut dk = [0u32; MAX_SCHEDULE_WORDS];
        expand_inverse(&ek, rounds, &mut dk);

        assert_eq!(&dk[..4], &ek[..4]);
        assert_eq!(&dk[4 * rounds..4 * rounds + 4], &ek[4 * rounds..4 * rounds + 4]);
        // Middle rounds must differ (InvMixColumns is not the identity).
        assert_ne!(&dk[4..8], &ek[4..8]);
    }

    #[test]
    fn fast_inv_mix_column_inverts_mix_columns() {
        // MixColumns without SubBytes, via the ENC tables pre-indexed
        // through the inverse S-box (the dual of fast_inv_mix_column).
        fn mix_column(word: u32) -> u32 {
            ENC0[INV_SBOX[(word >> 24) as usize] as usize]
                ^ ENC1[INV_SBOX[(word >> 16) as usize & 0xff] as usize]
                ^ ENC2[INV_SBOX[(word >> 8) as usize & 0xff] as usize]
                ^ ENC3[INV_SBOX[word as usize & 0xff] as usize]
        }

        let mut word = 0x0123_4567u32;
        for _ in 0..1000 {
            assert_eq!(fast_inv_mix_column(mix_column(word)), word);
            word = word.wrapping_mul(0x9e37_79b9).wrapping_add(1);
        }
    }

    #[test]
    fn invalid_key_lengths_are_rejected() {
        for len in [0usize, 1, 15, 17, 23, 25, 31, 33, 64] {
            let key = vec![0u8; len];
            let mut ek = [0u32; MAX_SCHEDULE_WORDS];
            assert!(expand_forward(&key, &mut ek).is_err(), "len {}", len);
        }
    }
}
