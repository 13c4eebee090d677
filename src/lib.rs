//! AES block cipher core (FIPS 197)
//!
//! This crate provides the AES primitive itself: key expansion for 128-,
//! 192-, and 256-bit keys, single-block encryption, and single-block
//! decryption. It is designed to be embedded by higher-level constructs
//! (CTR, CBC, GCM, ...) that live outside this crate, and is usable in
//! both `std` and `no_std` environments.
//!
//! Two backends sit behind one engine type: a portable T-table
//! implementation and an AES-NI implementation selected at key setup when
//! the CPU supports it. Both produce identical output for every input.
//!
//! # Security notes
//!
//! - All key material and round-key schedules are zeroized on drop.
//! - The software path uses data-dependent table lookups and is not
//!   constant-time with respect to cache behavior; see the
//!   [`block::aes`] module documentation.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{Error, Result};

// Core type system
pub mod types;
pub use types::KeyBytes;

// Block cipher implementations
pub mod block;
pub use block::{
    cpu_supports_aes, Aes, Aes128, Aes192, Aes256, AesVariant, BlockCipher, CipherAlgorithm,
    AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE,
};
