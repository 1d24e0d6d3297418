//! Cryptographic operations for secp256k1 keypairs.
//!
//! This module provides:
//! - Scalar and point validation, signing and verification (`ecc`)
//! - The Wallet Import Format codec (`wif`)
//! - Keypair construction and export

pub mod ecc;
mod keypair;
pub mod wif;

pub use keypair::{Keypair, KeypairError, KeypairOptions, NetworkSelector};
pub use wif::{DecodedWif, WifError};
