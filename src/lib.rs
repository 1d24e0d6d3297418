//! # ecpair
//!
//! secp256k1 keypairs bound to a network, with WIF import and export.
//!
//! ## Architecture
//!
//! - `crypto`: Curve primitives, WIF codec and the `Keypair` type
//! - `network`: Version bytes per chain
//! - `config`: Command-line configuration for the `ecpair` binary

pub mod config;
pub mod crypto;
pub mod network;

pub use config::Config;
pub use crypto::{Keypair, KeypairError, KeypairOptions, NetworkSelector, WifError};
pub use network::{Network, NetworkError};
