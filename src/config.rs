//! Command-line configuration for the `ecpair` tool.

use clap::{Parser, Subcommand};

use crate::network::Network;

/// secp256k1 keypair and WIF tool
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate random keypairs
    Generate {
        /// Network name (bitcoin, testnet)
        #[arg(short = 'N', long, default_value = "bitcoin")]
        network: String,

        /// Use uncompressed public keys
        #[arg(short = 'u', long, default_value = "false")]
        uncompressed: bool,

        /// Number of keypairs to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Decode a WIF private key
    Inspect {
        /// The WIF string
        wif: String,

        /// Candidate network; repeat to try several (the last match wins)
        #[arg(short = 'N', long = "network")]
        networks: Vec<String>,
    },

    /// Derive the public key and WIF of a hex private key
    PublicKey {
        /// 32-byte private key (hex)
        private_key: String,

        /// Network name (bitcoin, testnet)
        #[arg(short = 'N', long, default_value = "bitcoin")]
        network: String,

        /// Use uncompressed public keys
        #[arg(short = 'u', long, default_value = "false")]
        uncompressed: bool,
    },

    /// Sign a 32-byte digest with a WIF private key
    Sign {
        /// The WIF string
        wif: String,

        /// 32-byte digest (hex)
        digest: String,

        /// Candidate network; repeat to try several (the last match wins)
        #[arg(short = 'N', long = "network")]
        networks: Vec<String>,
    },

    /// Verify a compact signature against a public key
    Verify {
        /// SEC1 public key (hex)
        public_key: String,

        /// 32-byte digest (hex)
        digest: String,

        /// 64-byte compact signature (hex)
        signature: String,
    },
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.command {
            Command::Generate { network, count, .. } => {
                resolve_network(network)?;
                if *count == 0 {
                    return Err(ConfigError::InvalidCount);
                }
            }
            Command::Inspect { networks, .. } => {
                resolve_networks(networks)?;
            }
            Command::PublicKey {
                private_key,
                network,
                ..
            } => {
                decode_hex("private key", private_key)?;
                resolve_network(network)?;
            }
            Command::Sign {
                digest, networks, ..
            } => {
                parse_digest(digest)?;
                resolve_networks(networks)?;
            }
            Command::Verify {
                public_key,
                digest,
                signature,
            } => {
                decode_hex("public key", public_key)?;
                parse_digest(digest)?;
                decode_hex("signature", signature)?;
            }
        }

        Ok(())
    }
}

/// Looks up a built-in network by name.
pub fn resolve_network(name: &str) -> Result<Network, ConfigError> {
    Network::by_name(name).ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
}

/// Looks up each named network, preserving order.
pub fn resolve_networks(names: &[String]) -> Result<Vec<Network>, ConfigError> {
    names.iter().map(|name| resolve_network(name)).collect()
}

/// Decodes a hex argument, tolerating a `0x` prefix.
pub fn decode_hex(what: &'static str, value: &str) -> Result<Vec<u8>, ConfigError> {
    let value = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(value).map_err(|e| ConfigError::InvalidHex(what, e.to_string()))
}

/// Decodes a 32-byte hex digest.
pub fn parse_digest(value: &str) -> Result<[u8; 32], ConfigError> {
    let bytes = decode_hex("digest", value)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ConfigError::InvalidDigestLength(len))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown network: {0} (expected bitcoin or testnet)")]
    UnknownNetwork(String),
    #[error("Invalid {0} hex: {1}")]
    InvalidHex(&'static str, String),
    #[error("Digest must be 32 bytes, got {0}")]
    InvalidDigestLength(usize),
    #[error("Count must be at least 1")]
    InvalidCount,
}
