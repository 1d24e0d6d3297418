//! Network parameter records.
//!
//! A [`Network`] carries the version bytes a chain uses when serializing keys.
//! Only `wif` is consulted by the keypair itself; the remaining fields travel
//! with the record so callers can keep one table per chain.

use std::borrow::Cow;
use std::fmt;

/// BIP32 extended key version bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bip32Versions {
    /// Version prefix for extended public keys (`xpub`, `tpub`, ...)
    pub public: u32,
    /// Version prefix for extended private keys (`xprv`, `tprv`, ...)
    pub private: u32,
}

/// Version bytes and prefixes identifying a chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Network {
    /// Prefix prepended to signed messages
    pub message_prefix: Cow<'static, str>,
    /// Human-readable part of segwit addresses
    pub bech32: Cow<'static, str>,
    /// Extended key versions
    pub bip32: Bip32Versions,
    /// Version byte of P2PKH addresses
    pub pub_key_hash: u8,
    /// Version byte of P2SH addresses
    pub script_hash: u8,
    /// Version byte of WIF-encoded private keys
    pub wif: u8,
}

/// Bitcoin mainnet.
pub const BITCOIN: Network = Network {
    message_prefix: Cow::Borrowed("\x18Bitcoin Signed Message:\n"),
    bech32: Cow::Borrowed("bc"),
    bip32: Bip32Versions {
        public: 0x0488_b21e,
        private: 0x0488_ade4,
    },
    pub_key_hash: 0x00,
    script_hash: 0x05,
    wif: 0x80,
};

/// Bitcoin testnet.
pub const TESTNET: Network = Network {
    message_prefix: Cow::Borrowed("\x18Bitcoin Signed Message:\n"),
    bech32: Cow::Borrowed("tb"),
    bip32: Bip32Versions {
        public: 0x0435_87cf,
        private: 0x0435_8394,
    },
    pub_key_hash: 0x6f,
    script_hash: 0xc4,
    wif: 0xef,
};

/// Longest human-readable part allowed by BIP173.
const MAX_HRP_LEN: usize = 83;

impl Network {
    /// Returns the Bitcoin mainnet record.
    pub fn bitcoin() -> Self {
        BITCOIN
    }

    /// Returns the Bitcoin testnet record.
    pub fn testnet() -> Self {
        TESTNET
    }

    /// Looks up a built-in record by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bitcoin" | "mainnet" | "main" => Some(BITCOIN),
            "testnet" | "test" => Some(TESTNET),
            _ => None,
        }
    }

    /// Checks that the record is well formed.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.message_prefix.is_empty() {
            return Err(NetworkError::EmptyMessagePrefix);
        }

        let hrp = self.bech32.as_ref();
        if hrp.is_empty() || hrp.len() > MAX_HRP_LEN {
            return Err(NetworkError::InvalidBech32Prefix(hrp.to_string()));
        }
        // BIP173: printable US-ASCII, and we only accept the lowercase form
        if !hrp
            .bytes()
            .all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase())
        {
            return Err(NetworkError::InvalidBech32Prefix(hrp.to_string()));
        }

        if self.bip32.public == self.bip32.private {
            return Err(NetworkError::Bip32VersionClash(self.bip32.public));
        }

        Ok(())
    }
}

impl Default for Network {
    fn default() -> Self {
        BITCOIN
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = if *self == BITCOIN {
            "bitcoin"
        } else if *self == TESTNET {
            "testnet"
        } else {
            &self.bech32
        };
        write!(f, "{} (wif 0x{:02x})", name, self.wif)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("Network message prefix cannot be empty")]
    EmptyMessagePrefix,
    #[error("Invalid bech32 prefix: {0:?}")]
    InvalidBech32Prefix(String),
    #[error("BIP32 public and private versions are identical: 0x{0:08x}")]
    Bip32VersionClash(u32),
}
