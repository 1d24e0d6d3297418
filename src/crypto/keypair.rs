//! secp256k1 keypair with network-tagged WIF import and export.

use std::fmt;
use std::sync::OnceLock;

use rand::RngCore;
use secp256k1::SecretKey;
use tracing::{debug, trace};

use super::ecc::{self, EccError};
use super::wif::{self, WifError};
use crate::network::{Network, NetworkError};

/// Construction options shared by every factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypairOptions {
    /// Whether the public point is produced in compressed (33-byte) form
    pub compressed: bool,
    /// Network whose WIF version byte is used on export
    pub network: Network,
}

impl Default for KeypairOptions {
    fn default() -> Self {
        Self {
            compressed: true,
            network: Network::bitcoin(),
        }
    }
}

impl KeypairOptions {
    /// Sets the compression flag.
    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Sets the network.
    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<(), KeypairError> {
        self.network.validate()?;
        Ok(())
    }
}

/// How [`Keypair::from_wif`] resolves the network of a decoded WIF.
#[derive(Debug, Clone, Copy, Default)]
pub enum NetworkSelector<'a> {
    /// Bitcoin mainnet; a different version byte is rejected
    #[default]
    Default,
    /// Exactly this network; a different version byte is rejected
    Single(&'a Network),
    /// The last candidate whose version byte matches
    Candidates(&'a [Network]),
}

impl<'a> From<&'a Network> for NetworkSelector<'a> {
    fn from(network: &'a Network) -> Self {
        NetworkSelector::Single(network)
    }
}

impl<'a> From<Option<&'a Network>> for NetworkSelector<'a> {
    fn from(network: Option<&'a Network>) -> Self {
        network.map_or(NetworkSelector::Default, NetworkSelector::Single)
    }
}

impl<'a> From<&'a [Network]> for NetworkSelector<'a> {
    fn from(candidates: &'a [Network]) -> Self {
        NetworkSelector::Candidates(candidates)
    }
}

impl<'a, const N: usize> From<&'a [Network; N]> for NetworkSelector<'a> {
    fn from(candidates: &'a [Network; N]) -> Self {
        NetworkSelector::Candidates(candidates)
    }
}

impl<'a> From<&'a Vec<Network>> for NetworkSelector<'a> {
    fn from(candidates: &'a Vec<Network>) -> Self {
        NetworkSelector::Candidates(candidates)
    }
}

impl NetworkSelector<'_> {
    /// Picks the network a WIF with `version` belongs to.
    fn resolve(self, version: u8) -> Result<Network, KeypairError> {
        match self {
            NetworkSelector::Candidates(candidates) => candidates
                .iter()
                .rev()
                .find(|network| network.wif == version)
                .cloned()
                .ok_or(KeypairError::UnknownNetworkVersion(version)),
            NetworkSelector::Default => {
                NetworkSelector::Single(&Network::bitcoin()).resolve(version)
            }
            NetworkSelector::Single(network) => {
                if network.wif == version {
                    Ok(network.clone())
                } else {
                    Err(KeypairError::InvalidNetworkVersion {
                        expected: network.wif,
                        actual: version,
                    })
                }
            }
        }
    }
}

/// What a keypair was built from.
#[derive(Clone)]
enum KeyMaterial {
    /// A private scalar; the point is derived on first use
    Private {
        secret_key: SecretKey,
        public_key: OnceLock<Vec<u8>>,
    },
    /// A public point only
    Public { public_key: Vec<u8> },
}

/// A secp256k1 keypair bound to a network.
///
/// Immutable once built, apart from the public point which is derived from
/// the private scalar at most once.
#[derive(Clone)]
pub struct Keypair {
    key: KeyMaterial,
    compressed: bool,
    network: Network,
}

impl Keypair {
    /// Builds a keypair from a 32-byte private scalar in `[1, n)`.
    pub fn from_private_key(bytes: &[u8], options: KeypairOptions) -> Result<Self, KeypairError> {
        if bytes.len() != 32 {
            return Err(KeypairError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let secret_key =
            SecretKey::from_slice(bytes).map_err(|_| KeypairError::PrivateKeyOutOfRange)?;
        options.validate()?;

        debug!(
            network = %options.network,
            compressed = options.compressed,
            "keypair from private key"
        );

        Ok(Self {
            key: KeyMaterial::Private {
                secret_key,
                public_key: OnceLock::new(),
            },
            compressed: options.compressed,
            network: options.network,
        })
    }

    /// Builds a watch-only keypair from a SEC1 point.
    ///
    /// Either encoding is accepted; the point is stored in the form chosen by
    /// `options.compressed`.
    pub fn from_public_key(bytes: &[u8], options: KeypairOptions) -> Result<Self, KeypairError> {
        if !ecc::is_point(bytes) {
            return Err(KeypairError::InvalidPoint);
        }
        options.validate()?;

        let public_key = ecc::point_compress(bytes, options.compressed)?;
        debug!(
            network = %options.network,
            compressed = options.compressed,
            "keypair from public key"
        );

        Ok(Self {
            key: KeyMaterial::Public { public_key },
            compressed: options.compressed,
            network: options.network,
        })
    }

    /// Imports a WIF-encoded private key.
    ///
    /// With [`NetworkSelector::Candidates`] the *last* matching candidate wins.
    pub fn from_wif<'a>(
        wif: &str,
        networks: impl Into<NetworkSelector<'a>>,
    ) -> Result<Self, KeypairError> {
        let decoded = wif::decode(wif)?;
        let network = networks.into().resolve(decoded.version)?;
        trace!(version = decoded.version, network = %network, "resolved WIF network");

        Self::from_private_key(
            &decoded.private_key,
            KeypairOptions {
                compressed: decoded.compressed,
                network,
            },
        )
    }

    /// Generates a new random keypair from the thread-local CSPRNG.
    pub fn make_random(options: KeypairOptions) -> Result<Self, KeypairError> {
        Self::make_random_with_rng(&mut rand::thread_rng(), options)
    }

    /// Generates a new random keypair from the given source.
    ///
    /// Draws 32 bytes at a time until they form a scalar in `[1, n)`.
    pub fn make_random_with_rng<R: RngCore + ?Sized>(
        rng: &mut R,
        options: KeypairOptions,
    ) -> Result<Self, KeypairError> {
        options.validate()?;

        let mut candidate = [0u8; 32];
        let mut attempts: u64 = 0;
        loop {
            rng.try_fill_bytes(&mut candidate)?;
            attempts += 1;
            if ecc::is_private(&candidate) {
                break;
            }
            trace!(attempts, "random bytes are not a valid scalar, drawing again");
        }
        debug!(attempts, "drew random private key");

        Self::from_private_key(&candidate, options)
    }

    /// Returns the network this keypair belongs to.
    #[inline]
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Returns whether the public point is in compressed form.
    #[inline]
    pub fn compressed(&self) -> bool {
        self.compressed
    }

    /// Returns the private scalar, if this keypair has one.
    pub fn private_key(&self) -> Option<[u8; 32]> {
        match &self.key {
            KeyMaterial::Private { secret_key, .. } => Some(secret_key.secret_bytes()),
            KeyMaterial::Public { .. } => None,
        }
    }

    /// Returns the public point, deriving and caching it on first use.
    pub fn public_key(&self) -> &[u8] {
        match &self.key {
            KeyMaterial::Private {
                secret_key,
                public_key,
            } => public_key.get_or_init(|| ecc::point_from_scalar(secret_key, self.compressed)),
            KeyMaterial::Public { public_key } => public_key,
        }
    }

    /// Returns the private key as a hex string, if present.
    pub fn private_key_hex(&self) -> Option<String> {
        self.private_key().map(hex::encode)
    }

    /// Returns the public point as a hex string.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key())
    }

    /// Exports the private key as WIF under this keypair's network.
    pub fn to_wif(&self) -> Result<String, KeypairError> {
        let secret_key = self.secret_key()?;
        Ok(wif::encode(
            self.network.wif,
            &secret_key.secret_bytes(),
            self.compressed,
        ))
    }

    /// Signs a 32-byte digest. The caller is responsible for hashing.
    pub fn sign(&self, digest: &[u8; 32]) -> Result<[u8; ecc::SIGNATURE_LEN], KeypairError> {
        let secret_key = self.secret_key()?;
        Ok(ecc::sign(digest, secret_key))
    }

    /// Verifies a compact signature over a 32-byte digest.
    ///
    /// A signature that does not match yields `Ok(false)`; only malformed
    /// signatures are errors.
    pub fn verify(&self, digest: &[u8; 32], signature: &[u8]) -> Result<bool, KeypairError> {
        Ok(ecc::verify(digest, self.public_key(), signature)?)
    }

    fn secret_key(&self) -> Result<&SecretKey, KeypairError> {
        match &self.key {
            KeyMaterial::Private { secret_key, .. } => Ok(secret_key),
            KeyMaterial::Public { .. } => Err(KeypairError::MissingPrivateKey),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let private_key = match self.key {
            KeyMaterial::Private { .. } => "<redacted>",
            KeyMaterial::Public { .. } => "None",
        };
        f.debug_struct("Keypair")
            .field("private_key", &private_key)
            .field("public_key", &self.public_key_hex())
            .field("compressed", &self.compressed)
            .field("network", &self.network)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeypairError {
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] NetworkError),
    #[error("Private key not in range [1, n)")]
    PrivateKeyOutOfRange,
    #[error("Expected a valid secp256k1 point")]
    InvalidPoint,
    #[error("Expected a 64-byte compact signature")]
    InvalidSignature,
    #[error("Missing private key")]
    MissingPrivateKey,
    #[error("Unknown network version 0x{0:02x}")]
    UnknownNetworkVersion(u8),
    #[error("Invalid network version: expected 0x{expected:02x}, got 0x{actual:02x}")]
    InvalidNetworkVersion { expected: u8, actual: u8 },
    #[error(transparent)]
    Wif(#[from] WifError),
    #[error("Random source failed: {0}")]
    RandomSource(#[from] rand::Error),
}

impl From<EccError> for KeypairError {
    fn from(err: EccError) -> Self {
        match err {
            EccError::InvalidPoint => KeypairError::InvalidPoint,
            EccError::InvalidSignature => KeypairError::InvalidSignature,
        }
    }
}
