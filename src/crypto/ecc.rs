//! secp256k1 primitives used by [`Keypair`](super::Keypair).
//!
//! Thin wrappers over libsecp256k1 that only speak byte slices, so the keypair
//! never handles curve types beyond [`SecretKey`].

use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

/// Length of a compressed SEC1 point.
pub const COMPRESSED_POINT_LEN: usize = 33;
/// Length of an uncompressed SEC1 point.
pub const UNCOMPRESSED_POINT_LEN: usize = 65;
/// Length of a compact `r || s` signature.
pub const SIGNATURE_LEN: usize = 64;

/// Returns true if `bytes` is a scalar in `[1, n)`.
pub fn is_private(bytes: &[u8]) -> bool {
    bytes.len() == 32 && SecretKey::from_slice(bytes).is_ok()
}

/// Returns true if `bytes` is a SEC1-encoded point on the curve.
///
/// Hybrid encodings (`0x06`/`0x07`) are rejected even though libsecp256k1
/// would parse them.
pub fn is_point(bytes: &[u8]) -> bool {
    parse_point(bytes).is_ok()
}

/// Re-encodes a point in the requested form.
pub fn point_compress(bytes: &[u8], compressed: bool) -> Result<Vec<u8>, EccError> {
    let point = parse_point(bytes)?;
    Ok(serialize_point(&point, compressed))
}

/// Derives `d·G` in the requested form.
pub fn point_from_scalar(secret_key: &SecretKey, compressed: bool) -> Vec<u8> {
    let secp = Secp256k1::signing_only();
    let point = PublicKey::from_secret_key(&secp, secret_key);
    serialize_point(&point, compressed)
}

/// Signs a 32-byte digest, returning a low-S compact signature.
///
/// Nonces are derived with RFC6979, so signing is deterministic.
pub fn sign(digest: &[u8; 32], secret_key: &SecretKey) -> [u8; SIGNATURE_LEN] {
    let secp = Secp256k1::signing_only();
    let message = Message::from_digest(*digest);
    secp.sign_ecdsa(&message, secret_key).serialize_compact()
}

/// Verifies a compact signature over a 32-byte digest.
///
/// A well-formed signature that does not match yields `Ok(false)`.
pub fn verify(digest: &[u8; 32], point: &[u8], signature: &[u8]) -> Result<bool, EccError> {
    let point = parse_point(point)?;
    if signature.len() != SIGNATURE_LEN {
        return Err(EccError::InvalidSignature);
    }
    // r and s must be in [1, n); from_compact only rejects values >= n
    let (r, s) = signature.split_at(SIGNATURE_LEN / 2);
    if r.iter().all(|&b| b == 0) || s.iter().all(|&b| b == 0) {
        return Err(EccError::InvalidSignature);
    }
    let mut signature =
        Signature::from_compact(signature).map_err(|_| EccError::InvalidSignature)?;
    // libsecp256k1 only accepts the lower-S form
    signature.normalize_s();

    let secp = Secp256k1::verification_only();
    let message = Message::from_digest(*digest);
    Ok(secp.verify_ecdsa(&message, &signature, &point).is_ok())
}

fn parse_point(bytes: &[u8]) -> Result<PublicKey, EccError> {
    let well_shaped = match (bytes.len(), bytes.first()) {
        (COMPRESSED_POINT_LEN, Some(0x02 | 0x03)) => true,
        (UNCOMPRESSED_POINT_LEN, Some(0x04)) => true,
        _ => false,
    };
    if !well_shaped {
        return Err(EccError::InvalidPoint);
    }
    PublicKey::from_slice(bytes).map_err(|_| EccError::InvalidPoint)
}

fn serialize_point(point: &PublicKey, compressed: bool) -> Vec<u8> {
    if compressed {
        point.serialize().to_vec()
    } else {
        point.serialize_uncompressed().to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EccError {
    #[error("Expected a valid secp256k1 point")]
    InvalidPoint,
    #[error("Expected a 64-byte compact signature")]
    InvalidSignature,
}
