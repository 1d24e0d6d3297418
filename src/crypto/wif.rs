//! Wallet Import Format codec.
//!
//! Layout (before Base58Check):
//! - `version || key` (33 bytes) for keys paired with an uncompressed point
//! - `version || key || 0x01` (34 bytes) for keys paired with a compressed point

/// Payload length of an uncompressed WIF.
const UNCOMPRESSED_LEN: usize = 33;
/// Payload length of a compressed WIF.
const COMPRESSED_LEN: usize = 34;
/// Trailing marker byte of a compressed WIF.
const COMPRESSED_FLAG: u8 = 0x01;

/// The fields carried by a WIF string.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedWif {
    /// Network version byte
    pub version: u8,
    /// The 32-byte private scalar (not range checked)
    pub private_key: [u8; 32],
    /// Whether the key is paired with a compressed public point
    pub compressed: bool,
}

impl std::fmt::Debug for DecodedWif {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedWif")
            .field("version", &self.version)
            .field("private_key", &"<redacted>")
            .field("compressed", &self.compressed)
            .finish()
    }
}

/// Encodes a private scalar as WIF.
pub fn encode(version: u8, private_key: &[u8; 32], compressed: bool) -> String {
    let mut payload = [0u8; COMPRESSED_LEN];
    payload[0] = version;
    payload[1..UNCOMPRESSED_LEN].copy_from_slice(private_key);

    let len = if compressed {
        payload[UNCOMPRESSED_LEN] = COMPRESSED_FLAG;
        COMPRESSED_LEN
    } else {
        UNCOMPRESSED_LEN
    };

    bs58::encode(&payload[..len]).with_check().into_string()
}

/// Decodes a WIF string, verifying its checksum and layout.
pub fn decode(wif: &str) -> Result<DecodedWif, WifError> {
    let payload = bs58::decode(wif).with_check(None).into_vec()?;

    let compressed = match payload.len() {
        UNCOMPRESSED_LEN => false,
        COMPRESSED_LEN => match payload[UNCOMPRESSED_LEN] {
            COMPRESSED_FLAG => true,
            flag => return Err(WifError::InvalidCompressionFlag(flag)),
        },
        len => return Err(WifError::InvalidLength(len)),
    };

    let mut private_key = [0u8; 32];
    private_key.copy_from_slice(&payload[1..UNCOMPRESSED_LEN]);

    Ok(DecodedWif {
        version: payload[0],
        private_key,
        compressed,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum WifError {
    #[error("Malformed WIF: {0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("Malformed WIF: invalid payload length {0}")]
    InvalidLength(usize),
    #[error("Malformed WIF: invalid compression flag 0x{0:02x}")]
    InvalidCompressionFlag(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: [u8; 32] = {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    };

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            encode(0x80, &ONE, true),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
        assert_eq!(
            encode(0x80, &ONE, false),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );

        let decoded = decode("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
        assert_eq!(decoded.version, 0x80);
        assert_eq!(decoded.private_key, ONE);
        assert!(decoded.compressed);

        let decoded = decode("5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf").unwrap();
        assert!(!decoded.compressed);
    }

    #[test]
    fn test_testnet_version() {
        let wif = encode(0xef, &ONE, true);
        assert!(wif.starts_with('c'));
        assert_eq!(decode(&wif).unwrap().version, 0xef);
    }

    #[test]
    fn test_bad_checksum() {
        // last character altered
        let result = decode("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWo");
        assert!(matches!(result, Err(WifError::Base58(_))));
    }

    #[test]
    fn test_bad_alphabet() {
        let result = decode("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoW0");
        assert!(matches!(result, Err(WifError::Base58(_))));
    }

    #[test]
    fn test_bad_length() {
        let short = bs58::encode(&[0x80u8; 20]).with_check().into_string();
        assert!(matches!(decode(&short), Err(WifError::InvalidLength(20))));
    }

    #[test]
    fn test_bad_compression_flag() {
        let mut payload = vec![0x80u8];
        payload.extend_from_slice(&ONE);
        payload.push(0x02);
        let wif = bs58::encode(&payload).with_check().into_string();
        assert!(matches!(
            decode(&wif),
            Err(WifError::InvalidCompressionFlag(0x02))
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let decoded = decode(&encode(0x80, &ONE, true)).unwrap();
        assert!(format!("{:?}", decoded).contains("<redacted>"));
    }
}
