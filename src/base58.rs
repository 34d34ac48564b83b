//! Base58 and Base58Check encoding.
//!
//! Base58Check appends the first four bytes of SHA-256d(payload) before
//! encoding, and verifies and strips them when decoding.

use crate::error::HdError;
use crate::hash::sha256d;

const CHECKSUM_LEN: usize = 4;

pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

pub fn decode(s: &str) -> Result<Vec<u8>, HdError> {
    Ok(bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()?)
}

pub fn check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&data)
}

pub fn check_decode(s: &str) -> Result<Vec<u8>, HdError> {
    let decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(HdError::InvalidBase58(
            "data too short for checksum".into(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    let expected = sha256d(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(HdError::InvalidChecksum);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_checksum() {
        let encoded = check_encode(b"foo bar");
        assert_eq!(encoded, "SQHFQMRT97ajZaP");
        assert_eq!(check_decode(&encoded).unwrap(), b"foo bar".to_vec());
    }

    #[test]
    fn rejects_bad_checksum() {
        assert_eq!(
            check_decode("SQHFQMRT97ajfoo"),
            Err(HdError::InvalidChecksum)
        );
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert!(matches!(
            check_decode("0OIl"),
            Err(HdError::InvalidBase58(_))
        ));
    }

    #[test]
    fn rejects_truncated_input() {
        assert!(matches!(check_decode("1"), Err(HdError::InvalidBase58(_))));
    }

    #[test]
    fn leading_zero_bytes_become_ones() {
        assert_eq!(encode(&[0, 0, 0, 0]), "1111");
        assert_eq!(decode("111233QC4").unwrap(), hex::decode("000000287FB4CD").unwrap());
    }
}
