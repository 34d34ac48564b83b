//! Mixed-case checksummed addresses derived from Keccak-256.

use crate::error::HdError;
use crate::hash::keccak256;
use crate::secp256k1::decompress_public_key;

/// Applies the mixed-case checksum to a 40 character lowercase hex address.
///
/// A character is uppercased when the matching nibble of
/// `keccak256(address)` is 8 or more. The result is prefixed with `0x`.
pub fn to_checksum_address(address: &str) -> String {
    let address = address.strip_prefix("0x").unwrap_or(address).to_ascii_lowercase();
    let hash = hex::encode(keccak256(address.as_bytes()));

    let mut out = String::with_capacity(address.len() + 2);
    out.push_str("0x");
    for (character, nibble) in address.chars().zip(hash.chars()) {
        if nibble.to_digit(16).unwrap_or(0) >= 8 {
            out.push(character.to_ascii_uppercase());
        } else {
            out.push(character);
        }
    }
    out
}

/// Checksummed address of a compressed or uncompressed public key.
pub fn get_address(public_key: &[u8]) -> Result<String, HdError> {
    let uncompressed = decompress_public_key(public_key)?;
    let hash = keccak256(&uncompressed[1..]);
    Ok(to_checksum_address(&hex::encode(&hash[12..])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksums_lowercase_address() {
        assert_eq!(
            to_checksum_address("6b175474e89094c44da98b954eedeac495271d0f"),
            "0x6B175474E89094C44Da98b954EedeAC495271d0F"
        );
        assert_eq!(
            to_checksum_address("a74476443119a942de498590fe1f2454d7d4ac0d"),
            "0xa74476443119A942dE498590Fe1f2454d7D4aC0d"
        );
    }

    #[test]
    fn accepts_prefixed_and_mixed_case_input() {
        assert_eq!(
            to_checksum_address("0x6B175474E89094C44DA98B954EEDEAC495271D0F"),
            "0x6B175474E89094C44Da98b954EedeAC495271d0F"
        );
    }

    #[test]
    fn strips_a_single_prefix_only() {
        let doubled = to_checksum_address("0x0x6b175474e89094c44da98b954eedeac495271d0f");
        assert!(doubled.starts_with("0x0x") || doubled.starts_with("0x0X"));
        assert_ne!(doubled, "0x6B175474E89094C44Da98b954EedeAC495271d0F");
    }

    #[test]
    fn address_of_compressed_and_uncompressed_keys_match() {
        let compressed =
            hex::decode("03e6159bb12479339ce9be03fa724f53692893e7c91de9be2c00ca8d554fca8f51")
                .unwrap();
        let uncompressed = decompress_public_key(&compressed).unwrap();
        let address = get_address(&compressed).unwrap();
        assert_eq!(address, get_address(&uncompressed).unwrap());
        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0x"));
    }

    #[test]
    fn address_rejects_invalid_key() {
        assert_eq!(get_address(&[0x05; 33]), Err(HdError::UnknownPointFormat));
    }
}
