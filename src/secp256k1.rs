//! secp256k1 parameters and byte-level key operations.

use std::sync::LazyLock;

use ibig::UBig;

use crate::curve::{decode_point, Curve};
use crate::error::HdError;
use crate::hash::hash160;
use crate::point::{self, AffinePoint, Point};
use crate::util::{copy_array, ubig_from_be_bytes, ubig_is_zero, ubig_to_fixed_be_bytes};

pub const PRIVATE_KEY_LEN: usize = 32;
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

const P: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];
const N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];
const GX: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07,
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];
const GY: [u8; 32] = [
    0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08, 0xa8,
    0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
];

pub static SECP256K1: LazyLock<Curve> = LazyLock::new(|| Curve {
    g: AffinePoint::new(ubig_from_be_bytes(&GX), ubig_from_be_bytes(&GY)),
    a: UBig::from(0u8),
    b: UBig::from(7u8),
    n: ubig_from_be_bytes(&N),
    p: ubig_from_be_bytes(&P),
});

fn compressed(point: &AffinePoint) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LEN], HdError> {
    copy_array(&point::to_bytes(&SECP256K1, point, true)).ok_or(HdError::InvalidPointFormat)
}

fn uncompressed(point: &AffinePoint) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LEN], HdError> {
    copy_array(&point::to_bytes(&SECP256K1, point, false)).ok_or(HdError::InvalidPointFormat)
}

/// Parses a scalar that must lie in `[1, n)`.
pub fn private_key_scalar(private_key: &[u8]) -> Result<UBig, HdError> {
    if private_key.len() != PRIVATE_KEY_LEN {
        return Err(HdError::InvalidPrivateKey(format!(
            "expected {PRIVATE_KEY_LEN} bytes, got {}",
            private_key.len()
        )));
    }
    let scalar = ubig_from_be_bytes(private_key);
    if ubig_is_zero(&scalar) {
        return Err(HdError::InvalidPrivateKey("key is zero".into()));
    }
    if scalar >= SECP256K1.n {
        return Err(HdError::InvalidPrivateKey("key is not below the curve order".into()));
    }
    Ok(scalar)
}

fn tweak_scalar(tweak: &[u8]) -> Result<UBig, HdError> {
    let tweak = ubig_from_be_bytes(tweak);
    if tweak >= SECP256K1.n {
        return Err(HdError::TweakTooLarge);
    }
    Ok(tweak)
}

/// Compressed public key for a private key.
pub fn get_public_key(private_key: &[u8]) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LEN], HdError> {
    let scalar = private_key_scalar(private_key)?;
    let generator = Point::Affine(SECP256K1.g.clone());
    let point = point::multiply(&SECP256K1, &generator, &scalar)?.into_affine()?;
    compressed(&point)
}

/// `(private_key + tweak) mod n`.
pub fn private_add(private_key: &[u8], tweak: &[u8]) -> Result<[u8; PRIVATE_KEY_LEN], HdError> {
    let tweak = tweak_scalar(tweak)?;
    let key = ubig_from_be_bytes(private_key);
    let sum = (key + tweak) % &SECP256K1.n;
    if ubig_is_zero(&sum) {
        return Err(HdError::ZeroResultingKey);
    }
    Ok(ubig_to_fixed_be_bytes(&sum))
}

/// `public_key + tweak*G`, compressed.
pub fn public_add(public_key: &[u8], tweak: &[u8]) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LEN], HdError> {
    let key = Point::Affine(decode_point(&SECP256K1, public_key)?);
    let tweak = tweak_scalar(tweak)?;

    let generator = Point::Affine(SECP256K1.g.clone());
    let q = point::multiply(&SECP256K1, &generator, &tweak)?;
    let sum = point::add(&SECP256K1, &key, &q)?.into_affine()?;
    compressed(&sum)
}

pub fn compress_public_key(public_key: &[u8]) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LEN], HdError> {
    compressed(&decode_point(&SECP256K1, public_key)?)
}

pub fn decompress_public_key(
    public_key: &[u8],
) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LEN], HdError> {
    uncompressed(&decode_point(&SECP256K1, public_key)?)
}

/// First four bytes of Hash160 of the public key, big-endian.
pub fn fingerprint(public_key: &[u8]) -> u32 {
    let digest = hash160(public_key);
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}
