//! Curve parameters and SEC1 point decoding.

use ibig::UBig;

use crate::error::HdError;
use crate::modular;
use crate::point::AffinePoint;
use crate::util::{byte_length, ubig_from_be_bytes, ubig_is_odd};

/// Parameters of `y^2 = x^3 + a*x + b` over `F_p` with a base point of order `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    pub g: AffinePoint,
    pub a: UBig,
    pub b: UBig,
    pub n: UBig,
    pub p: UBig,
}

impl Curve {
    /// Width in bytes of one encoded coordinate.
    pub fn field_len(&self) -> usize {
        byte_length(&self.p)
    }

    /// `x^3 + a*x + b mod p`.
    pub fn y_squared(&self, x: &UBig) -> UBig {
        let x_cubed = modular::power(self, x, &UBig::from(3u8));
        let ax = modular::multiply(self, &self.a, x);
        modular::add(self, &modular::add(self, &x_cubed, &ax), &self.b)
    }

    pub fn contains(&self, point: &AffinePoint) -> bool {
        if point.x >= self.p || point.y >= self.p {
            return false;
        }
        modular::multiply(self, &point.y, &point.y) == self.y_squared(&point.x)
    }
}

pub fn get_point(x: UBig, y: UBig) -> AffinePoint {
    AffinePoint::new(x, y)
}

/// Builds a point from big-endian coordinate buffers.
pub fn get_point_from_bytes(x: &[u8], y: &[u8]) -> AffinePoint {
    AffinePoint::new(ubig_from_be_bytes(x), ubig_from_be_bytes(y))
}

/// Recovers the point with the given x-coordinate and y parity.
pub fn get_point_from_x(curve: &Curve, x: &[u8], is_odd: bool) -> Result<AffinePoint, HdError> {
    let x = ubig_from_be_bytes(x);
    if x >= curve.p {
        return Err(HdError::PointNotOnCurve);
    }

    let [first, second] = modular::square_roots(curve, &curve.y_squared(&x))?;
    let y = if ubig_is_odd(&second) == is_odd {
        second
    } else {
        first
    };
    Ok(AffinePoint::new(x, y))
}

/// Parses a SEC1 encoded point: compressed (`02`/`03`), uncompressed (`04`)
/// or hybrid (`06`/`07`).
pub fn decode_point(curve: &Curve, bytes: &[u8]) -> Result<AffinePoint, HdError> {
    let width = curve.field_len();
    let Some((&tag, body)) = bytes.split_first() else {
        return Err(HdError::UnknownPointFormat);
    };

    match tag {
        0x04 | 0x06 | 0x07 if body.len() == 2 * width => {
            let y_is_odd = body[body.len() - 1] & 1 == 1;
            if (tag == 0x06 && y_is_odd) || (tag == 0x07 && !y_is_odd) {
                return Err(HdError::InvalidPointFormat);
            }
            let point = get_point_from_bytes(&body[..width], &body[width..]);
            if !curve.contains(&point) {
                return Err(HdError::PointNotOnCurve);
            }
            Ok(point)
        }
        0x02 | 0x03 if body.len() == width => get_point_from_x(curve, body, tag == 0x03),
        _ => Err(HdError::UnknownPointFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secp256k1::SECP256K1;

    const EVEN_X: &str = "6557fdda1d5d43d79611f784780471f086d58e8126b8c40acb82272a7712e7f2";
    const ODD_X: &str = "5a784662a4a20a65bf6aab9ae98a6c068a81c52e4b032c0fb5400c706cfccc56";
    const EVEN_Y: &str = "59a34ffdc4c82e5cb68a96ccc6cb53e8765527148d1a85b52dfb8953d8d001fc";

    fn big(value: &str) -> UBig {
        value.parse().unwrap()
    }

    #[test]
    fn builds_points_from_integers_and_bytes() {
        let point = get_point(UBig::from(10u8), UBig::from(20u8));
        assert_eq!(point.x, UBig::from(10u8));
        assert_eq!(point.y, UBig::from(20u8));
        assert_eq!(get_point_from_bytes(&[0x0a], &[0x14]), point);
    }

    #[test]
    fn field_width_is_32_bytes() {
        assert_eq!(SECP256K1.field_len(), 32);
        assert!(SECP256K1.contains(&SECP256K1.g));
    }

    #[test]
    fn recovers_even_y() {
        let point = get_point_from_x(&SECP256K1, &hex::decode(EVEN_X).unwrap(), false).unwrap();
        assert_eq!(
            point.x,
            big("45839065423732159571308608389485760609626691787640182990598489261067700725746")
        );
        assert_eq!(
            point.y,
            big("40544391675021047350621568820028233874386780004400816536483542442104000086524")
        );
    }

    #[test]
    fn recovers_odd_y() {
        let point = get_point_from_x(&SECP256K1, &hex::decode(ODD_X).unwrap(), true).unwrap();
        assert_eq!(
            point.x,
            big("40920663801924305269653119115551778679508146584746982050198744783328810683478")
        );
        assert_eq!(
            point.y,
            big("57644217303653297295043885393981736616586573165163091864015052012599672961081")
        );
    }

    #[test]
    fn x_without_curve_point_fails() {
        // x = 5 gives y^2 = 132, a non-residue mod p.
        assert_eq!(
            get_point_from_x(&SECP256K1, &[5], false),
            Err(HdError::InvalidSquareRoot)
        );
    }

    #[test]
    fn decodes_compressed_point() {
        let bytes = hex::decode(format!("03{ODD_X}")).unwrap();
        let point = decode_point(&SECP256K1, &bytes).unwrap();
        assert_eq!(
            point.y,
            big("57644217303653297295043885393981736616586573165163091864015052012599672961081")
        );
    }

    #[test]
    fn decodes_uncompressed_and_hybrid_points() {
        let curve = &*SECP256K1;
        let compressed = decode_point(curve, &hex::decode(format!("02{EVEN_X}")).unwrap()).unwrap();
        let full = decode_point(curve, &hex::decode(format!("04{EVEN_X}{EVEN_Y}")).unwrap()).unwrap();
        let hybrid = decode_point(curve, &hex::decode(format!("06{EVEN_X}{EVEN_Y}")).unwrap()).unwrap();
        assert_eq!(compressed, full);
        assert_eq!(full, hybrid);
    }

    #[test]
    fn hybrid_parity_mismatch_is_invalid() {
        let bytes = hex::decode(format!("07{EVEN_X}{EVEN_Y}")).unwrap();
        assert_eq!(
            decode_point(&SECP256K1, &bytes),
            Err(HdError::InvalidPointFormat)
        );
    }

    #[test]
    fn off_curve_uncompressed_point_is_rejected() {
        let mut bytes = hex::decode(format!("04{EVEN_X}{EVEN_Y}")).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert_eq!(decode_point(&SECP256K1, &bytes), Err(HdError::PointNotOnCurve));
    }

    #[test]
    fn unknown_tags_and_lengths_are_rejected() {
        let curve = &*SECP256K1;
        assert_eq!(decode_point(curve, &[]), Err(HdError::UnknownPointFormat));
        assert_eq!(
            decode_point(curve, &hex::decode(format!("05{EVEN_X}")).unwrap()),
            Err(HdError::UnknownPointFormat)
        );
        assert_eq!(
            decode_point(curve, &hex::decode(format!("02{EVEN_X}00")).unwrap()),
            Err(HdError::UnknownPointFormat)
        );
        assert_eq!(
            decode_point(curve, &hex::decode(format!("04{EVEN_X}")).unwrap()),
            Err(HdError::UnknownPointFormat)
        );
    }
}
