//! Affine points and the group law over a short Weierstrass curve.

use ibig::UBig;

use crate::curve::Curve;
use crate::error::HdError;
use crate::modular;
use crate::util::{ubig_is_odd, ubig_is_zero};

const TAG_EVEN: u8 = 0x02;
const TAG_ODD: u8 = 0x03;
const TAG_UNCOMPRESSED: u8 = 0x04;

/// A finite point in affine coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinePoint {
    pub x: UBig,
    pub y: UBig,
}

impl AffinePoint {
    pub fn new(x: UBig, y: UBig) -> Self {
        Self { x, y }
    }
}

/// A group element: either the identity or a finite point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine(AffinePoint),
}

impl Point {
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// The finite coordinates, or `PointAtInfinity` for the identity.
    pub fn affine(&self) -> Result<&AffinePoint, HdError> {
        match self {
            Point::Affine(point) => Ok(point),
            Point::Infinity => Err(HdError::PointAtInfinity),
        }
    }

    pub fn into_affine(self) -> Result<AffinePoint, HdError> {
        match self {
            Point::Affine(point) => Ok(point),
            Point::Infinity => Err(HdError::PointAtInfinity),
        }
    }
}

impl From<AffinePoint> for Point {
    fn from(point: AffinePoint) -> Self {
        Point::Affine(point)
    }
}

pub fn negate(curve: &Curve, point: &Point) -> Point {
    match point {
        Point::Infinity => Point::Infinity,
        Point::Affine(p) => Point::Affine(AffinePoint::new(
            p.x.clone(),
            modular::subtract(curve, &UBig::from(0u8), &p.y),
        )),
    }
}

/// Adds two points. Equal operands are doubled.
pub fn add(curve: &Curve, left: &Point, right: &Point) -> Result<Point, HdError> {
    let (l, r) = match (left, right) {
        (Point::Infinity, _) => return Ok(right.clone()),
        (_, Point::Infinity) => return Ok(left.clone()),
        (Point::Affine(l), Point::Affine(r)) => (l, r),
    };

    if l == r {
        return double(curve, left);
    }
    if l.x == r.x && ubig_is_zero(&modular::add(curve, &l.y, &r.y)) {
        return Ok(Point::Infinity);
    }

    let ys = modular::subtract(curve, &r.y, &l.y);
    let xs = modular::subtract(curve, &r.x, &l.x);
    let slope = modular::divide(curve, &ys, &xs)?;

    let slope_squared = modular::multiply(curve, &slope, &slope);
    let x = modular::subtract(curve, &modular::subtract(curve, &slope_squared, &l.x), &r.x);
    let y = modular::subtract(
        curve,
        &modular::multiply(curve, &slope, &modular::subtract(curve, &l.x, &x)),
        &l.y,
    );
    Ok(Point::Affine(AffinePoint::new(x, y)))
}

pub fn double(curve: &Curve, point: &Point) -> Result<Point, HdError> {
    let p = match point {
        Point::Infinity => return Ok(Point::Infinity),
        Point::Affine(p) => p,
    };
    if ubig_is_zero(&(&p.y % &curve.p)) {
        return Ok(Point::Infinity);
    }

    let x_squared = modular::multiply(curve, &p.x, &p.x);
    let numerator = modular::add(
        curve,
        &modular::multiply(curve, &x_squared, &UBig::from(3u8)),
        &curve.a,
    );
    let denominator = modular::add(curve, &p.y, &p.y);
    let slope = modular::divide(curve, &numerator, &denominator)?;

    let x = modular::subtract(
        curve,
        &modular::multiply(curve, &slope, &slope),
        &modular::add(curve, &p.x, &p.x),
    );
    let y = modular::subtract(
        curve,
        &modular::multiply(curve, &slope, &modular::subtract(curve, &p.x, &x)),
        &p.y,
    );
    Ok(Point::Affine(AffinePoint::new(x, y)))
}

/// Double-and-add scalar multiplication, most significant bit first.
///
/// A scalar of one returns the input unchanged and a scalar of zero
/// returns the identity. Not constant time.
pub fn multiply(curve: &Curve, point: &Point, scalar: &UBig) -> Result<Point, HdError> {
    if *scalar == UBig::from(1u8) {
        return Ok(point.clone());
    }

    let mut result = Point::Infinity;
    for bit in (0..scalar.bit_len()).rev() {
        result = double(curve, &result)?;
        if scalar.bit(bit) {
            result = add(curve, &result, point)?;
        }
    }
    Ok(result)
}

/// SEC1 encoding with coordinates padded to the field width.
pub fn to_bytes(curve: &Curve, point: &AffinePoint, compact: bool) -> Vec<u8> {
    let width = curve.field_len();
    let mut out = Vec::with_capacity(if compact { 1 + width } else { 1 + 2 * width });

    if compact {
        out.push(if ubig_is_odd(&point.y) { TAG_ODD } else { TAG_EVEN });
        push_coordinate(&mut out, &point.x, width);
    } else {
        out.push(TAG_UNCOMPRESSED);
        push_coordinate(&mut out, &point.x, width);
        push_coordinate(&mut out, &point.y, width);
    }
    out
}

fn push_coordinate(out: &mut Vec<u8>, value: &UBig, width: usize) {
    let bytes = value.to_be_bytes();
    let start = bytes.len().saturating_sub(width);
    out.resize(out.len() + width - (bytes.len() - start), 0);
    out.extend_from_slice(&bytes[start..]);
}
