//! Arithmetic in the prime field of a curve.
//!
//! Every result is reduced into `[0, p)`.

use ibig::ops::UnsignedAbs;
use ibig::{IBig, UBig};

use crate::curve::Curve;
use crate::error::HdError;
use crate::util::ubig_is_zero;

/// True modulo of a signed value, never negative.
pub fn reduce(curve: &Curve, value: &IBig) -> UBig {
    let magnitude = value.clone().unsigned_abs() % &curve.p;
    if *value < IBig::from(0u8) && !ubig_is_zero(&magnitude) {
        &curve.p - magnitude
    } else {
        magnitude
    }
}

pub fn add(curve: &Curve, a: &UBig, b: &UBig) -> UBig {
    (a + b) % &curve.p
}

pub fn subtract(curve: &Curve, a: &UBig, b: &UBig) -> UBig {
    let a = a % &curve.p;
    let b = b % &curve.p;
    if a >= b {
        a - b
    } else {
        &curve.p - b + a
    }
}

pub fn multiply(curve: &Curve, a: &UBig, b: &UBig) -> UBig {
    (a * b) % &curve.p
}

/// Multiplicative inverse by the extended Euclidean algorithm.
pub fn inverse(curve: &Curve, value: &UBig) -> Result<UBig, HdError> {
    let value = value % &curve.p;
    if ubig_is_zero(&value) {
        return Err(HdError::DivisionByZero);
    }

    let zero = IBig::from(0u8);
    let (mut old_r, mut r) = (IBig::from(value), IBig::from(curve.p.clone()));
    let (mut old_s, mut s) = (IBig::from(1u8), IBig::from(0u8));
    while r != zero {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }
    Ok(reduce(curve, &old_s))
}

pub fn divide(curve: &Curve, a: &UBig, b: &UBig) -> Result<UBig, HdError> {
    let inverse = inverse(curve, b)?;
    Ok(multiply(curve, a, &inverse))
}

/// Square-and-multiply exponentiation. A zero base yields zero for any exponent.
pub fn power(curve: &Curve, base: &UBig, exponent: &UBig) -> UBig {
    let base = base % &curve.p;
    if ubig_is_zero(&base) {
        return UBig::from(0u8);
    }

    let mut result = UBig::from(1u8);
    for bit in (0..exponent.bit_len()).rev() {
        result = multiply(curve, &result, &result);
        if exponent.bit(bit) {
            result = multiply(curve, &result, &base);
        }
    }
    result
}

/// Both square roots of `y2`, `[root, p - root]`.
///
/// Relies on `p ≡ 3 (mod 4)`, where a root of a quadratic residue is `y2^((p+1)/4)`.
pub fn square_roots(curve: &Curve, y2: &UBig) -> Result<[UBig; 2], HdError> {
    let y2 = y2 % &curve.p;
    let exponent = (&curve.p + UBig::from(1u8)) >> 2usize;
    let root = power(curve, &y2, &exponent);
    if multiply(curve, &root, &root) != y2 {
        return Err(HdError::InvalidSquareRoot);
    }
    let other = subtract(curve, &UBig::from(0u8), &root);
    Ok([root, other])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secp256k1::SECP256K1;

    const TEST_A: &str =
        "40920663801924305269653119115551778679508146584746982050198744783328810683478";
    const TEST_B: &str =
        "57644217303653297295043885393981736616586573165163091864015052012599672961081";

    fn big(value: &str) -> UBig {
        value.parse().unwrap()
    }

    #[test]
    fn reduce_is_identity_below_modulus() {
        let curve = &*SECP256K1;
        assert_eq!(reduce(curve, &IBig::from(big(TEST_A))), big(TEST_A));
        assert_eq!(reduce(curve, &IBig::from(big(TEST_B))), big(TEST_B));
    }

    #[test]
    fn reduce_handles_negative_values() {
        let curve = &*SECP256K1;
        let reduced = reduce(curve, &IBig::from(-5));
        assert_eq!(reduced, &curve.p - UBig::from(5u8));
        let wrapped = reduce(curve, &(IBig::from(curve.p.clone()) * IBig::from(-3) - IBig::from(1)));
        assert_eq!(wrapped, &curve.p - UBig::from(1u8));
    }

    #[test]
    fn adds_two_numbers() {
        let curve = &*SECP256K1;
        assert_eq!(
            add(curve, &big(TEST_A), &big(TEST_A)),
            big("81841327603848610539306238231103557359016293169493964100397489566657621366956")
        );
        assert_eq!(
            add(curve, &big(TEST_B), &big(TEST_B)),
            big("115288434607306594590087770787963473233173146330326183728030104025199345922162")
        );
    }

    #[test]
    fn subtracts_two_numbers() {
        let curve = &*SECP256K1;
        assert_eq!(
            subtract(curve, &big(TEST_A), &big(TEST_B)),
            big("99068535735587203398180218730257949916191558085224454225641276778637972394060")
        );
        assert_eq!(
            subtract(curve, &big(TEST_B), &big(TEST_A)),
            big("16723553501728992025390766278429957937078426580416109813816307229270862277603")
        );
    }

    #[test]
    fn multiplies_two_numbers() {
        let curve = &*SECP256K1;
        assert_eq!(
            multiply(curve, &big(TEST_A), &big(TEST_A)),
            big("60348372934273279971993986630834708629578564491747142757764073437455044124652")
        );
        assert_eq!(
            multiply(curve, &big(TEST_B), &big(TEST_B)),
            big("93635177522471094108898156822137863960278456457190592348354738112580645053712")
        );
    }

    #[test]
    fn divides_two_numbers() {
        let curve = &*SECP256K1;
        assert_eq!(
            divide(curve, &big(TEST_A), &big(TEST_B)).unwrap(),
            big("71865970237313792670820027288162572879926887829139724320463362393064574103635")
        );
        assert_eq!(
            divide(curve, &big(TEST_B), &big(TEST_A)).unwrap(),
            big("6678908264677100300883728556498058927887627544987573873849581526879372898940")
        );
    }

    #[test]
    fn division_by_zero_residue_fails() {
        let curve = &*SECP256K1;
        assert_eq!(
            divide(curve, &big(TEST_A), &UBig::from(0u8)),
            Err(HdError::DivisionByZero)
        );
        assert_eq!(
            divide(curve, &big(TEST_A), &curve.p),
            Err(HdError::DivisionByZero)
        );
    }

    #[test]
    fn inverse_times_value_is_one() {
        let curve = &*SECP256K1;
        let inv = inverse(curve, &big(TEST_A)).unwrap();
        assert_eq!(multiply(curve, &inv, &big(TEST_A)), UBig::from(1u8));
    }

    #[test]
    fn raises_to_a_power() {
        let curve = &*SECP256K1;
        assert_eq!(
            power(curve, &big(TEST_A), &big(TEST_B)),
            big("45154261507711685768830239628328808171904190663195061380145420756885665970304")
        );
        assert_eq!(
            power(curve, &big(TEST_B), &big(TEST_A)),
            big("12259513326771245646783968873923369955705799639898792721622882367719141774688")
        );
    }

    #[test]
    fn power_of_zero_is_zero() {
        let curve = &*SECP256K1;
        assert_eq!(power(curve, &UBig::from(0u8), &big(TEST_A)), UBig::from(0u8));
        assert_eq!(power(curve, &UBig::from(0u8), &UBig::from(0u8)), UBig::from(0u8));
    }

    #[test]
    fn finds_both_square_roots() {
        let curve = &*SECP256K1;
        let [first, second] = square_roots(curve, &big(TEST_A)).unwrap();
        assert_eq!(
            first,
            big("36080975185544999343184031379027371578077336573858544356477955434911939012222")
        );
        assert_eq!(
            second,
            big("79711114051771196080386953629660536275192648091782019682979628572996895659441")
        );
    }

    #[test]
    fn non_residue_has_no_square_root() {
        let curve = &*SECP256K1;
        assert_eq!(
            square_roots(curve, &big(TEST_B)),
            Err(HdError::InvalidSquareRoot)
        );
    }
}
