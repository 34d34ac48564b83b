use ibig::UBig;
use num_traits::Zero;

pub fn ubig_from_be_bytes(bytes: &[u8]) -> UBig {
    UBig::from_be_bytes(bytes)
}

/// Big-endian encoding left-padded to exactly `N` bytes. Values wider than
/// `N` bytes keep their low-order bytes.
pub fn ubig_to_fixed_be_bytes<const N: usize>(value: &UBig) -> [u8; N] {
    let bytes = value.to_be_bytes();
    let mut out = [0u8; N];
    if bytes.len() >= N {
        out.copy_from_slice(&bytes[bytes.len() - N..]);
    } else {
        out[N - bytes.len()..].copy_from_slice(&bytes);
    }
    out
}

pub fn ubig_is_zero(value: &UBig) -> bool {
    value.is_zero()
}

pub fn ubig_is_odd(value: &UBig) -> bool {
    value.bit(0)
}

/// Number of bytes needed to hold `value`, i.e. the field element width for a modulus.
pub fn byte_length(value: &UBig) -> usize {
    (value.bit_len() + 7) / 8
}

pub fn copy_array<const N: usize>(slice: &[u8]) -> Option<[u8; N]> {
    slice.try_into().ok()
}

pub fn ser32(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

pub fn read_u32_be(bytes: &[u8], offset: usize) -> Option<u32> {
    let window = bytes.get(offset..offset + 4)?;
    copy_array::<4>(window).map(u32::from_be_bytes)
}
