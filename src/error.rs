use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HdError {
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),
    #[error("cannot derive a hardened child key without a private key")]
    NoPrivateKeyForHardened,
    #[error("node has no private key")]
    NoPrivateKey,
    #[error("maximum derivation depth of 255 exceeded")]
    MaxDepthExceeded,
    #[error("no valid child key left in the index space")]
    ChildIndexExhausted,
    #[error("invalid extended key: expected length 78, got {0}")]
    InvalidExtendedKeyLength(usize),
    #[error("invalid extended key: unknown version {0:#010x}")]
    InvalidExtendedKeyVersion(u32),
    #[error("invalid checksum")]
    InvalidChecksum,
    #[error("invalid base58: {0}")]
    InvalidBase58(String),
    #[error("resulting key is invalid: tweak is not below the curve order")]
    TweakTooLarge,
    #[error("resulting key is invalid: new key is zero")]
    ZeroResultingKey,
    #[error("point is at infinity")]
    PointAtInfinity,
    #[error("division by zero")]
    DivisionByZero,
    #[error("value has no square root modulo p")]
    InvalidSquareRoot,
    #[error("unable to decode point: unknown format")]
    UnknownPointFormat,
    #[error("unable to decode point: invalid format")]
    InvalidPointFormat,
    #[error("point not on curve")]
    PointNotOnCurve,
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),
    #[error("invalid entropy size: {0} bits, expected 128-256 in steps of 32")]
    InvalidEntropySize(usize),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid chain code: expected 32 bytes, got {0}")]
    InvalidChainCode(usize),
    #[error("invalid HMAC key length")]
    InvalidHmacKey,
}

impl From<bip39::Error> for HdError {
    fn from(err: bip39::Error) -> Self {
        HdError::InvalidMnemonic(err.to_string())
    }
}

impl From<bs58::decode::Error> for HdError {
    fn from(err: bs58::decode::Error) -> Self {
        HdError::InvalidBase58(err.to_string())
    }
}

impl From<hex::FromHexError> for HdError {
    fn from(err: hex::FromHexError) -> Self {
        HdError::InvalidHex(err.to_string())
    }
}

impl From<hmac::digest::InvalidLength> for HdError {
    fn from(_: hmac::digest::InvalidLength) -> Self {
        HdError::InvalidHmacKey
    }
}
