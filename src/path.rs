use std::fmt;
use std::str::FromStr;

use crate::error::HdError;

pub const HARDENED_OFFSET: u32 = 0x8000_0000;

const HARDENED_MARKER: char = '\'';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildNumber {
    index: u32,
    hardened: bool,
}

impl ChildNumber {
    pub fn normal(index: u32) -> Result<Self, HdError> {
        if index >= HARDENED_OFFSET {
            return Err(HdError::InvalidPath(format!(
                "child index {index} exceeds maximum"
            )));
        }
        Ok(Self {
            index,
            hardened: false,
        })
    }

    pub fn hardened(index: u32) -> Result<Self, HdError> {
        if index >= HARDENED_OFFSET {
            return Err(HdError::InvalidPath(format!(
                "hardened child index {index} exceeds maximum"
            )));
        }
        Ok(Self {
            index,
            hardened: true,
        })
    }

    /// Splits a raw 32-bit index at the hardened boundary.
    pub fn from_raw(value: u32) -> Self {
        Self {
            index: value & !HARDENED_OFFSET,
            hardened: value >= HARDENED_OFFSET,
        }
    }

    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// The raw index, with the hardened offset applied.
    pub fn value(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}{HARDENED_MARKER}", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildNumber {
    type Err = HdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_child(s)
    }
}

/// A derivation path such as `m/44'/60'/0'/0/0`. An empty path is the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    pub fn new(path: Vec<ChildNumber>) -> Self {
        Self(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChildNumber> {
        self.0.iter()
    }

    pub fn last(&self) -> Option<&ChildNumber> {
        self.0.last()
    }
}

impl IntoIterator for DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{child}")?;
        }
        Ok(())
    }
}

/// Parses `m` or `M` followed by zero or more `/N` or `/N'` segments.
/// Anything else, including whitespace, empty segments and a trailing
/// slash, is rejected.
impl FromStr for DerivationPath {
    type Err = HdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut components = s.split('/');
        match components.next() {
            Some("m") | Some("M") => {}
            _ => return Err(HdError::InvalidPath(s.into())),
        }

        let path = components
            .map(parse_child)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DerivationPath::new(path))
    }
}

fn parse_child(segment: &str) -> Result<ChildNumber, HdError> {
    let (digits, hardened) = match segment.strip_suffix(HARDENED_MARKER) {
        Some(digits) => (digits, true),
        None => (segment, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HdError::InvalidPath(format!("invalid segment `{segment}`")));
    }
    let index: u32 = digits
        .parse()
        .map_err(|_| HdError::InvalidPath(format!("index out of range `{segment}`")))?;
    if hardened {
        ChildNumber::hardened(index)
    } else {
        ChildNumber::normal(index)
    }
}

/// Raw index of a single path level, `N` or `N'`.
pub fn get_index(level: &str) -> Result<u32, HdError> {
    Ok(parse_child(level)?.value())
}
