//! Primitive ABI type vocabulary.

use crate::SchemaError;
use alloy_dyn_abi::DynSolType;
use std::{fmt, str::FromStr};

/// A parameter type drawn from the supported primitive vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    Address,
    Bool,
    String,
    Bytes,
    /// `uintN`, N in 8..=256 and a multiple of 8
    Uint(usize),
    /// `intN`, N in 8..=256 and a multiple of 8
    Int(usize),
    /// `bytesN`, N in 1..=32
    FixedBytes(usize),
    /// `T[]`
    Array(Box<ParamType>),
    /// `T[N]`
    FixedArray(Box<ParamType>, usize),
}

impl ParamType {
    /// Whether the type is part of the supported vocabulary.
    ///
    /// Parsing only produces valid types, but descriptors can also be built
    /// by hand.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Address | Self::Bool | Self::String | Self::Bytes => true,
            Self::Uint(bits) | Self::Int(bits) => valid_int_width(*bits),
            Self::FixedBytes(len) => (1..=32).contains(len),
            Self::Array(inner) => inner.is_valid(),
            Self::FixedArray(inner, len) => *len > 0 && inner.is_valid(),
        }
    }

    /// Whether the type is dynamically sized in the ABI encoding.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::String | Self::Bytes | Self::Array(_) => true,
            Self::FixedArray(inner, _) => inner.is_dynamic(),
            _ => false,
        }
    }

    /// Whether an indexed event field of this type is stored as the keccak
    /// hash of its encoding rather than the value itself.
    pub const fn is_hashed_in_topic(&self) -> bool {
        matches!(
            self,
            Self::String | Self::Bytes | Self::Array(_) | Self::FixedArray(..)
        )
    }

    /// Convert to the dynamic codec type.
    pub fn to_dyn(&self) -> DynSolType {
        match self {
            Self::Address => DynSolType::Address,
            Self::Bool => DynSolType::Bool,
            Self::String => DynSolType::String,
            Self::Bytes => DynSolType::Bytes,
            Self::Uint(bits) => DynSolType::Uint(*bits),
            Self::Int(bits) => DynSolType::Int(*bits),
            Self::FixedBytes(len) => DynSolType::FixedBytes(*len),
            Self::Array(inner) => DynSolType::Array(Box::new(inner.to_dyn())),
            Self::FixedArray(inner, len) => DynSolType::FixedArray(Box::new(inner.to_dyn()), *len),
        }
    }
}

const fn valid_int_width(bits: usize) -> bool {
    bits >= 8 && bits <= 256 && bits % 8 == 0
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::FixedBytes(len) => write!(f, "bytes{len}"),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
        }
    }
}

impl FromStr for ParamType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SchemaError::UnknownType(s.to_string());
        let s = s.trim();

        // Array suffixes bind from the right: `uint8[2][]` is a dynamic array of `uint8[2]`.
        if let Some(body) = s.strip_suffix(']') {
            let open = body.rfind('[').ok_or_else(unknown)?;
            let inner: Self = body[..open].parse().map_err(|_| unknown())?;
            let len = &body[open + 1..];
            if len.is_empty() {
                return Ok(Self::Array(Box::new(inner)));
            }
            let len = parse_width(len).ok_or_else(unknown)?;
            return Ok(Self::FixedArray(Box::new(inner), len));
        }

        let ty = match s {
            "address" => Self::Address,
            "bool" => Self::Bool,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            "uint" => Self::Uint(256),
            "int" => Self::Int(256),
            _ => {
                if let Some(bits) = s.strip_prefix("uint") {
                    Self::Uint(parse_width(bits).ok_or_else(unknown)?)
                } else if let Some(bits) = s.strip_prefix("int") {
                    Self::Int(parse_width(bits).ok_or_else(unknown)?)
                } else if let Some(len) = s.strip_prefix("bytes") {
                    Self::FixedBytes(parse_width(len).ok_or_else(unknown)?)
                } else {
                    return Err(unknown());
                }
            }
        };

        if ty.is_valid() {
            Ok(ty)
        } else {
            Err(unknown())
        }
    }
}

fn parse_width(digits: &str) -> Option<usize> {
    // reject signs and leading zeros so that `uint08` does not alias `uint8`
    if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
