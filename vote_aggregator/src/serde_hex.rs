use crate::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryInto;
use std::fmt;
use std::str::FromStr;

// Chain JSON encodes byte strings and integers as `0x`-prefixed hex strings.
// Each type here round-trips through Display / FromStr.
macro_rules! serde_via_str {
    ($name:ident) => {
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                FromStr::from_str(&s).map_err(de::Error::custom)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }
    };
}

fn strip_prefix(s: &str) -> Result<&str, Error> {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or(Error::HexMissingPrefix)
}

/// Arbitrary bytes, `0x` followed by lowercase hex
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonBytes(pub Vec<u8>);

impl JsonBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for JsonBytes {
    fn from(bytes: Vec<u8>) -> Self {
        JsonBytes(bytes)
    }
}

impl FromStr for JsonBytes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JsonBytes(hex::decode(strip_prefix(s)?)?))
    }
}

impl fmt::Display for JsonBytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for JsonBytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

serde_via_str!(JsonBytes);

/// A 32 byte hash
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct H256(pub [u8; 32]);

impl FromStr for H256 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(strip_prefix(s)?)?;
        let hash: [u8; 32] = bytes.as_slice().try_into().map_err(|_| Error::HexBadLen(32))?;
        Ok(H256(hash))
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

serde_via_str!(H256);

macro_rules! hex_quantity {
    ($name:ident, $inner:ty) => {
        /// An integer quantity, `0x` followed by hex digits without leading zeros
        #[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub $inner);

        impl $name {
            pub fn value(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                $name(value)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = strip_prefix(s)?;
                if digits.is_empty() {
                    return Err(Error::HexQuantity(s.to_owned()));
                }
                <$inner>::from_str_radix(digits, 16)
                    .map($name)
                    .map_err(|_| Error::HexQuantity(s.to_owned()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{:#x}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        serde_via_str!($name);
    };
}

hex_quantity!(Uint32, u32);
hex_quantity!(Uint64, u64);
