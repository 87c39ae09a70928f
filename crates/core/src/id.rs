//! Identifiers for anonymous inserts
//!
//! An [`Identifier`] is a random version-4 UUID:
//!
//! | Bits | Content |
//! |------|---------|
//! | 32 | random (`time_low`) |
//! | 16 | random (`time_mid`) |
//! | 16 | top nibble `0100`, 12 random bits (`time_hi_and_version`) |
//! | 16 | top two bits `10`, 14 random bits (`clock_seq`) |
//! | 48 | random (`node`) |
//!
//! Two textual layouts are supported, chosen by [`IdFormat`]:
//!
//! - `Hyphenated`: `xxxxxxxx-xxxx-4xxx-[89ab]xxx-xxxxxxxxxxxx` (36 chars)
//! - `Compact`: the same 32 lowercase hex digits without separators

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::{Uuid, Variant};

/// Length of the hyphenated text form
pub const HYPHENATED_LEN: usize = 36;

/// Length of the compact text form
pub const COMPACT_LEN: usize = 32;

/// Textual layout of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IdFormat {
    /// Canonical 8-4-4-4-12 form with hyphens
    #[default]
    Hyphenated,
    /// 32 contiguous hex digits
    Compact,
}

impl IdFormat {
    /// Number of characters an identifier occupies in this layout
    pub fn text_len(&self) -> usize {
        match self {
            IdFormat::Hyphenated => HYPHENATED_LEN,
            IdFormat::Compact => COMPACT_LEN,
        }
    }
}

/// Source of raw UUIDs for identifier generation
///
/// The store calls `generate` once per `store` operation. Implementations
/// must be `Send + Sync` so a store can move between threads.
///
/// The returned UUID is used as 128 random bits. Its version nibble and
/// variant bits are overwritten (see [`Identifier::from_random_bytes`]), so a
/// generator cannot produce an identifier that fails [`Identifier::parse`].
pub trait IdGenerator: Send + Sync {
    /// Produce the next UUID
    fn generate(&self) -> Uuid;
}

/// Default generator: `Uuid::new_v4()`, seeded from the OS via `getrandom`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// A UUID paired with the layout it renders in
///
/// Equality and hashing consider only the UUID, so the same identifier in
/// compact and hyphenated form compares equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Identifier {
    uuid: Uuid,
    format: IdFormat,
}

impl Identifier {
    /// Generate a fresh random identifier
    pub fn new_v4(format: IdFormat) -> Self {
        Self::from_uuid(Uuid::new_v4(), format)
    }

    /// Build a version-4 identifier from 16 random bytes
    ///
    /// Bits 48..52 become `0100` and bits 64..66 become `10`; all other bits
    /// are kept. Bytes that already encode a v4 UUID pass through unchanged.
    pub fn from_random_bytes(bytes: [u8; 16], format: IdFormat) -> Self {
        Self::from_uuid(uuid::Builder::from_random_bytes(bytes).into_uuid(), format)
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid, format: IdFormat) -> Self {
        Self { uuid, format }
    }

    /// Parse identifier text in either layout
    ///
    /// The layout is detected from the length. Uppercase hex is accepted, but
    /// store keys are always the lowercase text produced by `Display`. Look a
    /// parsed identifier up with `id.to_string()`, not with the input text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the text has the wrong length,
    /// is not hex, or lacks the version-4 / RFC 4122 variant markers.
    pub fn parse(text: &str) -> Result<Self> {
        let format = match text.len() {
            HYPHENATED_LEN => IdFormat::Hyphenated,
            COMPACT_LEN => IdFormat::Compact,
            _ => return Err(Error::InvalidIdentifier(text.to_string())),
        };
        let uuid =
            Uuid::parse_str(text).map_err(|_| Error::InvalidIdentifier(text.to_string()))?;
        if uuid.get_version_num() != 4 || uuid.get_variant() != Variant::RFC4122 {
            return Err(Error::InvalidIdentifier(text.to_string()));
        }
        Ok(Self { uuid, format })
    }

    /// The underlying UUID
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The layout used by `Display`
    pub fn format(&self) -> IdFormat {
        self.format
    }

    /// Same UUID, different layout
    pub fn with_format(self, format: IdFormat) -> Self {
        Self { format, ..self }
    }

    /// Raw bytes of the UUID
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.uuid.as_bytes()
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            IdFormat::Hyphenated => write!(f, "{}", self.uuid.hyphenated()),
            IdFormat::Compact => write!(f, "{}", self.uuid.simple()),
        }
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

impl std::str::FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
