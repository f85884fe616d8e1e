use alloc::string::String;
use core::fmt::Display;

use super::{Digest, Felt, Hasher};
use crate::utils::{
    HexParseError,
    serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// NOTE ID
// ================================================================================================

/// A unique identifier of a note, which is simultaneously a commitment to the note.
///
/// Note ID is computed as:
///
/// > hash(recipient, asset_commitment)
///
/// where `recipient` is a commitment to the note's script, inputs, and serial number, and
/// `asset_commitment` is a commitment to the assets carried by the note.
///
/// This achieves the following properties:
/// - Every note can be reduced to a single unique ID.
/// - To compute a note's ID, the full note content does not need to be known: having the
///   recipient digest and the asset commitment is sufficient.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct NoteId(Digest);

impl NoteId {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a new [NoteId] instantiated from the provided recipient digest and asset
    /// commitment.
    pub fn new(recipient: Digest, asset_commitment: Digest) -> Self {
        Self(Hasher::merge(&[recipient, asset_commitment]))
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the elements representation of this ID.
    pub fn as_elements(&self) -> &[Felt] {
        self.0.as_elements()
    }

    /// Returns a big-endian, hex-encoded string with the `0x` prefix.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Attempts to parse a big-endian, hex-encoded string with the `0x` prefix into a [NoteId].
    pub fn try_from_hex(hex_value: &str) -> Result<Self, HexParseError> {
        Digest::try_from(hex_value).map(Self::from)
    }

    /// Returns the digest defining this ID.
    pub fn inner(&self) -> Digest {
        self.0
    }
}

// CONVERSIONS
// ================================================================================================

impl From<Digest> for NoteId {
    fn from(value: Digest) -> Self {
        Self(value)
    }
}

impl From<NoteId> for Digest {
    fn from(id: NoteId) -> Self {
        id.inner()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for NoteId {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_bytes(&self.0.to_bytes());
    }
}

impl Deserializable for NoteId {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let id = Digest::read_from(source)?;
        Ok(Self(id))
    }
}

// TESTS
// ================================================================================================
