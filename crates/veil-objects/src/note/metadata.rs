use alloc::string::ToString;

use super::{
    AccountId, ByteReader, ByteWriter, Deserializable, DeserializationError, Felt, NoteError,
    NoteTag, NoteType, Serializable, Word, execution_hint::NoteExecutionHint,
};

// NOTE METADATA
// ================================================================================================

/// Metadata associated with a note.
///
/// Note type and tag must be internally consistent according to the following rules:
///
/// - For private notes, the two most significant bits of the tag must be `0b11`.
/// - For public notes, the two most significant bits of the tag can be set to any value.
/// - Encrypted notes are reserved and cannot be created.
///
/// # Word layout & validity
///
/// [`NoteMetadata`] can be encoded into a [`Word`] with the following layout:
///
/// ```text
/// 1st felt: [note_tag (32 bits)]
/// 2nd felt: [sender_id (64 bits)]
/// 3rd felt: [note_type (2 bits) | note_execution_hint_payload (32 bits) | note_execution_hint_tag (6 bits)]
/// 4th felt: [aux (64 bits)]
/// ```
///
/// The rationale for the above layout is to ensure the validity of each felt:
/// - 1st felt: The tag is a `u32` value, so the upper 32 bits are zero.
/// - 2nd felt: Is equivalent to the sender's account ID so it inherits its validity.
/// - 3rd felt: The encoding occupies at most 40 bits, so the upper 24 bits are zero.
/// - 4th felt: The `aux` value must be a felt itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NoteMetadata {
    /// The ID of the account which created the note.
    sender: AccountId,

    /// Defines how the note is to be stored (e.g. public or private).
    note_type: NoteType,

    /// A value which can be used by the recipient(s) to identify notes intended for them.
    tag: NoteTag,

    /// An arbitrary user-defined value.
    aux: Felt,

    /// Specifies when a note is ready to be consumed.
    execution_hint: NoteExecutionHint,
}

impl NoteMetadata {
    /// Returns a new [NoteMetadata] instantiated with the specified parameters.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The note type is [NoteType::Encrypted].
    /// - The note type and note tag are inconsistent.
    pub fn new(
        sender: AccountId,
        note_type: NoteType,
        tag: NoteTag,
        execution_hint: NoteExecutionHint,
        aux: Felt,
    ) -> Result<Self, NoteError> {
        if note_type == NoteType::Encrypted {
            return Err(NoteError::InvalidNoteType(note_type as u64));
        }

        let tag = tag.validate(note_type)?;

        Ok(Self {
            sender,
            note_type,
            tag,
            aux,
            execution_hint,
        })
    }

    /// Returns the account which created the note.
    pub fn sender(&self) -> AccountId {
        self.sender
    }

    /// Returns the note's type.
    pub fn note_type(&self) -> NoteType {
        self.note_type
    }

    /// Returns the tag associated with the note.
    pub fn tag(&self) -> NoteTag {
        self.tag
    }

    /// Returns the execution hint associated with the note.
    pub fn execution_hint(&self) -> NoteExecutionHint {
        self.execution_hint
    }

    /// Returns the note's aux field.
    pub fn aux(&self) -> Felt {
        self.aux
    }

    /// Returns `true` if the note is private.
    pub fn is_private(&self) -> bool {
        self.note_type == NoteType::Private
    }
}

impl From<NoteMetadata> for Word {
    /// Converts a [`NoteMetadata`] into a [`Word`].
    ///
    /// The produced layout of the word is documented on the [`NoteMetadata`] type.
    fn from(metadata: NoteMetadata) -> Self {
        (&metadata).into()
    }
}

impl From<&NoteMetadata> for Word {
    /// Converts a [`NoteMetadata`] into a [`Word`].
    ///
    /// The produced layout of the word is documented on the [`NoteMetadata`] type.
    fn from(metadata: &NoteMetadata) -> Self {
        let mut elements = Word::default();
        elements[0] = metadata.tag.into();
        elements[1] = metadata.sender.into();
        elements[2] = merge_type_and_hint(metadata.note_type, metadata.execution_hint);
        elements[3] = metadata.aux;
        elements
    }
}

impl TryFrom<Word> for NoteMetadata {
    type Error = NoteError;

    /// Tries to decode a [`Word`] into a [`NoteMetadata`].
    ///
    /// The expected layout of the word is documented on the [`NoteMetadata`] type.
    fn try_from(elements: Word) -> Result<Self, Self::Error> {
        let (note_type, execution_hint) = unmerge_type_and_hint(elements[2])?;

        let sender =
            AccountId::try_from(elements[1]).map_err(NoteError::NoteSenderInvalidAccountId)?;

        let tag_int = elements[0].as_int();
        let tag: u32 = tag_int
            .try_into()
            .map_err(|_| NoteError::InconsistentNoteTag(note_type, tag_int))?;

        Self::new(sender, note_type, tag.into(), execution_hint, elements[3])
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for NoteMetadata {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        Word::from(self).write_into(target);
    }
}

impl Deserializable for NoteMetadata {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let word = Word::read_from(source)?;
        Self::try_from(word).map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Merges a [`NoteType`] and a [`NoteExecutionHint`] into a single [`Felt`].
///
/// The layout is as follows:
///
/// ```text
/// [note_type (2 bits) | note_execution_hint_payload (32 bits) | note_execution_hint_tag (6 bits)]
/// ```
fn merge_type_and_hint(note_type: NoteType, note_execution_hint: NoteExecutionHint) -> Felt {
    let type_bits = note_type as u64;
    let hint_bits: u64 = note_execution_hint.into();

    debug_assert!(type_bits >> 2 == 0, "note type must not contain values >= 4");
    debug_assert!(hint_bits >> 38 == 0, "note execution hint must fit into 38 bits");

    let merged = (type_bits << 38) | hint_bits;

    // SAFETY: The merged value occupies at most 40 bits so it is guaranteed to be a valid felt.
    Felt::try_from(merged).expect("encoded value should be a valid felt")
}

/// Unmerges the given felt into a [`NoteType`] and a [`NoteExecutionHint`].
fn unmerge_type_and_hint(element: Felt) -> Result<(NoteType, NoteExecutionHint), NoteError> {
    let element = element.as_int();

    // Any bits above the two note type bits make the value invalid, so do not mask them off.
    let note_type = NoteType::try_from(element >> 38)?;
    let execution_hint = NoteExecutionHint::try_from(element & 0x3f_ffff_ffff)?;

    Ok((note_type, execution_hint))
}

// TESTS
// ================================================================================================
