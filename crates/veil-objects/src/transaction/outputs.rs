use alloc::{collections::BTreeSet, string::ToString, vec::Vec};

use crate::{
    Digest, Felt, Hasher, MAX_OUTPUT_NOTES_PER_TX, TransactionOutputError, Word,
    block::BlockNumber,
    note::{NoteAssets, NoteId, NoteMetadata},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// TRANSACTION OUTPUTS
// ================================================================================================

/// Describes the result of executing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutputs {
    /// Set of output notes created by the transaction.
    pub output_notes: OutputNotes,
    /// Defines up to which block the transaction is considered valid.
    pub expiration_block_num: BlockNumber,
}

impl Serializable for TransactionOutputs {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.output_notes.write_into(target);
        self.expiration_block_num.write_into(target);
    }
}

impl Deserializable for TransactionOutputs {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let output_notes = OutputNotes::read_from(source)?;
        let expiration_block_num = BlockNumber::read_from(source)?;

        Ok(Self { output_notes, expiration_block_num })
    }
}

// OUTPUT NOTES
// ================================================================================================

/// Contains a list of output notes of a transaction. The list can be empty if the transaction does
/// not produce any notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNotes {
    notes: Vec<OutputNote>,
    commitment: Digest,
}

impl OutputNotes {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns new [OutputNotes] instantiated from the provided vector of notes.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The total number of notes is greater than [`MAX_OUTPUT_NOTES_PER_TX`].
    /// - The vector of notes contains duplicates.
    pub fn new(notes: Vec<OutputNote>) -> Result<Self, TransactionOutputError> {
        if notes.len() > MAX_OUTPUT_NOTES_PER_TX {
            return Err(TransactionOutputError::TooManyOutputNotes(notes.len()));
        }

        let mut seen_notes = BTreeSet::new();
        for note in notes.iter() {
            if !seen_notes.insert(note.id()) {
                return Err(TransactionOutputError::DuplicateOutputNote(note.id()));
            }
        }

        let commitment = build_output_notes_commitment(&notes);

        Ok(Self { notes, commitment })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the commitment to the output notes.
    ///
    /// The commitment is computed as a sequential hash of (note_id, metadata) tuples for the
    /// notes created in a transaction.
    pub fn commitment(&self) -> Digest {
        self.commitment
    }

    /// Returns total number of output notes.
    pub fn num_notes(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if this [OutputNotes] does not contain any notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns a reference to the note located at the specified index.
    pub fn get_note(&self, idx: usize) -> &OutputNote {
        &self.notes[idx]
    }

    // ITERATORS
    // --------------------------------------------------------------------------------------------

    /// Returns an iterator over notes in this [OutputNotes].
    pub fn iter(&self) -> impl Iterator<Item = &OutputNote> {
        self.notes.iter()
    }
}

// SERIALIZATION
// ------------------------------------------------------------------------------------------------

impl Serializable for OutputNotes {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        // assert is OK here because we enforce max number of notes in the constructor
        assert!(self.notes.len() <= u16::MAX.into());
        target.write_u16(self.notes.len() as u16);
        target.write_many(&self.notes);
    }
}

impl Deserializable for OutputNotes {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let num_notes = source.read_u16()?;
        let notes = source.read_many::<OutputNote>(num_notes.into())?;
        Self::new(notes).map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}

// HELPER FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Builds a commitment to output notes.
///
/// For a non-empty list of notes, this is a sequential hash of (note_id, metadata) tuples for the
/// notes created in a transaction. For an empty list, an empty digest is returned.
fn build_output_notes_commitment(notes: &[OutputNote]) -> Digest {
    if notes.is_empty() {
        return Digest::default();
    }

    let mut elements: Vec<Felt> = Vec::with_capacity(notes.len() * 8);
    for note in notes.iter() {
        elements.extend_from_slice(note.id().as_elements());
        elements.extend_from_slice(&Word::from(note.metadata()));
    }

    Hasher::hash_elements(&elements)
}

// OUTPUT NOTE
// ================================================================================================

/// A note created during a transaction.
///
/// When a note is produced in a transaction, the note's recipient, assets, and metadata must be
/// known. Other information about the note may or may not be known to the note's producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNote {
    metadata: NoteMetadata,
    recipient_digest: Digest,
    assets: NoteAssets,
}

impl OutputNote {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns a new [OutputNote] instantiated from the provided parameters.
    pub fn new(recipient_digest: Digest, assets: NoteAssets, metadata: NoteMetadata) -> Self {
        Self { metadata, recipient_digest, assets }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the unique ID of this note.
    ///
    /// This value is both a unique identifier and a commitment to the note.
    pub fn id(&self) -> NoteId {
        NoteId::new(self.recipient_digest, self.assets.commitment())
    }

    /// Returns the value under which condition a note can be consumed.
    pub fn recipient_digest(&self) -> Digest {
        self.recipient_digest
    }

    /// Returns a reference to the assets of this note.
    pub fn assets(&self) -> &NoteAssets {
        &self.assets
    }

    /// Returns the metadata associated with this note.
    pub fn metadata(&self) -> &NoteMetadata {
        &self.metadata
    }
}

// SERIALIZATION
// ------------------------------------------------------------------------------------------------

impl Serializable for OutputNote {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.recipient_digest.write_into(target);
        self.assets.write_into(target);
        self.metadata.write_into(target);
    }
}

impl Deserializable for OutputNote {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let recipient_digest = Digest::read_from(source)?;
        let assets = NoteAssets::read_from(source)?;
        let metadata = NoteMetadata::read_from(source)?;

        Ok(Self::new(recipient_digest, assets, metadata))
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use assert_matches::assert_matches;

    use super::{OutputNote, OutputNotes, TransactionOutputs, build_output_notes_commitment};
    use crate::{
        Digest, Felt, TransactionOutputError,
        account::AccountId,
        asset::{Asset, FungibleAsset},
        block::BlockNumber,
        note::{NoteAssets, NoteExecutionHint, NoteMetadata, NoteTag, NoteType},
        testing::account_id::{ACCOUNT_ID_FUNGIBLE_FAUCET, ACCOUNT_ID_SENDER},
        utils::serde::{Deserializable, Serializable},
    };

    fn build_note(recipient_seed: u64, assets: NoteAssets) -> OutputNote {
        let sender = AccountId::try_from(ACCOUNT_ID_SENDER).unwrap();
        let metadata = NoteMetadata::new(
            sender,
            NoteType::Private,
            NoteTag::from(0xc000_0000),
            NoteExecutionHint::always(),
            Felt::new(27),
        )
        .unwrap();
        let recipient = Digest::from([
            Felt::new(recipient_seed),
            Felt::new(2),
            Felt::new(3),
            Felt::new(4),
        ]);
        OutputNote::new(recipient, assets, metadata)
    }

    #[test]
    fn output_notes_commitment() {
        // an empty list of output notes must reduce to an empty digest
        let empty = OutputNotes::new(vec![]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.commitment(), Digest::default());

        let note0 = build_note(1, NoteAssets::default());
        let note1 = build_note(2, NoteAssets::default());

        let notes = OutputNotes::new(vec![note0.clone(), note1.clone()]).unwrap();
        assert_eq!(notes.num_notes(), 2);
        assert_eq!(notes.iter().map(OutputNote::id).collect::<Vec<_>>(), [note0.id(), note1.id()]);
        assert_eq!(notes.commitment(), build_output_notes_commitment(&[note0, note1]));
    }

    #[test]
    fn output_notes_detect_duplicates() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET).unwrap();
        let asset = Asset::Fungible(FungibleAsset::new(faucet_id, 100).unwrap());
        let assets = NoteAssets::new(vec![asset]).unwrap();

        let note0 = build_note(1, assets.clone());
        let note1 = build_note(1, assets);

        let expected_id = note0.id();
        assert_matches!(
            OutputNotes::new(vec![note0, note1]),
            Err(TransactionOutputError::DuplicateOutputNote(id)) if id == expected_id
        );
    }

    #[test]
    fn output_notes_enforce_limit() {
        let notes = (0..crate::MAX_OUTPUT_NOTES_PER_TX as u64 + 1)
            .map(|seed| build_note(seed, NoteAssets::default()))
            .collect::<Vec<_>>();

        assert_matches!(
            OutputNotes::new(notes),
            Err(TransactionOutputError::TooManyOutputNotes(n)) if n == crate::MAX_OUTPUT_NOTES_PER_TX + 1
        );
    }

    #[test]
    fn output_notes_serde() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET).unwrap();
        let asset = Asset::Fungible(FungibleAsset::new(faucet_id, 100).unwrap());
        let assets = NoteAssets::new(vec![asset]).unwrap();

        let notes = OutputNotes::new(vec![build_note(1, assets), build_note(2, NoteAssets::default())])
            .unwrap();

        let decoded = OutputNotes::read_from_bytes(&notes.to_bytes()).unwrap();
        assert_eq!(decoded, notes);
        assert_eq!(decoded.commitment(), notes.commitment());
    }

    #[test]
    fn transaction_outputs_serde() {
        let outputs = TransactionOutputs {
            output_notes: OutputNotes::new(vec![build_note(1, NoteAssets::default())]).unwrap(),
            expiration_block_num: BlockNumber::from(500),
        };

        assert_eq!(TransactionOutputs::read_from_bytes(&outputs.to_bytes()).unwrap(), outputs);
    }
}
