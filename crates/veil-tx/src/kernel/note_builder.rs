use veil_objects::{
    Digest, NoteError,
    asset::Asset,
    note::{NoteAssets, NoteMetadata},
    transaction::OutputNote,
};

// OUTPUT NOTE BUILDER
// ================================================================================================

/// Builder of an output note, provided primarily to enable adding assets to a note incrementally.
pub struct OutputNoteBuilder {
    metadata: NoteMetadata,
    recipient_digest: Digest,
    assets: NoteAssets,
}

impl OutputNoteBuilder {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a new [OutputNoteBuilder] instantiated with the provided metadata, recipient
    /// digest, and initial assets.
    ///
    /// The recipient digest is set once here and cannot be changed afterwards.
    pub fn new(metadata: NoteMetadata, recipient_digest: Digest, assets: NoteAssets) -> Self {
        Self { metadata, recipient_digest, assets }
    }

    // STATE MUTATORS
    // --------------------------------------------------------------------------------------------

    /// Adds the specified asset to the note.
    ///
    /// # Errors
    /// Returns an error if adding the asset to the note fails. This can happen for the following
    /// reasons:
    /// - The same non-fungible asset is already added to the note.
    /// - A fungible asset issued by the same faucet is already added to the note and adding both
    ///   assets together results in an invalid asset.
    /// - Adding the asset to the note would push the list beyond the
    ///   [NoteAssets::MAX_NUM_ASSETS] limit.
    pub fn add_asset(&mut self, asset: Asset) -> Result<(), NoteError> {
        self.assets.add_asset(asset)
    }

    /// Converts this builder into an [OutputNote].
    pub fn build(self) -> OutputNote {
        OutputNote::new(self.recipient_digest, self.assets, self.metadata)
    }
}
