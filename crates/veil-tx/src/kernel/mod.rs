use alloc::vec::Vec;

use veil_objects::{
    Digest, Felt, MAX_OUTPUT_NOTES_PER_TX, TransactionOutputError, Word,
    asset::Asset,
    block::BlockNumber,
    note::{NoteAssets, NoteExecutionHint, NoteMetadata, NoteTag, NoteType},
    transaction::{OutputNotes, TransactionInputs, TransactionOutputs},
};

use crate::{
    errors::TransactionKernelError,
    events::TransactionEvent,
    observer::{DefaultObserver, TransactionObserver},
};

mod note_builder;
pub use note_builder::OutputNoteBuilder;

// TRANSACTION KERNEL
// ================================================================================================

/// The per-transaction execution context.
///
/// The kernel accumulates the output notes created during one transaction execution, attaches
/// assets to them, and tracks the block height at which the transaction expires. All kernel
/// state lives for a single transaction and is converted into [TransactionOutputs] at the end of
/// execution.
///
/// Execution is strictly single-threaded; given identical inputs and call order, outputs and
/// failures are deterministic.
pub struct TransactionKernel<T: TransactionObserver = DefaultObserver> {
    inputs: TransactionInputs,
    output_notes: Vec<OutputNoteBuilder>,
    /// Assets added against the not-yet-created note at index `output_notes.len()`. They are
    /// adopted by the `create_note` call which claims that index.
    staged_assets: Option<NoteAssets>,
    /// Absolute block height beyond which the transaction is no longer valid. `u32::MAX` means
    /// no expiration has been set.
    expiration_block_num: BlockNumber,
    observer: T,
}

impl TransactionKernel {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a new [TransactionKernel] instantiated with the provided transaction inputs.
    pub fn new(inputs: TransactionInputs) -> Self {
        Self::with_observer(inputs, DefaultObserver)
    }
}

impl<T: TransactionObserver> TransactionKernel<T> {
    /// Returns a new [TransactionKernel] which notifies the provided observer at defined points
    /// during execution.
    pub fn with_observer(inputs: TransactionInputs, observer: T) -> Self {
        Self {
            inputs,
            output_notes: Vec::new(),
            staged_assets: None,
            expiration_block_num: BlockNumber::from(u32::MAX),
            observer,
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the hash of the block the transaction is executed against.
    pub fn block_hash(&self) -> Digest {
        self.inputs.block_hash()
    }

    /// Returns the number of the block the transaction is executed against.
    pub fn block_num(&self) -> BlockNumber {
        self.inputs.block_num()
    }

    /// Returns the number of output notes created so far.
    pub fn num_output_notes(&self) -> usize {
        self.output_notes.len()
    }

    /// Returns a reference to the observer attached to this kernel.
    pub fn observer(&self) -> &T {
        &self.observer
    }

    /// Returns the expiration block delta of the transaction, or 0 if no expiration has been
    /// set.
    pub fn get_expiration_delta(&self) -> u32 {
        if self.expiration_block_num.as_u32() == u32::MAX {
            0
        } else {
            // the expiration is always set to reference block + delta, so this cannot underflow
            self.expiration_block_num.as_u32() - self.inputs.block_num().as_u32()
        }
    }

    // STATE MUTATORS
    // --------------------------------------------------------------------------------------------

    /// Creates a new output note and returns its index in the list of the transaction's output
    /// notes.
    ///
    /// Any assets previously staged against this index are attached to the created note.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The tag does not fit into a u32.
    /// - The note type is not [NoteType::Public] or [NoteType::Private].
    /// - The note type is not consistent with the two most significant bits of the tag.
    /// - The number of output notes is already at [MAX_OUTPUT_NOTES_PER_TX].
    pub fn create_note(
        &mut self,
        tag: Felt,
        aux: Felt,
        note_type: NoteType,
        execution_hint: NoteExecutionHint,
        recipient_digest: Digest,
    ) -> Result<u32, TransactionKernelError> {
        self.observer.on_event(TransactionEvent::NoteBeforeCreated);

        let tag_int = tag.as_int();
        let tag = NoteTag::try_from(tag)
            .map_err(|_| TransactionKernelError::NoteTagNotU32(tag_int))?;

        let metadata =
            NoteMetadata::new(self.inputs.account_id(), note_type, tag, execution_hint, aux)
                .map_err(TransactionKernelError::InvalidNoteMetadata)?;

        let note_idx = self.output_notes.len();
        if note_idx >= MAX_OUTPUT_NOTES_PER_TX {
            return Err(TransactionKernelError::TooManyOutputNotes(note_idx + 1));
        }

        let assets = self.staged_assets.take().unwrap_or_default();

        self.observer.on_event(TransactionEvent::NoteAfterCreated);

        #[cfg(feature = "log")]
        log::note_created(note_idx, &metadata);

        self.output_notes.push(OutputNoteBuilder::new(metadata, recipient_digest, assets));

        Ok(note_idx as u32)
    }

    /// Adds the provided asset word to the output note with the specified index.
    ///
    /// The index may exceed the current number of output notes by exactly one; in that case the
    /// asset is staged and attached to the note created by the next `create_note` call.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The note index exceeds the number of created notes by more than one.
    /// - The asset word does not parse into a well formed [Asset].
    /// - The same non-fungible asset was already added to the note.
    /// - Merging the asset into a fungible asset from the same faucet overflows the maximum
    ///   amount.
    /// - The note already carries [NoteAssets::MAX_NUM_ASSETS] assets.
    pub fn add_asset_to_note(
        &mut self,
        note_idx: u64,
        asset: Word,
    ) -> Result<(), TransactionKernelError> {
        let num_notes = self.output_notes.len() as u64;
        if note_idx > num_notes {
            return Err(TransactionKernelError::InvalidNoteIndex(note_idx));
        }

        let asset = Asset::try_from(asset).map_err(TransactionKernelError::MalformedAsset)?;

        self.observer.on_event(TransactionEvent::NoteBeforeAddAsset);

        let result = if note_idx == num_notes {
            self.staged_assets.get_or_insert_default().add_asset(asset)
        } else {
            self.output_notes[note_idx as usize].add_asset(asset)
        };
        result.map_err(|source| TransactionKernelError::AddAssetFailed { note_idx, source })?;

        self.observer.on_event(TransactionEvent::NoteAfterAddAsset);

        #[cfg(feature = "log")]
        log::asset_added(note_idx, &asset);

        Ok(())
    }

    /// Lowers the block height at which the transaction expires to the reference block number
    /// plus the provided delta, if that value is below the current expiration height.
    ///
    /// The expiration height can only move earlier over the life of a transaction, never later,
    /// regardless of call order or count.
    ///
    /// # Errors
    /// Returns an error if the delta is outside of the `1..=u16::MAX` range.
    pub fn update_expiration_block_num(
        &mut self,
        block_height_delta: Felt,
    ) -> Result<(), TransactionKernelError> {
        let delta = block_height_delta.as_int();
        if delta == 0 || delta > u16::MAX as u64 {
            return Err(TransactionKernelError::InvalidExpirationDelta(delta));
        }

        // compute in u64 so a reference block close to u32::MAX cannot overflow
        let candidate = self.inputs.block_num().as_u64() + delta;
        if candidate < self.expiration_block_num.as_u64() {
            // candidate < u32::MAX here, so the cast cannot truncate
            self.expiration_block_num = BlockNumber::from(candidate as u32);

            #[cfg(feature = "log")]
            log::expiration_updated(self.expiration_block_num);
        }

        Ok(())
    }

    // FINALIZATION
    // --------------------------------------------------------------------------------------------

    /// Consumes the kernel and returns the outputs of the transaction.
    ///
    /// Assets staged against a never-created note index are dropped.
    ///
    /// # Errors
    /// Returns an error if the created notes do not form a valid [OutputNotes] list, e.g. if two
    /// notes reduce to the same note ID.
    pub fn into_outputs(self) -> Result<TransactionOutputs, TransactionOutputError> {
        let notes = self.output_notes.into_iter().map(OutputNoteBuilder::build).collect();
        let output_notes = OutputNotes::new(notes)?;

        Ok(TransactionOutputs {
            output_notes,
            expiration_block_num: self.expiration_block_num,
        })
    }
}

// LOGGING
// ================================================================================================

#[cfg(feature = "log")]
mod log {
    use veil_objects::{asset::Asset, block::BlockNumber, note::NoteMetadata};

    pub fn note_created(note_idx: usize, metadata: &NoteMetadata) {
        log::debug!(
            "Created output note [idx={}, type={:?}, tag={}, sender={}]",
            note_idx,
            metadata.note_type(),
            metadata.tag(),
            metadata.sender(),
        );
    }

    pub fn asset_added(note_idx: u64, asset: &Asset) {
        log::debug!(
            "Added asset to output note [idx={}, fungible={}, faucet={}]",
            note_idx,
            asset.is_fungible(),
            asset.faucet_id(),
        );
    }

    pub fn expiration_updated(expiration_block_num: BlockNumber) {
        log::debug!("Updated transaction expiration [block_num={expiration_block_num}]");
    }
}
