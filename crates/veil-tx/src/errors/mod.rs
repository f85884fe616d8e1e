use thiserror::Error;
use veil_objects::{AssetError, MAX_OUTPUT_NOTES_PER_TX, NoteError};

#[rustfmt::skip]
pub mod tx_kernel_errors;
use tx_kernel_errors::{
    ERR_ASSET_MALFORMED, ERR_INVALID_NOTE_IDX, ERR_INVALID_NOTE_TYPE,
    ERR_INVALID_TX_EXPIRATION_DELTA, ERR_NON_FUNGIBLE_ASSET_ALREADY_EXISTS,
    ERR_NOTE_FUNGIBLE_MAX_AMOUNT_EXCEEDED, ERR_NOTE_INVALID_TYPE_FOR_TAG, ERR_NOTE_TAG_MUST_BE_U32,
    ERR_NOTE_TOO_MANY_ASSETS, ERR_TX_OUTPUT_NOTES_OVERFLOW,
};

// TRANSACTION KERNEL ERROR
// ================================================================================================

#[derive(Debug, Error)]
pub enum TransactionKernelError {
    #[error("failed to add asset to note with index {note_idx}")]
    AddAssetFailed { note_idx: u64, source: NoteError },
    #[error(
        "expiration block delta {0} is out of range, must be between 1 and {max}",
        max = u16::MAX
    )]
    InvalidExpirationDelta(u64),
    #[error("note index {0} exceeds the number of created notes")]
    InvalidNoteIndex(u64),
    #[error("note metadata is not well formed")]
    InvalidNoteMetadata(#[source] NoteError),
    #[error("asset is not well formed")]
    MalformedAsset(#[source] AssetError),
    #[error("note tag {0} does not fit into a u32")]
    NoteTagNotU32(u64),
    #[error(
        "number of output notes exceeds the maximum of {max}",
        max = MAX_OUTPUT_NOTES_PER_TX
    )]
    TooManyOutputNotes(usize),
}

impl TransactionKernelError {
    /// Returns the stable kernel error code for this error.
    ///
    /// The codes are listed, together with their messages, in
    /// [`KERNEL_ERRORS`](tx_kernel_errors::KERNEL_ERRORS).
    pub fn error_code(&self) -> u32 {
        match self {
            TransactionKernelError::AddAssetFailed { source, .. } => match source {
                NoteError::AddFungibleAssetBalanceError(_) => ERR_NOTE_FUNGIBLE_MAX_AMOUNT_EXCEEDED,
                NoteError::DuplicateNonFungibleAsset(_) => ERR_NON_FUNGIBLE_ASSET_ALREADY_EXISTS,
                _ => ERR_NOTE_TOO_MANY_ASSETS,
            },
            TransactionKernelError::InvalidExpirationDelta(_) => ERR_INVALID_TX_EXPIRATION_DELTA,
            TransactionKernelError::InvalidNoteIndex(_) => ERR_INVALID_NOTE_IDX,
            TransactionKernelError::InvalidNoteMetadata(source) => match source {
                NoteError::InconsistentNoteTag(..) => ERR_NOTE_INVALID_TYPE_FOR_TAG,
                _ => ERR_INVALID_NOTE_TYPE,
            },
            TransactionKernelError::MalformedAsset(_) => ERR_ASSET_MALFORMED,
            TransactionKernelError::NoteTagNotU32(_) => ERR_NOTE_TAG_MUST_BE_U32,
            TransactionKernelError::TooManyOutputNotes(_) => ERR_TX_OUTPUT_NOTES_OVERFLOW,
        }
    }
}

// TRANSACTION EVENT PARSING ERROR
// ================================================================================================

#[derive(Debug, Error)]
pub enum TransactionEventError {
    #[error("event id {0} is not a valid transaction event")]
    InvalidTransactionEvent(u32),
    #[error("event id {0} is not a transaction kernel event")]
    NotTransactionEvent(u32),
}

// TESTS
// ================================================================================================
