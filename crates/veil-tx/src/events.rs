use core::fmt;

use crate::errors::TransactionEventError;

// CONSTANTS
// ================================================================================================

const NOTE_BEFORE_CREATED: u32 = 0x2_0000; // 131072
const NOTE_AFTER_CREATED: u32 = 0x2_0001; // 131073

const NOTE_BEFORE_ADD_ASSET: u32 = 0x2_0002; // 131074
const NOTE_AFTER_ADD_ASSET: u32 = 0x2_0003; // 131075

// TRANSACTION EVENT
// ================================================================================================

/// Events which may be emitted by the transaction kernel.
///
/// The event ID is a 32-bit unsigned integer which is used to identify the event type. For events
/// emitted by the transaction kernel, the event ID is structured as follows:
/// - The upper 16 bits of the event ID are set to 2.
/// - The lower 16 bits represent a unique event ID within the transaction kernel.
#[repr(u32)]
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TransactionEvent {
    NoteBeforeCreated = NOTE_BEFORE_CREATED,
    NoteAfterCreated = NOTE_AFTER_CREATED,

    NoteBeforeAddAsset = NOTE_BEFORE_ADD_ASSET,
    NoteAfterAddAsset = NOTE_AFTER_ADD_ASSET,
}

impl TransactionEvent {
    /// Value of the top 16 bits of a transaction kernel event ID.
    pub const ID_PREFIX: u32 = 2;
}

impl fmt::Display for TransactionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl TryFrom<u32> for TransactionEvent {
    type Error = TransactionEventError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value >> 16 != TransactionEvent::ID_PREFIX {
            return Err(TransactionEventError::NotTransactionEvent(value));
        }

        match value {
            NOTE_BEFORE_CREATED => Ok(TransactionEvent::NoteBeforeCreated),
            NOTE_AFTER_CREATED => Ok(TransactionEvent::NoteAfterCreated),

            NOTE_BEFORE_ADD_ASSET => Ok(TransactionEvent::NoteBeforeAddAsset),
            NOTE_AFTER_ADD_ASSET => Ok(TransactionEvent::NoteAfterAddAsset),

            _ => Err(TransactionEventError::InvalidTransactionEvent(value)),
        }
    }
}

// TESTS
// ================================================================================================
