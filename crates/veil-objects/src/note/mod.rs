use super::{
    Digest, Felt, Hasher, NoteError, Word,
    account::AccountId,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

mod assets;
pub use assets::NoteAssets;

mod execution_hint;
pub use execution_hint::{AfterBlockNumber, NoteExecutionHint};

mod metadata;
pub use metadata::NoteMetadata;

mod note_id;
pub use note_id::NoteId;

mod note_tag;
pub use note_tag::{NoteExecutionMode, NoteTag};

mod note_type;
pub use note_type::NoteType;
