#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod account;
pub mod asset;
pub mod block;
pub mod note;
pub mod transaction;

#[cfg(any(feature = "testing", test))]
pub mod testing;

mod constants;
mod errors;

// RE-EXPORTS
// ================================================================================================

pub use constants::*;
pub use errors::{AccountIdError, AssetError, NoteError, TransactionOutputError};
pub use miden_crypto::{
    EMPTY_WORD, Felt, ONE, WORD_SIZE, Word, ZERO,
    hash::rpo::{Rpo256 as Hasher, RpoDigest as Digest},
};

pub mod utils {
    use alloc::string::String;

    pub use miden_crypto::utils::HexParseError;
    use miden_crypto::Word;

    pub mod serde {
        pub use miden_crypto::utils::{
            ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable,
        };
    }

    /// Converts a word into a hex string, most significant element first.
    ///
    /// Each element is rendered as 16 hex digits of its canonical integer value, so equal words
    /// always render to equal strings.
    pub fn word_to_hex(word: &Word) -> String {
        format!(
            "0x{:016x}{:016x}{:016x}{:016x}",
            word[3].as_int(),
            word[2].as_int(),
            word[1].as_int(),
            word[0].as_int()
        )
    }
}
