#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub use veil_objects::transaction::{TransactionInputs, TransactionOutputs};

mod events;
pub use events::TransactionEvent;

mod kernel;
pub use kernel::{OutputNoteBuilder, TransactionKernel};

mod observer;
pub use observer::{DefaultObserver, TransactionObserver};

pub mod errors;
pub use errors::{TransactionEventError, TransactionKernelError};

#[cfg(test)]
mod tests;

// RE-EXPORTS
// ================================================================================================
pub use veil_objects::utils;
