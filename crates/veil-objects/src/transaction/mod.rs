mod inputs;
pub use inputs::TransactionInputs;

mod outputs;
pub use outputs::{OutputNote, OutputNotes, TransactionOutputs};
