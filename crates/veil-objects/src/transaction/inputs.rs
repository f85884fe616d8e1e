use crate::{
    Digest,
    account::AccountId,
    block::BlockNumber,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// TRANSACTION INPUTS
// ================================================================================================

/// Contains the data required to execute a transaction.
///
/// This consists of the ID of the account against which the transaction is executed and a
/// reference to the block the transaction is executed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInputs {
    account_id: AccountId,
    block_num: BlockNumber,
    block_hash: Digest,
}

impl TransactionInputs {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns new [TransactionInputs] instantiated with the provided parameters.
    pub fn new(account_id: AccountId, block_num: BlockNumber, block_hash: Digest) -> Self {
        Self { account_id, block_num, block_hash }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the ID of the account against which the transaction is executed.
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns the number of the block the transaction is executed against.
    pub fn block_num(&self) -> BlockNumber {
        self.block_num
    }

    /// Returns the hash of the block the transaction is executed against.
    pub fn block_hash(&self) -> Digest {
        self.block_hash
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for TransactionInputs {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.account_id.write_into(target);
        self.block_num.write_into(target);
        self.block_hash.write_into(target);
    }
}

impl Deserializable for TransactionInputs {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let account_id = AccountId::read_from(source)?;
        let block_num = BlockNumber::read_from(source)?;
        let block_hash = Digest::read_from(source)?;

        Ok(Self { account_id, block_num, block_hash })
    }
}

// TESTS
// ================================================================================================
