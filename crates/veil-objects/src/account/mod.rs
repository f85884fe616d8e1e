use alloc::string::{String, ToString};
use core::fmt;

use crate::{
    Felt,
    errors::AccountIdError,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// ACCOUNT TYPE
// ================================================================================================

const FUNGIBLE_FAUCET: u8 = 0b10;
const NON_FUNGIBLE_FAUCET: u8 = 0b11;
const REGULAR_ACCOUNT_IMMUTABLE_CODE: u8 = 0b00;
const REGULAR_ACCOUNT_UPDATABLE_CODE: u8 = 0b01;

/// Represents the different account types recognized by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum AccountType {
    FungibleFaucet = FUNGIBLE_FAUCET,
    NonFungibleFaucet = NON_FUNGIBLE_FAUCET,
    RegularAccountImmutableCode = REGULAR_ACCOUNT_IMMUTABLE_CODE,
    RegularAccountUpdatableCode = REGULAR_ACCOUNT_UPDATABLE_CODE,
}

impl AccountType {
    /// Returns `true` if the account is a faucet.
    pub fn is_faucet(&self) -> bool {
        matches!(self, Self::FungibleFaucet | Self::NonFungibleFaucet)
    }

    /// Returns `true` if the account is a regular account.
    pub fn is_regular_account(&self) -> bool {
        matches!(self, Self::RegularAccountImmutableCode | Self::RegularAccountUpdatableCode)
    }

    fn as_str(&self) -> &'static str {
        match self {
            AccountType::FungibleFaucet => "FungibleFaucet",
            AccountType::NonFungibleFaucet => "NonFungibleFaucet",
            AccountType::RegularAccountImmutableCode => "RegularAccountImmutableCode",
            AccountType::RegularAccountUpdatableCode => "RegularAccountUpdatableCode",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ACCOUNT ID
// ================================================================================================

/// The identifier of an account.
///
/// # Layout
///
/// An `AccountId` is a single field element laid out as follows:
///
/// ```text
/// [type (2 bits) | random (62 bits)]
/// ```
///
/// The two most significant bits encode the [`AccountType`], so the type of the issuer can be
/// read off any value that embeds the ID, e.g. an asset word. The remaining bits are derived
/// from a commitment to the account's initial code and storage, which is why a valid ID must
/// additionally contain a minimum number of one-bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(Felt);

impl AccountId {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// Specifies a minimum number of ones for a valid account ID.
    pub const MIN_ACCOUNT_ONES: u32 = 5;

    /// The two most significant bits of the ID determine the account type.
    pub(crate) const TYPE_SHIFT: u64 = 62;
    pub(crate) const TYPE_MASK: u64 = 0b11 << Self::TYPE_SHIFT;

    pub(crate) const IS_FAUCET_MASK: u64 = 0b10 << Self::TYPE_SHIFT;

    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns an [`AccountId`] instantiated with the provided field element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not contain at least
    /// [`MIN_ACCOUNT_ONES`](Self::MIN_ACCOUNT_ONES) one-bits.
    pub fn new(value: Felt) -> Result<Self, AccountIdError> {
        let ones_count = value.as_int().count_ones();
        if ones_count < Self::MIN_ACCOUNT_ONES {
            return Err(AccountIdError::AccountIdTooFewOnes(ones_count));
        }

        Ok(Self(value))
    }

    /// Returns an [`AccountId`] instantiated with the provided field element without checking
    /// its validity.
    ///
    /// The caller is expected to provide an element which encodes a valid account ID.
    pub const fn new_unchecked(value: Felt) -> Self {
        Self(value)
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the type of this account ID.
    pub const fn account_type(&self) -> AccountType {
        extract_type(self.0.as_int())
    }

    /// Returns true if an account with this ID is a faucet which can issue assets.
    pub const fn is_faucet(&self) -> bool {
        self.0.as_int() & Self::IS_FAUCET_MASK != 0
    }

    /// Returns true if an account with this ID is a regular account.
    pub fn is_regular_account(&self) -> bool {
        self.account_type().is_regular_account()
    }

    /// Returns a big-endian, hex-encoded string of length 18, including the `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{:016x}", self.0.as_int())
    }
}

// CONVERSIONS FROM ACCOUNT ID
// ================================================================================================

impl From<AccountId> for Felt {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl From<AccountId> for u64 {
    fn from(id: AccountId) -> Self {
        id.0.as_int()
    }
}

// CONVERSIONS TO ACCOUNT ID
// ================================================================================================

impl TryFrom<Felt> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: Felt) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u64> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let element =
            Felt::try_from(value).map_err(|_| AccountIdError::AccountIdNotAFieldElement(value))?;
        Self::new(element)
    }
}

// COMMON TRAIT IMPLS
// ================================================================================================

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.as_int().cmp(&other.0.as_int())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for AccountId {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.0.as_int().write_into(target);
    }

    fn get_size_hint(&self) -> usize {
        core::mem::size_of::<u64>()
    }
}

impl Deserializable for AccountId {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let value: u64 = source.read()?;
        AccountId::try_from(value)
            .map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Extracts the [`AccountType`] encoded in the two most significant bits of `value`.
pub(crate) const fn extract_type(value: u64) -> AccountType {
    let bits = ((value & AccountId::TYPE_MASK) >> AccountId::TYPE_SHIFT) as u8;
    match bits {
        REGULAR_ACCOUNT_UPDATABLE_CODE => AccountType::RegularAccountUpdatableCode,
        REGULAR_ACCOUNT_IMMUTABLE_CODE => AccountType::RegularAccountImmutableCode,
        FUNGIBLE_FAUCET => AccountType::FungibleFaucet,
        NON_FUNGIBLE_FAUCET => AccountType::NonFungibleFaucet,
        _ => {
            // SAFETY: the type mask covers only 2 bits and we've matched all 4 possible options.
            unreachable!()
        },
    }
}

// TESTS
// ================================================================================================
