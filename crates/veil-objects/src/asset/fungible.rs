use alloc::string::ToString;
use core::fmt;

use super::{AccountId, AccountType, Asset, AssetError, Felt, Word};
use crate::{
    ZERO,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// FUNGIBLE ASSET
// ================================================================================================
/// A fungible asset.
///
/// A fungible asset consists of a faucet ID of the faucet which issued the asset as well as the
/// asset amount. Asset amount is guaranteed to be 2^63 - 1 or smaller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FungibleAsset {
    faucet_id: AccountId,
    amount: u64,
}

impl FungibleAsset {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------
    /// Specifies a maximum amount value for fungible assets which can be at most a 63-bit value.
    pub const MAX_AMOUNT: u64 = (1_u64 << 63) - 1;

    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns a fungible asset instantiated with the provided faucet ID and amount.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The faucet_id is not a valid fungible faucet ID.
    /// - The provided amount is greater than 2^63 - 1.
    pub const fn new(faucet_id: AccountId, amount: u64) -> Result<Self, AssetError> {
        let asset = Self { faucet_id, amount };
        asset.validate()
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the ID of the faucet which issued this asset.
    pub fn faucet_id(&self) -> AccountId {
        self.faucet_id
    }

    /// Returns the amount of this asset.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Returns true if this and the other assets were issued from the same faucet.
    pub fn is_from_same_faucet(&self, other: &Self) -> bool {
        self.faucet_id == other.faucet_id
    }

    // OPERATIONS
    // --------------------------------------------------------------------------------------------

    /// Adds two fungible assets together and returns the result.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The assets were not issued by the same faucet.
    /// - The total value of assets is greater than or equal to 2^63.
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Self) -> Result<Self, AssetError> {
        if self.faucet_id != other.faucet_id {
            return Err(AssetError::FungibleAssetInconsistentFaucetIds {
                original_issuer: self.faucet_id,
                other_issuer: other.faucet_id,
            });
        }

        let amount = self
            .amount
            .checked_add(other.amount)
            .expect("even MAX_AMOUNT + MAX_AMOUNT should not overflow u64");
        if amount > Self::MAX_AMOUNT {
            return Err(AssetError::FungibleAssetAmountTooBig(amount));
        }

        Ok(Self { faucet_id: self.faucet_id, amount })
    }

    // HELPER FUNCTIONS
    // --------------------------------------------------------------------------------------------

    /// Validates this fungible asset.
    /// # Errors
    /// Returns an error if:
    /// - The faucet_id is not a valid fungible faucet ID.
    /// - The provided amount is greater than 2^63 - 1.
    const fn validate(self) -> Result<Self, AssetError> {
        let account_type = self.faucet_id.account_type();
        if !matches!(account_type, AccountType::FungibleFaucet) {
            return Err(AssetError::FungibleFaucetIdTypeMismatch(self.faucet_id));
        }

        if self.amount > Self::MAX_AMOUNT {
            return Err(AssetError::FungibleAssetAmountTooBig(self.amount));
        }

        Ok(self)
    }
}

impl From<FungibleAsset> for Word {
    fn from(asset: FungibleAsset) -> Self {
        let mut result = Word::default();
        result[0] = Felt::new(asset.amount);
        result[3] = asset.faucet_id.into();
        result
    }
}

impl From<FungibleAsset> for Asset {
    fn from(asset: FungibleAsset) -> Self {
        Asset::Fungible(asset)
    }
}

impl TryFrom<Word> for FungibleAsset {
    type Error = AssetError;

    fn try_from(value: Word) -> Result<Self, Self::Error> {
        if value[1] != ZERO || value[2] != ZERO {
            return Err(AssetError::FungibleAssetExpectedZero(value));
        }
        let faucet_id =
            AccountId::try_from(value[3]).map_err(AssetError::InvalidFaucetAccountId)?;
        let amount = value[0].as_int();
        Self::new(faucet_id, amount)
    }
}

impl fmt::Display for FungibleAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for FungibleAsset {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        // All assets should serialize their faucet ID at the first position to allow them to be
        // distinguishable during deserialization.
        target.write(self.faucet_id);
        target.write(self.amount);
    }

    fn get_size_hint(&self) -> usize {
        self.faucet_id.get_size_hint() + self.amount.get_size_hint()
    }
}

impl Deserializable for FungibleAsset {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let faucet_id: AccountId = source.read()?;
        FungibleAsset::deserialize_with_faucet_id(faucet_id, source)
    }
}

impl FungibleAsset {
    /// Deserializes a [`FungibleAsset`] from an [`AccountId`] and the remaining data from the
    /// given `source`.
    pub(super) fn deserialize_with_faucet_id<R: ByteReader>(
        faucet_id: AccountId,
        source: &mut R,
    ) -> Result<Self, DeserializationError> {
        let amount: u64 = source.read()?;
        FungibleAsset::new(faucet_id, amount)
            .map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{
        account::AccountId,
        testing::account_id::{
            ACCOUNT_ID_FUNGIBLE_FAUCET, ACCOUNT_ID_FUNGIBLE_FAUCET_1,
            ACCOUNT_ID_NON_FUNGIBLE_FAUCET,
        },
    };

    #[test]
    fn fungible_asset_serde() {
        for fungible_account_id in [ACCOUNT_ID_FUNGIBLE_FAUCET, ACCOUNT_ID_FUNGIBLE_FAUCET_1] {
            let account_id = AccountId::try_from(fungible_account_id).unwrap();
            let fungible_asset = FungibleAsset::new(account_id, 10).unwrap();
            assert_eq!(
                fungible_asset,
                FungibleAsset::read_from_bytes(&fungible_asset.to_bytes()).unwrap()
            );
        }
    }

    #[test]
    fn fungible_asset_new_validates_amount() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET).unwrap();

        assert!(FungibleAsset::new(faucet_id, FungibleAsset::MAX_AMOUNT).is_ok());
        assert_matches!(
            FungibleAsset::new(faucet_id, FungibleAsset::MAX_AMOUNT + 1),
            Err(AssetError::FungibleAssetAmountTooBig(_))
        );
    }

    #[test]
    fn fungible_asset_new_rejects_non_fungible_faucet() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_NON_FUNGIBLE_FAUCET).unwrap();
        assert_matches!(
            FungibleAsset::new(faucet_id, 10),
            Err(AssetError::FungibleFaucetIdTypeMismatch(_))
        );
    }

    #[test]
    fn fungible_asset_add() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET).unwrap();
        let other_faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET_1).unwrap();

        let asset = FungibleAsset::new(faucet_id, 100).unwrap();
        let other = FungibleAsset::new(faucet_id, 50).unwrap();
        assert_eq!(asset.add(other).unwrap().amount(), 150);

        // sum overflowing the maximum amount is rejected
        let other = FungibleAsset::new(faucet_id, FungibleAsset::MAX_AMOUNT).unwrap();
        assert_matches!(asset.add(other), Err(AssetError::FungibleAssetAmountTooBig(_)));

        // assets from different faucets cannot be added
        let other = FungibleAsset::new(other_faucet_id, 50).unwrap();
        assert_matches!(
            asset.add(other),
            Err(AssetError::FungibleAssetInconsistentFaucetIds { .. })
        );
    }

    #[test]
    fn fungible_asset_word_encoding() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET).unwrap();
        let asset = FungibleAsset::new(faucet_id, 123).unwrap();

        let word = Word::from(asset);
        assert_eq!(word[0].as_int(), 123);
        assert_eq!(word[1], ZERO);
        assert_eq!(word[2], ZERO);
        assert_eq!(word[3].as_int(), ACCOUNT_ID_FUNGIBLE_FAUCET);

        assert_eq!(FungibleAsset::try_from(word).unwrap(), asset);
    }
}
