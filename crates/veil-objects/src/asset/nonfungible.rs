use alloc::{string::ToString, vec::Vec};
use core::fmt;

use super::{AccountId, AccountType, Asset, AssetError, Felt, Hasher, Word};
use crate::{
    ZERO,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// Position of the faucet ID within the word encoding a [`NonFungibleAsset`].
const FAUCET_ID_POS: usize = 3;

// NON-FUNGIBLE ASSET
// ================================================================================================

/// A commitment to a non-fungible asset.
///
/// The commitment is constructed as follows:
///
/// - Hash the asset data producing: `[d0, d1, d2, d3]`.
/// - Replace the value of `d3` with the faucet ID which issued the asset producing:
///   `[d0, d1, d2, faucet_id]`.
///
/// The reason for the replacement is to be able to identify the faucet an asset was issued by
/// from the asset representation itself. This strategy is feasible because even for a single
/// faucet the probability of a collision between two unique assets is ~2^-192.
///
/// [`NonFungibleAsset`] itself does not contain the actual asset data. The container for this
/// data is [`NonFungibleAssetDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct NonFungibleAsset(Word);

impl NonFungibleAsset {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a non-fungible asset created from the specified asset details.
    ///
    /// # Errors
    /// Returns an error if the faucet specified by the details is not a non-fungible faucet.
    pub fn new(details: &NonFungibleAssetDetails) -> Result<Self, AssetError> {
        let data_hash = Hasher::hash(details.asset_data());
        Self::from_parts(details.faucet_id(), data_hash.into())
    }

    /// Returns a non-fungible asset created from the specified faucet and the hash of the
    /// asset's data.
    ///
    /// The hash is expected to be computed from the binary representation of the asset's data.
    ///
    /// # Errors
    /// Returns an error if the provided faucet ID is not an ID of a non-fungible faucet.
    pub fn from_parts(faucet_id: AccountId, mut data_hash: Word) -> Result<Self, AssetError> {
        if !matches!(faucet_id.account_type(), AccountType::NonFungibleFaucet) {
            return Err(AssetError::NonFungibleFaucetIdTypeMismatch(faucet_id));
        }

        data_hash[FAUCET_ID_POS] = faucet_id.into();
        Ok(Self(data_hash))
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the ID of the faucet which issued this asset.
    pub const fn faucet_id(&self) -> AccountId {
        AccountId::new_unchecked(self.0[FAUCET_ID_POS])
    }

    // HELPER FUNCTIONS
    // --------------------------------------------------------------------------------------------

    /// Checks that the word encoding this asset carries a valid non-fungible faucet ID.
    ///
    /// # Errors
    /// Returns an error if the faucet ID is not a valid field element or does not identify a
    /// non-fungible faucet.
    fn validate(&self) -> Result<(), AssetError> {
        let faucet_id = AccountId::try_from(self.0[FAUCET_ID_POS])
            .map_err(AssetError::InvalidFaucetAccountId)?;

        if !matches!(faucet_id.account_type(), AccountType::NonFungibleFaucet) {
            return Err(AssetError::NonFungibleFaucetIdTypeMismatch(faucet_id));
        }

        Ok(())
    }
}

// CONVERSIONS
// ================================================================================================

impl From<NonFungibleAsset> for Word {
    fn from(asset: NonFungibleAsset) -> Self {
        asset.0
    }
}

impl From<NonFungibleAsset> for Asset {
    fn from(asset: NonFungibleAsset) -> Self {
        Asset::NonFungible(asset)
    }
}

impl TryFrom<Word> for NonFungibleAsset {
    type Error = AssetError;

    fn try_from(value: Word) -> Result<Self, Self::Error> {
        let asset = Self(value);
        asset.validate()?;
        Ok(asset)
    }
}

impl fmt::Display for NonFungibleAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for NonFungibleAsset {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        // All assets should serialize their faucet ID at the first position to allow them to be
        // distinguishable during deserialization.
        target.write(self.faucet_id());
        target.write(self.0[0]);
        target.write(self.0[1]);
        target.write(self.0[2]);
    }

    fn get_size_hint(&self) -> usize {
        size_of::<Word>()
    }
}

impl Deserializable for NonFungibleAsset {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let faucet_id: AccountId = source.read()?;
        Self::deserialize_with_faucet_id(faucet_id, source)
    }
}

impl NonFungibleAsset {
    /// Deserializes a [`NonFungibleAsset`] from an [`AccountId`] and the remaining data from the
    /// given `source`.
    pub(super) fn deserialize_with_faucet_id<R: ByteReader>(
        faucet_id: AccountId,
        source: &mut R,
    ) -> Result<Self, DeserializationError> {
        let hash_0: Felt = source.read()?;
        let hash_1: Felt = source.read()?;
        let hash_2: Felt = source.read()?;

        // The last element is replaced by the faucet ID in from_parts.
        let data_hash = [hash_0, hash_1, hash_2, ZERO];
        Self::from_parts(faucet_id, data_hash)
            .map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}

// NON-FUNGIBLE ASSET DETAILS
// ================================================================================================

/// Full details of a non-fungible asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFungibleAssetDetails {
    faucet_id: AccountId,
    asset_data: Vec<u8>,
}

impl NonFungibleAssetDetails {
    /// Returns asset details instantiated from the specified faucet ID and asset data.
    ///
    /// # Errors
    /// Returns an error if the provided faucet ID is not an ID of a non-fungible faucet.
    pub fn new(faucet_id: AccountId, asset_data: Vec<u8>) -> Result<Self, AssetError> {
        if !matches!(faucet_id.account_type(), AccountType::NonFungibleFaucet) {
            return Err(AssetError::NonFungibleFaucetIdTypeMismatch(faucet_id));
        }

        Ok(Self { faucet_id, asset_data })
    }

    /// Returns the ID of the faucet which issued this asset.
    pub fn faucet_id(&self) -> AccountId {
        self.faucet_id
    }

    /// Returns the asset data in binary format.
    pub fn asset_data(&self) -> &[u8] {
        &self.asset_data
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::testing::account_id::{
        ACCOUNT_ID_FUNGIBLE_FAUCET, ACCOUNT_ID_NON_FUNGIBLE_FAUCET,
        ACCOUNT_ID_NON_FUNGIBLE_FAUCET_1,
    };

    #[test]
    fn nonfungible_asset_serde() {
        for faucet_id in [ACCOUNT_ID_NON_FUNGIBLE_FAUCET, ACCOUNT_ID_NON_FUNGIBLE_FAUCET_1] {
            let faucet_id = AccountId::try_from(faucet_id).unwrap();
            let details = NonFungibleAssetDetails::new(faucet_id, vec![1, 2, 3]).unwrap();
            let asset = NonFungibleAsset::new(&details).unwrap();
            assert_eq!(asset, NonFungibleAsset::read_from_bytes(&asset.to_bytes()).unwrap());
        }
    }

    #[test]
    fn nonfungible_asset_embeds_faucet_id() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_NON_FUNGIBLE_FAUCET).unwrap();
        let details = NonFungibleAssetDetails::new(faucet_id, vec![5; 32]).unwrap();
        let asset = NonFungibleAsset::new(&details).unwrap();
        assert_eq!(asset.faucet_id(), faucet_id);

        let word = Word::from(asset);
        assert_eq!(word[FAUCET_ID_POS], faucet_id.into());
    }

    #[test]
    fn nonfungible_asset_rejects_fungible_faucet() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET).unwrap();

        assert_matches!(
            NonFungibleAssetDetails::new(faucet_id, vec![1, 2, 3]),
            Err(AssetError::NonFungibleFaucetIdTypeMismatch(id)) if id == faucet_id
        );

        let hash = [ZERO, ZERO, ZERO, faucet_id.into()];
        assert_matches!(
            NonFungibleAsset::try_from(hash),
            Err(AssetError::NonFungibleFaucetIdTypeMismatch(id)) if id == faucet_id
        );
    }
}
