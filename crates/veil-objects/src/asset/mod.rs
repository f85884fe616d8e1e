use super::{
    AssetError, Felt, Hasher, Word,
    account::{AccountId, AccountType},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

mod fungible;
pub use fungible::FungibleAsset;

mod nonfungible;
pub use nonfungible::{NonFungibleAsset, NonFungibleAssetDetails};

// ASSET
// ================================================================================================

/// A fungible or a non-fungible asset.
///
/// All assets are encoded using a single word (4 elements) such that it is easy to determine the
/// type of an asset both inside and outside the transaction kernel. Specifically:
///
/// Element 3 of both asset types is the [`AccountId`] of the faucet which issued the asset. The
/// two most significant bits of that ID encode its [`AccountType`], which distinguishes fungible
/// from non-fungible assets.
///
/// The methodology for constructing fungible and non-fungible assets is described below.
///
/// # Fungible assets
///
/// - A fungible asset's data layout is: `[amount, 0, 0, faucet_id]`.
///
/// The most significant element is set to the ID of the faucet which issues the asset. The least
/// significant element is set to the amount of the asset. This amount cannot be greater than
/// 2^63 - 1 and thus requires 63-bits to store. Elements 1 and 2 are set to ZERO.
///
/// It is impossible to find a collision between two fungible assets issued by different faucets
/// as the faucet_id is included in the description of the asset and this is guaranteed to be
/// different for each faucet as per the faucet creation logic.
///
/// # Non-fungible assets
///
/// - A non-fungible asset's data layout is: `[hash0, hash1, hash2, faucet_id]`.
///
/// The 4 elements of non-fungible assets are computed as follows:
/// - First the asset data is hashed. This compresses an asset of an arbitrary length to 4 field
///   elements: `[hash0, hash1, hash2, hash3]`.
/// - `hash3` is then replaced with the ID of the faucet which issues the asset:
///   `[hash0, hash1, hash2, faucet_id]`.
///
/// It is impossible to find a collision between two non-fungible assets issued by different
/// faucets as the faucet_id is included in the description of the non-fungible asset and this is
/// guaranteed to be different as per the faucet creation logic. Collision resistance for
/// non-fungible assets issued by the same faucet is ~2^95.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Asset {
    Fungible(FungibleAsset),
    NonFungible(NonFungibleAsset),
}

impl Asset {
    /// Returns true if this asset is the same as the specified asset.
    ///
    /// Two assets are defined to be the same if:
    /// - For fungible assets, if they were issued by the same faucet.
    /// - For non-fungible assets, if the assets are identical.
    pub fn is_same(&self, other: &Self) -> bool {
        use Asset::*;
        match (self, other) {
            (Fungible(l), Fungible(r)) => l.is_from_same_faucet(r),
            (NonFungible(l), NonFungible(r)) => l == r,
            _ => false,
        }
    }

    /// Returns true if this asset is a fungible asset.
    pub const fn is_fungible(&self) -> bool {
        matches!(self, Self::Fungible(_))
    }

    /// Returns true if this asset is a non fungible asset.
    pub const fn is_non_fungible(&self) -> bool {
        matches!(self, Self::NonFungible(_))
    }

    /// Returns the ID of the faucet which issued this asset.
    pub fn faucet_id(&self) -> AccountId {
        match self {
            Self::Fungible(asset) => asset.faucet_id(),
            Self::NonFungible(asset) => asset.faucet_id(),
        }
    }

    /// Returns the inner [`FungibleAsset`].
    ///
    /// # Panics
    ///
    /// Panics if the asset is non-fungible.
    pub fn unwrap_fungible(&self) -> FungibleAsset {
        match self {
            Asset::Fungible(asset) => *asset,
            Asset::NonFungible(_) => panic!("the asset is non-fungible"),
        }
    }

    /// Returns the inner [`NonFungibleAsset`].
    ///
    /// # Panics
    ///
    /// Panics if the asset is fungible.
    pub fn unwrap_non_fungible(&self) -> NonFungibleAsset {
        match self {
            Asset::Fungible(_) => panic!("the asset is fungible"),
            Asset::NonFungible(asset) => *asset,
        }
    }
}

impl From<Asset> for Word {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Fungible(asset) => asset.into(),
            Asset::NonFungible(asset) => asset.into(),
        }
    }
}

impl From<&Asset> for Word {
    fn from(value: &Asset) -> Self {
        (*value).into()
    }
}

impl TryFrom<&Word> for Asset {
    type Error = AssetError;

    fn try_from(value: &Word) -> Result<Self, Self::Error> {
        (*value).try_into()
    }
}

impl TryFrom<Word> for Asset {
    type Error = AssetError;

    /// Validates that the word is a well-formed asset and returns it as an [`Asset`].
    ///
    /// The issuer element determines how the remaining elements are validated: an ID of type
    /// [`AccountType::FungibleFaucet`] selects the fungible layout, any other ID selects the
    /// non-fungible layout and must be of type [`AccountType::NonFungibleFaucet`].
    fn try_from(value: Word) -> Result<Self, Self::Error> {
        let faucet_id =
            AccountId::try_from(value[3]).map_err(AssetError::InvalidFaucetAccountId)?;

        match faucet_id.account_type() {
            AccountType::FungibleFaucet => FungibleAsset::try_from(value).map(Asset::from),
            _ => NonFungibleAsset::try_from(value).map(Asset::from),
        }
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for Asset {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        match self {
            Asset::Fungible(fungible_asset) => fungible_asset.write_into(target),
            Asset::NonFungible(non_fungible_asset) => non_fungible_asset.write_into(target),
        }
    }

    fn get_size_hint(&self) -> usize {
        match self {
            Asset::Fungible(fungible_asset) => fungible_asset.get_size_hint(),
            Asset::NonFungible(non_fungible_asset) => non_fungible_asset.get_size_hint(),
        }
    }
}

impl Deserializable for Asset {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        // Both asset types serialize their faucet ID as the first field, so we can use it to
        // inspect what type of asset it is.
        let faucet_id: AccountId = source.read()?;

        match faucet_id.account_type() {
            AccountType::FungibleFaucet => {
                FungibleAsset::deserialize_with_faucet_id(faucet_id, source).map(Asset::from)
            },
            AccountType::NonFungibleFaucet => {
                NonFungibleAsset::deserialize_with_faucet_id(faucet_id, source).map(Asset::from)
            },
            other_type => Err(DeserializationError::InvalidValue(format!(
                "failed to deserialize asset: expected an account ID of type faucet, found {other_type:?}"
            ))),
        }
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::{Asset, AssetError, FungibleAsset, NonFungibleAsset, NonFungibleAssetDetails};
    use crate::{
        Word,
        account::AccountId,
        utils::serde::{Deserializable, Serializable},
        testing::account_id::{
            ACCOUNT_ID_FUNGIBLE_FAUCET, ACCOUNT_ID_FUNGIBLE_FAUCET_1, ACCOUNT_ID_FUNGIBLE_FAUCET_2,
            ACCOUNT_ID_NON_FUNGIBLE_FAUCET, ACCOUNT_ID_NON_FUNGIBLE_FAUCET_1, ACCOUNT_ID_SENDER,
        },
    };

    #[test]
    fn asset_serde() {
        for fungible_account_id in [
            ACCOUNT_ID_FUNGIBLE_FAUCET,
            ACCOUNT_ID_FUNGIBLE_FAUCET_1,
            ACCOUNT_ID_FUNGIBLE_FAUCET_2,
        ] {
            let account_id = AccountId::try_from(fungible_account_id).unwrap();
            let fungible_asset: Asset = FungibleAsset::new(account_id, 10).unwrap().into();
            assert_eq!(fungible_asset, Asset::read_from_bytes(&fungible_asset.to_bytes()).unwrap());
        }

        for non_fungible_account_id in
            [ACCOUNT_ID_NON_FUNGIBLE_FAUCET, ACCOUNT_ID_NON_FUNGIBLE_FAUCET_1]
        {
            let account_id = AccountId::try_from(non_fungible_account_id).unwrap();
            let details = NonFungibleAssetDetails::new(account_id, vec![1, 2, 3]).unwrap();
            let non_fungible_asset: Asset = NonFungibleAsset::new(&details).unwrap().into();
            assert_eq!(
                non_fungible_asset,
                Asset::read_from_bytes(&non_fungible_asset.to_bytes()).unwrap()
            );
        }
    }

    #[test]
    fn asset_word_roundtrip() {
        let faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET).unwrap();
        let asset: Asset = FungibleAsset::new(faucet_id, 575).unwrap().into();
        assert_eq!(asset, Asset::try_from(Word::from(asset)).unwrap());

        let faucet_id = AccountId::try_from(ACCOUNT_ID_NON_FUNGIBLE_FAUCET).unwrap();
        let details = NonFungibleAssetDetails::new(faucet_id, vec![7, 8, 9]).unwrap();
        let asset: Asset = NonFungibleAsset::new(&details).unwrap().into();
        assert_eq!(asset, Asset::try_from(Word::from(asset)).unwrap());
    }

    #[test]
    fn asset_from_word_with_regular_account_issuer() {
        let sender = AccountId::try_from(ACCOUNT_ID_SENDER).unwrap();
        let mut word = Word::default();
        word[3] = sender.into();

        assert_matches!(
            Asset::try_from(word),
            Err(AssetError::NonFungibleFaucetIdTypeMismatch(id)) if id == sender
        );
    }
}
