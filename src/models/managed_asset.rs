use derive_getters::Getters;
use derive_new::new;

use super::AssetType;

#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct ManagedAsset {
    id: i64,
    ticker: String,
    asset_type: AssetType,
}
