// Asset endpoints
//
// Paginated asset listing and the composite per-asset analytics payload.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiAssetDetail, AssetPage};

impl ApiClient {
    /// List monitored assets, one page at a time.
    ///
    /// `GET company/get_assets?page={page}&limit={limit}`
    pub async fn list_assets(&self, page: u32, limit: u32) -> Result<AssetPage, Error> {
        let url = self.endpoint_url("company/get_assets")?;
        debug!(page, limit, "listing assets");
        self.get_with_query(url, &[("page", page), ("limit", limit)])
            .await
    }

    /// Fetch detection, enforcement, and torrent analytics for one asset.
    ///
    /// `GET company/get_asset_detail/{id}`
    pub async fn get_asset_detail(&self, asset_id: u64) -> Result<ApiAssetDetail, Error> {
        let url = self.endpoint_url(&format!("company/get_asset_detail/{asset_id}"))?;
        debug!(asset_id, "fetching asset detail");
        self.get(url).await
    }
}
