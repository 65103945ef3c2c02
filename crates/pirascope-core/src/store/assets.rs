// ── Asset store ──

use std::sync::Arc;

use tracing::debug;

use pirascope_api::ApiClient;

use super::cell::StateCell;
use super::{begin, fail, impl_loadable};
use crate::convert::asset_page;
use crate::error::CoreError;
use crate::model::{Asset, AssetDetail, PageInfo};
use crate::notify::Notifier;
use crate::stream::StateStream;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AssetState {
    pub assets: Vec<Asset>,
    pub selected_asset: Option<Asset>,
    pub asset_detail: Option<AssetDetail>,
    pub total_assets: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AssetState {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            selected_asset: None,
            asset_detail: None,
            total_assets: 0,
            current_page: 1,
            total_pages: 1,
            page_size: DEFAULT_PAGE_SIZE,
            is_loading: false,
            error: None,
        }
    }
}

impl_loadable!(AssetState);

impl AssetState {
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            total: self.total_assets,
            page: self.current_page,
            limit: self.page_size,
            total_pages: self.total_pages,
        }
    }

    /// The loaded detail, but only when it belongs to the selected asset.
    pub fn selected_detail(&self) -> Option<&AssetDetail> {
        let selected = self.selected_asset.as_ref()?;
        self.asset_detail
            .as_ref()
            .filter(|d| d.asset.id == selected.id)
    }
}

/// Monitored assets: the paged list, the selection, and its analytics.
pub struct AssetStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: StateCell<AssetState>,
}

impl AssetStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: StateCell::new(AssetState::default()),
        }
    }

    pub fn state(&self) -> Arc<AssetState> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> StateStream<AssetState> {
        self.state.subscribe()
    }

    /// Load one page, replacing the cached list and pagination metadata.
    pub async fn get_assets(&self, page: u32, limit: u32) -> Result<(), CoreError> {
        begin(&self.state);
        match self.api.list_assets(page.max(1), limit.max(1)).await {
            Ok(resp) => {
                let (assets, info) = asset_page(resp);
                debug!(count = assets.len(), page = info.page, "assets loaded");
                self.state.update(|s| {
                    s.assets = assets;
                    s.total_assets = info.total;
                    s.current_page = info.page;
                    s.total_pages = info.total_pages;
                    s.page_size = limit.max(1);
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                fail(&self.state, self.notifier.as_ref(), &err, "Failed to fetch assets");
                Err(err)
            }
        }
    }

    /// Change the selection. Selecting an asset loads its detail;
    /// clearing the selection drops the detail without a request.
    pub async fn select_asset(&self, asset: Option<Asset>) -> Result<(), CoreError> {
        match asset {
            Some(asset) => {
                let id = asset.id;
                self.state.update(|s| s.selected_asset = Some(asset));
                self.get_asset_detail(id).await
            }
            None => {
                self.state.update(|s| {
                    s.selected_asset = None;
                    s.asset_detail = None;
                });
                Ok(())
            }
        }
    }

    /// Select by id: from the cached page when present, otherwise via the
    /// detail endpoint (whose payload embeds the asset).
    pub async fn select_asset_by_id(&self, asset_id: u64) -> Result<(), CoreError> {
        let cached = self
            .state
            .read(|s| s.assets.iter().find(|a| a.id == asset_id).cloned());
        if let Some(asset) = cached {
            return self.select_asset(Some(asset)).await;
        }
        self.get_asset_detail(asset_id).await?;
        self.state.update(|s| {
            s.selected_asset = s.asset_detail.as_ref().map(|d| d.asset.clone());
        });
        Ok(())
    }

    pub async fn get_asset_detail(&self, asset_id: u64) -> Result<(), CoreError> {
        begin(&self.state);
        match self.api.get_asset_detail(asset_id).await {
            Ok(detail) => {
                let detail = AssetDetail::from(detail);
                debug!(
                    asset_id,
                    has_torrent = detail.torrent.is_some(),
                    "asset detail loaded"
                );
                self.state.update(|s| {
                    s.asset_detail = Some(detail);
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                fail(
                    &self.state,
                    self.notifier.as_ref(),
                    &err,
                    "Failed to fetch asset details",
                );
                Err(err)
            }
        }
    }
}
