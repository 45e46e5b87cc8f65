//! Remote API state.

use darb_api::{ApiConfig, ApiResult, DarbApi};

/// Shared handle to the storefront API.
#[derive(Debug, Clone)]
pub struct ApiState {
    api: DarbApi,
    config: ApiConfig,
}

impl ApiState {
    /// Builds the API client for `config`.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        Ok(ApiState {
            api: DarbApi::new(&config)?,
            config,
        })
    }

    pub fn inner(&self) -> &DarbApi {
        &self.api
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}
