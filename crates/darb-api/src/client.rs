//! Entry point to the storefront API.

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::repository::bill::BillRepository;
use crate::repository::product::ProductRepository;
use crate::repository::user::UserRepository;

/// Handle to the storefront API, handing out repositories.
///
/// ## Usage
/// ```rust,ignore
/// let api = DarbApi::new(&ApiConfig::load(None)?)?;
/// let catalog = api.products().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct DarbApi {
    http: HttpClient,
}

impl DarbApi {
    /// Builds the HTTP client for `config`.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Ok(DarbApi {
            http: HttpClient::new(config)?,
        })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.http.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.http.clone())
    }

    pub fn bills(&self) -> BillRepository {
        BillRepository::new(self.http.clone())
    }
}
