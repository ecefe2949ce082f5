//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - The bearer token is read from storage once, at boot.

use crate::core::logic::build_busi_groups_path;
use crate::models::BusinessGroup;
use crate::services::ApiError;
use crate::services::api::ApiClient;
use std::rc::Rc;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
}

impl ApiCtx {
    /// Create a new context with the configured base URL and stored token.
    pub(crate) fn new(base_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            client: Rc::new(ApiClient::new(base_url, access_token)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}

/// Load the business groups visible to the user.
pub(crate) async fn fetch_business_groups(
    client: &ApiClient,
) -> Result<Vec<BusinessGroup>, ApiError> {
    client.get_envelope(&build_busi_groups_path()).await
}
