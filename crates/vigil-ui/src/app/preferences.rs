//! Persistence and environment helpers for the app shell.

use crate::i18n::{DEFAULT_LOCALE, Locale};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::{document, window};
use serde::Serialize;
use web_sys::Url;

pub(crate) const LOCALE_KEY: &str = "vigil.locale";
pub(crate) const BUSINESS_GROUP_KEY: &str = "vigil.busi_group";
pub(crate) const ACCESS_TOKEN_KEY: &str = "vigil.access_token";
const API_BASE_META: &str = "meta[name=\"vigil-api-base\"]";

pub(crate) fn load_locale() -> Locale {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = Locale::negotiate(&value) {
            return locale;
        }
    }
    if let Some(nav) = window().navigator().language() {
        if let Some(locale) = Locale::negotiate(&nav) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_locale(locale: Locale) {
    set_storage(LOCALE_KEY, locale.tag());
}

pub(crate) fn load_business_group() -> Option<i64> {
    LocalStorage::get::<i64>(BUSINESS_GROUP_KEY).ok()
}

pub(crate) fn persist_business_group(id: Option<i64>) {
    match id {
        Some(id) => set_storage(BUSINESS_GROUP_KEY, id),
        None => LocalStorage::delete(BUSINESS_GROUP_KEY),
    }
}

pub(crate) fn load_access_token() -> Option<String> {
    LocalStorage::get::<String>(ACCESS_TOKEN_KEY)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

/// Base URL for API calls: the `vigil-api-base` meta tag when present,
/// otherwise the page origin.
pub(crate) fn api_base_url() -> String {
    let configured = document()
        .query_selector(API_BASE_META)
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    if let Some(base) = configured {
        return base;
    }

    let href = window()
        .location()
        .href()
        .unwrap_or_else(|_| "http://localhost:17000".to_string());
    match Url::new(&href) {
        Ok(url) => url.origin(),
        Err(_) => "http://localhost:17000".to_string(),
    }
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
