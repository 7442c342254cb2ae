// Page configuration read from `data-*` attributes.
// Kept free of DOM types: callers pass an attribute lookup.

use crate::constants::{DEFAULT_CACHE_KEY, DEFAULT_ENDPOINT};
use cake_core::CakeParams;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct PageConfig {
    pub params: CakeParams,
    /// Fixed seed for reproducible sessions; random when absent.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuestbookConfig {
    pub cache_key: String,
    pub endpoint: String,
    pub wishes_url: Option<String>,
}

fn parse_attr<T: FromStr>(attr: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = attr(name)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[config] ignoring {}={:?}", name, raw);
            None
        }
    }
}

/// Read scene overrides from the canvas container. Overrides that leave the
/// parameters invalid are dropped as a whole.
pub fn page_config(attr: impl Fn(&str) -> Option<String>) -> PageConfig {
    let defaults = CakeParams::default();
    let mut params = defaults.clone();
    if let Some(n) = parse_attr::<usize>(&attr, "data-candles") {
        params.candle_count = n;
    }
    if let Some(v) = parse_attr::<f32>(&attr, "data-mic-threshold") {
        params.mic_threshold = v;
    }
    if let Some(v) = parse_attr::<f32>(&attr, "data-blow-sensitivity") {
        params.blow_sensitivity = v;
    }
    if let Some(msg) = attr("data-message").filter(|m| !m.trim().is_empty()) {
        params.celebration_message = msg;
    }
    let params = match params.validate() {
        Ok(()) => params,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            defaults
        }
    };
    PageConfig {
        params,
        seed: parse_attr::<u64>(&attr, "data-seed"),
    }
}

/// Read guestbook settings from the wishes form.
pub fn guestbook_config(attr: impl Fn(&str) -> Option<String>) -> GuestbookConfig {
    let non_empty = |name: &str| attr(name).filter(|v| !v.trim().is_empty());
    GuestbookConfig {
        cache_key: non_empty("data-cache-key").unwrap_or_else(|| DEFAULT_CACHE_KEY.to_string()),
        endpoint: non_empty("data-endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        wishes_url: non_empty("data-wishes-url"),
    }
}
