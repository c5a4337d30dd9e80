use std::env;

/// Runtime configuration, resolved once at startup and injected into
/// request handlers via `web::Data`. Nothing else in the codebase is
/// allowed to read environment variables.
#[derive(Clone)]
pub struct Conf {
    pub http_addr: String,
    pub zenrin_api_key: String,
    pub zenrin_search_url: String,
    pub zenrin_wms_url: String,
    pub kokuji_api_url: String,
}

impl Conf {
    pub fn from_env() -> Conf {
        Conf {
            http_addr: var_or("HTTP_ADDR", "127.0.0.1:8000"),
            zenrin_api_key: var_or("ZENRIN_API_KEY", ""),
            zenrin_search_url: var_or(
                "ZENRIN_SEARCH_URL",
                "https://test-web.zmaps-api.com/search/address",
            ),
            zenrin_wms_url: var_or("ZENRIN_WMS_URL", "https://test-web.zmaps-api.com/map/wms/pref"),
            kokuji_api_url: var_or("KOKUJI_API_URL", "https://kokujiapi.excite.co.jp/v1"),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.into())
}
