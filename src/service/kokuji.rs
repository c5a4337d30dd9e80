use crate::conf::Conf;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A government notice as served by the upstream notice text API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kokuji {
    pub kokuji_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub kokuji_text: String,
    #[serde(default)]
    pub effective_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// List entry without the (potentially large) notice body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KokujiSummary {
    pub kokuji_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub effective_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Vec<KokujiSummary>,
}

pub async fn list(conf: &Conf) -> Result<Vec<KokujiSummary>> {
    let url = format!("{}/kokuji", conf.kokuji_api_url);
    let response = reqwest::Client::new().get(url).send().await?;

    info!(http_status_code = ?response.status(), "Got notice API response");

    if !response.status().is_success() {
        return Err(Error::KokujiApi(format!(
            "Notice API returned HTTP {}",
            response.status()
        )));
    }

    Ok(response.json::<ListResponse>().await?.data)
}

pub async fn fetch(kokuji_id: &str, conf: &Conf) -> Result<Kokuji> {
    let url = format!("{}/kokuji/{}", conf.kokuji_api_url, kokuji_id);
    let response = reqwest::Client::new().get(url).send().await?;

    info!(http_status_code = ?response.status(), kokuji_id, "Got notice API response");

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(Error::NotFound(format!("No notice with ID {kokuji_id}")));
    }

    if !response.status().is_success() {
        return Err(Error::KokujiApi(format!(
            "Notice API returned HTTP {}",
            response.status()
        )));
    }

    Ok(response.json::<Kokuji>().await?)
}
