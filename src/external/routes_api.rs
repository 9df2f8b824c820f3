use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::Config,
    entities::{ActiveRoute, School},
    error::Error,
};

use super::check_status;

/// Client for the school routes backend.
#[derive(Clone, Debug)]
pub struct RoutesClient {
    client: reqwest::Client,
    api_base: String,
}

impl RoutesClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.routes_api_base.clone(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_schools(&self) -> Result<Vec<School>, Error> {
        self.get(&format!("https://{}/schools", self.api_base)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_route(&self, school_id: &str, route_id: &str) -> Result<ActiveRoute, Error> {
        self.get(&route_url(&self.api_base, school_id, route_id)).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let res = self.client.get(url).send().await?;

        check_status(res.status().as_u16())?;

        let body: Value = res.json().await?;

        unwrap_data(body)
    }
}

fn route_url(api_base: &str, school_id: &str, route_id: &str) -> String {
    format!(
        "https://{}/schools/{}/routes/{}",
        api_base.trim_end_matches('/'),
        school_id,
        route_id
    )
}

/// The backend sometimes wraps payloads as `{"data": ...}`.
fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<T, Error> {
    let payload = match body {
        Value::Object(mut map) if map.get("data").map_or(false, |data| !data.is_null()) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        body => body,
    };

    Ok(serde_json::from_value(payload)?)
}
