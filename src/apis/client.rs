use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use super::{Fetch, FetchError};
use crate::config::Credentials;

const TIMEOUT: Duration = Duration::from_secs(30);

/// [`Fetch`] over a shared blocking reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("modtuple/", env!("CARGO_PKG_VERSION")))
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str, credentials: Option<&Credentials>) -> Result<Vec<u8>, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let mut request = self.client.get(url);
        if let Some(creds) = credentials {
            request = request.basic_auth(&creds.username, Some(&creds.token));
        }

        debug!(url, "GET");
        let response = request.send().map_err(transport)?;
        let status = response.status();
        match status {
            StatusCode::OK => Ok(response.bytes().map_err(transport)?.to_vec()),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(url.to_string())),
            _ => Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            }),
        }
    }
}
