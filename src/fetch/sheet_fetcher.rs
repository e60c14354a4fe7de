use crate::error::{FlashSyncError, Result};
use std::time::Duration;
use url::Url;

/// Body of a downloaded sheet export.
#[derive(Debug, Clone)]
pub struct FetchedSheet {
    pub url: String,
    pub text: String,
}

impl FetchedSheet {
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }
}

/// One-shot HTTP GET of a published sheet.
pub struct SheetFetcher {
    url: Url,
    timeout: Option<Duration>,
}

impl SheetFetcher {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(FlashSyncError::InvalidUrl {
                    url: format!("{} (unsupported scheme '{}')", url, other),
                })
            }
        }

        Ok(Self { url, timeout: None })
    }

    /// Without a timeout the transport default applies.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn fetch(&self) -> Result<FetchedSheet> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let response = client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        let text = String::from_utf8(bytes.to_vec()).map_err(|e| FlashSyncError::Network {
            message: format!("response body is not valid UTF-8 ({})", e),
        })?;

        Ok(FetchedSheet {
            url: self.url.to_string(),
            text,
        })
    }
}
