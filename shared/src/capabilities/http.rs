use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::error::FetchError;
use crate::model::{SightRecord, Zone};

pub const MAX_URL_LENGTH: usize = 2048;

pub type FetchOutcome = Result<Vec<SightRecord>, FetchError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid URL '{url}': {reason}")]
pub struct UrlError {
    pub url: String,
    pub reason: String,
}

/// Absolute http(s) URL with a host and no embedded credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValidatedUrl {
    url: Url,
}

impl ValidatedUrl {
    pub fn new(url: impl Into<String>) -> Result<Self, UrlError> {
        let url = url.into();
        let invalid = |reason: String| UrlError {
            url: Self::truncate_url(&url),
            reason,
        };

        if url.trim().is_empty() {
            return Err(invalid("URL cannot be empty".to_string()));
        }

        if url.len() > MAX_URL_LENGTH {
            return Err(invalid(format!(
                "URL exceeds maximum length of {MAX_URL_LENGTH} bytes"
            )));
        }

        let parsed = Url::parse(&url).map_err(|e| invalid(e.to_string()))?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(invalid(format!(
                "invalid scheme '{scheme}', only 'http' and 'https' are allowed"
            )));
        }

        if parsed.host_str().is_none() {
            return Err(invalid("URL must have a host".to_string()));
        }

        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(invalid("credentials in URL are not allowed".to_string()));
        }

        Ok(Self { url: parsed })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    #[must_use]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Appends form-encoded query pairs, keeping any query already present.
    #[must_use]
    pub fn with_query(&self, pairs: &[(&str, &str)]) -> String {
        let mut url = self.url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(name, value);
            }
        }
        url.into()
    }

    fn truncate_url(url: &str) -> String {
        if url.len() <= 100 {
            url.to_string()
        } else {
            let mut end = 100;
            while !url.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &url[..end])
        }
    }
}

impl TryFrom<String> for ValidatedUrl {
    type Error = UrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ValidatedUrl> for String {
    fn from(value: ValidatedUrl) -> Self {
        value.url.into()
    }
}

/// GET target for one zone's sights.
#[must_use]
pub fn sights_url(endpoint: &ValidatedUrl, zone_param: &str, zone: &Zone) -> String {
    endpoint.with_query(&[(zone_param, zone.as_str())])
}

/// Any non-2xx status or a body that is not a JSON array of sight records is
/// a failure. An empty array is a valid result.
pub fn decode_sights(status: u16, body: &[u8]) -> FetchOutcome {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status { code: status });
    }

    serde_json::from_slice::<Vec<SightRecord>>(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Folds whatever the http capability hands back into a [`FetchOutcome`].
///
/// The capability reports 4xx and 5xx replies as `Error::Http` rather than
/// as a response, so those land in the `Status` bucket here.
pub fn outcome_from_response(result: crux_http::Result<crux_http::Response<Vec<u8>>>) -> FetchOutcome {
    match result {
        Ok(mut response) => {
            let status = u16::from(response.status());
            let body = response.take_body().unwrap_or_default();
            decode_sights(status, &body)
        }
        Err(crux_http::Error::Http(e)) => Err(FetchError::Status {
            code: u16::from(e.code),
        }),
        Err(crux_http::Error::Json(e)) => Err(FetchError::Decode(e)),
        Err(e) => Err(FetchError::Transport(e.to_string())),
    }
}
