//! HTTP client for the FMCSA QCMobile carrier API.
//!
//! Verification takes two sequential lookups: the MC (docket) number is
//! resolved to a DOT number, then the DOT number's operation
//! classifications are checked for for-hire authority.
//!
//! Upstream failures never surface to callers. A failed docket lookup
//! reads as "no carrier", a failed classification lookup as "not
//! authorized"; both are logged. There is no retry and no timeout beyond
//! the transport default.

use std::fmt;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{DeskError, DeskResult};
use crate::models::{Carrier, Verification};

use super::types::{ClassificationResponse, DocketResponse};

/// Client for the two regulator endpoints used in carrier verification.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct FmcsaClient {
    http: Client,
    base_url: Url,
    web_key: String,
}

impl fmt::Debug for FmcsaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmcsaClient")
            .field("base_url", &self.base_url.as_str())
            .field("web_key", &"[REDACTED]")
            .finish()
    }
}

impl FmcsaClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// `web_key` is sent as the `webKey` query parameter on every request.
    pub fn new(base_url: Url, web_key: impl Into<String>) -> DeskResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(DeskError::ConfigInvalid {
                var: "FMCSA_API_BASE".to_string(),
                message: format!("'{}' cannot be used as a base URL", base_url),
            });
        }

        let http = Client::builder()
            .build()
            .map_err(|e| DeskError::Internal {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url,
            web_key: web_key.into(),
        })
    }

    /// Resolves an MC number to the carrier it belongs to.
    ///
    /// All non-digit characters are stripped first, so `"MC-123456"` and
    /// `"123456"` are the same query.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(carrier))` for the first carrier on the docket
    /// - `Ok(None)` if there is none, or the lookup failed upstream
    /// - `Err(InvalidMcNumber)` if the input has no digits
    pub async fn resolve_mc_to_dot(&self, mc_number: &str) -> DeskResult<Option<Carrier>> {
        let digits = mc_digits(mc_number)?;
        let url = self.endpoint(&["docket-number", &digits])?;

        let Some(response) = self.fetch::<DocketResponse>(url, "docket-number").await else {
            return Ok(None);
        };

        let carrier = response
            .content
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|entry| entry.carrier)
            .and_then(|record| {
                let dot_number = record.dot_number?.to_key()?;
                Some(Carrier {
                    dot_number,
                    legal_name: record.legal_name,
                })
            });

        debug!(mc_number = %digits, found = carrier.is_some(), "Docket lookup complete");
        Ok(carrier)
    }

    /// Checks whether the carrier with this DOT number may haul for hire.
    ///
    /// Fails closed: an upstream failure yields `Ok(false)`.
    pub async fn is_authorized_for_hire(&self, dot_number: &str) -> DeskResult<bool> {
        let url = self.endpoint(&[dot_number, "operation-classification"])?;

        let authorized = self
            .fetch::<ClassificationResponse>(url, "operation-classification")
            .await
            .is_some_and(|response| response.is_authorized_for_hire());

        debug!(dot_number = %dot_number, authorized, "Classification lookup complete");
        Ok(authorized)
    }

    /// Verifies a carrier end to end from its MC number.
    pub async fn verify_carrier(&self, mc_number: &str) -> DeskResult<Verification> {
        let Some(carrier) = self.resolve_mc_to_dot(mc_number).await? else {
            return Ok(Verification::NotFound);
        };

        if self.is_authorized_for_hire(&carrier.dot_number).await? {
            Ok(Verification::Authorized(carrier))
        } else {
            Ok(Verification::NotAuthorized(carrier))
        }
    }

    /// Builds `{base}/{segments..}?webKey=...`.
    fn endpoint(&self, segments: &[&str]) -> DeskResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DeskError::Internal {
                message: format!("'{}' cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("webKey", &self.web_key);
        Ok(url)
    }

    /// GETs and decodes a JSON body, logging and absorbing any failure.
    async fn fetch<T: DeserializeOwned>(&self, url: Url, endpoint: &str) -> Option<T> {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint, error = %err.without_url(), "Regulator request failed");
                return None;
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    endpoint,
                    status = err.status().map(|s| s.as_u16()),
                    "Regulator returned an error status"
                );
                return None;
            }
        };

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(endpoint, error = %err.without_url(), "Regulator response could not be decoded");
                None
            }
        }
    }
}

/// Extracts the digits of an MC number, e.g. `"MC-012345"` to `"012345"`.
pub fn mc_digits(mc_number: &str) -> DeskResult<String> {
    let digits: String = mc_number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(DeskError::InvalidMcNumber {
            value: mc_number.to_string(),
        });
    }
    Ok(digits)
}
