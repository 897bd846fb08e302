//! Daily digest payload.

use serde::Deserialize;

/// Upstream `code` meaning success.
pub const DIGEST_SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DigestData {
    pub imageurl: String,
}

/// Envelope returned by the daily digest endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DigestEnvelope {
    pub code: i64,
    #[serde(default)]
    pub data: Option<DigestData>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The digest for today: a single rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyDigest {
    pub image_url: String,
}
