//! Wire format adapters.
//!
//! The API speaks either JSON or XML depending on the negotiated media type.
//! `WireFormat` is chosen once per run and knows how to parse a response body
//! into a `ResponseModel` and where the interesting fields live in it.

use crate::model::{ResponseModel, XmlDocument};
use strum::Display;

pub const JSON: &str = "json";
pub const XML: &str = "xml";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Error types that can occur while parsing a response body
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("XML response is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("failed to parse XML response: {0}")]
    Xml(#[from] roxmltree::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum WireFormat {
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "xml")]
    Xml,
}

impl WireFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            WireFormat::Json => "application/json",
            WireFormat::Xml => "application/xml",
        }
    }

    /// File extension used when persisting responses in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            WireFormat::Json => JSON,
            WireFormat::Xml => XML,
        }
    }

    /// Parses a response body. A leading UTF-8 byte order mark is skipped.
    pub fn parse(&self, body: &[u8]) -> Result<ResponseModel, FormatError> {
        let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
        match self {
            WireFormat::Json => Ok(ResponseModel::Json(serde_json::from_slice(body)?)),
            WireFormat::Xml => {
                let text = std::str::from_utf8(body)?;
                Ok(ResponseModel::Xml(XmlDocument::parse(text)?))
            }
        }
    }

    fn token_path(&self) -> &'static str {
        match self {
            WireFormat::Json => "/token",
            WireFormat::Xml => "/user/token",
        }
    }

    fn first_asset_id_path(&self) -> &'static str {
        match self {
            WireFormat::Json => "/asset[0]/id",
            WireFormat::Xml => "/assets/asset[0]/id",
        }
    }

    /// The session token from a login response. An empty token counts as none.
    pub fn extract_token(&self, response: &ResponseModel) -> Option<String> {
        self.select(response, self.token_path())
            .filter(|token| !token.is_empty())
    }

    /// The id of the first asset in a collection response.
    pub fn extract_first_asset_id(&self, response: &ResponseModel) -> Option<String> {
        self.select(response, self.first_asset_id_path())
    }

    fn select(&self, response: &ResponseModel, path: &str) -> Option<String> {
        let matches_format = matches!(
            (self, response),
            (WireFormat::Json, ResponseModel::Json(_)) | (WireFormat::Xml, ResponseModel::Xml(_))
        );
        if !matches_format {
            return None;
        }
        response.select_text(path)
    }
}
