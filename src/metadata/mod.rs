//! Vault metadata: validation and URI conversion
//!
//! Metadata lives off-chain; the vault only stores a URI. Validation is
//! synchronous and runs before any network interaction, with messages
//! naming the violated constraint.

pub mod ipfs;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum length of the vault name, in characters
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of the description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 5000;

const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"];

/// Prefix of the inline fallback URI used when no IPFS credentials are
/// configured
pub const DATA_URI_PREFIX: &str = "data:application/json;base64,";

lazy_static! {
    static ref X_URL: Regex =
        Regex::new(r"^https://(www\.)?(x|twitter)\.com/[A-Za-z0-9_]{1,15}/?$")
            .expect("Invalid X URL pattern");
    static ref DISCORD_URL: Regex =
        Regex::new(r"^https://(www\.)?discord\.(gg|com/invite)/[A-Za-z0-9-]+/?$")
            .expect("Invalid Discord URL pattern");
    static ref TELEGRAM_URL: Regex =
        Regex::new(r"^https://(www\.)?t\.me/[A-Za-z0-9_]{5,32}/?$")
            .expect("Invalid Telegram URL pattern");
}

/// Off-chain vault metadata referenced by the on-chain `metadataURI`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultMetadata {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

impl VaultMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_url: None,
            website: None,
            x: None,
            discord: None,
            telegram: None,
        }
    }

    /// Validate all constraints
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MetadataValidation("name must not be empty".into()));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(Error::MetadataValidation(format!(
                "name exceeds maximum length of {MAX_NAME_LEN} characters"
            )));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Error::MetadataValidation(format!(
                "description exceeds maximum length of {MAX_DESCRIPTION_LEN} characters"
            )));
        }

        if let Some(image) = &self.image_url {
            validate_image_url(image)?;
        }
        if let Some(website) = &self.website {
            validate_http_url("website", website)?;
        }
        if let Some(x) = &self.x {
            if !X_URL.is_match(x) {
                return Err(Error::MetadataValidation(
                    "x link does not match the expected profile URL shape".into(),
                ));
            }
        }
        if let Some(discord) = &self.discord {
            if !DISCORD_URL.is_match(discord) {
                return Err(Error::MetadataValidation(
                    "discord link does not match the expected invite URL shape".into(),
                ));
            }
        }
        if let Some(telegram) = &self.telegram {
            if !TELEGRAM_URL.is_match(telegram) {
                return Err(Error::MetadataValidation(
                    "telegram link does not match the expected URL shape".into(),
                ));
            }
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, raw: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| Error::MetadataValidation(format!("{field} URL is not valid: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::MetadataValidation(format!(
            "{field} URL must use http or https"
        )));
    }
    Ok(parsed)
}

fn validate_image_url(raw: &str) -> Result<()> {
    let parsed = validate_http_url("image", raw)?;
    let path = parsed.path().to_ascii_lowercase();
    if !ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .any(|ext| path.ends_with(ext))
    {
        return Err(Error::MetadataValidation(format!(
            "image URL must end in one of: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

/// Encode metadata as an inline data URI
pub fn to_data_uri(metadata: &VaultMetadata) -> Result<String> {
    let json = serde_json::to_vec(metadata)?;
    Ok(format!("{DATA_URI_PREFIX}{}", BASE64.encode(json)))
}

/// Decode metadata back out of a data URI produced by [`to_data_uri`]
pub fn from_data_uri(uri: &str) -> Result<VaultMetadata> {
    let encoded = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| Error::InvalidMetadataUri("not an application/json data URI".into()))?;
    let json = BASE64
        .decode(encoded)
        .map_err(|e| Error::InvalidMetadataUri(e.to_string()))?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_metadata() -> VaultMetadata {
        VaultMetadata {
            name: "Institutional wstETH Vault".to_string(),
            description: "Curated restaking vault for wstETH collateral.".to_string(),
            image_url: Some("https://assets.example.org/vaults/wsteth.png".to_string()),
            website: Some("https://example.org".to_string()),
            x: Some("https://x.com/example_vaults".to_string()),
            discord: Some("https://discord.gg/example".to_string()),
            telegram: Some("https://t.me/example_vaults".to_string()),
        }
    }

    #[test]
    fn test_valid_metadata_passes() {
        valid_metadata().validate().unwrap();
    }

    #[test]
    fn test_name_at_limit_passes() {
        let mut metadata = valid_metadata();
        metadata.name = "n".repeat(MAX_NAME_LEN);
        metadata.validate().unwrap();
    }

    #[test]
    fn test_name_over_limit_rejected() {
        let mut metadata = valid_metadata();
        metadata.name = "n".repeat(MAX_NAME_LEN + 1);

        let err = metadata.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut metadata = valid_metadata();
        metadata.name = "   ".to_string();
        assert!(metadata.validate().is_err());
    }

    #[test]
    fn test_description_over_limit_rejected() {
        let mut metadata = valid_metadata();
        metadata.description = "d".repeat(MAX_DESCRIPTION_LEN + 1);

        let err = metadata.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    #[test]
    fn test_image_url_extension_enforced() {
        let mut metadata = valid_metadata();
        metadata.image_url = Some("https://assets.example.org/vaults/wsteth.pdf".to_string());
        assert!(metadata.validate().is_err());

        metadata.image_url = Some("https://assets.example.org/vaults/logo.SVG".to_string());
        metadata.validate().unwrap();
    }

    #[test]
    fn test_image_url_scheme_enforced() {
        let mut metadata = valid_metadata();
        metadata.image_url = Some("ipfs://QmSomething/image.png".to_string());
        assert!(metadata.validate().is_err());
    }

    #[test]
    fn test_social_url_shapes() {
        let mut metadata = valid_metadata();
        metadata.x = Some("https://twitter.com/example_vaults".to_string());
        metadata.validate().unwrap();

        metadata.x = Some("https://x.com/way/too/deep".to_string());
        assert!(metadata.validate().is_err());

        let mut metadata = valid_metadata();
        metadata.telegram = Some("https://t.me/x".to_string());
        assert!(metadata.validate().is_err());
    }

    #[test]
    fn test_data_uri_round_trip() {
        let metadata = valid_metadata();
        let uri = to_data_uri(&metadata).unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX));

        let decoded = from_data_uri(&uri).unwrap();
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_data_uri_round_trip_without_optionals() {
        let metadata = VaultMetadata::new("Minimal", "Just a name and description.");
        let decoded = from_data_uri(&to_data_uri(&metadata).unwrap()).unwrap();
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_from_data_uri_rejects_other_schemes() {
        assert!(from_data_uri("ipfs://QmExample").is_err());
        assert!(from_data_uri("data:text/plain;base64,aGk=").is_err());
    }
}
