//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `HAVANA_DATA_DIR` - Directory holding the cart slot files (default: `.havana`)
//! - `HAVANA_CART_KEY` - Cart slot key (default: `coffeHavanaCart`)
//! - `HAVANA_STORAGE_QUOTA_BYTES` - Maximum size of a stored value (default: 5 MiB)
//! - `HAVANA_MENU_PATH` - YAML menu replacing the built-in one
//! - `HAVANA_WHATSAPP_PHONE` - WhatsApp number receiving orders, digits only (default: `5256616581011`)
//! - `HAVANA_MERCADO_PAGO_URL` - Mercado Pago payment link
//! - `HAVANA_TRANSFER_CLABE` - 18-digit CLABE shown for bank transfers
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::cart::CART_STORAGE_KEY;
use crate::storage::DEFAULT_QUOTA_BYTES;

const DEFAULT_DATA_DIR: &str = ".havana";
const DEFAULT_WHATSAPP_PHONE: &str = "5256616581011";
const DEFAULT_MERCADO_PAGO_URL: &str = "https://link.mercadopago.com.mx/coffehavana";
const DEFAULT_TRANSFER_CLABE: &str = "722969020239795996";

/// E.164 numbers are at most 15 digits; anything under 8 is not a phone.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 8..=15;
const CLABE_LENGTH: usize = 18;
const CLABE_WEIGHTS: [u32; 3] = [3, 7, 1];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory backing the file storage
    pub data_dir: PathBuf,
    /// Key of the cart slot
    pub cart_key: String,
    /// Per-value storage quota in bytes
    pub storage_quota: usize,
    /// Optional menu file replacing the built-in menu
    pub menu_path: Option<PathBuf>,
    /// Checkout hand-off targets
    pub checkout: CheckoutConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Checkout hand-off configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// WhatsApp number receiving orders (digits only, with country code)
    pub whatsapp_phone: String,
    /// Mercado Pago payment link
    pub mercado_pago_url: Url,
    /// CLABE for bank transfers
    pub transfer_clabe: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(get_or_default(&lookup, "HAVANA_DATA_DIR", DEFAULT_DATA_DIR));
        let cart_key = get_or_default(&lookup, "HAVANA_CART_KEY", CART_STORAGE_KEY);
        validate_cart_key(&cart_key)?;
        let storage_quota = match lookup("HAVANA_STORAGE_QUOTA_BYTES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar("HAVANA_STORAGE_QUOTA_BYTES".to_string(), e.to_string())
            })?,
            None => DEFAULT_QUOTA_BYTES,
        };
        let menu_path = get_optional(&lookup, "HAVANA_MENU_PATH").map(PathBuf::from);
        let checkout = CheckoutConfig::from_lookup(&lookup)?;

        Ok(Self {
            data_dir,
            cart_key,
            storage_quota,
            menu_path,
            checkout,
            sentry_dsn: get_optional(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }
}

impl CheckoutConfig {
    /// Load checkout targets from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the phone, payment link or CLABE is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let whatsapp_phone = get_or_default(&lookup, "HAVANA_WHATSAPP_PHONE", DEFAULT_WHATSAPP_PHONE);
        validate_phone(&whatsapp_phone, "HAVANA_WHATSAPP_PHONE")?;

        let raw_url = get_or_default(&lookup, "HAVANA_MERCADO_PAGO_URL", DEFAULT_MERCADO_PAGO_URL);
        let mercado_pago_url = parse_https_url(&raw_url, "HAVANA_MERCADO_PAGO_URL")?;

        let transfer_clabe = get_or_default(&lookup, "HAVANA_TRANSFER_CLABE", DEFAULT_TRANSFER_CLABE);
        validate_clabe(&transfer_clabe, "HAVANA_TRANSFER_CLABE")?;

        Ok(Self {
            whatsapp_phone,
            mercado_pago_url,
            transfer_clabe,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Get a variable with a default value.
fn get_or_default<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: &str) -> String {
    get_optional(lookup, key).unwrap_or_else(|| default.to_string())
}

fn validate_cart_key(key: &str) -> Result<(), ConfigError> {
    if key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "HAVANA_CART_KEY".to_string(),
            "only ASCII letters, digits, '-' and '_' are allowed".to_string(),
        ))
    }
}

/// Validate a WhatsApp number: digits only, country code included.
fn validate_phone(phone: &str, var_name: &str) -> Result<(), ConfigError> {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must contain digits only (no '+', spaces or dashes)".to_string(),
        ));
    }
    if !PHONE_DIGITS.contains(&phone.len()) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!(
                "must have {} to {} digits (got {})",
                PHONE_DIGITS.start(),
                PHONE_DIGITS.end(),
                phone.len()
            ),
        ));
    }
    Ok(())
}

fn parse_https_url(raw: &str, var_name: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must use https (got {})", url.scheme()),
        ));
    }
    Ok(url)
}

/// Expected CLABE check digit for the first 17 digits.
///
/// Each digit is multiplied by the repeating weights 3, 7, 1; the check digit
/// brings the sum of the products (mod 10) up to a multiple of 10.
fn clabe_check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip(CLABE_WEIGHTS.iter().cycle())
        .map(|(digit, weight)| (digit * weight) % 10)
        .sum();
    (10 - sum % 10) % 10
}

/// Validate an 18-digit CLABE including its check digit.
fn validate_clabe(clabe: &str, var_name: &str) -> Result<(), ConfigError> {
    let digits: Option<Vec<u32>> = clabe.chars().map(|c| c.to_digit(10)).collect();
    let Some(digits) = digits.filter(|d| d.len() == CLABE_LENGTH) else {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be exactly {CLABE_LENGTH} digits"),
        ));
    };
    let Some((check, body)) = digits.split_last() else {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "empty CLABE".to_string(),
        ));
    };
    if clabe_check_digit(body) != *check {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "check digit does not match".to_string(),
        ));
    }
    Ok(())
}
