//! Storefront configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use atelier_commerce::cart::DEFAULT_CART_KEY;
use atelier_commerce::Currency;
use atelier_observability::{LogFormat, LogLevel, SessionTag, StructuredLogger};
use serde::{Deserialize, Serialize};

/// Storefront configuration file.
///
/// Every field has a default matching the shipped page, so an empty
/// document is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Product feed location.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Cart persistence.
    #[serde(default)]
    pub cart: CartConfig,

    /// Presentation settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// User-facing texts.
    #[serde(default)]
    pub messages: Messages,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a TOML or JSON file (by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Parse a JSON document, as embedded in the page.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the page logger described by the logging section.
    pub fn logger(&self, session: SessionTag) -> StructuredLogger {
        StructuredLogger::new(session)
            .with_component("storefront")
            .with_min_level(self.logging.level)
            .with_format(self.logging.format)
    }
}

/// Product feed configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed URL or path, relative to the page.
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Give up on the feed after this many milliseconds. No limit when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl FeedConfig {
    /// Fetch timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout_ms: None,
        }
    }
}

fn default_feed_url() -> String {
    "products.json".to_string()
}

/// Cart persistence configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Storage key holding the serialized cart.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

/// Presentation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency feed prices are quoted in.
    #[serde(default)]
    pub currency: Currency,

    /// Heading for the unfiltered catalog.
    #[serde(default = "default_heading")]
    pub default_heading: String,

    /// Scroll offset applied after a category is chosen.
    #[serde(default = "default_scroll_top")]
    pub scroll_top: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            default_heading: default_heading(),
            scroll_top: default_scroll_top(),
        }
    }
}

fn default_heading() -> String {
    "All Products".to_string()
}

fn default_scroll_top() -> i32 {
    200
}

/// User-facing texts.
///
/// `{title}` in a template is replaced with the product title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Shown in place of the grid when the feed cannot be loaded.
    pub feed_failed: String,
    /// Shown when the view is empty.
    pub no_products: String,
    /// Shown when the cart is opened empty.
    pub cart_empty: String,
    /// First line of the cart listing.
    pub cart_header: String,
    /// Last line of the cart listing.
    pub cart_footer: String,
    /// Confirmation after an add.
    pub added_to_cart: String,
    /// Notice when the cart could not be saved.
    pub cart_save_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            feed_failed:
                "Failed to load products. Check that products.json exists in the same folder."
                    .to_string(),
            no_products: "No products found.".to_string(),
            cart_empty: "Cart is empty (demo).".to_string(),
            cart_header: "Cart contents:".to_string(),
            cart_footer: "Local-only demo cart. Clear with console or localStorage.clear()."
                .to_string(),
            added_to_cart: "{title} added to cart (demo).".to_string(),
            cart_save_failed: "Could not save {title} to the cart.".to_string(),
        }
    }
}

impl Messages {
    /// Fill `{title}` in a template.
    pub fn with_title(template: &str, title: &str) -> String {
        template.replace("{title}", title)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}
