//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default IP geolocation provider (no key required)
pub const DEFAULT_IP_PROVIDER: &str = "ipapi";

/// Default language for Google geocoding results
pub const DEFAULT_LANGUAGE: &str = "en";

/// User-Agent sent to every provider (Nominatim rejects anonymous clients)
pub const DEFAULT_USER_AGENT: &str = concat!("geo-lookup/", env!("CARGO_PKG_VERSION"));

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geo-lookup";
