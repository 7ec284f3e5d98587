//! geo-lookup: geocoding, IP geolocation and great-circle distance
//!
//! A thin async client over third-party location APIs plus a haversine
//! distance function.
//!
//! ## Features
//!
//! - Haversine distance in meters (`distance`, `GeoPoint::distance_to`)
//! - Reverse and forward geocoding with OpenStreetMap Nominatim
//! - Forward geocoding with Google
//! - IP geolocation with ipstack, ipapi.co and apility.io (RapidAPI)
//! - CLI with JSON or text output
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_lookup::{distance, GeoPoint};
//!
//! let office = GeoPoint::new(13.7665217, 100.6068431);
//! let bigc = GeoPoint::new(13.7199345, 100.5197898);
//!
//! let meters = office.distance_to(&bigc);
//! assert_eq!(meters, distance(13.7665217, 100.6068431, 13.7199345, 100.5197898));
//! ```
//!
//! ```rust,no_run
//! use geo_lookup::geo::{Address, GeoClient};
//! use geo_lookup::Config;
//!
//! # async fn example() -> geo_lookup::Result<()> {
//! let mut client = GeoClient::from_config(&Config::default())?;
//! client.set_google_api_key("MY GOOGLE KEY");
//!
//! let place = client.reverse(13.7665269, 100.6068431).await?;
//! println!("{}", place.display_name);
//!
//! let address = Address::new().with_city("Ottignies").with_road("Pinchart 31");
//! if let Some(point) = client.geolocate(&address).await? {
//!     println!("{}", point);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;

// Re-export commonly used types
pub use config::Config;
pub use coord::{distance, GeoPoint};
pub use error::{Error, Result};
pub use geo::{GeoClient, IpLocation, IpProvider};
