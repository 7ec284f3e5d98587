//! Reverse command handler
//!
//! Coordinates to address via Nominatim.

use crate::cli::GlobalArgs;
use crate::coord::GeoPoint;
use crate::error::Result;
use crate::format::Report;
use crate::geo::nominatim::NominatimClient;
use clap::Args;

/// Reverse command arguments
#[derive(Args, Debug)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

/// Run the reverse command
pub async fn run(args: ReverseArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    GeoPoint::new(args.lat, args.lng).validate()?;

    let client = NominatimClient::new(&config)?;
    let result = client.reverse(args.lat, args.lng).await?;

    global.emit(&config, &Report::Reverse(result))
}
