//! Distance command handler

use crate::cli::GlobalArgs;
use crate::coord::{distance, GeoPoint};
use crate::error::Result;
use crate::format::Report;
use clap::Args;

/// Distance command arguments
#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,

    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lon1: f64,

    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,

    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lon2: f64,
}

/// Run the distance command
pub fn run(args: DistanceArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;

    let from = GeoPoint::new(args.lat1, args.lon1);
    let to = GeoPoint::new(args.lat2, args.lon2);
    from.validate()?;
    to.validate()?;

    let meters = distance(from.lat, from.lng, to.lat, to.lng);
    global.emit(&config, &Report::Distance { from, to, meters })
}
