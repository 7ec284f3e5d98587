//! Geocode command handler
//!
//! Address to coordinates via Google.

use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::format::Report;
use crate::geo::google::GoogleGeocoder;
use clap::Args;

/// Geocode command arguments
#[derive(Args, Debug)]
pub struct GeocodeArgs {
    /// Free-form address, e.g. "Avenue Louise 24, Bruxelles, Belgium"
    pub address: String,

    /// Two-letter result language
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Google API key (overrides config)
    #[arg(long)]
    pub key: Option<String>,
}

/// Run the geocode command
pub async fn run(args: GeocodeArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;

    let mut geocoder = GoogleGeocoder::new(&config)?;
    if let Some(key) = args.key {
        geocoder.set_api_key(key);
    }

    let language = args.language.unwrap_or(config.defaults.language.clone());
    let place = geocoder.geocode(&args.address, &language).await?;

    global.emit(&config, &Report::Google(Box::new(place)))
}
