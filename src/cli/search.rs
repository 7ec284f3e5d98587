//! Search command handler
//!
//! Address to ranked places via Nominatim.

use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::format::Report;
use crate::geo::nominatim::{Address, NominatimClient};
use clap::{ArgGroup, Args};

/// Search command arguments
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["query", "city", "street", "postcode", "region", "country"])
))]
pub struct SearchArgs {
    /// Free-text query
    #[arg(long, short = 'q', conflicts_with_all = ["city", "street", "postcode", "region", "country"])]
    pub query: Option<String>,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// Street and house number
    #[arg(long)]
    pub street: Option<String>,

    /// Postal code
    #[arg(long)]
    pub postcode: Option<String>,

    /// State or region
    #[arg(long)]
    pub region: Option<String>,

    /// Two-letter country code
    #[arg(long)]
    pub country: Option<String>,

    /// Only print the coordinates of the best match
    #[arg(long)]
    pub first: bool,
}

impl SearchArgs {
    fn address(&self) -> Address {
        Address {
            country: self.country.clone(),
            road: self.street.clone(),
            city: self.city.clone(),
            postcode: self.postcode.clone(),
            region: self.region.clone(),
        }
    }
}

/// Run the search command
pub async fn run(args: SearchArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let client = NominatimClient::new(&config)?;

    let report = match &args.query {
        Some(query) => {
            let places = client.search_text(query).await?;
            if args.first {
                Report::Geolocate {
                    coords: places.first().map(|p| p.coords()),
                }
            } else {
                Report::Places(places)
            }
        }
        None if args.first => Report::Geolocate {
            coords: client.geolocate(&args.address()).await?,
        },
        None => Report::Places(client.search(&args.address()).await?),
    };

    global.emit(&config, &report)
}
