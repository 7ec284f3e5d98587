//! IP command handler
//!
//! Locates an IP address with one of the IP geolocation providers.

use crate::cli::GlobalArgs;
use crate::error::{Error, Result};
use crate::format::Report;
use crate::geo::{GeoClient, IpProvider};
use clap::Args;
use std::str::FromStr;

/// IP command arguments
#[derive(Args, Debug)]
pub struct IpArgs {
    /// IP address to locate (ipapi only: omit for your own address)
    pub ip: Option<String>,

    /// Provider: ipstack, ipapi or rapidapi
    #[arg(long, short = 'p')]
    pub provider: Option<String>,

    /// Provider API key (overrides config)
    #[arg(long)]
    pub key: Option<String>,

    /// Print the provider's full record instead of the summary
    #[arg(long)]
    pub raw: bool,
}

/// Run the ip command
pub async fn run(args: IpArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;

    let provider_name = args.provider.unwrap_or(config.defaults.ip_provider.clone());
    let provider = IpProvider::from_str(&provider_name).map_err(Error::Config)?;

    let mut client = GeoClient::from_config(&config)?;
    if let Some(key) = args.key {
        match provider {
            IpProvider::IpStack => client.set_ipstack_api_key(key),
            IpProvider::RapidApi => client.set_rapidapi_key(key),
            IpProvider::IpApi => {
                return Err(Error::Config("ipapi does not take an API key".to_string()))
            }
        }
    }

    let report = match (provider, args.ip.as_deref()) {
        (IpProvider::IpApi, None) => {
            let record = client.ipapi().locate_self().await?;
            if args.raw {
                Report::Raw(serde_json::to_value(record)?)
            } else {
                Report::Ip(record.into())
            }
        }
        (_, None) => {
            return Err(Error::Missing(format!("IP address (required by {})", provider)));
        }
        (provider, Some(ip)) if args.raw => Report::Raw(match provider {
            IpProvider::IpStack => serde_json::to_value(client.ipstack().locate_ip(ip).await?)?,
            IpProvider::IpApi => serde_json::to_value(client.ipapi().locate_ip(ip).await?)?,
            IpProvider::RapidApi => serde_json::to_value(client.rapidapi().locate_ip(ip).await?)?,
        }),
        (provider, Some(ip)) => Report::Ip(client.locate_ip(provider, ip).await?),
    };

    global.emit(&config, &report)
}
