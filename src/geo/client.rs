//! Facade over every provider
//!
//! Built once from `Config`; credentials can be replaced afterwards.

use crate::config::Config;
use crate::coord::{self, GeoPoint};
use crate::error::Result;
use crate::geo::google::{GoogleGeocoder, GooglePlace};
use crate::geo::ipapi::IpApiClient;
use crate::geo::ipstack::IpStackClient;
use crate::geo::nominatim::{Address, Nominatim, NominatimClient, Place};
use crate::geo::rapidapi::RapidApiClient;
use crate::geo::{IpGeolocator, IpLocation, IpProvider};

/// All providers behind one handle
#[derive(Debug, Clone)]
pub struct GeoClient {
    nominatim: NominatimClient,
    google: GoogleGeocoder,
    ipstack: IpStackClient,
    ipapi: IpApiClient,
    rapidapi: RapidApiClient,
}

impl GeoClient {
    /// Build every provider from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            nominatim: NominatimClient::new(config)?,
            google: GoogleGeocoder::new(config)?,
            ipstack: IpStackClient::new(config)?,
            ipapi: IpApiClient::new(config)?,
            rapidapi: RapidApiClient::new(config)?,
        })
    }

    pub fn set_google_api_key(&mut self, key: impl Into<String>) {
        self.google.set_api_key(key);
    }

    pub fn set_ipstack_api_key(&mut self, key: impl Into<String>) {
        self.ipstack.set_api_key(key);
    }

    pub fn set_rapidapi_key(&mut self, key: impl Into<String>) {
        self.rapidapi.set_api_key(key);
    }

    pub fn nominatim(&self) -> &NominatimClient {
        &self.nominatim
    }

    pub fn google(&self) -> &GoogleGeocoder {
        &self.google
    }

    pub fn ipstack(&self) -> &IpStackClient {
        &self.ipstack
    }

    pub fn ipapi(&self) -> &IpApiClient {
        &self.ipapi
    }

    pub fn rapidapi(&self) -> &RapidApiClient {
        &self.rapidapi
    }

    /// Great-circle distance in meters
    pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
        coord::distance(a.lat, a.lng, b.lat, b.lng)
    }

    /// Address for coordinates (Nominatim)
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<Nominatim> {
        self.nominatim.reverse(lat, lng).await
    }

    /// Ranked candidates for an address (Nominatim)
    pub async fn search(&self, address: &Address) -> Result<Vec<Place>> {
        self.nominatim.search(address).await
    }

    /// Coordinates of the best candidate for an address (Nominatim)
    pub async fn geolocate(&self, address: &Address) -> Result<Option<GeoPoint>> {
        self.nominatim.geolocate(address).await
    }

    /// Best match for a free-form address (Google)
    pub async fn geocode(&self, address: &str, language: &str) -> Result<GooglePlace> {
        self.google.geocode(address, language).await
    }

    /// Locate `ip` with the chosen provider
    pub async fn locate_ip(&self, provider: IpProvider, ip: &str) -> Result<IpLocation> {
        match provider {
            IpProvider::IpStack => self.ipstack.locate(ip).await,
            IpProvider::IpApi => self.ipapi.locate(ip).await,
            IpProvider::RapidApi => self.rapidapi.locate(ip).await,
        }
    }
}
