use std::env::{self, VarError};
use std::time::Duration;

use crate::{
    entities::Coordinates,
    error::{config_error, Error},
};

const DEFAULT_GOOGLE_MAPS_API_BASE: &str = "maps.googleapis.com";
const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 33.4757032,
    longitude: -86.94038,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub routes_api_base: String,
    pub google_maps_api_base: String,
    pub google_maps_api_key: String,
    /// Where the map starts when the rider's location is unknown.
    pub default_center: Coordinates,
    pub directions_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let optional = |key: &str| match lookup(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(err) => Err(Error::from(err)),
        };

        let default_center = Coordinates::new(
            match optional("BUSROUTE_DEFAULT_LAT")? {
                Some(lat) => lat.parse()?,
                None => DEFAULT_CENTER.latitude,
            },
            match optional("BUSROUTE_DEFAULT_LNG")? {
                Some(lng) => lng.parse()?,
                None => DEFAULT_CENTER.longitude,
            },
        );

        let directions_timeout = match optional("BUSROUTE_DIRECTIONS_TIMEOUT_SECS")? {
            Some(secs) => Some(Duration::try_from_secs_f64(secs.parse()?).map_err(|_| config_error())?),
            None => None,
        };

        Ok(Self {
            routes_api_base: lookup("BUSROUTE_API_BASE")?,
            google_maps_api_base: optional("GOOGLE_MAPS_API_BASE")?
                .unwrap_or_else(|| DEFAULT_GOOGLE_MAPS_API_BASE.into()),
            google_maps_api_key: lookup("GOOGLE_MAPS_API_KEY")?,
            default_center,
            directions_timeout,
        })
    }
}
