use std::{fmt, str::FromStr};

use crate::errors::WeatherError;

const US_STATES: [&str; 50] = [
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN", "KS",
    "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ", "NM",
    "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA", "WI",
    "WV", "WY",
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub name: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<(f64, f64)>,
}

impl Location {
    /// Parses `"City"`, `"City, ST"`, `"City, Country"` or
    /// `"City, State, Country"`. A lone US state abbreviation implies `US`.
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        let invalid = || WeatherError::InvalidLocation(raw.to_string());

        let location = match parts.as_slice() {
            [""] => return Err(invalid()),
            [name] => Self::named(name),
            [name, region] if is_us_state(region) => Self {
                state: non_empty(region),
                country: Some("US".to_string()),
                ..Self::named(name)
            },
            [name, country] => Self {
                country: non_empty(country),
                ..Self::named(name)
            },
            [name, state, country] => Self {
                state: non_empty(state),
                country: non_empty(country),
                ..Self::named(name)
            },
            _ => return Err(invalid()),
        };

        if location.name.is_empty() {
            return Err(invalid());
        }
        Ok(location)
    }

    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn title(&self) -> String {
        [Some(&self.name), self.state.as_ref(), self.country.as_ref()]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Location {
    type Err = WeatherError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())?;
        if let Some((latitude, longitude)) = self.coordinates {
            write!(f, " ({latitude:.4}, {longitude:.4})")?;
        }
        Ok(())
    }
}

fn non_empty(part: &str) -> Option<String> {
    Some(part.to_string()).filter(|part| !part.is_empty())
}

fn is_us_state(abbreviation: &str) -> bool {
    US_STATES.binary_search(&abbreviation).is_ok()
}
