//! Geographic value objects
//!
//! Coordinates always come from the external geocoding service. The only
//! computation done locally is the group midpoint.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Arithmetic mean of all latitudes and of all longitudes.
    ///
    /// Returns `None` for an empty slice.
    ///
    /// # Example
    ///
    /// ```
    /// use midi_domain::Coordinates;
    ///
    /// let mid = Coordinates::midpoint(&[
    ///     Coordinates::new(10.0, 20.0),
    ///     Coordinates::new(20.0, 40.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(mid, Coordinates::new(15.0, 30.0));
    /// ```
    pub fn midpoint(points: &[Coordinates]) -> Option<Coordinates> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
        let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
        Some(Coordinates { lat, lng })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = DomainError;

    /// Parse `"lat,lng"` (whitespace around either number is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidCoordinates(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinates(s.to_string()))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinates(s.to_string()))?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::InvalidCoordinates(s.to_string()));
        }
        Ok(Coordinates { lat, lng })
    }
}

/// A participant's starting address together with its resolved coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendLocation {
    pub address: String,
    pub coords: Coordinates,
}

impl FriendLocation {
    pub fn new(address: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            address: address.into(),
            coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_of_three() {
        let mid = Coordinates::midpoint(&[
            Coordinates::new(1.0, 1.0),
            Coordinates::new(2.0, 4.0),
            Coordinates::new(3.0, 7.0),
        ])
        .unwrap();
        assert!((mid.lat - 2.0).abs() < 1e-9);
        assert!((mid.lng - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint_single_point_is_itself() {
        let p = Coordinates::new(51.5, -0.12);
        assert_eq!(Coordinates::midpoint(&[p]), Some(p));
    }

    #[test]
    fn test_midpoint_empty() {
        assert_eq!(Coordinates::midpoint(&[]), None);
    }

    #[test]
    fn test_parse_coordinates() {
        let c: Coordinates = "37.42, -122.08".parse().unwrap();
        assert_eq!(c, Coordinates::new(37.42, -122.08));
    }

    #[test]
    fn test_parse_coordinates_rejects_garbage() {
        assert!("37.42".parse::<Coordinates>().is_err());
        assert!("north,south".parse::<Coordinates>().is_err());
        assert!("91,0".parse::<Coordinates>().is_err());
        assert!("0,181".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let c = Coordinates::new(-33.86, 151.2);
        assert_eq!(c.to_string().parse::<Coordinates>().unwrap(), c);
    }
}
