//! Geographic search point.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinates(format!(
                "latitude {lat} outside [-90, 90]"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinates(format!(
                "longitude {lon} outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Grid cell of roughly 100 m used to share cached lookups between
    /// nearby positions.
    pub fn grid_cell(&self) -> (i32, i32) {
        (
            (self.lat * 1000.0).round() as i32,
            (self.lon * 1000.0).round() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_range() {
        let c = Coordinates::new(51.5101, -0.1206).unwrap();
        assert_eq!(c.lat(), 51.5101);
        assert_eq!(c.lon(), -0.1206);
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn grid_cell_groups_close_points() {
        let a = Coordinates::new(51.51012, -0.12061).unwrap();
        let b = Coordinates::new(51.51038, -0.12071).unwrap();
        let c = Coordinates::new(51.52, -0.12).unwrap();
        assert_eq!(a.grid_cell(), b.grid_cell());
        assert_ne!(a.grid_cell(), c.grid_cell());
    }
}
