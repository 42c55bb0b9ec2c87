//! The fixed list of selectable cities.

use std::fmt;

/// A selectable city with a display name and geographic coordinates.
///
/// Cities are defined at process start and never mutated. Identity is by
/// display name; duplicates are not expected and not enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        debug_assert!((-90.0..=90.0).contains(&lat), "latitude out of range");
        debug_assert!((-180.0..=180.0).contains(&lon), "longitude out of range");
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered, immutable sequence of cities backing the selector.
#[derive(Clone, Debug)]
pub struct Catalog {
    cities: Vec<City>,
}

impl Catalog {
    /// Build a catalog from an ordered city list.
    ///
    /// The selection model treats index 0 as the startup city, so the list
    /// must not be empty.
    pub fn new(cities: Vec<City>) -> Self {
        debug_assert!(!cities.is_empty(), "catalog requires at least one city");
        Self { cities }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Display names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(|city| city.name.as_str())
    }

    /// Find a city's index by display name, ignoring case.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.cities
            .iter()
            .position(|city| city.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Catalog {
    /// The built-in catalog, in its original selector order.
    fn default() -> Self {
        Self::new(vec![
            City::new("Portland, OR", 45.5152, -122.6784),
            City::new("Vancouver, WA", 45.6257, -122.6762),
            City::new("LA, CA", 34.0522, -118.2437),
            City::new("Durham, NC", 35.9940, -78.8986),
            City::new("Las Vegas, NV", 36.1699, -115.1398),
            City::new("Daegu, South Korea", 35.8714, 128.6014),
            City::new("Lincoln, ME", 45.3508, -68.5077),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_starts_with_portland() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 7);

        let first = catalog.get(0).unwrap();
        assert_eq!(first.name, "Portland, OR");
        assert!((first.lat - 45.5152).abs() < 1e-9);
        assert!((first.lon - -122.6784).abs() < 1e-9);
    }

    #[test]
    fn test_names_follow_catalog_order() {
        let catalog = Catalog::default();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names[0], "Portland, OR");
        // The third entry keeps its short form.
        assert_eq!(names[2], "LA, CA");
        assert_eq!(names[6], "Lincoln, ME");
    }

    #[test]
    fn test_position_of_ignores_case() {
        let catalog = Catalog::default();
        assert_eq!(catalog.position_of("durham, nc"), Some(3));
        assert_eq!(catalog.position_of("DAEGU, SOUTH KOREA"), Some(5));
        assert_eq!(catalog.position_of("Atlantis"), None);
    }

    #[test]
    fn test_get_past_the_end_is_none() {
        let catalog = Catalog::default();
        assert!(catalog.get(7).is_none());
    }

    #[test]
    fn test_display_uses_the_name() {
        let city = City::new("Lincoln, ME", 45.3508, -68.5077);
        assert_eq!(city.to_string(), "Lincoln, ME");
    }
}
