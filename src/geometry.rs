use std::fmt;

use serde_json::Value;

use crate::error::Error;

/// Geographic geometry accepted by the API: either raw WKT text or a
/// latitude/longitude pair that still has to be rendered as WKT.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Already well-formed WKT, passed through unchanged.
    Wkt(String),
    LatLng { lat: f64, lng: f64 },
}

impl Geometry {
    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::LatLng {
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    pub fn to_wkt(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Wkt(text) => f.write_str(text),
            // WKT orders coordinates x y, i.e. longitude first.
            Self::LatLng { lat, lng } => write!(f, "POINT ({lng} {lat})"),
        }
    }
}

impl TryFrom<&Value> for Geometry {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(text) => Ok(Self::Wkt(text.clone())),
            Value::Object(map) => {
                let lat = map.get("lat").ok_or(Error::MissingCoordinate("lat"))?;
                let lng = map.get("lng").ok_or(Error::MissingCoordinate("lng"))?;
                let lat = lat.as_f64().ok_or(Error::InvalidCoordinate("lat"))?;
                let lng = lng.as_f64().ok_or(Error::InvalidCoordinate("lng"))?;
                Ok(Self::LatLng { lat, lng })
            }
            other => Err(Error::GeometryType {
                actual: json_type_name(other),
            }),
        }
    }
}

/// Whether a JSON value can be iterated sequentially: strings, arrays and
/// objects qualify, scalars do not.
pub fn is_iterable(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Array(_) | Value::Object(_))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wkt_text_passes_through() {
        let geom = Geometry::try_from(&json!("POINT (1 2)")).unwrap();
        assert_eq!(geom, Geometry::Wkt("POINT (1 2)".into()));
        assert_eq!(geom.to_wkt(), "POINT (1 2)");
    }

    #[test]
    fn lat_lng_formats_longitude_first() {
        let geom = Geometry::try_from(&json!({ "lat": 10, "lng": 20 })).unwrap();
        assert_eq!(geom.to_wkt(), "POINT (20 10)");
    }

    #[test]
    fn fractional_coordinates_keep_their_fraction() {
        let geom = Geometry::from_lat_lng_deg(51.34, -0.125);
        assert_eq!(geom.to_wkt(), "POINT (-0.125 51.34)");
    }

    #[test]
    fn number_is_not_a_geometry() {
        let err = Geometry::try_from(&json!(42)).unwrap_err();
        assert!(matches!(err, Error::GeometryType { actual: "number" }));
        assert_eq!(err.to_string(), "geometry must be a mapping or string, not number");
    }

    // An array is iterable but not key-addressable; it resolves to the same
    // type error as a scalar instead of a coordinate lookup failure.
    #[test]
    fn array_is_not_a_geometry() {
        let err = Geometry::try_from(&json!(["lat", "lng"])).unwrap_err();
        assert!(matches!(err, Error::GeometryType { actual: "array" }));
    }

    // A mapping missing one of the two keys fails on the key lookup itself,
    // distinct from the type error above.
    #[test]
    fn mapping_without_lng_fails_on_key_lookup() {
        let err = Geometry::try_from(&json!({ "lat": 10 })).unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate("lng")));
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let err = Geometry::try_from(&json!({ "lat": "north", "lng": 20 })).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate("lat")));
    }

    #[test]
    fn iterable_json_values() {
        assert!(is_iterable(&json!("abc")));
        assert!(is_iterable(&json!([1, 2, 3])));
        assert!(is_iterable(&json!({ "a": 1 })));
        assert!(!is_iterable(&json!(42)));
        assert!(!is_iterable(&json!(true)));
        assert!(!is_iterable(&Value::Null));
    }
}
