//! Core data models shared by the alert widget and the map renderers.

use serde::{Deserialize, Serialize};

/// A single active hazard notification. Classification is supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasterEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl DisasterEvent {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

/// Input accepted by the alert aggregator, normalized once from widget props.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlertInput {
    /// Pre-built list; always wins over a legacy pair.
    Explicit(Vec<DisasterEvent>),
    /// `count` events of the same `kind`.
    Legacy { kind: String, count: u32 },
    Empty,
}

impl AlertInput {
    pub fn from_props(
        disasters: Option<&[DisasterEvent]>,
        kind: Option<&str>,
        count: Option<u32>,
    ) -> Self {
        if let Some(list) = disasters {
            return AlertInput::Explicit(list.to_vec());
        }
        match (kind, count) {
            (Some(k), Some(c)) if !k.is_empty() && c > 0 => AlertInput::Legacy {
                kind: k.to_string(),
                count: c,
            },
            _ => AlertInput::Empty,
        }
    }
}

/// Cumulative translation of the floating widget relative to its CSS anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShelterPoint {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl ShelterPoint {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Waypoint of a predicted hazard track. Uses `lon`, matching the upstream feed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lon: f64,
}

impl From<PathPoint> for GeoPoint {
    fn from(p: PathPoint) -> Self {
        GeoPoint::new(p.lat, p.lon)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AqiMapPoint {
    pub id: String,
    pub location: String,
    pub coordinates: GeoPoint,
    pub aqi: u32,
    pub category: String,
}

/// The caller's primary air-quality reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    pub aqi: u32,
    pub location: String,
    pub coordinates: GeoPoint,
    pub category: String,
}

impl AirQualityReading {
    pub const MAIN_POINT_ID: &'static str = "main";

    /// Selectable point standing in for the primary reading.
    pub fn as_map_point(&self) -> AqiMapPoint {
        AqiMapPoint {
            id: Self::MAIN_POINT_ID.to_string(),
            location: self.location.clone(),
            coordinates: self.coordinates,
            aqi: self.aqi,
            category: self.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_list_wins_over_legacy_pair() {
        let list = vec![DisasterEvent::new("a", "earthquake")];
        let input = AlertInput::from_props(Some(&list), Some("flood"), Some(3));
        assert_eq!(input, AlertInput::Explicit(list));
    }

    #[test]
    fn legacy_pair_requires_type_and_nonzero_count() {
        assert_eq!(
            AlertInput::from_props(None, Some("flood"), Some(3)),
            AlertInput::Legacy {
                kind: "flood".into(),
                count: 3
            }
        );
        assert_eq!(AlertInput::from_props(None, Some("flood"), Some(0)), AlertInput::Empty);
        assert_eq!(AlertInput::from_props(None, Some(""), Some(2)), AlertInput::Empty);
        assert_eq!(AlertInput::from_props(None, None, Some(2)), AlertInput::Empty);
        assert_eq!(AlertInput::from_props(None, None, None), AlertInput::Empty);
    }

    #[test]
    fn disaster_event_serializes_kind_as_type() {
        let json = serde_json::to_string(&DisasterEvent::new("x", "cyclone")).unwrap();
        assert_eq!(json, r#"{"id":"x","type":"cyclone"}"#);
    }

    #[test]
    fn main_reading_becomes_main_point() {
        let reading = AirQualityReading {
            aqi: 142,
            location: "Delhi".into(),
            coordinates: GeoPoint::new(28.6, 77.2),
            category: "Unhealthy".into(),
        };
        let p = reading.as_map_point();
        assert_eq!(p.id, "main");
        assert_eq!(p.aqi, 142);
        assert_eq!(p.coordinates, GeoPoint::new(28.6, 77.2));
    }
}
