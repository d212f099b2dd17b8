//! Region-scoped feature queries against an Overpass interpreter.
//!
//! Query construction and response normalization are pure; [`fetch_open_spaces`]
//! and [`fetch_shelter_points`] add the HTTP round trip with a bounded timeout.

use std::collections::HashMap;

use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;
use serde_json::Value;

use crate::config::OverlayConfig;
use crate::error::FetchError;
use crate::model::{GeoPoint, ShelterPoint};

pub const SHELTER_PLACEHOLDER_NAME: &str = "Shelter Point";

/// Open-space tags, unioned in the query.
const OPEN_SPACE_FILTERS: [(&str, &str); 4] = [
    ("leisure", "park"),
    ("leisure", "common"),
    ("landuse", "grass"),
    ("leisure", "recreation_ground"),
];

pub fn open_spaces_query(center: GeoPoint, radius_m: u32) -> String {
    let mut q = String::from("[out:json];\n(\n");
    for (key, value) in OPEN_SPACE_FILTERS {
        q.push_str(&format!(
            "  node[\"{}\"=\"{}\"](around:{}, {}, {});\n",
            key, value, radius_m, center.lat, center.lng
        ));
    }
    q.push_str(");\nout body;\n");
    q
}

/// Way results are asked for their aggregate center (`out center`).
pub fn shelter_query(center: GeoPoint, radius_m: u32) -> String {
    let mut q = String::from("[out:json];\n(\n");
    for element in ["node", "way"] {
        q.push_str(&format!(
            "  {}[\"amenity\"~\"community_centre|shelter\"](around:{},{},{});\n",
            element, radius_m, center.lat, center.lng
        ));
    }
    q.push_str(");\nout center;\n");
    q
}

/// Raw element as returned by the index. Coordinates stay untyped so a
/// malformed value drops the element instead of failing the whole response.
#[derive(Debug, Default, Deserialize)]
pub struct OverpassElement {
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
    #[serde(default)]
    pub center: Option<ElementCenter>,
    #[serde(default)]
    pub tags: Option<HashMap<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ElementCenter {
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
}

fn numeric(v: &Option<Value>) -> Option<f64> {
    v.as_ref().and_then(Value::as_f64)
}

impl OverpassElement {
    /// Direct coordinate first, then the aggregate center, per axis.
    pub fn coordinate(&self) -> Option<GeoPoint> {
        let center = self.center.as_ref();
        let lat = numeric(&self.lat).or_else(|| center.and_then(|c| numeric(&c.lat)))?;
        let lng = numeric(&self.lon).or_else(|| center.and_then(|c| numeric(&c.lon)))?;
        Some(GeoPoint::new(lat, lng))
    }

    pub fn name(&self) -> Option<&str> {
        self.tags
            .as_ref()
            .and_then(|t| t.get("name"))
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
    }

    pub fn to_shelter(&self) -> Option<ShelterPoint> {
        let p = self.coordinate()?;
        Some(ShelterPoint {
            lat: p.lat,
            lng: p.lng,
            name: self.name().unwrap_or(SHELTER_PLACEHOLDER_NAME).to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct OverpassResponse {
    pub elements: Vec<OverpassElement>,
}

impl OverpassResponse {
    /// Requires an `elements` array; individual entries that are not element
    /// objects are skipped.
    pub fn parse(body: &str) -> Result<Self, FetchError> {
        #[derive(Deserialize)]
        struct Envelope {
            elements: Vec<Value>,
        }
        let env: Envelope = serde_json::from_str(body)?;
        let elements = env
            .elements
            .into_iter()
            .filter_map(|v| serde_json::from_value::<OverpassElement>(v).ok())
            .collect();
        Ok(Self { elements })
    }

    pub fn open_spaces(&self) -> Vec<GeoPoint> {
        self.elements
            .iter()
            .filter_map(OverpassElement::coordinate)
            .collect()
    }

    pub fn shelters(&self) -> Vec<ShelterPoint> {
        self.elements
            .iter()
            .filter_map(OverpassElement::to_shelter)
            .collect()
    }
}

async fn post_query(cfg: &OverlayConfig, query: String) -> Result<OverpassResponse, FetchError> {
    let timeout_ms = cfg.fetch_timeout_ms;
    let request = async {
        let resp = Request::post(&cfg.endpoint).body(query)?.send().await?;
        if !resp.ok() {
            return Err(FetchError::Status(resp.status()));
        }
        let text = resp
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;
        OverpassResponse::parse(&text)
    };
    let timeout = TimeoutFuture::new(timeout_ms);
    futures::pin_mut!(request, timeout);
    match select(request, timeout).await {
        Either::Left((res, _)) => res,
        Either::Right(_) => Err(FetchError::Timeout(timeout_ms)),
    }
}

pub async fn fetch_open_spaces(
    cfg: &OverlayConfig,
    center: GeoPoint,
) -> Result<Vec<GeoPoint>, FetchError> {
    let query = open_spaces_query(center, cfg.open_space_radius_m);
    Ok(post_query(cfg, query).await?.open_spaces())
}

pub async fn fetch_shelter_points(
    cfg: &OverlayConfig,
    center: GeoPoint,
) -> Result<Vec<ShelterPoint>, FetchError> {
    let query = shelter_query(center, cfg.shelter_radius_m);
    Ok(post_query(cfg, query).await?.shelters())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn element(json: &str) -> OverpassElement {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn direct_coordinate_with_placeholder_name() {
        let e = element(r#"{"lat":1,"lon":2,"tags":{}}"#);
        assert_eq!(
            e.to_shelter(),
            Some(ShelterPoint {
                lat: 1.0,
                lng: 2.0,
                name: "Shelter Point".into()
            })
        );
    }

    #[test]
    fn falls_back_to_aggregate_center() {
        let e = element(r#"{"center":{"lat":3,"lon":4},"tags":{"name":"Town Hall"}}"#);
        assert_eq!(
            e.to_shelter(),
            Some(ShelterPoint {
                lat: 3.0,
                lng: 4.0,
                name: "Town Hall".into()
            })
        );
    }

    #[test]
    fn unresolvable_elements_are_dropped() {
        assert_eq!(element(r#"{"tags":{"name":"Nowhere"}}"#).to_shelter(), None);
        assert_eq!(element(r#"{"lat":"n/a","lon":2}"#).coordinate(), None);
        assert_eq!(element(r#"{"lat":5,"center":{"lat":1}}"#).coordinate(), None);
    }

    #[test]
    fn response_keeps_only_resolvable_points() {
        let body = r#"{
            "version": 0.6,
            "elements": [
                {"type":"node","id":1,"lat":10.5,"lon":76.2,"tags":{"leisure":"park"}},
                {"type":"way","id":2,"center":{"lat":10.6,"lon":76.3}},
                {"type":"way","id":3},
                42
            ]
        }"#;
        let resp = OverpassResponse::parse(body).unwrap();
        assert_eq!(
            resp.open_spaces(),
            vec![GeoPoint::new(10.5, 76.2), GeoPoint::new(10.6, 76.3)]
        );
        let shelters = resp.shelters();
        assert_eq!(shelters.len(), 2);
        assert!(shelters.iter().all(|s| s.name == SHELTER_PLACEHOLDER_NAME));
    }

    #[test]
    fn missing_elements_is_a_decode_error() {
        assert!(matches!(
            OverpassResponse::parse(r#"{"remark":"runtime error"}"#),
            Err(FetchError::Decode(_))
        ));
        assert!(OverpassResponse::parse("<html>").is_err());
    }

    #[test]
    fn open_space_query_unions_four_tags() {
        let q = open_spaces_query(GeoPoint::new(19.07, 72.87), 3000);
        assert!(q.starts_with("[out:json];"));
        for tag in [
            r#"node["leisure"="park"]"#,
            r#"node["leisure"="common"]"#,
            r#"node["landuse"="grass"]"#,
            r#"node["leisure"="recreation_ground"]"#,
        ] {
            assert!(q.contains(tag), "missing {}", tag);
        }
        assert_eq!(q.matches("(around:3000, 19.07, 72.87)").count(), 4);
        assert!(q.trim_end().ends_with("out body;"));
    }

    #[test]
    fn shelter_query_covers_nodes_and_ways_with_center() {
        let q = shelter_query(GeoPoint::new(13.08, 80.27), 10000);
        assert!(q.contains(r#"node["amenity"~"community_centre|shelter"](around:10000,13.08,80.27);"#));
        assert!(q.contains(r#"way["amenity"~"community_centre|shelter"](around:10000,13.08,80.27);"#));
        assert!(q.trim_end().ends_with("out center;"));
    }
}
