// Tunables for the widget and map layers. Props accept overrides; Default holds the production values.
use crate::model::GeoPoint;

pub const OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Geographic center of India; used when the host supplies no center.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(20.5937, 78.9629);
pub const DEFAULT_ZOOM: f64 = 5.0;
pub const AQI_MAP_ZOOM: f64 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub struct AlertConfig {
    /// Loading phase before the aggregated alerts become visible.
    pub population_delay_ms: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            population_delay_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub endpoint: String,
    pub open_space_radius_m: u32,
    pub shelter_radius_m: u32,
    pub fetch_timeout_ms: u32,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            endpoint: OVERPASS_ENDPOINT.to_string(),
            open_space_radius_m: 3000,
            shelter_radius_m: 10000,
            fetch_timeout_ms: 15_000,
            tile_url: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// Marker image set for one icon variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconSpec {
    pub icon_url: &'static str,
    pub icon_retina_url: &'static str,
}

pub const MARKER_SHADOW_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png";
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (1, -34);
pub const MARKER_SHADOW_SIZE: (u32, u32) = (41, 41);

pub const DEFAULT_ICON: IconSpec = IconSpec {
    icon_url: "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png",
    icon_retina_url: "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon-2x.png",
};
pub const GREEN_ICON: IconSpec = IconSpec {
    icon_url: "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-green.png",
    icon_retina_url: "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-green.png",
};
pub const BLUE_ICON: IconSpec = IconSpec {
    icon_url: "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-blue.png",
    icon_retina_url: "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-blue.png",
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
}

pub const PREDICTED_PATH_STYLE: PathStyle = PathStyle {
    color: "#FF0000",
    weight: 3.0,
    opacity: 0.8,
};

pub const AQI_MAIN_RADIUS: f64 = 10.0;
pub const AQI_POINT_RADIUS: f64 = 8.0;
