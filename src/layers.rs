//! Renderable layer set for the map overlay, built from props plus fetched data.

use crate::config::{IconSpec, BLUE_ICON, DEFAULT_ICON, GREEN_ICON};
use crate::model::{GeoPoint, PathPoint, ShelterPoint};

#[derive(Clone, Debug, PartialEq)]
pub enum MarkerKind {
    Primary,
    Custom,
    OpenSpace,
    Shelter { name: String },
}

impl MarkerKind {
    pub fn icon(&self) -> IconSpec {
        match self {
            MarkerKind::Primary | MarkerKind::Custom => DEFAULT_ICON,
            MarkerKind::OpenSpace => GREEN_ICON,
            MarkerKind::Shelter { .. } => BLUE_ICON,
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        match self {
            MarkerKind::Shelter { name } => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub at: GeoPoint,
    pub kind: MarkerKind,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerSet {
    pub markers: Vec<MarkerSpec>,
    /// Present only when the predicted path has at least two points.
    pub path: Option<Vec<GeoPoint>>,
}

pub struct LayerInputs<'a> {
    pub center: GeoPoint,
    pub markers: &'a [GeoPoint],
    pub open_spaces: Option<&'a [GeoPoint]>,
    pub shelters: Option<&'a [ShelterPoint]>,
    pub predicted_path: &'a [PathPoint],
}

pub fn path_line(path: &[PathPoint]) -> Option<Vec<GeoPoint>> {
    if path.len() < 2 {
        return None;
    }
    Some(path.iter().copied().map(GeoPoint::from).collect())
}

/// Feature layers are `None` when their toggle is off and render nothing.
pub fn build_layers(input: &LayerInputs<'_>) -> LayerSet {
    let mut markers = Vec::with_capacity(
        1 + input.markers.len()
            + input.open_spaces.map_or(0, <[_]>::len)
            + input.shelters.map_or(0, <[_]>::len),
    );
    markers.push(MarkerSpec {
        at: input.center,
        kind: MarkerKind::Primary,
    });
    markers.extend(input.markers.iter().map(|&at| MarkerSpec {
        at,
        kind: MarkerKind::Custom,
    }));
    if let Some(spaces) = input.open_spaces {
        markers.extend(spaces.iter().map(|&at| MarkerSpec {
            at,
            kind: MarkerKind::OpenSpace,
        }));
    }
    if let Some(shelters) = input.shelters {
        markers.extend(shelters.iter().map(|s| MarkerSpec {
            at: s.point(),
            kind: MarkerKind::Shelter {
                name: s.name.clone(),
            },
        }));
    }
    LayerSet {
        markers,
        path: path_line(input.predicted_path),
    }
}
