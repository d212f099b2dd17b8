use super::{alert_widget::AlertWidget, aqi_map::AqiMap, map_overlay::MapOverlay};
use crate::leaflet::Map;
use crate::model::{AirQualityReading, AqiMapPoint, DisasterEvent, GeoPoint, PathPoint};
use crate::state::{Selection, SelectionAction};
use crate::util::clog;
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum View {
    Hazards,
    AirQuality,
}

fn aqi_marker_color(aqi: u32) -> String {
    match aqi {
        0..=50 => "#22c55e",
        51..=100 => "#eab308",
        101..=150 => "#f97316",
        151..=200 => "#ef4444",
        201..=300 => "#a855f7",
        _ => "#7f1d1d",
    }
    .to_string()
}

fn aqi_badge_class(aqi: u32) -> String {
    match aqi {
        0..=50 => "bg-green-500",
        51..=100 => "bg-yellow-500",
        101..=150 => "bg-orange-500",
        151..=200 => "bg-red-500",
        201..=300 => "bg-purple-500",
        _ => "bg-red-900",
    }
    .to_string()
}

fn station(id: &str, location: &str, lat: f64, lng: f64, aqi: u32, category: &str) -> AqiMapPoint {
    AqiMapPoint {
        id: id.into(),
        location: location.into(),
        coordinates: GeoPoint::new(lat, lng),
        aqi,
        category: category.into(),
    }
}

/// Demo host page. Layout, navigation and data sourcing belong to the embedding
/// site; this only wires the components together.
#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Hazards);
    let show_open_spaces = use_state(|| true);
    let show_shelters = use_state(|| true);
    let selection = use_reducer(Selection::default);

    let disasters = vec![
        DisasterEvent::new("eq-1", "earthquake"),
        DisasterEvent::new("cy-1", "cyclone"),
        DisasterEvent::new("cy-2", "cyclone"),
    ];
    let center = GeoPoint::new(19.076, 72.8777);
    let predicted_path = vec![
        PathPoint { lat: 17.2, lon: 70.1 },
        PathPoint { lat: 18.1, lon: 71.4 },
        PathPoint { lat: 19.0, lon: 72.6 },
    ];

    let to_hazards = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Hazards))
    };
    let to_air = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::AirQuality))
    };
    let toggle_open_spaces = {
        let s = show_open_spaces.clone();
        Callback::from(move |_| s.set(!*s))
    };
    let toggle_shelters = {
        let s = show_shelters.clone();
        Callback::from(move |_| s.set(!*s))
    };

    let content = match *view {
        View::Hazards => html! {
            <div style="position:relative; width:100vw; height:calc(100vh - 48px);">
                <MapOverlay
                    center={center}
                    zoom={11.0}
                    markers={vec![GeoPoint::new(19.2, 72.97)]}
                    show_open_spaces={*show_open_spaces}
                    show_shelter_points={*show_shelters}
                    predicted_path={predicted_path}
                />
                <div style="position:absolute; left:12px; bottom:12px; z-index:1000; background:rgba(22,27,34,0.9); color:#c9d1d9; border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; flex-direction:column; gap:6px;">
                    <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                        <input type="checkbox" checked={*show_open_spaces} onclick={toggle_open_spaces} />
                        <span>{"Open spaces"}</span>
                    </label>
                    <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                        <input type="checkbox" checked={*show_shelters} onclick={toggle_shelters} />
                        <span>{"Shelter points"}</span>
                    </label>
                </div>
            </div>
        },
        View::AirQuality => {
            let air_quality = AirQualityReading {
                aqi: 162,
                location: "Mumbai Central".into(),
                coordinates: center,
                category: "Unhealthy".into(),
            };
            let map_points = vec![
                station("bandra", "Bandra", 19.0596, 72.8295, 88, "Moderate"),
                station("powai", "Powai", 19.1176, 72.906, 134, "Unhealthy for Sensitive Groups"),
                station("colaba", "Colaba", 18.9067, 72.8147, 46, "Good"),
            ];
            let set_selected_point = {
                let selection = selection.clone();
                Callback::from(move |p: Option<AqiMapPoint>| selection.dispatch(SelectionAction::from_setter(p)))
            };
            let on_map_ready = Callback::from(|_: Map| clog("AQI map ready"));
            html! {
                <AqiMap
                    map_center={center}
                    air_quality={Some(air_quality)}
                    map_points={map_points}
                    selected_point={selection.selected.clone()}
                    set_selected_point={set_selected_point}
                    get_marker_color={Callback::from(aqi_marker_color)}
                    get_aqi_color={Callback::from(aqi_badge_class)}
                    on_map_ready={Some(on_map_ready)}
                    map_container_style="width:100vw; height:calc(100vh - 48px);"
                />
            }
        }
    };

    html! {
        <div style="position:relative; min-height:100vh; background:#0d1117; color:#c9d1d9;">
            <div id="top-bar" style="height:48px; display:flex; align-items:center; gap:8px; padding:0 12px; border-bottom:1px solid #30363d;">
                <button onclick={to_hazards}>{"Hazards"}</button>
                <button onclick={to_air}>{"Air Quality"}</button>
            </div>
            { content }
            <AlertWidget disasters={Some(disasters)} />
        </div>
    }
}
