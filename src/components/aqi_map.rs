use std::rc::Rc;

use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::{AQI_MAIN_RADIUS, AQI_POINT_RADIUS};
use crate::leaflet::{AqiMapView, CircleSpec, Map, ViewSlot};
use crate::model::{AirQualityReading, AqiMapPoint, GeoPoint};
use crate::state::{marker_click, MarkerClick};
use crate::util::{cerror, escape_html};

/// Presentational over caller-owned selection: clicks and popup dismissal go
/// through `set_selected_point`, and the popup follows `selected_point`.
#[derive(Properties, PartialEq, Clone)]
pub struct AqiMapProps {
    pub map_center: GeoPoint,
    #[prop_or_default]
    pub air_quality: Option<AirQualityReading>,
    #[prop_or_default]
    pub map_points: Vec<AqiMapPoint>,
    pub selected_point: Option<AqiMapPoint>,
    pub set_selected_point: Callback<Option<AqiMapPoint>>,
    /// AQI to marker fill color.
    pub get_marker_color: Callback<u32, String>,
    /// AQI to CSS class for the popup badge.
    pub get_aqi_color: Callback<u32, String>,
    #[prop_or_default]
    pub on_map_ready: Option<Callback<Map>>,
    #[prop_or_default]
    pub map_container_style: AttrValue,
}

pub fn popup_html(point: &AqiMapPoint, badge_class: &str) -> String {
    format!(
        "<div class=\"p-2 bg-gray-800 text-gray-200\"><h4 class=\"font-bold\">{}</h4><div class=\"px-2 py-1 rounded {}\">AQI: {} ({})</div></div>",
        escape_html(&point.location),
        escape_html(badge_class),
        point.aqi,
        escape_html(&point.category)
    )
}

/// Markers in draw order: the main reading (if any) first, then each point.
fn selectable_points(
    reading: Option<&AirQualityReading>,
    points: &[AqiMapPoint],
) -> Vec<AqiMapPoint> {
    reading
        .map(AirQualityReading::as_map_point)
        .into_iter()
        .chain(points.iter().cloned())
        .collect()
}

#[function_component(AqiMap)]
pub fn aqi_map(props: &AqiMapProps) -> Html {
    let container_ref = use_node_ref();
    let view: ViewSlot<AqiMapView> = use_mut_ref(|| None);
    // Latest props, read by Leaflet callbacks registered earlier.
    let selected_ref = use_mut_ref(|| props.selected_point.clone());
    let setter_ref = use_mut_ref(|| props.set_selected_point.clone());
    let aqi_color_ref = use_mut_ref(|| props.get_aqi_color.clone());
    *selected_ref.borrow_mut() = props.selected_point.clone();
    *setter_ref.borrow_mut() = props.set_selected_point.clone();
    *aqi_color_ref.borrow_mut() = props.get_aqi_color.clone();

    let map_ready = use_state(|| false);

    {
        let container_ref = container_ref.clone();
        let view = view.clone();
        let selected_ref = selected_ref.clone();
        let setter_ref = setter_ref.clone();
        let map_ready = map_ready.clone();
        let center = props.map_center;
        let on_ready = props.on_map_ready.clone();
        use_effect_with((), move |_| {
            // Popup closed by the user, or a click on empty map.
            let dismiss = move || {
                if selected_ref.borrow().is_none() {
                    return;
                }
                let setter = setter_ref.borrow().clone();
                setter.emit(None);
            };
            let on_map_click = dismiss.clone();
            match container_ref.cast::<HtmlElement>() {
                Some(el) => match AqiMapView::mount(&el, center, dismiss, on_map_click) {
                    Ok(v) => {
                        if let Some(cb) = on_ready {
                            cb.emit(v.map().clone());
                        }
                        *view.borrow_mut() = Some(v);
                        map_ready.set(true);
                    }
                    Err(e) => cerror(&format!("AQI map mount failed: {:?}", e)),
                },
                None => cerror("AQI map container missing"),
            }
            move || {
                if let Some(v) = view.borrow_mut().take() {
                    v.destroy();
                }
            }
        });
    }

    {
        let view = view.clone();
        let selected_ref = selected_ref.clone();
        let setter_ref = setter_ref.clone();
        let aqi_color_ref = aqi_color_ref.clone();
        let deps = (
            props.air_quality.clone(),
            props.map_points.clone(),
            props.get_marker_color.clone(),
            *map_ready,
        );
        use_effect_with(deps, move |(reading, points, marker_color, _)| {
            let selectable = Rc::new(selectable_points(reading.as_ref(), points));
            let circles: Vec<CircleSpec> = selectable
                .iter()
                .enumerate()
                .map(|(i, p)| CircleSpec {
                    at: p.coordinates,
                    radius: if i == 0 && reading.is_some() {
                        AQI_MAIN_RADIUS
                    } else {
                        AQI_POINT_RADIUS
                    },
                    fill: marker_color.emit(p.aqi),
                })
                .collect();
            let click_view = view.clone();
            if let Some(v) = view.borrow_mut().as_mut() {
                let on_click = Rc::new(move |i: usize| {
                    let Some(clicked) = selectable.get(i) else {
                        return;
                    };
                    let popup_open = click_view
                        .borrow()
                        .as_ref()
                        .is_some_and(AqiMapView::popup_open);
                    let selected = selected_ref.borrow().clone();
                    let action = marker_click(selected.as_ref(), clicked, popup_open);
                    match action {
                        MarkerClick::Select(p) => {
                            let setter = setter_ref.borrow().clone();
                            setter.emit(Some(p));
                        }
                        MarkerClick::Reopen(p) => {
                            let badge = aqi_color_ref.borrow().emit(p.aqi);
                            if let Some(v) = click_view.borrow().as_ref() {
                                v.show_popup(p.coordinates, &popup_html(&p, &badge));
                            }
                        }
                    }
                });
                if let Err(e) = v.render_markers(&circles, on_click) {
                    cerror(&format!("AQI marker render failed: {:?}", e));
                }
            }
            || ()
        });
    }

    {
        let view = view.clone();
        let deps = (
            props.selected_point.clone(),
            props.get_aqi_color.clone(),
            *map_ready,
        );
        use_effect_with(deps, move |(selected, aqi_color, _)| {
            if let Some(v) = view.borrow().as_ref() {
                match selected {
                    Some(p) => v.show_popup(p.coordinates, &popup_html(p, &aqi_color.emit(p.aqi))),
                    None => v.hide_popup(),
                }
            }
            || ()
        });
    }

    html! { <div ref={container_ref} style={props.map_container_style.clone()}></div> }
}
