use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::{OverlayConfig, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::layers::{build_layers, LayerInputs};
use crate::leaflet::{OverlayMap, ViewSlot};
use crate::model::{GeoPoint, PathPoint, ShelterPoint};
use crate::overpass::{fetch_open_spaces, fetch_shelter_points};
use crate::state::LayerFetch;
use crate::util::{cerror, clog, cwarn};

#[derive(Properties, PartialEq, Clone)]
pub struct MapOverlayProps {
    #[prop_or(DEFAULT_CENTER)]
    pub center: GeoPoint,
    #[prop_or_default]
    pub markers: Vec<GeoPoint>,
    #[prop_or(DEFAULT_ZOOM)]
    pub zoom: f64,
    #[prop_or(false)]
    pub show_open_spaces: bool,
    #[prop_or(false)]
    pub show_shelter_points: bool,
    #[prop_or_default]
    pub predicted_path: Vec<PathPoint>,
    #[prop_or_default]
    pub config: OverlayConfig,
}

#[function_component(MapOverlay)]
pub fn map_overlay(props: &MapOverlayProps) -> Html {
    let container_ref = use_node_ref();
    let view: ViewSlot<OverlayMap> = use_mut_ref(|| None);
    let map_ready = use_state(|| false);
    let open_spaces = use_state(Vec::<GeoPoint>::new);
    let shelters = use_state(Vec::<ShelterPoint>::new);
    let open_space_fetch = use_mut_ref(LayerFetch::default);
    let shelter_fetch = use_mut_ref(LayerFetch::default);

    // Mount once; recentering below reuses this instance.
    {
        let container_ref = container_ref.clone();
        let view = view.clone();
        let map_ready = map_ready.clone();
        let open_space_fetch = open_space_fetch.clone();
        let shelter_fetch = shelter_fetch.clone();
        let (center, zoom, cfg) = (props.center, props.zoom, props.config.clone());
        use_effect_with((), move |_| {
            match container_ref.cast::<HtmlElement>() {
                Some(el) => match OverlayMap::mount(&el, center, zoom, &cfg) {
                    Ok(m) => {
                        *view.borrow_mut() = Some(m);
                        map_ready.set(true);
                    }
                    Err(e) => cerror(&format!("map mount failed: {:?}", e)),
                },
                None => cwarn("map container missing"),
            }
            move || {
                open_space_fetch.borrow_mut().close();
                shelter_fetch.borrow_mut().close();
                if let Some(m) = view.borrow_mut().take() {
                    m.destroy();
                }
            }
        });
    }

    {
        let view = view.clone();
        use_effect_with((props.center, props.zoom), move |(center, zoom)| {
            if let Some(m) = view.borrow().as_ref() {
                m.recenter(*center, *zoom);
            }
            || ()
        });
    }

    {
        let fetch = open_space_fetch.clone();
        let open_spaces = open_spaces.clone();
        let deps = (props.center, props.show_open_spaces, props.config.clone());
        use_effect_with(deps, move |(center, enabled, cfg)| {
            let ticket = fetch.borrow_mut().sync(*enabled);
            match ticket {
                Some(ticket) => {
                    let (center, cfg) = (*center, cfg.clone());
                    spawn_local(async move {
                        let points = fetch_open_spaces(&cfg, center).await.unwrap_or_else(|e| {
                            cerror(&format!("Error fetching open spaces from OSM: {}", e));
                            Vec::new()
                        });
                        let accepted = fetch.borrow().accept(ticket, points);
                        match accepted {
                            Some(points) => open_spaces.set(points),
                            None => clog("discarding stale open spaces response"),
                        }
                    });
                }
                None => open_spaces.set(Vec::new()),
            }
            || ()
        });
    }

    {
        let fetch = shelter_fetch.clone();
        let shelters = shelters.clone();
        let deps = (props.center, props.show_shelter_points, props.config.clone());
        use_effect_with(deps, move |(center, enabled, cfg)| {
            let ticket = fetch.borrow_mut().sync(*enabled);
            match ticket {
                Some(ticket) => {
                    let (center, cfg) = (*center, cfg.clone());
                    spawn_local(async move {
                        let points = fetch_shelter_points(&cfg, center).await.unwrap_or_else(|e| {
                            cerror(&format!("Error fetching shelter points from OSM: {}", e));
                            Vec::new()
                        });
                        let accepted = fetch.borrow().accept(ticket, points);
                        match accepted {
                            Some(points) => shelters.set(points),
                            None => clog("discarding stale shelter response"),
                        }
                    });
                }
                None => shelters.set(Vec::new()),
            }
            || ()
        });
    }

    let layers = build_layers(&LayerInputs {
        center: props.center,
        markers: &props.markers,
        open_spaces: props.show_open_spaces.then_some(open_spaces.as_slice()),
        shelters: props.show_shelter_points.then_some(shelters.as_slice()),
        predicted_path: &props.predicted_path,
    });
    {
        let view = view.clone();
        use_effect_with((layers, *map_ready), move |(layers, _)| {
            if let Some(m) = view.borrow().as_ref() {
                if let Err(e) = m.render(layers) {
                    cerror(&format!("layer render failed: {:?}", e));
                }
            }
            || ()
        });
    }

    html! {
        <div style="position:relative; width:100%; height:100%;">
            <div ref={container_ref} style="width:100%; height:100%;"></div>
            {
                if *map_ready {
                    html! {}
                } else {
                    html! { <div style="position:absolute; inset:0; color:#fff; font-size:14px; padding:16px;">{"Loading Map..."}</div> }
                }
            }
        </div>
    }
}

