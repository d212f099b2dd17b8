//! Thin bindings to the global Leaflet (`L`) loaded by index.html, plus the
//! two map views the components drive.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::{
    self, IconSpec, MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, MARKER_POPUP_ANCHOR,
    MARKER_SHADOW_SIZE, MARKER_SHADOW_URL, PREDICTED_PATH_STYLE,
};
use crate::layers::LayerSet;
use crate::model::GeoPoint;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone, PartialEq)]
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn new_map(el: &HtmlElement, options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &Array, zoom: f64) -> Map;

    #[wasm_bindgen(method)]
    fn remove(this: &Map) -> Map;

    #[wasm_bindgen(method, js_name = on)]
    fn on_map(this: &Map, event: &str, handler: &Function) -> Map;

    #[wasm_bindgen(method, js_name = off)]
    fn off_map(this: &Map, event: &str) -> Map;

    #[wasm_bindgen(method, js_name = closePopup)]
    fn close_popup(this: &Map, popup: &Popup) -> Map;

    #[derive(Debug, Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, target: &JsValue) -> Layer;

    #[wasm_bindgen(method)]
    fn on(this: &Layer, event: &str, handler: &Function) -> Layer;

    #[wasm_bindgen(method)]
    fn off(this: &Layer, event: &str) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(extends = Layer)]
    type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &LayerGroup) -> LayerGroup;

    type Icon;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    fn icon(options: &JsValue) -> Icon;

    #[wasm_bindgen(extends = Layer)]
    type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(at: &Array, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = bindTooltip)]
    fn bind_tooltip(this: &Marker, content: &str, options: &JsValue) -> Marker;

    #[wasm_bindgen(extends = Layer)]
    type Polyline;

    #[wasm_bindgen(js_namespace = L, js_name = polyline)]
    fn polyline(points: &Array, options: &JsValue) -> Polyline;

    #[wasm_bindgen(extends = Layer)]
    type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn circle_marker(at: &Array, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    type Popup;

    #[wasm_bindgen(js_namespace = L, js_name = popup)]
    fn popup(options: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &Popup, at: &Array) -> Popup;

    #[wasm_bindgen(method, js_name = setContent)]
    fn set_content(this: &Popup, html: &str) -> Popup;

    #[wasm_bindgen(method, js_name = openOn)]
    fn open_on(this: &Popup, map: &Map) -> Popup;

    #[wasm_bindgen(method, js_name = isOpen)]
    fn is_open(this: &Popup) -> bool;
}

/// True once the Leaflet script has defined `L` on the page.
pub fn available() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("L")).unwrap_or(false)
}

fn lat_lng(p: GeoPoint) -> Array {
    Array::of2(&JsValue::from_f64(p.lat), &JsValue::from_f64(p.lng))
}

fn pair<T: Into<f64>>(v: (T, T)) -> JsValue {
    Array::of2(&JsValue::from_f64(v.0.into()), &JsValue::from_f64(v.1.into())).into()
}

fn options(entries: &[(&str, JsValue)]) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    for (key, value) in entries {
        Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj.into())
}

fn marker_icon(spec: IconSpec) -> Result<Icon, JsValue> {
    Ok(icon(&options(&[
        ("iconUrl", spec.icon_url.into()),
        ("iconRetinaUrl", spec.icon_retina_url.into()),
        ("shadowUrl", MARKER_SHADOW_URL.into()),
        ("iconSize", pair(MARKER_ICON_SIZE)),
        ("iconAnchor", pair(MARKER_ICON_ANCHOR)),
        ("popupAnchor", pair(MARKER_POPUP_ANCHOR)),
        ("shadowSize", pair(MARKER_SHADOW_SIZE)),
    ])?))
}

fn mount_base(
    el: &HtmlElement,
    center: GeoPoint,
    zoom: f64,
    tile_url: &str,
    attribution: &str,
) -> Result<Map, JsValue> {
    if !available() {
        return Err(JsValue::from_str("Leaflet (L) is not loaded"));
    }
    let map = new_map(
        el,
        &options(&[
            ("center", lat_lng(center).into()),
            ("zoom", zoom.into()),
            ("scrollWheelZoom", false.into()),
        ])?,
    )?;
    tile_layer(tile_url, &options(&[("attribution", attribution.into())])?)
        .add_to(map.as_ref());
    Ok(map)
}

/// Base map with a single layer group that is rebuilt wholesale on each render.
pub struct OverlayMap {
    map: Map,
    group: LayerGroup,
}

impl OverlayMap {
    pub fn mount(
        el: &HtmlElement,
        center: GeoPoint,
        zoom: f64,
        cfg: &config::OverlayConfig,
    ) -> Result<Self, JsValue> {
        let map = mount_base(el, center, zoom, &cfg.tile_url, &cfg.attribution)?;
        let group = layer_group();
        group.add_to(map.as_ref());
        Ok(Self { map, group })
    }

    pub fn recenter(&self, center: GeoPoint, zoom: f64) {
        self.map.set_view(&lat_lng(center), zoom);
    }

    pub fn render(&self, layers: &LayerSet) -> Result<(), JsValue> {
        self.group.clear_layers();
        let target: &JsValue = self.group.as_ref();
        for m in &layers.markers {
            let icon = marker_icon(m.kind.icon())?;
            let marker = marker(&lat_lng(m.at), &options(&[("icon", icon.into())])?);
            if let Some(name) = m.kind.tooltip() {
                marker.bind_tooltip(
                    &crate::util::escape_html(name),
                    &options(&[("direction", "top".into()), ("offset", pair((0, -10)))])?,
                );
            }
            marker.add_to(target);
        }
        if let Some(path) = &layers.path {
            let points: Array = path.iter().map(|p| JsValue::from(lat_lng(*p))).collect();
            polyline(
                &points,
                &options(&[
                    ("color", PREDICTED_PATH_STYLE.color.into()),
                    ("weight", PREDICTED_PATH_STYLE.weight.into()),
                    ("opacity", PREDICTED_PATH_STYLE.opacity.into()),
                ])?,
            )
            .add_to(target);
        }
        Ok(())
    }

    pub fn destroy(self) {
        self.map.remove();
    }
}

/// A clickable circle marker for the AQI view.
pub struct CircleSpec {
    pub at: GeoPoint,
    pub radius: f64,
    pub fill: String,
}

type ClickClosure = Closure<dyn FnMut()>;

/// AQI map: circle markers plus one reusable popup, so a new selection moves
/// the popup instead of opening a second one. The popup ignores map clicks;
/// clicks on empty map go to `on_map_click` and marker clicks do not bubble.
pub struct AqiMapView {
    map: Map,
    group: LayerGroup,
    popup: Popup,
    clicks: Vec<ClickClosure>,
    _on_popup_remove: ClickClosure,
    _on_map_click: ClickClosure,
}

impl AqiMapView {
    pub fn mount(
        el: &HtmlElement,
        center: GeoPoint,
        on_popup_remove: impl FnMut() + 'static,
        on_map_click: impl FnMut() + 'static,
    ) -> Result<Self, JsValue> {
        let map = mount_base(
            el,
            center,
            config::AQI_MAP_ZOOM,
            config::OSM_TILE_URL,
            config::OSM_ATTRIBUTION,
        )?;
        let group = layer_group();
        group.add_to(map.as_ref());
        let popup = popup(&options(&[("closeOnClick", false.into())])?);
        let on_remove = Closure::wrap(Box::new(on_popup_remove) as Box<dyn FnMut()>);
        popup.on("remove", on_remove.as_ref().unchecked_ref());
        let on_click = Closure::wrap(Box::new(on_map_click) as Box<dyn FnMut()>);
        map.on_map("click", on_click.as_ref().unchecked_ref());
        Ok(Self {
            map,
            group,
            popup,
            clicks: Vec::new(),
            _on_popup_remove: on_remove,
            _on_map_click: on_click,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Replaces every marker. `on_click` receives the index into `circles`.
    pub fn render_markers(
        &mut self,
        circles: &[CircleSpec],
        on_click: Rc<dyn Fn(usize)>,
    ) -> Result<(), JsValue> {
        self.group.clear_layers();
        self.clicks.clear();
        let target: &JsValue = self.group.as_ref();
        for (i, c) in circles.iter().enumerate() {
            let marker = circle_marker(
                &lat_lng(c.at),
                &options(&[
                    ("radius", c.radius.into()),
                    ("color", "#ffffff".into()),
                    ("weight", JsValue::from_f64(2.0)),
                    ("fillColor", c.fill.as_str().into()),
                    ("fillOpacity", JsValue::from_f64(1.0)),
                    ("bubblingMouseEvents", false.into()),
                ])?,
            );
            let on_click = on_click.clone();
            let cb = Closure::wrap(Box::new(move || on_click(i)) as Box<dyn FnMut()>);
            marker.on("click", cb.as_ref().unchecked_ref());
            marker.add_to(target);
            self.clicks.push(cb);
        }
        Ok(())
    }

    pub fn show_popup(&self, at: GeoPoint, html: &str) {
        self.popup.set_lat_lng(&lat_lng(at));
        self.popup.set_content(html);
        if !self.popup.is_open() {
            self.popup.open_on(&self.map);
        }
    }

    pub fn popup_open(&self) -> bool {
        self.popup.is_open()
    }

    pub fn hide_popup(&self) {
        if self.popup.is_open() {
            self.map.close_popup(&self.popup);
        }
    }

    pub fn destroy(self) {
        self.popup.off("remove");
        self.map.off_map("click");
        self.map.remove();
    }
}

/// Shared slot the components keep their view in between renders.
pub type ViewSlot<T> = Rc<RefCell<Option<T>>>;
