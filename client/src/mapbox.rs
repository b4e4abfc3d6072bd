//! Bindings to the global `mapboxgl` object loaded by `index.html`.

use js_sys::{Array, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use worldmap_shared::{Feature, FeatureId, LngLat, Properties};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, catch, js_namespace = mapboxgl, js_class = "Map")]
    pub fn new(options: &JsValue) -> Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    pub fn add_source(this: &MapboxMap, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    pub fn add_layer(this: &MapboxMap, layer: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    pub fn on(this: &MapboxMap, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on_layer(this: &MapboxMap, event: &str, layer_id: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, catch, js_name = setFeatureState)]
    pub fn set_feature_state(
        this: &MapboxMap,
        target: &JsValue,
        state: &JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    pub fn remove(this: &MapboxMap);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Popup)]
    pub type Popup;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Popup")]
    pub fn new(options: &JsValue) -> Popup;

    #[wasm_bindgen(method, catch, js_name = setLngLat)]
    pub fn set_lng_lat(this: &Popup, lng_lat: &JsValue) -> Result<Popup, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setHTML)]
    pub fn set_html(this: &Popup, html: &str) -> Result<Popup, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    pub fn add_to(this: &Popup, map: &MapboxMap) -> Result<Popup, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn remove(this: &Popup) -> Result<Popup, JsValue>;
}

/// Serialize into plain JS objects (not `Map`s), which is what the engine expects
/// for options, sources, layers and feature state.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Set `mapboxgl.accessToken`. Returns `false` when the library is not loaded.
pub fn set_access_token(token: &str) -> bool {
    let Ok(mapboxgl) = Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl")) else {
        return false;
    };
    if mapboxgl.is_undefined() || mapboxgl.is_null() {
        return false;
    }
    Reflect::set(
        &mapboxgl,
        &JsValue::from_str("accessToken"),
        &JsValue::from_str(token),
    )
    .unwrap_or(false)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub close_button: bool,
    pub close_on_click: bool,
}

#[derive(Serialize)]
pub struct FeatureTarget<'a> {
    pub source: &'a str,
    pub id: FeatureId,
}

/// Geographic position of a map mouse event (`e.lngLat`).
pub fn event_lng_lat(event: &JsValue) -> Option<LngLat> {
    let lng_lat = Reflect::get(event, &JsValue::from_str("lngLat")).ok()?;
    let lng = Reflect::get(&lng_lat, &JsValue::from_str("lng")).ok()?.as_f64()?;
    let lat = Reflect::get(&lng_lat, &JsValue::from_str("lat")).ok()?.as_f64()?;
    Some(LngLat::new(lng, lat))
}

/// Rendered features under the pointer (`e.features`), topmost first. Only the
/// id and properties are read; geometry is not needed for hover handling.
pub fn event_features(event: &JsValue) -> Vec<Feature> {
    let Ok(features) = Reflect::get(event, &JsValue::from_str("features")) else {
        return Vec::new();
    };
    let Ok(features) = features.dyn_into::<Array>() else {
        return Vec::new();
    };
    features
        .iter()
        .map(|raw| {
            let id = Reflect::get(&raw, &JsValue::from_str("id"))
                .ok()
                .and_then(|v| v.as_f64())
                .filter(|v| *v >= 0.0 && v.fract() == 0.0)
                .map(|v| v as FeatureId);
            let properties = Reflect::get(&raw, &JsValue::from_str("properties"))
                .ok()
                .filter(|v| v.is_object())
                .and_then(|v| serde_wasm_bindgen::from_value::<Properties>(v).ok());
            Feature {
                id,
                geometry: None,
                properties,
            }
        })
        .collect()
}
