use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use worldmap_shared::config::{
    BUBBLE_SOURCE, COUNTRIES_SOURCE, FILL_LAYER, HOVER_STATE_KEY, MapOptions, container_style,
};
use worldmap_shared::style::{self, SourceSpec};
use worldmap_shared::{
    ChartVariant, FeatureCollection, FeatureId, FeatureStateSink, HoverController, LngLat,
    TooltipSurface, bubble_points,
};

use crate::dataset;
use crate::mapbox::{self, FeatureTarget, MapboxMap, Popup, PopupOptions};

/// Writes the `hover` feature state of the polygon source.
struct MapFeatureState {
    map: Rc<MapboxMap>,
}

impl FeatureStateSink for MapFeatureState {
    fn set_hover(&mut self, id: FeatureId, hovered: bool) {
        let target = FeatureTarget {
            source: COUNTRIES_SOURCE,
            id,
        };
        let (Ok(target), Ok(state)) = (
            mapbox::to_js(&target),
            mapbox::to_js(&json!({ HOVER_STATE_KEY: hovered })),
        ) else {
            return;
        };
        if let Err(e) = self.map.set_feature_state(&target, &state) {
            log::warn!("setFeatureState({id}, {hovered}) failed: {e:?}");
        }
    }
}

/// The engine's popup, attached to the map only while something is hovered.
struct PopupTooltip {
    map: Rc<MapboxMap>,
    popup: Popup,
    attached: bool,
}

impl TooltipSurface for PopupTooltip {
    fn show(&mut self, anchor: LngLat, html: &str) {
        let Ok(lng_lat) = mapbox::to_js(&[anchor.lng, anchor.lat]) else {
            return;
        };
        let updated = self
            .popup
            .set_lng_lat(&lng_lat)
            .and_then(|_| self.popup.set_html(html));
        if let Err(e) = updated {
            log::warn!("Tooltip update failed: {e:?}");
            return;
        }
        if !self.attached {
            match self.popup.add_to(&self.map) {
                Ok(_) => self.attached = true,
                Err(e) => log::warn!("Tooltip attach failed: {e:?}"),
            }
        }
    }

    fn hide(&mut self) {
        if self.attached {
            if let Err(e) = self.popup.remove() {
                log::warn!("Tooltip removal failed: {e:?}");
            }
            self.attached = false;
        }
    }
}

type MapHoverController = HoverController<MapFeatureState, PopupTooltip>;

struct PointerHandlers {
    on_move: Closure<dyn FnMut(JsValue)>,
    on_leave: Closure<dyn FnMut(JsValue)>,
}

/// Everything one mounted map owns. Dropping it clears hover state, removes the
/// map (which detaches every listener and the popup) and frees the closures.
struct MapBinding {
    map: Rc<MapboxMap>,
    hover: Rc<RefCell<MapHoverController>>,
    _handlers: Rc<PointerHandlers>,
    _on_load: Closure<dyn FnMut()>,
}

impl MapBinding {
    fn mount(container: &web_sys::HtmlElement, variant: &ChartVariant) -> Result<Self, String> {
        if let Some(token) = option_env!("MAPBOX_ACCESS_TOKEN")
            && !mapbox::set_access_token(token)
        {
            return Err("mapboxgl is not loaded".into());
        }

        let options = mapbox::to_js(&MapOptions::default()).map_err(|e| e.to_string())?;
        js_sys::Reflect::set(&options, &JsValue::from_str("container"), container)
            .map_err(|e| format!("{e:?}"))?;
        let map = Rc::new(MapboxMap::new(&options).map_err(|e| format!("{e:?}"))?);

        let popup_options = mapbox::to_js(&PopupOptions {
            close_button: false,
            close_on_click: false,
        })
        .map_err(|e| e.to_string())?;
        let hover = Rc::new(RefCell::new(HoverController::new(
            variant.tooltip.clone(),
            MapFeatureState { map: map.clone() },
            PopupTooltip {
                map: map.clone(),
                popup: Popup::new(&popup_options),
                attached: false,
            },
        )));

        let handlers = Rc::new(PointerHandlers {
            on_move: {
                let hover = hover.clone();
                Closure::<dyn FnMut(JsValue)>::new(move |e: JsValue| {
                    let features = mapbox::event_features(&e);
                    if features.is_empty() {
                        return;
                    }
                    let at = mapbox::event_lng_lat(&e);
                    if let Ok(mut hover) = hover.try_borrow_mut() {
                        hover.pointer_move(at, &features);
                    }
                })
            },
            on_leave: {
                let hover = hover.clone();
                Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
                    if let Ok(mut hover) = hover.try_borrow_mut() {
                        hover.pointer_leave();
                    }
                })
            },
        });

        let on_load = {
            let map = Rc::downgrade(&map);
            let handlers = Rc::downgrade(&handlers);
            let dataset_url = variant.dataset_url;
            Closure::<dyn FnMut()>::new(move || {
                let map = map.clone();
                let handlers = handlers.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let polygons = match dataset::fetch_polygons(dataset_url).await {
                        Ok(polygons) => polygons,
                        Err(e) => {
                            log::warn!("Dataset {dataset_url} unavailable: {e}");
                            return;
                        }
                    };
                    log::info!("Loaded {} features from {dataset_url}", polygons.len());
                    install(&map, &handlers, &polygons);
                });
            })
        };
        map.on("load", on_load.as_ref().unchecked_ref());

        Ok(Self {
            map,
            hover,
            _handlers: handlers,
            _on_load: on_load,
        })
    }
}

/// Register sources, layers and fill-layer pointer handlers, unless the view
/// was unmounted while the dataset was loading.
fn install(map: &Weak<MapboxMap>, handlers: &Weak<PointerHandlers>, polygons: &FeatureCollection) {
    let (Some(map), Some(handlers)) = (map.upgrade(), handlers.upgrade()) else {
        return;
    };
    let points = bubble_points(polygons);

    let sources = [
        (COUNTRIES_SOURCE, SourceSpec::geojson(polygons)),
        (BUBBLE_SOURCE, SourceSpec::geojson(&points)),
    ];
    for (id, spec) in &sources {
        let added = mapbox::to_js(spec)
            .map_err(|e| e.to_string())
            .and_then(|spec| map.add_source(id, &spec).map_err(|e| format!("{e:?}")));
        if let Err(e) = added {
            log::warn!("Failed to add source {id}: {e}");
            return;
        }
    }

    for layer in style::layers(polygons) {
        let added = mapbox::to_js(&layer)
            .map_err(|e| e.to_string())
            .and_then(|spec| map.add_layer(&spec).map_err(|e| format!("{e:?}")));
        if let Err(e) = added {
            log::warn!("Failed to add layer {}: {e}", layer.id);
        }
    }

    map.on_layer(
        "mousemove",
        FILL_LAYER,
        handlers.on_move.as_ref().unchecked_ref(),
    );
    map.on_layer(
        "mouseleave",
        FILL_LAYER,
        handlers.on_leave.as_ref().unchecked_ref(),
    );
}

impl Drop for MapBinding {
    fn drop(&mut self) {
        if let Ok(mut hover) = self.hover.try_borrow_mut() {
            hover.teardown();
        }
        self.map.remove();
    }
}

/// Choropleth world map with population bubbles and a hover tooltip.
#[component]
pub fn WorldMapChart(variant: ChartVariant) -> impl IntoView {
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let binding = StoredValue::new_local(None::<MapBinding>);

    Effect::new(move || {
        // No container, no map.
        let Some(container) = container_ref.get() else {
            return;
        };
        if binding.with_value(Option::is_some) {
            return;
        }
        let container: web_sys::HtmlElement = container.unchecked_into();
        match MapBinding::mount(&container, &variant) {
            Ok(mounted) => binding.set_value(Some(mounted)),
            Err(e) => log::warn!("Map init failed for {}: {e}", variant.title),
        }
    });

    on_cleanup(move || {
        binding.try_update_value(|slot| {
            slot.take();
        });
    });

    view! {
        <div node_ref=container_ref style=container_style() />
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    use worldmap_shared::{Feature, HoverController, HoverState, LngLat, TooltipTemplate};

    use super::{MapFeatureState, PopupTooltip};
    use crate::mapbox::{MapboxMap, Popup};

    wasm_bindgen_test_configure!(run_in_browser);

    /// Engine stand-in whose feature-state and popup calls all throw.
    fn install_failing_engine() {
        js_sys::eval(
            r#"
            globalThis.mapboxgl = {
                Map: class {
                    on() {}
                    remove() {}
                    setFeatureState() { throw new Error("source not loaded"); }
                },
                Popup: class {
                    setLngLat() { throw new Error("invalid LngLat"); }
                    setHTML() { throw new Error("detached"); }
                    addTo() { throw new Error("detached"); }
                    remove() { throw new Error("detached"); }
                },
            };
            "#,
        )
        .unwrap();
    }

    fn country(id: u64) -> Feature {
        Feature {
            id: Some(id),
            geometry: None,
            properties: json!({ "name": format!("c{id}") }).as_object().cloned(),
        }
    }

    #[wasm_bindgen_test]
    fn engine_exceptions_do_not_wedge_hover_handling() {
        install_failing_engine();
        let map = Rc::new(MapboxMap::new(&js_sys::Object::new().into()).unwrap());
        let hover = Rc::new(RefCell::new(HoverController::new(
            TooltipTemplate::primary(),
            MapFeatureState { map: map.clone() },
            PopupTooltip {
                map: map.clone(),
                popup: Popup::new(&JsValue::UNDEFINED),
                attached: false,
            },
        )));

        let here = Some(LngLat::new(10.0, 20.0));
        for id in [1, 2, 2, 3] {
            let mut controller = hover.try_borrow_mut().unwrap();
            controller.pointer_move(here, &[country(id)]);
            assert_eq!(controller.state(), HoverState::Hovering(id));
        }

        hover.try_borrow_mut().unwrap().pointer_leave();
        assert_eq!(hover.borrow().state(), HoverState::Idle);
        assert!(hover.try_borrow_mut().is_ok());
    }
}
