use serde::Serialize;

pub const STYLE_URL: &str = "mapbox://styles/mapbox/streets-v12";
pub const DEFAULT_CENTER: [f64; 2] = [-59.78759765624997, 43.939599609374994];
pub const DEFAULT_ZOOM: f64 = 1.5;

pub const CONTAINER_WIDTH_PX: u32 = 1200;
pub const CONTAINER_HEIGHT_PX: u32 = 600;

pub const COUNTRIES_SOURCE: &str = "countries";
pub const BUBBLE_SOURCE: &str = "bubble";
pub const FILL_LAYER: &str = "countries-fills";
pub const BORDER_LAYER: &str = "countries-borders";
pub const BUBBLE_LAYER: &str = "population-bubbles";

/// Feature-state key toggled by the hover controller.
pub const HOVER_STATE_KEY: &str = "hover";

/// Property the color lookup is keyed on, and the property holding the color.
pub const NAME_PROPERTY: &str = "name";
pub const COLOR_PROPERTY: &str = "color";
pub const FALLBACK_COLOR: &str = "#ccc";

pub const FILL_OPACITY: f64 = 0.7;
pub const FILL_OPACITY_HOVERED: f64 = 0.9;
pub const BORDER_WIDTH: f64 = 2.0;

pub const BUBBLE_RADIUS: f64 = 25.0;
pub const BUBBLE_COLOR: &str = "#007E91";
pub const BUBBLE_OPACITY: f64 = 0.5;
pub const BUBBLE_STROKE_WIDTH: f64 = 1.0;

pub const LOG_LEVEL: log::Level = log::Level::Info;

/// Constructor options handed to the map engine. The container element is
/// attached separately since it is a live DOM node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
    pub style: String,
    pub center: [f64; 2],
    pub zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            style: STYLE_URL.to_string(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// `width`/`height` inline style for the map container.
pub fn container_style() -> String {
    format!("height: {CONTAINER_HEIGHT_PX}px; width: {CONTAINER_WIDTH_PX}px; margin: 50px auto;")
}

#[cfg(test)]
mod tests {
    use super::{MapOptions, container_style};

    #[test]
    fn map_options_serialize_as_engine_expects() {
        let value = serde_json::to_value(MapOptions::default()).unwrap();
        assert!(value.get("container").is_none());
        assert_eq!(value["style"], "mapbox://styles/mapbox/streets-v12");
        assert_eq!(value["zoom"], 1.5);
        assert_eq!(value["center"][0], -59.78759765624997);
    }

    #[test]
    fn container_style_uses_fixed_size() {
        assert_eq!(
            container_style(),
            "height: 600px; width: 1200px; margin: 50px auto;"
        );
    }
}
