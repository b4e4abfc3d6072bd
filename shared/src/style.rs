//! Source and layer definitions registered with the map engine.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Value, json};

use crate::config::{
    BORDER_LAYER, BORDER_WIDTH, BUBBLE_COLOR, BUBBLE_LAYER, BUBBLE_OPACITY, BUBBLE_RADIUS,
    BUBBLE_SOURCE, BUBBLE_STROKE_WIDTH, COLOR_PROPERTY, COUNTRIES_SOURCE, FALLBACK_COLOR,
    FILL_LAYER, FILL_OPACITY, FILL_OPACITY_HOVERED, HOVER_STATE_KEY, NAME_PROPERTY,
};
use crate::feature::FeatureCollection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSpec<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: &'a FeatureCollection,
}

impl<'a> SourceSpec<'a> {
    pub fn geojson(data: &'a FeatureCollection) -> Self {
        Self {
            kind: "geojson",
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Fill,
    Line,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: &'static str,
    pub paint: Value,
}

/// `["match", ["get", "name"], name₀, color₀, …, fallback]`.
///
/// Features without both a name and a color are skipped and only the first
/// color per name is used, since the engine rejects duplicate match labels.
/// With no usable entries the plain fallback color is returned, as an empty
/// `match` is also invalid.
pub fn color_match(polygons: &FeatureCollection) -> Value {
    let mut seen = HashSet::new();
    let mut expr = vec![json!("match"), json!(["get", NAME_PROPERTY])];
    for feature in polygons.iter() {
        let (Some(name), Some(color)) = (
            feature.property_str(NAME_PROPERTY),
            feature.property_str(COLOR_PROPERTY),
        ) else {
            continue;
        };
        if seen.insert(name) {
            expr.push(json!(name));
            expr.push(json!(color));
        }
    }
    if seen.is_empty() {
        return json!(FALLBACK_COLOR);
    }
    expr.push(json!(FALLBACK_COLOR));
    Value::Array(expr)
}

/// Fill opacity raised while the feature's `hover` state is set.
pub fn hover_opacity() -> Value {
    json!([
        "case",
        ["boolean", ["feature-state", HOVER_STATE_KEY], false],
        FILL_OPACITY_HOVERED,
        FILL_OPACITY
    ])
}

pub fn fill_layer(polygons: &FeatureCollection) -> LayerSpec {
    LayerSpec {
        id: FILL_LAYER,
        kind: LayerKind::Fill,
        source: COUNTRIES_SOURCE,
        paint: json!({
            "fill-color": color_match(polygons),
            "fill-opacity": hover_opacity(),
        }),
    }
}

pub fn border_layer(polygons: &FeatureCollection) -> LayerSpec {
    LayerSpec {
        id: BORDER_LAYER,
        kind: LayerKind::Line,
        source: COUNTRIES_SOURCE,
        paint: json!({
            "line-width": BORDER_WIDTH,
            "line-color": color_match(polygons),
        }),
    }
}

pub fn bubble_layer() -> LayerSpec {
    LayerSpec {
        id: BUBBLE_LAYER,
        kind: LayerKind::Circle,
        source: BUBBLE_SOURCE,
        paint: json!({
            "circle-radius": BUBBLE_RADIUS,
            "circle-color": BUBBLE_COLOR,
            "circle-opacity": BUBBLE_OPACITY,
            "circle-stroke-color": BUBBLE_COLOR,
            "circle-stroke-width": BUBBLE_STROKE_WIDTH,
        }),
    }
}

/// Layers in registration (bottom-to-top) order.
pub fn layers(polygons: &FeatureCollection) -> [LayerSpec; 3] {
    [
        fill_layer(polygons),
        border_layer(polygons),
        bubble_layer(),
    ]
}
