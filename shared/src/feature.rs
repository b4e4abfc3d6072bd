use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::DatasetError;

/// Identifier assigned to a feature by its position in the source collection.
pub type FeatureId = u64;

/// GeoJSON `properties` object.
pub type Properties = serde_json::Map<String, Value>;

/// GeoJSON position: `[longitude, latitude]`, optionally followed by altitude.
pub type Position = Vec<f64>;

pub const LONGITUDE_KEY: &str = "longitude";
pub const LATITUDE_KEY: &str = "latitude";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    /// Derived marker position. Either coordinate is `null` when the source
    /// feature lacked it, which the engine renders as no marker.
    Point { coordinates: [Option<f64>; 2] },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

/// Feature geometry. Polygon geometry is only handed on to the engine, so
/// anything that does not decode as a [`Shape`] (other geometry types, `null`
/// coordinates) is kept as raw JSON instead of failing the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    Shape(Shape),
    Opaque(Value),
}

impl Geometry {
    pub const fn point(coordinates: [Option<f64>; 2]) -> Self {
        Self::Shape(Shape::Point { coordinates })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(
        default,
        deserialize_with = "numeric_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<FeatureId>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// Source ids are replaced by positional ones at load, so anything that is not
/// a non-negative integer (e.g. an ISO string) is dropped rather than rejected.
fn numeric_id<'de, D>(deserializer: D) -> Result<Option<FeatureId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()))
}

impl Feature {
    /// Property lookup that treats an explicit JSON `null` as missing.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .as_ref()
            .and_then(|props| props.get(key))
            .filter(|value| !value.is_null())
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(Value::as_str)
    }

    pub fn property_f64(&self, key: &str) -> Option<f64> {
        self.property(key).and_then(Value::as_f64)
    }

    /// Representative `[longitude, latitude]` carried in the properties.
    pub fn representative_point(&self) -> [Option<f64>; 2] {
        [
            self.property_f64(LONGITUDE_KEY),
            self.property_f64(LATITUDE_KEY),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Decode a GeoJSON document. Only a top-level `FeatureCollection` is accepted.
    pub fn from_geojson_str(raw: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, DatasetError> {
        match value.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => Ok(serde_json::from_value(value)?),
            Some(other) => Err(DatasetError::NotFeatureCollection(other.to_string())),
            None => Err(DatasetError::NotFeatureCollection("untyped value".to_string())),
        }
    }

    /// Assign each feature its sequence position as identifier. Done once at load;
    /// the ids stay stable for the lifetime of the collection.
    pub fn with_sequential_ids(mut self) -> Self {
        for (index, feature) in self.features.iter_mut().enumerate() {
            feature.id = Some(index as FeatureId);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }
}
