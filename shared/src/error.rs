use thiserror::Error;

/// Failure to decode a GeoJSON dataset into a [`FeatureCollection`](crate::FeatureCollection).
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, found {0}")]
    NotFeatureCollection(String),
}
