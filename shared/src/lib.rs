pub mod config;
pub mod error;
pub mod feature;
pub mod hover;
pub mod style;
pub mod tooltip;
pub mod transform;
pub mod variant;

pub use error::DatasetError;
pub use feature::*;
pub use hover::{FeatureStateSink, HoverController, HoverState, LngLat, TooltipSurface};
pub use tooltip::{TooltipField, TooltipTemplate};
pub use transform::bubble_points;
pub use variant::ChartVariant;
