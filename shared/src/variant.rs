use crate::tooltip::TooltipTemplate;

pub const POPULATION_DATASET_URL: &str = "/data/world-population.geojson";
pub const ISO_DATASET_URL: &str = "/data/world-iso.geojson";

/// What a map instance shows: which dataset it loads and which fields its
/// tooltip lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartVariant {
    pub title: &'static str,
    pub dataset_url: &'static str,
    pub tooltip: TooltipTemplate,
}

impl ChartVariant {
    /// Countries colored by name with area and population in the tooltip.
    pub fn population() -> Self {
        Self {
            title: "World population",
            dataset_url: POPULATION_DATASET_URL,
            tooltip: TooltipTemplate::primary(),
        }
    }

    /// Countries keyed by ISO code.
    pub fn iso_codes() -> Self {
        Self {
            title: "Country codes",
            dataset_url: ISO_DATASET_URL,
            tooltip: TooltipTemplate::secondary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChartVariant;
    use crate::feature::FeatureCollection;
    use crate::transform::bubble_points;

    const POPULATION: &str = include_str!("../../client/data/world-population.geojson");
    const ISO: &str = include_str!("../../client/data/world-iso.geojson");

    #[test]
    fn bundled_population_dataset_drives_primary_tooltip() {
        let polygons = FeatureCollection::from_geojson_str(POPULATION)
            .unwrap()
            .with_sequential_ids();
        let points = bubble_points(&polygons);
        assert_eq!(points.len(), polygons.len());

        let canada = polygons.features.first();
        assert_eq!(
            ChartVariant::population().tooltip.lines(canada),
            vec!["Name: Canada", "Area: 9984670", "Population: 38250000"]
        );
    }

    #[test]
    fn bundled_iso_dataset_drives_secondary_tooltip() {
        let polygons = FeatureCollection::from_geojson_str(ISO)
            .unwrap()
            .with_sequential_ids();
        let lines = ChartVariant::iso_codes().tooltip.lines(polygons.features.get(2));
        assert_eq!(lines, vec!["ISO Code: FRA", "Country: France"]);
    }
}
