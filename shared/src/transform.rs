use crate::feature::{Feature, FeatureCollection, FeatureId, Geometry};

/// Derive the bubble source from the polygon source: one point per polygon,
/// placed at the polygon's representative coordinate.
///
/// Element `i` of the output has id `i` and carries element `i`'s properties
/// unchanged. A polygon without numeric `longitude`/`latitude` properties still
/// yields a point, with `null` coordinates, so positional ids stay aligned.
pub fn bubble_points(polygons: &FeatureCollection) -> FeatureCollection {
    let features = polygons
        .iter()
        .enumerate()
        .map(|(index, polygon)| Feature {
            id: Some(index as FeatureId),
            geometry: Some(Geometry::point(polygon.representative_point())),
            properties: polygon.properties.clone(),
        })
        .collect();
    FeatureCollection::new(features)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::bubble_points;
    use crate::feature::{Feature, FeatureCollection, Geometry, Properties, Shape};

    fn polygon(props: serde_json::Value) -> Feature {
        let properties: Option<Properties> = match props {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        };
        Feature {
            id: None,
            geometry: Some(Geometry::Shape(Shape::Polygon {
                coordinates: vec![vec![
                    vec![0.0, 0.0],
                    vec![1.0, 0.0],
                    vec![1.0, 1.0],
                    vec![0.0, 0.0],
                ]],
            })),
            properties,
        }
    }

    #[test]
    fn ids_match_positions_and_length_is_preserved() {
        let polygons = FeatureCollection::new(
            (0..5)
                .map(|i| polygon(json!({ "name": format!("c{i}"), "longitude": i, "latitude": -i })))
                .collect(),
        );
        let points = bubble_points(&polygons);
        assert_eq!(points.len(), 5);
        for (index, point) in points.iter().enumerate() {
            assert_eq!(point.id, Some(index as u64));
            assert_eq!(
                point.geometry,
                Some(Geometry::point([Some(index as f64), Some(-(index as f64))]))
            );
        }
    }

    #[test]
    fn properties_are_carried_through_and_input_is_untouched() {
        let polygons = FeatureCollection::new(vec![polygon(
            json!({ "name": "Chile", "m2": 19_000_000, "longitude": -71.5, "latitude": -35.7 }),
        )]);
        let before = polygons.clone();
        let points = bubble_points(&polygons);
        assert_eq!(polygons, before);
        assert_eq!(points.features[0].properties, polygons.features[0].properties);
    }

    #[test]
    fn missing_coordinates_yield_null_point() {
        let polygons = FeatureCollection::new(vec![
            polygon(json!({ "name": "Nowhere" })),
            polygon(serde_json::Value::Null),
            polygon(json!({ "longitude": 10.0 })),
        ]);
        let points = bubble_points(&polygons);
        assert_eq!(points.len(), 3);
        assert_eq!(
            points.features[0].geometry,
            Some(Geometry::point([None, None]))
        );
        assert!(points.features[1].properties.is_none());
        assert_eq!(
            points.features[2].geometry,
            Some(Geometry::point([Some(10.0), None]))
        );

        let value = serde_json::to_value(&points.features[0]).unwrap();
        assert_eq!(value["geometry"], json!({ "type": "Point", "coordinates": [null, null] }));
    }

    #[test]
    fn empty_collection_maps_to_empty() {
        assert!(bubble_points(&FeatureCollection::default()).is_empty());
    }
}
