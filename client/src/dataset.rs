use worldmap_shared::FeatureCollection;

/// Fetch a GeoJSON dataset and assign positional feature ids.
pub async fn fetch_polygons(url: &str) -> Result<FeatureCollection, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| format!("read error: {e}"))?;

    let polygons = FeatureCollection::from_geojson_str(&body).map_err(|e| e.to_string())?;
    Ok(polygons.with_sequential_ids())
}
