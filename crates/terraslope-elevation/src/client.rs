//! HTTP client for the GSI elevation service.
//!
//! The Geospatial Information Authority of Japan (GSI) exposes a single-point
//! elevation endpoint that takes `lon`/`lat` query parameters and returns a
//! JSON body such as:
//!
//! ```text
//! {"elevation":25.3,"hsrc":"5m（レーザ）"}
//! ```
//!
//! Over water (or anywhere outside coverage) the `elevation` field is the
//! string `"-----"` instead of a number.

use crate::{Coordinate, ElevationCache, ElevationError, Result};
use std::time::Duration;

/// Default GSI elevation endpoint.
const GSI_BASE_URL: &str =
    "https://cyberjapandata2.gsi.go.jp/general/dem/scripts/getelevation.php";

/// Request timeout for a single elevation lookup.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of single-point elevations.
///
/// This is the seam between the numeric pipeline and the network: the batch
/// fetcher and the terrain analyzer only see this trait, so tests substitute
/// deterministic synthetic terrain for the real service.
pub trait ElevationProvider: Send + Sync {
    /// Resolve the elevation of one coordinate, in meters.
    fn elevation_at(&self, coord: Coordinate) -> Result<f64>;
}

/// Elevation client backed by the GSI terrain service, with a process-wide
/// cache in front of it.
///
/// The client is safe to share across threads; concurrent batches reuse each
/// other's cached lookups.
pub struct GsiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    cache: ElevationCache,
}

impl std::fmt::Debug for GsiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GsiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GsiClient {
    /// Create a client against the public GSI endpoint with a default cache.
    pub fn new() -> Result<Self> {
        Self::with_base_url(GSI_BASE_URL)
    }

    /// Create a client against a different base URL (self-hosted mirror, or a
    /// local server in tests).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            cache: ElevationCache::new(),
        })
    }

    /// Replace the default cache, e.g. with one sized for tests.
    pub fn with_cache(mut self, cache: ElevationCache) -> Self {
        self.cache = cache;
        self
    }

    /// The cache in front of this client.
    pub fn cache(&self) -> &ElevationCache {
        &self.cache
    }

    fn fetch_remote(&self, coord: Coordinate) -> Result<f64> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lon", coord.lon.to_string()),
                ("lat", coord.lat.to_string()),
                ("outtype", "JSON".to_string()),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(ElevationError::UpstreamUnavailable {
                reason: format!("HTTP {}", response.status()),
            });
        }

        let body = response.text()?;
        parse_elevation(&body).ok_or(ElevationError::NoElevationData {
            lat: coord.lat,
            lon: coord.lon,
        })
    }
}

impl ElevationProvider for GsiClient {
    fn elevation_at(&self, coord: Coordinate) -> Result<f64> {
        if let Some(elevation) = self.cache.get(coord) {
            tracing::debug!(%coord, elevation, "elevation cache hit");
            return Ok(elevation);
        }

        let elevation = self.fetch_remote(coord)?;
        tracing::debug!(%coord, elevation, "fetched elevation from GSI");
        self.cache.put(coord, elevation);
        Ok(elevation)
    }
}

/// Extract a finite elevation from a GSI response body.
///
/// Returns `None` when the body is not JSON, has no `elevation` field, or the
/// field is not a finite number (the `"-----"` no-coverage marker included).
fn parse_elevation(body: &str) -> Option<f64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let elevation = value.get("elevation")?.as_f64()?;
    elevation.is_finite().then_some(elevation)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens here; any request fails immediately with a connect
    // error instead of hitting the real service.
    const UNROUTABLE_URL: &str = "http://127.0.0.1:1/getelevation.php";

    #[test]
    fn test_cached_elevation_skips_remote_fetch() {
        let client = GsiClient::with_base_url(UNROUTABLE_URL).unwrap();
        let coord = Coordinate::new(35.0, 139.0);
        client.cache().put(coord, 42.5);

        // A hit must be served from the cache; a remote attempt would error.
        assert_eq!(client.elevation_at(coord).unwrap(), 42.5);
    }

    #[test]
    fn test_expired_entry_forces_remote_fetch() {
        let client = GsiClient::with_base_url(UNROUTABLE_URL)
            .unwrap()
            .with_cache(ElevationCache::with_config(Duration::ZERO, 10));
        let coord = Coordinate::new(35.0, 139.0);
        client.cache().put(coord, 42.5);

        // With a zero TTL the entry is already stale, so the client goes
        // back to the network and surfaces the connect failure.
        match client.elevation_at(coord) {
            Err(ElevationError::UpstreamUnavailable { .. }) => {}
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_numeric_elevation() {
        let body = r#"{"elevation":25.3,"hsrc":"5m"}"#;
        assert_eq!(parse_elevation(body), Some(25.3));
    }

    #[test]
    fn test_parse_integer_elevation() {
        let body = r#"{"elevation":0,"hsrc":"10m"}"#;
        assert_eq!(parse_elevation(body), Some(0.0));
    }

    #[test]
    fn test_parse_negative_elevation() {
        // Below-sea-level land exists (e.g. Hachirogata reclaimed land)
        let body = r#"{"elevation":-3.9,"hsrc":"5m"}"#;
        assert_eq!(parse_elevation(body), Some(-3.9));
    }

    #[test]
    fn test_parse_no_coverage_marker() {
        let body = r#"{"elevation":"-----","hsrc":"-----"}"#;
        assert_eq!(parse_elevation(body), None);
    }

    #[test]
    fn test_parse_missing_field() {
        assert_eq!(parse_elevation(r#"{"hsrc":"5m"}"#), None);
    }

    #[test]
    fn test_parse_garbage_body() {
        assert_eq!(parse_elevation("<html>502 Bad Gateway</html>"), None);
        assert_eq!(parse_elevation(""), None);
    }
}
