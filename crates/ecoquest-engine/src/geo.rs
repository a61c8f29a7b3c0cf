//! Geolocation and reverse-geocoding boundaries.
//!
//! Both collaborators degrade rather than abort: a failed position
//! acquisition leaves a draft without a location, and a failed address
//! lookup falls back to the default display string.

use ecoquest_core::error::{EcoQuestError, EcoQuestResult};
use ecoquest_core::models::submission::GeoPoint;
use tracing::warn;

/// Fallback position used when no real location is available.
pub const DEFAULT_LOCATION: GeoPoint = GeoPoint {
    lat: -6.2088,
    lng: 106.8456,
};

/// Fallback display string when reverse geocoding fails.
pub const DEFAULT_ADDRESS: &str = "Default location (Jakarta)";

/// Source of the device's current position.
pub trait LocationProvider: Send + Sync {
    fn current_position(&self) -> impl Future<Output = EcoQuestResult<GeoPoint>> + Send;
}

/// Best-effort coordinate-to-address lookup.
pub trait ReverseGeocoder: Send + Sync {
    fn address(&self, point: GeoPoint) -> impl Future<Output = EcoQuestResult<String>> + Send;
}

/// Resolve an address, falling back to the default display string.
pub async fn address_or_default<G: ReverseGeocoder>(geocoder: &G, point: GeoPoint) -> String {
    match geocoder.address(point).await {
        Ok(address) => address,
        Err(e) => {
            warn!(error = %e, "Reverse geocoding failed, using default address");
            DEFAULT_ADDRESS.to_string()
        }
    }
}

/// Provider pinned to a fixed position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    pub position: GeoPoint,
}

impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> EcoQuestResult<GeoPoint> {
        Ok(self.position)
    }
}

/// Provider that always fails, mirroring a denied permission prompt.
#[derive(Debug, Clone, Copy)]
pub struct DeniedLocationProvider;

impl LocationProvider for DeniedLocationProvider {
    async fn current_position(&self) -> EcoQuestResult<GeoPoint> {
        Err(EcoQuestError::ExternalUnavailable {
            service: "geolocation".into(),
            reason: "location access denied or unsupported".into(),
        })
    }
}

/// Geocoder that renders the raw coordinates instead of an address.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateGeocoder;

impl ReverseGeocoder for CoordinateGeocoder {
    async fn address(&self, point: GeoPoint) -> EcoQuestResult<String> {
        Ok(format!("{:.4}, {:.4}", point.lat, point.lng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingGeocoder;

    impl ReverseGeocoder for FailingGeocoder {
        async fn address(&self, _point: GeoPoint) -> EcoQuestResult<String> {
            Err(EcoQuestError::ExternalUnavailable {
                service: "geocoding".into(),
                reason: "lookup timed out".into(),
            })
        }
    }

    #[tokio::test]
    async fn denied_provider_reports_unavailable() {
        let err = DeniedLocationProvider.current_position().await.unwrap_err();
        assert!(matches!(err, EcoQuestError::ExternalUnavailable { .. }));
    }

    #[tokio::test]
    async fn coordinate_geocoder_formats_position() {
        let address = CoordinateGeocoder
            .address(GeoPoint {
                lat: 1.23456,
                lng: 2.0,
            })
            .await
            .unwrap();
        assert_eq!(address, "1.2346, 2.0000");
    }

    #[tokio::test]
    async fn failed_lookup_falls_back_to_default_address() {
        let address = address_or_default(&FailingGeocoder, DEFAULT_LOCATION).await;
        assert_eq!(address, DEFAULT_ADDRESS);
    }
}
