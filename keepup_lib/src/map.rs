use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Ljubljana
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 46.05736,
    lng: 14.50203,
};
pub const DEFAULT_ZOOM: f64 = 12.0;
/// Time given to the page to lay out before the container is inspected.
pub const LAYOUT_DELAY_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

pub const GEOLOCATION_OPTIONS: GeolocationOptions = GeolocationOptions {
    high_accuracy: true,
    timeout_ms: 5_000,
    maximum_age_ms: 300_000,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Missing map API key")]
    MissingCredential,
    #[error("Map container was never attached to the page")]
    ContainerNotMounted,
    #[error("Map container has no size ({width}x{height})")]
    ContainerHasNoSize { width: f64, height: f64 },
    #[error("Failed to load map: {0}")]
    SdkLoad(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("permission denied")]
    Denied,
    #[error("timed out")]
    Timeout,
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// The page the map lives in: its container element, the map SDK and the
/// device location.
#[async_trait(?Send)]
pub trait MapHost {
    async fn wait_for_layout(&self, delay_ms: u32);
    fn container_mounted(&self) -> bool;
    /// Width and height in CSS pixels.
    fn container_size(&self) -> (f64, f64);
    async fn load_sdk(&self, api_key: &str) -> Result<(), String>;
    async fn locate(&self, options: GeolocationOptions) -> Result<LatLng, GeolocationError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapStatus {
    Loading,
    Ready { center: LatLng, located: bool },
    Failed(MapError),
}

impl MapStatus {
    /// Status before anything async has happened. Without a key the widget is
    /// done before it starts.
    pub fn initial(api_key: Option<&str>) -> Self {
        match api_key {
            Some(key) if !key.trim().is_empty() => MapStatus::Loading,
            _ => MapStatus::Failed(MapError::MissingCredential),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapInit {
    pub status: MapStatus,
    /// Why we fell back to [`DEFAULT_CENTER`], if we did.
    pub location_error: Option<GeolocationError>,
}

impl MapInit {
    fn failed(err: MapError) -> Self {
        Self {
            status: MapStatus::Failed(err),
            location_error: None,
        }
    }
}

/// Runs the whole start-up sequence: credential, mount, size, SDK, location.
/// Every step but the last is fatal; location falls back to the default center.
pub async fn initialize<H: MapHost>(api_key: Option<&str>, host: &H) -> MapInit {
    let api_key = match api_key.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => key,
        None => return MapInit::failed(MapError::MissingCredential),
    };

    host.wait_for_layout(LAYOUT_DELAY_MS).await;
    if !host.container_mounted() {
        return MapInit::failed(MapError::ContainerNotMounted);
    }

    let (width, height) = host.container_size();
    if width <= 0. || height <= 0. {
        return MapInit::failed(MapError::ContainerHasNoSize { width, height });
    }

    if let Err(reason) = host.load_sdk(api_key).await {
        return MapInit::failed(MapError::SdkLoad(reason));
    }

    match host.locate(GEOLOCATION_OPTIONS).await {
        Ok(center) => MapInit {
            status: MapStatus::Ready { center, located: true },
            location_error: None,
        },
        Err(err) => MapInit {
            status: MapStatus::Ready {
                center: DEFAULT_CENTER,
                located: false,
            },
            location_error: Some(err),
        },
    }
}
