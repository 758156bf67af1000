//! Map configuration: engine release, camera defaults, limits and credentials.

use crate::error::EngineLoadError;
use mrm_geo::LngLat;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Environment variable holding the engine access token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_TOKEN";

/// Pinned engine release.
pub const ENGINE_VERSION: &str = "v3.15.0";

/// Initial camera and pan/zoom limits for one map instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportConfig {
    pub center: LngLat,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Southwest and northeast corners the camera may not leave.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[LngLat; 2]>,
}

/// Initial zoom by device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveZoom {
    pub mobile: f64,
    pub desktop: f64,
}

/// Script and stylesheet of the engine release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineAssets {
    pub script_url: String,
    pub stylesheet_url: String,
}

impl Default for EngineAssets {
    fn default() -> Self {
        Self {
            script_url: format!(
                "https://api.mapbox.com/mapbox-gl-js/{}/mapbox-gl.js",
                ENGINE_VERSION
            ),
            stylesheet_url: format!(
                "https://api.mapbox.com/mapbox-gl-js/{}/mapbox-gl.css",
                ENGINE_VERSION
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    /// Never serialized; supplied from the environment.
    #[serde(skip)]
    pub access_token: Option<String>,
    pub style: String,
    pub viewport: ViewportConfig,
    pub responsive_zoom: ResponsiveZoom,
    /// Zoom used when flying to a basin without a surveyed outline.
    pub filter_zoom: f64,
    pub transition_ms: u32,
    /// Pixels of padding when fitting the camera to a basin outline.
    pub fit_padding: u32,
    /// Bound for both the engine script load and the instance ready event.
    pub load_timeout_ms: u32,
    /// Container widths below this use the bottom sheet instead of the tooltip.
    pub mobile_breakpoint: f64,
    pub engine: EngineAssets,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            style: "mapbox://styles/mapbox/light-v11".to_string(),
            viewport: ViewportConfig {
                // Geographic center of the contiguous US
                center: [-98.5795, 39.8283],
                zoom: 3.5,
                min_zoom: 3.0,
                max_zoom: 8.0,
                bounds: Some([[-130.0, 24.0], [-65.0, 50.0]]),
            },
            responsive_zoom: ResponsiveZoom {
                mobile: 3.0,
                desktop: 4.0,
            },
            filter_zoom: 6.0,
            transition_ms: 1000,
            fit_padding: 40,
            load_timeout_ms: 5000,
            mobile_breakpoint: 768.0,
            engine: EngineAssets::default(),
        }
    }
}

impl MapConfig {
    /// Attach the access token, ignoring blank values.
    pub fn with_access_token(mut self, token: Option<&str>) -> Self {
        self.access_token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// A usable token is present and is a public (`pk.`) token.
    pub fn validate_token(&self) -> Result<&str, EngineLoadError> {
        match self.access_token.as_deref() {
            Some(token) if token.starts_with("pk.") && token.len() > 3 => Ok(token),
            _ => Err(EngineLoadError::MissingToken),
        }
    }

    pub fn is_mobile_width(&self, container_width: f64) -> bool {
        container_width < self.mobile_breakpoint
    }

    /// Viewport with the responsive initial zoom applied.
    pub fn viewport_for(&self, is_mobile: bool) -> ViewportConfig {
        let mut viewport = self.viewport.clone();
        viewport.zoom = if is_mobile {
            self.responsive_zoom.mobile
        } else {
            self.responsive_zoom.desktop
        };
        viewport
    }

    /// Constructor options handed to the engine for a new instance.
    pub fn instance_options(&self, container: &str, viewport: &ViewportConfig) -> Result<Value, EngineLoadError> {
        let token = self.validate_token()?;
        let mut options = json!({
            "container": container,
            "accessToken": token,
            "style": self.style,
            "center": viewport.center,
            "zoom": viewport.zoom,
            "minZoom": viewport.min_zoom,
            "maxZoom": viewport.max_zoom,
        });
        if let Some(bounds) = viewport.bounds {
            options["maxBounds"] = json!(bounds);
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_token_is_rejected() {
        let config = MapConfig::default();
        assert_eq!(config.validate_token(), Err(EngineLoadError::MissingToken));

        let blank = MapConfig::default().with_access_token(Some("   "));
        assert_eq!(blank.access_token, None);
        assert_eq!(blank.validate_token(), Err(EngineLoadError::MissingToken));
    }

    #[test]
    fn secret_token_is_rejected() {
        let config = MapConfig::default().with_access_token(Some("sk.abc"));
        assert_eq!(config.validate_token(), Err(EngineLoadError::MissingToken));
    }

    #[test]
    fn public_token_is_accepted() {
        let config = MapConfig::default().with_access_token(Some("pk.test-token"));
        assert_eq!(config.validate_token(), Ok("pk.test-token"));
    }

    #[test]
    fn viewport_uses_responsive_zoom() {
        let config = MapConfig::default();
        assert_eq!(config.viewport_for(true).zoom, 3.0);
        assert_eq!(config.viewport_for(false).zoom, 4.0);
        assert!(config.is_mobile_width(767.0));
        assert!(!config.is_mobile_width(768.0));
    }

    #[test]
    fn instance_options_carry_limits_and_bounds() {
        let config = MapConfig::default().with_access_token(Some("pk.abc"));
        let options = config
            .instance_options("basin-map", &config.viewport_for(false))
            .unwrap();
        assert_eq!(options["container"], "basin-map");
        assert_eq!(options["accessToken"], "pk.abc");
        assert_eq!(options["minZoom"], 3.0);
        assert_eq!(options["maxZoom"], 8.0);
        assert_eq!(options["maxBounds"][0][0], -130.0);
    }

    #[test]
    fn config_deserializes_partial_overrides() {
        let config: MapConfig =
            serde_json::from_str(r#"{"loadTimeoutMs": 2500, "filterZoom": 7}"#).unwrap();
        assert_eq!(config.load_timeout_ms, 2500);
        assert_eq!(config.filter_zoom, 7.0);
        assert_eq!(config.style, MapConfig::default().style);
        assert!(config.access_token.is_none());
    }
}
