//! Typed wrappers around the Mapbox GL JS interop.
//!
//! `assets/js/map-bridge.js` is embedded at compile time and evaluated once;
//! it exposes `window.mrmMap`, a small facade over `mapboxgl`. Calls go
//! through `js_sys::Reflect` with JSON-encoded arguments, so nothing is
//! spliced into evaluated source. Every JS exception comes back as a
//! [`MapError`] instead of a panic.

use mrm_map::engine::{CameraMove, Cursor, EngineEvent, EventSink, FeatureKey, MapEngine};
use mrm_map::layers::{LayerSpec, SourceSpec};
use mrm_map::loader::{EngineHost, EngineLoader};
use mrm_map::{MapConfig, MapError};
use std::cell::OnceCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

static MAP_BRIDGE_JS: &str = include_str!("../assets/js/map-bridge.js");

/// Global defined by the engine script.
const ENGINE_GLOBAL: &str = "mapboxgl";
const BRIDGE_GLOBAL: &str = "mrmMap";

thread_local! {
    static LOADER: OnceCell<EngineLoader<DomHost>> = const { OnceCell::new() };
}

/// The page-wide engine loader. Created on first use; later mounts share it.
pub fn shared_loader(config: &MapConfig) -> EngineLoader<DomHost> {
    LOADER.with(|cell| {
        cell.get_or_init(|| {
            EngineLoader::new(DomHost, config.engine.clone(), config.load_timeout_ms)
        })
        .clone()
    })
}

/// Human-readable text of a thrown JS value.
fn describe(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Evaluate the bridge script. The script guards itself, so repeated calls are harmless.
pub fn install_bridge() -> Result<(), MapError> {
    js_sys::eval(MAP_BRIDGE_JS)
        .map(|_| ())
        .map_err(|e| MapError::Construction(format!("map bridge failed: {}", describe(&e))))
}

fn window_value() -> Result<JsValue, MapError> {
    web_sys::window()
        .map(JsValue::from)
        .ok_or_else(|| MapError::Construction("no window".to_string()))
}

/// Call `window.mrmMap[method](...args)`.
fn call(method: &str, args: &[JsValue]) -> Result<JsValue, MapError> {
    let fail = |e: JsValue| MapError::Construction(format!("{}: {}", method, describe(&e)));
    let bridge = js_sys::Reflect::get(&window_value()?, &JsValue::from_str(BRIDGE_GLOBAL)).map_err(fail)?;
    let function = js_sys::Reflect::get(&bridge, &JsValue::from_str(method))
        .map_err(fail)?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| MapError::Construction(format!("{} is not a bridge function", method)))?;
    let argv: js_sys::Array = args.iter().collect();
    function.apply(&bridge, &argv).map_err(fail)
}

/// Browser side of engine installation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomHost;

impl EngineHost for DomHost {
    fn engine_present(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        js_sys::Reflect::get(&window, &JsValue::from_str(ENGINE_GLOBAL))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false)
    }

    fn inject_stylesheet(&self, href: &str) {
        let result = (|| -> Result<(), JsValue> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| JsValue::from_str("no document"))?;
            let head = document.head().ok_or_else(|| JsValue::from_str("no head"))?;
            let link = document.create_element("link")?;
            link.set_attribute("rel", "stylesheet")?;
            link.set_attribute("href", href)?;
            head.append_child(&link)?;
            Ok(())
        })();
        if let Err(e) = result {
            // Unstyled controls are not fatal; the script decides success.
            log::warn!("[MRM] could not inject engine stylesheet: {}", describe(&e));
        }
    }

    fn inject_script(&self, src: &str, on_load: Box<dyn FnOnce()>, on_error: Box<dyn FnOnce()>) {
        let result = (|| -> Result<(), JsValue> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| JsValue::from_str("no document"))?;
            let head = document.head().ok_or_else(|| JsValue::from_str("no head"))?;
            let script = document
                .create_element("script")?
                .dyn_into::<web_sys::HtmlScriptElement>()?;
            script.set_src(src);
            script.set_async(true);
            script.set_onload(Some(Closure::once_into_js(move || on_load()).unchecked_ref()));
            script.set_onerror(Some(Closure::once_into_js(move || on_error()).unchecked_ref()));
            head.append_child(&script)?;
            Ok(())
        })();
        if let Err(e) = result {
            // The timeout settles the load as failed.
            log::error!("[MRM] could not inject engine script: {}", describe(&e));
        }
    }

    fn set_timeout(&self, ms: u32, callback: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handler = Closure::once_into_js(move || callback());
        let delay = i32::try_from(ms).unwrap_or(i32::MAX);
        if let Err(e) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(handler.unchecked_ref(), delay)
        {
            log::error!("[MRM] setTimeout failed: {}", describe(&e));
        }
    }
}

/// A live `mapboxgl.Map` behind the bridge.
pub struct MapboxEngine {
    id: JsValue,
    /// Keeps the event callback alive for as long as the instance exists.
    _sink: Closure<dyn FnMut(String)>,
}

impl MapEngine for MapboxEngine {
    fn create(options: &serde_json::Value, events: EventSink) -> Result<Self, MapError> {
        install_bridge()?;
        let sink = Closure::<dyn FnMut(String)>::new(move |payload: String| {
            match EngineEvent::decode(&payload) {
                Ok(event) => events(event),
                Err(e) => log::warn!("[MRM] undecodable engine event {}: {}", payload, e),
            }
        });
        let id = call(
            "create",
            &[JsValue::from_str(&options.to_string()), sink.as_ref().clone()],
        )?;
        Ok(Self { id, _sink: sink })
    }

    fn add_source(&mut self, source: &SourceSpec) -> Result<(), MapError> {
        call(
            "addSource",
            &[
                self.id.clone(),
                JsValue::from_str(&source.id),
                JsValue::from_str(&source.spec.to_string()),
            ],
        )
        .map(|_| ())
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), MapError> {
        call(
            "addLayer",
            &[self.id.clone(), JsValue::from_str(&layer.spec.to_string())],
        )
        .map(|_| ())
    }

    fn watch_layer(&mut self, layer_id: &str) -> Result<(), MapError> {
        call("watchLayer", &[self.id.clone(), JsValue::from_str(layer_id)]).map(|_| ())
    }

    fn set_feature_state(&mut self, feature: &FeatureKey, hover: bool) {
        let args = [
            self.id.clone(),
            JsValue::from_str(&feature.source),
            JsValue::from_str(&feature.id),
            JsValue::from_bool(hover),
        ];
        if let Err(e) = call("setFeatureState", &args) {
            log::warn!("[MRM] {}", e);
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        if let Err(e) = call("setCursor", &[self.id.clone(), JsValue::from_str(cursor.css())]) {
            log::warn!("[MRM] {}", e);
        }
    }

    fn move_camera(&mut self, camera: &CameraMove) {
        let json = serde_json::to_string(camera).unwrap_or_default();
        if let Err(e) = call("moveCamera", &[self.id.clone(), JsValue::from_str(&json)]) {
            log::warn!("[MRM] {}", e);
        }
    }

    fn remove(&mut self) {
        if let Err(e) = call("remove", &[self.id.clone()]) {
            log::warn!("[MRM] {}", e);
        }
    }
}

/// Full-page navigation.
pub fn navigate(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        log::error!("[MRM] navigation to {} failed: {}", url, describe(&e));
    }
}

pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0)
}

/// Width of the element with `id`, or the viewport width if it is not mounted.
pub fn element_width(id: &str) -> f64 {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .map(|el| f64::from(el.client_width()))
        .filter(|w| *w > 0.0)
        .unwrap_or_else(viewport_width)
}

/// Primary input is touch (no reliable hover).
pub fn pointer_is_coarse() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(pointer: coarse)").ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// GET `url` and return the body as text.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    use web_sys::{Request, RequestInit, Response};

    let opts = RequestInit::new();
    opts.set_method("GET");
    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| format!("request error: {}", describe(&e)))?;

    let window = web_sys::window().ok_or("no window")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch error: {}", describe(&e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| "response is not a Response".to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(|e| format!("body error: {}", describe(&e)))?)
        .await
        .map_err(|e| format!("body error: {}", describe(&e)))?;
    text.as_string().ok_or_else(|| "body is not text".to_string())
}
