//! Browser bindings. The host forwards palette clicks and pointer events and
//! redraws from [`Dashboard::snapshot`]. Timers run on the page clock: every
//! call first advances the store to `Date.now()`.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::config::LayoutConfig;
use crate::model::{Point, Size, SizePreset, WidgetId, WidgetKind};
use crate::store::LayoutStore;
use crate::LayoutError;

fn to_js(e: LayoutError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct Dashboard {
    store: LayoutStore,
    last_tick: f64,
}

impl Dashboard {
    fn tick(&mut self) {
        let now = js_sys::Date::now();
        let elapsed = (now - self.last_tick).max(0.0);
        self.last_tick = now;
        self.store.advance(Duration::from_millis(elapsed as u64));
    }
}

#[wasm_bindgen]
impl Dashboard {
    /// `config` is a JSON string, or empty for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: &str, width: f64, height: f64) -> Result<Dashboard, JsValue> {
        let config = if config.trim().is_empty() {
            LayoutConfig::default()
        } else {
            LayoutConfig::from_json(config).map_err(to_js)?
        };
        Ok(Dashboard {
            store: LayoutStore::new(config, Size::new(width, height)),
            last_tick: js_sys::Date::now(),
        })
    }

    /// `kind` and `preset` are the JSON labels, e.g. `"live-chart"`, `"2x1"`.
    /// A `null` or `undefined` preset uses the kind's default.
    #[wasm_bindgen(js_name = createWidget)]
    pub fn create_widget(&mut self, kind: JsValue, preset: JsValue) -> Result<u32, JsValue> {
        self.tick();
        let kind: WidgetKind = from_js(kind)?;
        let preset: Option<SizePreset> = from_js(preset)?;
        let id = self.store.create_widget(kind, preset, None).map_err(to_js)?;
        Ok(id.0)
    }

    #[wasm_bindgen(js_name = deleteWidget)]
    pub fn delete_widget(&mut self, id: u32) -> Result<(), JsValue> {
        self.tick();
        self.store.delete_widget(WidgetId(id)).map_err(to_js)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, id: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.tick();
        self.store
            .pointer_down(WidgetId(id), Point::new(x, y))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = resizeStart)]
    pub fn resize_start(&mut self, id: u32, x: f64, y: f64) -> Result<bool, JsValue> {
        self.tick();
        self.store
            .resize_start(WidgetId(id), Point::new(x, y))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.tick();
        self.store.pointer_move(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.tick();
        self.store.pointer_up();
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.tick();
        self.store.pointer_leave();
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.store.set_viewport(Size::new(width, height));
    }

    /// Widgets whose live data should be fetched now, as `[{ widget, kind }]`.
    #[wasm_bindgen(js_name = takeRefreshRequests)]
    pub fn take_refresh_requests(&mut self) -> Result<JsValue, JsValue> {
        self.tick();
        let requests = self.store.take_refresh_requests();
        serde_wasm_bindgen::to_value(&requests).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deliver fetched data. A non-empty `error` records a failed fetch.
    #[wasm_bindgen(js_name = applyFeed)]
    pub fn apply_feed(&mut self, id: u32, data: JsValue, error: &str) -> Result<bool, JsValue> {
        let result = if error.is_empty() {
            Ok(from_js::<serde_json::Value>(data)?)
        } else {
            Err(crate::feed::FeedError::Unavailable(error.to_string()))
        };
        Ok(self.store.apply_feed_result(WidgetId(id), result))
    }

    pub fn snapshot(&mut self) -> Result<JsValue, JsValue> {
        self.tick();
        serde_wasm_bindgen::to_value(&self.store.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
