//! Game client for browser WASM builds
//!
//! JavaScript owns the network and the timers. Every call that can produce
//! a side effect returns it as a plain object:
//!
//! - `{ kind: "none" }`
//! - `{ kind: "request", request, method, url, body }`: perform the fetch,
//!   then call `receive(request, status, text)`
//! - `{ kind: "enableMovesAfter", delayMs }`: call `resume_timer_elapsed`
//! - `{ kind: "resetAfter", delayMs }`: call `reset_timer_elapsed`

use battler_core::api::{failure_from_body, ApiRequest, RequestKind};
use battler_core::engine::{ApiEvent, Effect, Intent};
use battler_core::error::ClientError;
use battler_core::log;
use battler_core::state::{ClientConfig, ClientState};
use battler_core::view::GameView;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Effect as handed to JavaScript
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HostEffect {
    None,
    #[serde(rename_all = "camelCase")]
    Request {
        request: RequestKind,
        method: String,
        url: String,
        body: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    EnableMovesAfter { delay_ms: u32 },
    #[serde(rename_all = "camelCase")]
    ResetAfter { delay_ms: u32 },
}

impl HostEffect {
    pub fn from_effect(effect: Effect, api_base: &str) -> Self {
        match effect {
            Effect::None => HostEffect::None,
            Effect::Request(request) => HostEffect::Request {
                request: request.kind(),
                method: request.method().to_string(),
                url: request_url(api_base, &request),
                body: request.body(),
            },
            Effect::EnableMovesAfter { delay_ms } => HostEffect::EnableMovesAfter { delay_ms },
            Effect::ResetAfter { delay_ms } => HostEffect::ResetAfter { delay_ms },
        }
    }
}

fn request_url(api_base: &str, request: &ApiRequest) -> String {
    format!("{}{}", api_base.trim_end_matches('/'), request.path())
}

/// Turn a finished fetch into an event.
///
/// `status == 0` means the fetch itself failed; `body` then carries the
/// browser's error text.
pub fn response_event(kind: RequestKind, status: u16, body: &str) -> ApiEvent {
    let result = match status {
        0 => Err(ClientError::network(body)),
        200..=299 => ApiEvent::decode(kind, body),
        _ => Err(failure_from_body(status, body)),
    };
    ApiEvent::from_result(kind, result)
}

fn parse_kind(kind: &str) -> Result<RequestKind, String> {
    serde_json::from_value(Value::String(kind.to_string()))
        .map_err(|_| format!("Unknown request kind: {}", kind))
}

/// The main game client exposed to WASM
#[wasm_bindgen]
pub struct GameClient {
    state: ClientState,
}

#[wasm_bindgen]
impl GameClient {
    /// Create a client; `config` may be undefined for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GameClient, String> {
        let config = if config.is_undefined() || config.is_null() {
            ClientConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| format!("Failed to parse config: {:?}", e))?
        };
        log::debug("new", &format!("api_base={}", config.api_base));
        Ok(Self {
            state: ClientState::new(config),
        })
    }

    /// Load the creature type catalogue. Call once after construction.
    #[wasm_bindgen]
    pub fn boot(&mut self) -> JsValue {
        let effect = self.state.boot();
        self.effect_to_js(effect)
    }

    /// Apply a user intent (JSON `{ type: "submitMove", move_type: "attack" }`)
    #[wasm_bindgen]
    pub fn dispatch(&mut self, intent_js: JsValue) -> Result<JsValue, String> {
        let intent: Intent = serde_wasm_bindgen::from_value(intent_js)
            .map_err(|e| format!("Failed to parse intent: {:?}", e))?;
        let effect = self.state.dispatch(intent).map_err(|e| e.to_string())?;
        Ok(self.effect_to_js(effect))
    }

    /// Feed a finished fetch back in
    #[wasm_bindgen]
    pub fn receive(&mut self, request: &str, status: u16, body: &str) -> Result<JsValue, String> {
        let kind = parse_kind(request)?;
        log::debug("receive", &format!("{} -> {}", request, status));
        let effect = self.state.receive(response_event(kind, status, body));
        Ok(self.effect_to_js(effect))
    }

    #[wasm_bindgen]
    pub fn resume_timer_elapsed(&mut self) -> JsValue {
        let effect = self.state.receive(ApiEvent::ResumeTimerElapsed);
        self.effect_to_js(effect)
    }

    #[wasm_bindgen]
    pub fn reset_timer_elapsed(&mut self) -> JsValue {
        let effect = self.state.receive(ApiEvent::ResetTimerElapsed);
        self.effect_to_js(effect)
    }

    /// Get the current game view as JSON
    #[wasm_bindgen]
    pub fn get_view(&self) -> JsValue {
        log::debug("get_view", "Serializing client state to view");
        let view = GameView::from_state(&self.state);
        match serde_wasm_bindgen::to_value(&view) {
            Ok(val) => val,
            Err(e) => {
                log::error(&format!("get_view serialization failed: {:?}", e));
                JsValue::NULL
            }
        }
    }

    #[wasm_bindgen]
    pub fn get_config(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.state.config).unwrap_or(JsValue::NULL)
    }

    /// True while a request is outstanding
    #[wasm_bindgen]
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }
}

impl GameClient {
    fn effect_to_js(&self, effect: Effect) -> JsValue {
        let host = HostEffect::from_effect(effect, &self.state.config.api_base);
        // Plain objects rather than `Map`s for request bodies
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        match host.serialize(&serializer) {
            Ok(val) => val,
            Err(e) => {
                log::error(&format!("effect serialization failed: {:?}", e));
                JsValue::NULL
            }
        }
    }
}

impl Default for GameClient {
    fn default() -> Self {
        Self {
            state: ClientState::default(),
        }
    }
}
