//! Run with `wasm-pack test --headless --firefox client`
#![cfg(target_arch = "wasm32")]

use battler_client::engine::GameClient;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn boot_requests_creature_types() {
    let mut client = GameClient::new(JsValue::UNDEFINED).unwrap();
    let effect = client.boot();
    let kind = field(&effect, "kind");
    assert_eq!(kind.as_string().as_deref(), Some("request"));
    let url = field(&effect, "url");
    assert_eq!(
        url.as_string().as_deref(),
        Some("http://localhost:8000/creatures/types")
    );
    assert!(client.is_busy());
}

#[wasm_bindgen_test]
fn types_response_unlocks_setup() {
    let mut client = GameClient::new(JsValue::NULL).unwrap();
    client.boot();
    client
        .receive(
            "loadCreatureTypes",
            200,
            r#"[{"type":"dragon","description":"","stat_biases":{}}]"#,
        )
        .unwrap();
    assert!(!client.is_busy());
    assert!(!client.get_view().is_null());
}

fn field(target: &JsValue, key: &str) -> JsValue {
    let view: serde_json::Value = serde_wasm_bindgen::from_value(target.clone()).unwrap();
    serde_wasm_bindgen::to_value(&view[key]).unwrap()
}
