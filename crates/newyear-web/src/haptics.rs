use newyear_engine::HapticKind;
use wasm_bindgen::JsValue;
use web_sys::Navigator;

fn navigator() -> Option<Navigator> {
    web_sys::window().map(|w| w.navigator())
}

/// Whether `navigator.vibrate` exists on this host.
pub fn is_supported() -> bool {
    navigator()
        .map(|n| js_sys::Reflect::has(&n, &JsValue::from_str("vibrate")).unwrap_or(false))
        .unwrap_or(false)
}

pub fn vibrate(kind: HapticKind) {
    let Some(nav) = navigator() else {
        return;
    };
    let pattern: js_sys::Array = kind
        .pattern()
        .iter()
        .map(|ms| JsValue::from_f64(*ms as f64))
        .collect();
    if !nav.vibrate_with_pattern(&pattern) {
        log::trace!("vibrate {:?} refused", kind);
    }
}
