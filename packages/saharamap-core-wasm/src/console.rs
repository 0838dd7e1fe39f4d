// Browser console bindings. Native builds (unit tests) print to stdout/stderr
// instead, since wasm-bindgen imports cannot be called off wasm32.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    // Use `js_namespace` to bind `console.log(..)` instead of just `log(..)`
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
}

pub fn log(s: &str) {
    #[cfg(target_arch = "wasm32")]
    console_log(s);
    #[cfg(not(target_arch = "wasm32"))]
    println!("{s}");
}

pub fn warn(s: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(s));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("warning: {s}");
}

pub fn error(s: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(s));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("error: {s}");
}

// Note: the console_log/console_warn/console_error macros are defined in
// lib.rs so they are exported at the crate root
