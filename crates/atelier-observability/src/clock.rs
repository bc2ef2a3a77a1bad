//! Wall-clock access that works on native targets and in the browser.

/// Microseconds since the Unix epoch, if a clock is available.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_micros() -> Option<u64> {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_micros() as u64)
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub(crate) fn now_micros() -> Option<u64> {
    Some((js_sys::Date::now() * 1000.0) as u64)
}

// `std::time` panics on wasm32-unknown-unknown.
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub(crate) fn now_micros() -> Option<u64> {
    None
}
