// Console logging and small text helpers
use wasm_bindgen::JsValue;

/// Debug logging is off by default to keep the host page's console quiet.
const DEBUG_LOG: bool = false;

pub fn clog(msg: &str) {
    if DEBUG_LOG {
        web_sys::console::log_1(&JsValue::from_str(msg));
    }
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

pub fn cerror(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Escape text for interpolation into Leaflet popup/tooltip HTML.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>Park & \"Ride\"</b>"),
            "&lt;b&gt;Park &amp; &quot;Ride&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Shelter Point"), "Shelter Point");
    }
}
