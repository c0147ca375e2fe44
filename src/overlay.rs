use vortex_core::{ProximityReadout, ShapeParameters};
use web_sys as web;

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    if let Some(el) = document.get_element_by_id(id) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document, id: &str) {
    if is_hidden(document, id) {
        show(document, id);
    } else {
        hide(document, id);
    }
}

/// Write the distance readout into the HUD element.
pub fn update_hud(document: &web::Document, readout: &ProximityReadout) {
    if let Some(el) = document.get_element_by_id("hud") {
        el.set_text_content(Some(&readout.to_string()));
    }
}

/// Show the current shape parameters after a tuning key press.
pub fn update_hint(document: &web::Document, shape: &ShapeParameters) {
    if let Some(el) = document.get_element_by_id("hint-overlay") {
        let text = format!(
            "base {:.2} • pinch {:.3} • bulb {:.2} @ {:.2} • height {:.2} • pool {:.2}",
            shape.base_width,
            shape.stem_pinch,
            shape.bulb_width,
            shape.bulb_height,
            shape.total_height,
            shape.pool_size
        );
        el.set_text_content(Some(&text));
        _ = el.set_attribute("style", "");
    }
}
