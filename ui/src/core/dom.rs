//! Live-document adapters for the core traits.
//!
//! On wasm these read the host page through `web-sys`. Native builds get
//! inert stand-ins: no anchor, no stats, a light theme.

use super::error::AttachError;
use super::extract::{container_selector, StatNode, StatPage};
use super::scheduler::AttachProbe;
use super::stats::Stat;
use super::theme::ThemeSignal;

/// Id of the element the panel is mounted into.
pub const MOUNT_ID: &str = "gym-ratios-root";

/// Stat markup whose presence means the gym data has rendered.
pub fn data_selector() -> String {
    container_selector(Stat::Strength)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DomPage;

#[derive(Debug, Default, Clone, Copy)]
pub struct DomProbe;

#[cfg(target_arch = "wasm32")]
mod live {
    use super::*;
    use crate::core::scheduler::ANCHOR_SELECTOR;
    use web_sys::{Document, Element};

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn query(selector: &str) -> Option<Element> {
        document()?.query_selector(selector).ok().flatten()
    }

    fn js_message(err: wasm_bindgen::JsValue) -> String {
        err.as_string().unwrap_or_else(|| format!("{err:?}"))
    }

    pub struct DomNode(Element);

    impl StatNode for DomNode {
        fn query_text(&self, selector: &str) -> Option<String> {
            self.0
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.text_content())
                .filter(|text| !text.trim().is_empty())
        }

        fn query_attr(&self, selector: &str, name: &str) -> Option<String> {
            self.0
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.get_attribute(name))
        }
    }

    impl StatPage for DomPage {
        type Node = DomNode;

        fn find(&self, selector: &str) -> Option<DomNode> {
            query(selector).map(DomNode)
        }
    }

    impl AttachProbe for DomProbe {
        fn anchor_present(&self) -> bool {
            query(ANCHOR_SELECTOR).is_some()
        }

        fn data_present(&self) -> bool {
            query(&data_selector()).is_some()
        }
    }

    pub fn mount_after_anchor() -> Result<(), AttachError> {
        let document = document().ok_or(AttachError::NoDocument)?;
        if document.get_element_by_id(MOUNT_ID).is_some() {
            return Ok(());
        }
        let anchor = document
            .query_selector(ANCHOR_SELECTOR)
            .map_err(|err| AttachError::Dom(js_message(err)))?
            .ok_or_else(|| AttachError::AnchorMissing(ANCHOR_SELECTOR.to_string()))?;
        let parent = anchor.parent_node().ok_or(AttachError::NoParent)?;
        let mount = document
            .create_element("div")
            .map_err(|err| AttachError::Dom(js_message(err)))?;
        mount.set_id(MOUNT_ID);
        parent
            .insert_before(&mount, anchor.next_sibling().as_ref())
            .map_err(|err| AttachError::Dom(js_message(err)))?;
        Ok(())
    }

    pub fn theme_signal() -> ThemeSignal {
        let Some(body) = document().and_then(|d| d.body()) else {
            return ThemeSignal::default();
        };
        let body_classes = body
            .class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let inline_background = body
            .style()
            .get_property_value("background")
            .unwrap_or_default();
        let computed_background = web_sys::window()
            .and_then(|w| w.get_computed_style(&body).ok().flatten())
            .and_then(|style| style.get_property_value("background-color").ok())
            .unwrap_or_default();
        ThemeSignal {
            body_classes,
            inline_background,
            computed_background,
        }
    }

    pub fn viewport_width() -> Option<f64> {
        web_sys::window()?.inner_width().ok()?.as_f64()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod live {
    use super::*;

    pub struct DomNode;

    impl StatNode for DomNode {
        fn query_text(&self, _selector: &str) -> Option<String> {
            None
        }

        fn query_attr(&self, _selector: &str, _name: &str) -> Option<String> {
            None
        }
    }

    impl StatPage for DomPage {
        type Node = DomNode;

        fn find(&self, _selector: &str) -> Option<DomNode> {
            None
        }
    }

    impl AttachProbe for DomProbe {
        fn anchor_present(&self) -> bool {
            false
        }

        fn data_present(&self) -> bool {
            false
        }
    }

    pub fn mount_after_anchor() -> Result<(), AttachError> {
        Err(AttachError::NoDocument)
    }

    pub fn theme_signal() -> ThemeSignal {
        ThemeSignal::default()
    }

    pub fn viewport_width() -> Option<f64> {
        None
    }
}

pub use live::{mount_after_anchor, theme_signal, viewport_width, DomNode};

/// Width used when the window cannot be measured.
pub const FALLBACK_VIEWPORT_PX: f64 = 1024.0;

pub fn current_viewport() -> super::collapse::Viewport {
    super::collapse::Viewport::from_width(viewport_width().unwrap_or(FALLBACK_VIEWPORT_PX))
}
