use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{js_sys, AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, Window};

use crate::error::EnhanceError;
use crate::features::scroll_progress::ScrollMetrics;

/// Vertical placement of an element relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// The element operations the features need.
///
/// Mutations the browser rejects are logged and dropped; only structural
/// changes report errors.
pub trait ElementHandle: Clone + PartialEq {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    #[cfg(test)]
    fn has_class(&self, class: &str) -> bool;
    fn set_classes(&self, classes: &str);
    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);
    fn set_element_id(&self, id: &str);
    fn set_style(&self, property: &str, value: &str);
    #[cfg(test)]
    fn style_value(&self, property: &str) -> String;
    fn set_markup(&self, html: &str);
    fn set_text(&self, text: &str);
    fn append(&self, child: &Self) -> Result<(), EnhanceError>;
    fn rect(&self) -> Rect;
}

pub trait ElementFactory {
    type Element: ElementHandle;

    fn create(&self, tag: &str) -> Result<Self::Element, EnhanceError>;
}

impl ElementHandle for Element {
    fn add_class(&self, class: &str) {
        if let Err(err) = self.class_list().add_1(class) {
            debug!("could not add class {class}: {err:?}");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.class_list().remove_1(class) {
            debug!("could not remove class {class}: {err:?}");
        }
    }

    #[cfg(test)]
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_classes(&self, classes: &str) {
        self.set_class_name(classes);
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        if let Err(err) = self.set_attribute(name, value) {
            debug!("could not set attribute {name}: {err:?}");
        }
    }

    fn set_element_id(&self, id: &str) {
        self.set_id(id);
    }

    fn set_style(&self, property: &str, value: &str) {
        match self.dyn_ref::<HtmlElement>() {
            Some(html) => {
                if let Err(err) = html.style().set_property(property, value) {
                    debug!("could not set style {property}: {err:?}");
                }
            }
            None => debug!("<{}> has no inline style", self.tag_name()),
        }
    }

    #[cfg(test)]
    fn style_value(&self, property: &str) -> String {
        self.dyn_ref::<HtmlElement>()
            .and_then(|html| html.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_markup(&self, html: &str) {
        self.set_inner_html(html);
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn append(&self, child: &Self) -> Result<(), EnhanceError> {
        self.append_child(child)?;
        Ok(())
    }

    fn rect(&self) -> Rect {
        let bounds = self.get_bounding_client_rect();
        Rect {
            top: bounds.top(),
            height: bounds.height(),
        }
    }
}

impl ElementFactory for Document {
    type Element = Element;

    fn create(&self, tag: &str) -> Result<Element, EnhanceError> {
        Ok(self.create_element(tag)?)
    }
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, EnhanceError> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_metrics(window: &Window, document: &Document) -> ScrollMetrics {
    let root = document.document_element();
    let root_top = root.as_ref().map_or(0, |root| root.scroll_top());
    let scroll_top = if root_top != 0 {
        root_top
    } else {
        document.body().map_or(0, |body| body.scroll_top())
    };
    ScrollMetrics {
        scroll_top: f64::from(scroll_top),
        scroll_height: f64::from(root.map_or(0, |root| root.scroll_height())),
        viewport_height: viewport_height(window),
    }
}

pub fn listen(
    target: &EventTarget,
    event: &str,
    callback: &js_sys::Function,
    passive: bool,
) -> Result<(), EnhanceError> {
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(event, callback, &options)?;
    Ok(())
}
