use crate::config::NavConfig;
use crate::dom::{ElementFactory, ElementHandle};
use crate::error::EnhanceError;

const MENU_ICON: &str = concat!(
    r#"<svg width="18" height="12" viewBox="0 0 18 12" fill="none" xmlns="http://www.w3.org/2000/svg" aria-hidden="true">"#,
    r#"<rect width="18" height="2" rx="1" fill="currentColor"/>"#,
    r#"<rect y="5" width="18" height="2" rx="1" fill="currentColor"/>"#,
    r#"<rect y="10" width="18" height="2" rx="1" fill="currentColor"/>"#,
    "</svg>"
);

/// Hamburger button that expands and collapses the navigation on small screens.
///
/// `aria-expanded` on the button and the open class on the nav are only ever
/// written together by [`NavToggle::set_expanded`].
pub struct NavToggle<E> {
    button: E,
    nav: E,
    open_class: String,
    expanded: bool,
}

impl<E: ElementHandle> NavToggle<E> {
    pub fn install<F>(factory: &F, nav: &E, list: Option<&E>, config: &NavConfig) -> Result<Self, EnhanceError>
    where
        F: ElementFactory<Element = E>,
    {
        let button = factory.create("button")?;
        button.set_classes(&config.toggle_class);
        button.set_attr("type", "button");
        button.set_attr("aria-controls", &config.list_id);
        button.set_attr("aria-expanded", "false");
        button.set_attr("aria-label", &config.toggle_label);
        button.set_markup(MENU_ICON);

        if let Some(list) = list {
            list.set_element_id(&config.list_id);
        }
        nav.append(&button)?;

        Ok(Self {
            button,
            nav: nav.clone(),
            open_class: config.open_class.clone(),
            expanded: false,
        })
    }

    pub fn button(&self) -> &E {
        &self.button
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
        self.button
            .set_attr("aria-expanded", if expanded { "true" } else { "false" });
        if expanded {
            self.nav.add_class(&self.open_class);
        } else {
            self.nav.remove_class(&self.open_class);
        }
    }

    pub fn toggle(&mut self) {
        self.set_expanded(!self.expanded);
    }

    /// Collapses after a link inside the list is followed.
    pub fn handle_list_click(&mut self, target_tag: &str) -> bool {
        if self.expanded && target_tag.eq_ignore_ascii_case("a") {
            self.set_expanded(false);
            return true;
        }
        false
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        if self.expanded && key == "Escape" {
            self.set_expanded(false);
            return true;
        }
        false
    }
}
