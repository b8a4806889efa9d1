use crate::config::LightboxConfig;
use crate::dom::{ElementFactory, ElementHandle};
use crate::error::EnhanceError;

const CLOSE_GLYPH: &str = "\u{00d7}";

const OVERLAY_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("background", "rgba(0,0,0,0.8)"),
    ("display", "none"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("z-index", "2000"),
];

const CLOSE_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("top", "20px"),
    ("right", "30px"),
    ("font-size", "2rem"),
    ("color", "white"),
    ("cursor", "pointer"),
];

const IMAGE_STYLE: &[(&str, &str)] = &[
    ("max-width", "90%"),
    ("max-height", "90%"),
    ("border-radius", "12px"),
    ("box-shadow", "0 0 30px rgba(0,255,255,0.3)"),
];

fn apply_style<E: ElementHandle>(element: &E, style: &[(&str, &str)]) {
    for (property, value) in style {
        element.set_style(property, value);
    }
}

/// The single full-viewport overlay shared by every gallery image.
pub struct Lightbox<E> {
    overlay: E,
    close_button: E,
    image: E,
    default_alt: String,
    open: bool,
}

impl<E: ElementHandle> Lightbox<E> {
    pub fn build<F>(factory: &F, parent: &E, config: &LightboxConfig) -> Result<Self, EnhanceError>
    where
        F: ElementFactory<Element = E>,
    {
        let overlay = factory.create("div")?;
        overlay.set_element_id(&config.overlay_id);
        apply_style(&overlay, OVERLAY_STYLE);

        let close_button = factory.create("span")?;
        close_button.set_text(CLOSE_GLYPH);
        apply_style(&close_button, CLOSE_STYLE);

        let image = factory.create("img")?;
        image.set_attr("src", "");
        image.set_attr("alt", &config.default_alt);
        apply_style(&image, IMAGE_STYLE);

        overlay.append(&close_button)?;
        overlay.append(&image)?;
        parent.append(&overlay)?;

        Ok(Self {
            overlay,
            close_button,
            image,
            default_alt: config.default_alt.clone(),
            open: false,
        })
    }

    pub fn overlay(&self) -> &E {
        &self.overlay
    }

    pub fn close_button(&self) -> &E {
        &self.close_button
    }

    #[cfg(test)]
    pub fn image(&self) -> &E {
        &self.image
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self, src: &str, alt: Option<&str>) {
        let alt = alt.filter(|alt| !alt.is_empty()).unwrap_or(self.default_alt.as_str());
        self.image.set_attr("src", src);
        self.image.set_attr("alt", alt);
        self.overlay.set_style("display", "flex");
        self.open = true;
    }

    /// Opens with the source and alt text of a clicked gallery image.
    pub fn open_from(&mut self, source: &E) {
        let src = source.attr("src").unwrap_or_default();
        let alt = source.attr("alt");
        self.open(&src, alt.as_deref());
    }

    /// Returns whether the overlay was open.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.overlay.set_style("display", "none");
        self.open = false;
        true
    }

    /// Only clicks landing on the overlay itself close it, not clicks on the image.
    pub fn handle_backdrop_click(&mut self, target: &E) -> bool {
        *target == self.overlay && self.close()
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        key == "Escape" && self.close()
    }
}
