use crate::config::SideImageConfig;
use crate::dom::ElementHandle;

const MIN_SCALE: f64 = 0.97;
const SCALE_RANGE: f64 = 0.06;
const MIN_OPACITY: f64 = 0.6;
const OPACITY_RANGE: f64 = 0.4;

/// Presentation derived from an image's distance to the viewport center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    /// Distance from center over half the viewport height, capped at 1.
    pub norm: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Proximity {
    pub fn transform(&self) -> String {
        format!("scale({:.3})", self.scale)
    }

    pub fn opacity_value(&self) -> String {
        format!("{:.2}", self.opacity)
    }
}

pub fn proximity(center: f64, viewport_height: f64) -> Proximity {
    let half = viewport_height / 2.0;
    // A collapsed viewport has no center to be near.
    let norm = if half > 0.0 {
        ((center - half).abs() / half).min(1.0)
    } else {
        1.0
    };
    let closeness = 1.0 - norm;
    Proximity {
        norm,
        scale: MIN_SCALE + closeness * SCALE_RANGE,
        opacity: MIN_OPACITY + closeness * OPACITY_RANGE,
    }
}

pub struct SideImages<E> {
    images: Vec<E>,
    visible_class: String,
}

impl<E: ElementHandle> SideImages<E> {
    /// `None` when the page has no side images.
    pub fn new(images: Vec<E>, config: &SideImageConfig) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        Some(Self {
            images,
            visible_class: config.visible_class.clone(),
        })
    }

    pub fn images(&self) -> &[E] {
        &self.images
    }

    pub fn set_visibility(&self, target: &E, is_intersecting: bool) {
        if is_intersecting {
            target.add_class(&self.visible_class);
        } else {
            target.remove_class(&self.visible_class);
        }
    }

    pub fn update(&self, viewport_height: f64) {
        for image in &self.images {
            let effect = proximity(image.rect().center(), viewport_height);
            image.set_style("transform", &effect.transform());
            image.set_style("opacity", &effect.opacity_value());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeElement;

    fn close_to(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn centered_image_is_full_size() {
        let effect = proximity(400.0, 800.0);
        assert_eq!(effect.norm, 0.0);
        assert!(close_to(effect.scale, 1.03));
        assert!(close_to(effect.opacity, 1.0));
        assert_eq!(effect.transform(), "scale(1.030)");
        assert_eq!(effect.opacity_value(), "1.00");
    }

    #[test]
    fn distant_images_are_clamped() {
        for center in [0.0, 800.0, -250.0, 2000.0] {
            let effect = proximity(center, 800.0);
            assert_eq!(effect.norm, 1.0);
            assert!(close_to(effect.scale, 0.97));
            assert!(close_to(effect.opacity, 0.6));
        }
    }

    #[test]
    fn halfway_interpolates() {
        let effect = proximity(200.0, 800.0);
        assert!(close_to(effect.norm, 0.5));
        assert!(close_to(effect.scale, 1.0));
        assert!(close_to(effect.opacity, 0.8));
    }

    #[test]
    fn zero_height_viewport_uses_far_values() {
        let effect = proximity(0.0, 0.0);
        assert_eq!(effect.norm, 1.0);
        assert_eq!(effect.transform(), "scale(0.970)");
        assert_eq!(effect.opacity_value(), "0.60");
    }

    #[test]
    fn empty_selection_disables_the_effect() {
        assert!(SideImages::<FakeElement>::new(Vec::new(), &SideImageConfig::default()).is_none());
    }

    #[test]
    fn update_styles_every_image() {
        let near = FakeElement::new("img").at(300.0, 200.0);
        let far = FakeElement::new("img").at(1600.0, 200.0);
        let images = SideImages::new(vec![near.clone(), far.clone()], &SideImageConfig::default()).unwrap();

        images.update(800.0);

        assert_eq!(near.style_value("transform"), "scale(1.030)");
        assert_eq!(near.style_value("opacity"), "1.00");
        assert_eq!(far.style_value("transform"), "scale(0.970)");
        assert_eq!(far.style_value("opacity"), "0.60");
    }

    #[test]
    fn visibility_follows_intersection() {
        let image = FakeElement::new("img");
        let images = SideImages::new(vec![image.clone()], &SideImageConfig::default()).unwrap();

        images.set_visibility(&image, true);
        assert!(image.has_class("is-visible"));
        images.set_visibility(&image, false);
        assert!(!image.has_class("is-visible"));
    }
}
