use crate::config::{HeroConfig, OffsetPair};
use crate::dom::ElementHandle;

pub const LEFT_OFFSET_PROPERTY: &str = "--left-hero-offset";
pub const RIGHT_OFFSET_PROPERTY: &str = "--right-hero-offset";

pub struct HeroOffsets {
    config: HeroConfig,
}

impl HeroOffsets {
    pub fn new(config: HeroConfig) -> Self {
        Self { config }
    }

    pub fn select(&self, viewport_height: f64) -> &OffsetPair {
        if viewport_height < self.config.breakpoint {
            &self.config.compact
        } else {
            &self.config.tall
        }
    }

    pub fn apply<E: ElementHandle>(&self, root: &E, viewport_height: f64) -> &OffsetPair {
        let offsets = self.select(viewport_height);
        root.set_style(LEFT_OFFSET_PROPERTY, &offsets.left);
        root.set_style(RIGHT_OFFSET_PROPERTY, &offsets.right);
        offsets
    }
}
