use crate::config::BackdropConfig;
use crate::dom::{ElementFactory, ElementHandle};
use crate::error::EnhanceError;

const PARTICLE_FIELD_CLASS: &str = "particle-field";

pub fn orb_classes(count: usize) -> Vec<String> {
    (1..=count).map(|index| format!("floating-orb orb-{index}")).collect()
}

/// Decorative animated layers appended behind the page content.
pub struct Backdrop<E> {
    orbs: Vec<E>,
}

impl<E: ElementHandle> Backdrop<E> {
    pub fn inject<F>(factory: &F, parent: &E, config: &BackdropConfig) -> Result<Self, EnhanceError>
    where
        F: ElementFactory<Element = E>,
    {
        let container = factory.create("div")?;
        container.set_classes(&config.container_class);

        let mut orbs = Vec::new();
        for classes in orb_classes(config.orb_count) {
            let orb = factory.create("div")?;
            orb.set_classes(&classes);
            container.append(&orb)?;
            orbs.push(orb);
        }

        let particles = factory.create("div")?;
        particles.set_classes(PARTICLE_FIELD_CLASS);
        container.append(&particles)?;

        parent.append(&container)?;
        Ok(Self { orbs })
    }

    pub fn orb_count(&self) -> usize {
        self.orbs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::{FakeDocument, FakeElement};

    #[test]
    fn orb_classes_encode_their_index() {
        assert_eq!(
            orb_classes(3),
            vec!["floating-orb orb-1", "floating-orb orb-2", "floating-orb orb-3"]
        );
        assert!(orb_classes(0).is_empty());
    }

    #[test]
    fn appends_orbs_then_particle_field() {
        let body = FakeElement::new("body");
        let backdrop = Backdrop::inject(&FakeDocument::default(), &body, &BackdropConfig::default()).unwrap();

        let appended = body.children();
        assert_eq!(appended.len(), 1);
        let container = &appended[0];
        assert_eq!(container.classes(), vec!["hero-animation"]);
        assert_eq!(backdrop.orb_count(), 3);

        let layers = container.children();
        let classes: Vec<Vec<String>> = layers.iter().map(FakeElement::classes).collect();
        assert_eq!(
            classes,
            vec![
                vec!["floating-orb", "orb-1"],
                vec!["floating-orb", "orb-2"],
                vec!["floating-orb", "orb-3"],
                vec!["particle-field"],
            ]
        );
        assert!(layers.iter().all(|layer| layer.tag() == "div"));
    }

    #[test]
    fn nothing_is_appended_when_creation_fails() {
        let body = FakeElement::new("body");
        assert!(Backdrop::inject(&FakeDocument::broken(), &body, &BackdropConfig::default()).is_err());
        assert!(body.children().is_empty());
    }
}
