use crate::dom::ElementHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The element was just revealed; stop observing it.
    Revealed,
    Ignored,
}

/// Tracks elements still waiting for their first intersection.
pub struct RevealAnimator<E> {
    pending: Vec<E>,
    visible_class: String,
}

impl<E: ElementHandle> RevealAnimator<E> {
    pub fn new(elements: Vec<E>, visible_class: impl Into<String>) -> Self {
        Self {
            pending: elements,
            visible_class: visible_class.into(),
        }
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn handle_entry(&mut self, target: &E, is_intersecting: bool) -> RevealOutcome {
        if !is_intersecting {
            return RevealOutcome::Ignored;
        }
        let Some(index) = self.pending.iter().position(|element| element == target) else {
            return RevealOutcome::Ignored;
        };
        let element = self.pending.swap_remove(index);
        element.add_class(&self.visible_class);
        RevealOutcome::Revealed
    }
}
