use std::cell::Cell;
use std::rc::Rc;

use crate::scroll::geometry::ElementRect;

/// Mountable reference to one block element.
///
/// The host mounts the element's current rect into it whenever layout or scroll position
/// changes, and unmounts it when the element goes away. Readers get `None` once unmounted.
#[derive(Clone, Debug, Default)]
pub struct ElementRef {
    slot: Rc<Cell<Option<ElementRect>>>,
}

impl ElementRef {
    /// Create an empty (unmounted) reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach or update the element geometry.
    pub fn mount(&self, rect: ElementRect) {
        self.slot.set(Some(rect));
    }

    /// Detach the element.
    pub fn unmount(&self) {
        self.slot.set(None);
    }

    /// Current geometry, if mounted.
    pub fn rect(&self) -> Option<ElementRect> {
        self.slot.get()
    }

    /// `true` while an element is attached.
    pub fn is_mounted(&self) -> bool {
        self.slot.get().is_some()
    }
}
