//! Detail overlay for a single selected contact.

use contacts_types::Contact;
use strum::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DismissReason {
    CloseButton,
    OutsideClick,
    Escape,
}

/// Shows a record already held by the list; never fetches.
#[derive(Debug, Default)]
pub struct DetailView {
    selected: Option<Contact>,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Contact> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn open(&mut self, contact: Contact) {
        self.selected = Some(contact);
    }

    /// Close the overlay. Returns `false` if it was not open.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        let was_open = self.selected.take().is_some();
        if was_open {
            debug!(%reason, "detail view dismissed");
        }
        was_open
    }

    /// Route a key press; only `Escape` is handled.
    pub fn on_key(&mut self, key: &str) -> bool {
        key == "Escape" && self.dismiss(DismissReason::Escape)
    }
}
