//! Top-level wiring between the form, the list, and the detail view.

use crate::api::ContactsApi;
use crate::detail::{DetailView, DismissReason};
use crate::form::{ContactForm, SubmitOutcome};
use crate::list_view::{ListCommand, ListState, ListView};

/// Owns the three views and routes events between them.
///
/// A successful create sends [`ListCommand::Refresh`] to the list; selecting
/// a row opens the detail view with the record the list already holds.
#[derive(Debug)]
pub struct ContactApp {
    api: ContactsApi,
    pub list: ListView,
    pub form: ContactForm,
    pub detail: DetailView,
}

impl ContactApp {
    pub fn new(api: ContactsApi) -> Self {
        Self {
            api,
            list: ListView::new(),
            form: ContactForm::new(),
            detail: DetailView::new(),
        }
    }

    pub fn api(&self) -> &ContactsApi {
        &self.api
    }

    /// Initial list fetch.
    pub async fn start(&mut self) -> &ListState {
        self.list.load(&self.api).await
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit(&self.api).await;
        if matches!(outcome, SubmitOutcome::Created(_)) {
            self.list.handle(ListCommand::Refresh, &self.api).await;
        }
        outcome
    }

    /// Open the detail view for a listed contact. Returns `false` for an
    /// id the list does not hold.
    pub fn select(&mut self, id: &str) -> bool {
        match self.list.find(id) {
            Some(contact) => {
                self.detail.open(contact.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self, reason: DismissReason) -> bool {
        self.detail.dismiss(reason)
    }
}
