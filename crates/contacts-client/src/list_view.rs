//! Contact list view state.

use contacts_types::Contact;
use tracing::warn;

use crate::api::ContactsApi;

/// Shown in place of the list when a fetch fails.
pub const LIST_ERROR_MESSAGE: &str = "Failed to fetch contacts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Contact>),
    Failed(String),
}

/// Instructions sent down to the list by whoever owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    /// Discard the current contents and fetch again.
    Refresh,
}

/// `Loading → Loaded | Failed`, one fetch per [`ListView::load`].
///
/// The view never refreshes by itself; a new fetch only happens when the
/// owner sends [`ListCommand::Refresh`].
#[derive(Debug)]
pub struct ListView {
    state: ListState,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Loaded contacts; empty while loading or after a failure.
    pub fn contacts(&self) -> &[Contact] {
        match &self.state {
            ListState::Loaded(contacts) => contacts,
            _ => &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&Contact> {
        self.contacts().iter().find(|c| c.id == id)
    }

    /// Fetch once and settle into `Loaded` or `Failed`.
    pub async fn load(&mut self, api: &ContactsApi) -> &ListState {
        self.state = ListState::Loading;
        self.state = match api.list().await {
            Ok(contacts) => ListState::Loaded(contacts),
            Err(e) => {
                warn!(error = %e, "contact list fetch failed");
                ListState::Failed(LIST_ERROR_MESSAGE.to_owned())
            }
        };
        &self.state
    }

    pub async fn handle(&mut self, command: ListCommand, api: &ContactsApi) -> &ListState {
        match command {
            ListCommand::Refresh => self.load(api).await,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{spawn_server, unreachable_api, new_contact};

    #[test]
    fn starts_loading_with_no_contacts() {
        let view = ListView::new();
        assert_eq!(view.state(), &ListState::Loading);
        assert!(view.contacts().is_empty());
    }

    #[tokio::test]
    async fn load_on_empty_store_is_loaded_empty() {
        let server = spawn_server().await;
        let mut view = ListView::new();
        assert_eq!(view.load(&server.api()).await, &ListState::Loaded(vec![]));
    }

    #[tokio::test]
    async fn view_is_stale_until_refreshed() {
        let server = spawn_server().await;
        let api = server.api();
        let mut view = ListView::new();
        view.load(&api).await;

        let created = api.create(&new_contact("Alex")).await.unwrap();
        assert!(view.contacts().is_empty());

        view.handle(ListCommand::Refresh, &api).await;
        assert_eq!(view.contacts(), &[created.clone()]);
        assert_eq!(view.find(&created.id), Some(&created));
        assert_eq!(view.find("missing"), None);
    }

    #[tokio::test]
    async fn unreachable_server_fails_with_fixed_message() {
        let mut view = ListView::new();
        let state = view.load(&unreachable_api().await).await;
        assert_eq!(state, &ListState::Failed(LIST_ERROR_MESSAGE.to_owned()));
    }

    #[tokio::test]
    async fn storage_failure_fails_the_view() {
        let server = spawn_server().await;
        server.state.store.close().await;
        let mut view = ListView::new();
        assert!(matches!(view.load(&server.api()).await, ListState::Failed(_)));
    }
}
