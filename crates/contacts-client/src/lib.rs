//! Client side of the contacts service.
//!
//! [`ContactsApi`] talks HTTP; [`ListView`], [`ContactForm`] and
//! [`DetailView`] hold per-view state; [`ContactApp`] routes events between
//! them. [`ThemeSettings`] persists the chosen theme through an injected
//! [`KeyValueStore`].

pub mod api;
pub mod app;
pub mod detail;
pub mod error;
pub mod form;
pub mod list_view;
pub mod theme;

pub use api::{ContactsApi, DEFAULT_BASE_URL};
pub use app::ContactApp;
pub use detail::{DetailView, DismissReason};
pub use error::{ClientError, KvError};
pub use form::{ContactForm, Field, FieldErrors, SubmitOutcome};
pub use list_view::{ListCommand, ListState, ListView};
pub use theme::{FileKv, KeyValueStore, MemoryKv, ThemeId, ThemeSettings};
