//! Admin area: sign-in form and the tabbed management panel.

pub mod forms;
pub mod login;
pub mod panel;
pub mod tables;

pub use login::AdminLogin;
pub use panel::AdminPanel;

use yew::prelude::*;

/// Remote list shown by a panel tab that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState<T> {
    #[default]
    Loading,
    Loaded(Vec<T>),
    Failed,
}

/// Ask the handler to fetch a list; the answer arrives on the callback.
pub type ListRequest<T> = Callback<Callback<ListState<T>>>;
