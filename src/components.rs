//! Building blocks of the search form.
//!
//! The policies in here are pure functions that are evaluated again for every
//! rendered form. [`search_form::SearchForm`] combines them with the bindings
//! into the view model that is handed to the templates.

pub mod binding;
pub mod layout;
pub mod search_form;
pub mod selection;
pub mod suggestions;
pub mod uri;
