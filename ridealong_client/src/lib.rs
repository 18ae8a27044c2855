//! Headless controller for the website's contact form.
//!
//! The controller owns the form fields and the UI state and talks to the
//! contact endpoint of the REST API through a [`ContactApi`].

pub use api::{ContactApi, ContactApiClient};
pub use controller::{ContactFormConfig, ContactFormController, SubmitError};
pub use state::{Banner, ContactFormFields, FormState};

pub mod api;
pub mod controller;
pub mod state;
