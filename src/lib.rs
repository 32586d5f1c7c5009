//! Modal dialogs for page sections.
//!
//! A page is made of [`page::Section`]s. Each section gets a
//! [`modal::Modals`] component that wraps its modal containers, opens them
//! from trigger elements, routes trigger actions to configured handlers and
//! keeps embedded video players in step with modal visibility.
//!
//! The [`app`] module drives a page from a JSON fixture and a scripted
//! sequence of events, which is what the `pagemodal` binary runs.

pub mod app;
pub mod config;
pub mod event;
pub mod fixture;
pub mod modal;
pub mod page;
pub mod platform;
