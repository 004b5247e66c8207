//! Terminal front-end: turns typed lines into session transitions and
//! prints the resulting view.

mod client;
mod ui;

pub use client::{Flow, RsvpClient};
pub use ui::{Command, UserInterface};
