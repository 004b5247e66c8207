//! Guest search and attendance confirmation for a wedding RSVP.
//!
//! The guest list and the confirmations live on a remote backend. This crate
//! loads the list once, lets a visitor find their name, pick attendance for
//! everyone in their party and send the result back.
//!
//! The workflow core ([`session::Session`]) is pure state plus transitions;
//! network I/O sits behind [`backend::GuestBackend`] and the terminal
//! front-end lives in [`client`]. [`server`] is a local stand-in for the
//! remote backend.

pub mod backend;
pub mod client;
pub mod common;
pub mod config;
pub mod directory;
pub mod error;
pub mod normalize;
pub mod protocol;
pub mod search;
pub mod selection;
pub mod server;
pub mod session;
pub mod status;
pub mod submitter;
