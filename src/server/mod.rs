//! Local stand-in for the guest backend: `GET /guests` and `POST /confirm`
//! over an in-memory copy of a seed file.

mod server;
mod state;

pub use server::{router, serve, ServerError};
pub use state::GuestStore;
