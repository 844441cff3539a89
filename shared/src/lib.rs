//! Host-testable core of the Soniy admin console.
//!
//! Everything that decides what the console shows lives here: backend record
//! types, response interpretation, the session and view-router state, the
//! audio review controller, the waveform layout and the shared transport.
//! The `frontend` crate only wires these into Yew components and browser
//! APIs.

pub mod api;
pub mod audio_review;
pub mod console;
pub mod format;
pub mod models;
pub mod player;
pub mod router;
pub mod session;
pub mod views;
pub mod waveform;

pub use api::{ApiError, Reply, SESSION_EXPIRED_MESSAGE};
pub use console::{Console, Notice, NoticeTone, Screen};
pub use router::{LoadTicket, PageKey};
pub use session::TokenStorage;
