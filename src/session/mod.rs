//! Client session: one owned state object plus the interactive loop on top.
//!
//! All view state lives in `Session` and changes only through its transition
//! methods; the browse loop and the tests drive the same surface.

pub mod browse;
pub mod state;

pub use state::{PedigreeRequest, PedigreeState, Session};
