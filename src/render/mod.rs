//! Pedigree rendering: pure depth-bounded layout plus text and HTML writers.
//!
//! `layout` is the only place that walks the fetched ancestry structure; the
//! writers consume the laid-out boxes and never traverse the raw data again.

pub mod html;
pub mod text;
pub mod tree;

pub use html::render_pedigree_page;
pub use text::render_text;
pub use tree::{PEDIGREE_DEPTH, PedigreeBox, layout};
