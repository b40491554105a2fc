//! Release analysis - turning host-supplied history into release decisions

pub mod bump;
pub mod resolver;

pub use bump::{classify_commits, compute_bump};
pub use resolver::resolve_previous_tag;
