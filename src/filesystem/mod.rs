//! In-memory filesystem tree for the emulator.
//!
//! Nodes are either directories (holding an ordered child list) or empty
//! files, addressed by absolute slash-separated paths. The tree is the
//! only state the emulator carries.

mod path;
mod tree;

pub use path::{InvalidPathError, NodePath};
pub use tree::Node;
