//! Deep merging of configuration trees.
//!
//! This module handles:
//! - Recursive override-wins merging of nested mappings
//! - Explicit, caller-driven concatenation of sequences
//!
//! The generic merge never concatenates: a sequence in the override replaces
//! the base sequence wholesale. Callers that want append semantics build the
//! combined sequence with [`concat_sequences`] (or [`append_at`]) and merge
//! that in.

pub mod deep;
pub mod sequence;

pub use deep::{merge, merge_into};
pub use sequence::{append_at, concat_sequences, nest, sequence_at};
