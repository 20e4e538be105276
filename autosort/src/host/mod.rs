//! Interface to the program whose buffers are being sorted.
//!
//! The engine never talks to a chat client directly. A [`BufferHost`]
//! reports the current buffers and applies a computed order; everything in
//! between is pure.
//!
//! # Merged buffers
//!
//! Buffers can be merged into one slot, in which case the host reports them
//! with the same number. Only the first buffer of each slot takes part in
//! sorting, see [`collapse_merged`].

use std::fmt;

/// A buffer as reported by the host, in ascending number order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEntry {
    /// Full dot-separated name, e.g. `irc.freenode.#rust`.
    pub full_name: String,
    /// 1-based position in the host's buffer list.
    pub number: u32,
}

impl BufferEntry {
    pub fn new(full_name: impl Into<String>, number: u32) -> Self {
        Self {
            full_name: full_name.into(),
            number,
        }
    }
}

/// Source and sink of buffer orderings.
pub trait BufferHost {
    type Error: std::error::Error;

    /// Current buffers in ascending number order.
    fn buffers(&self) -> Result<Vec<BufferEntry>, Self::Error>;

    /// Rearrange the host's buffers to match `ordered`.
    fn apply_order(&mut self, ordered: &[String]) -> Result<(), Self::Error>;
}

/// Buffer names with merged buffers collapsed into their first entry.
///
/// `entries` must be in ascending number order. An entry whose number does
/// not exceed the count already collected shares a slot with an earlier one
/// and is skipped.
pub fn collapse_merged(entries: &[BufferEntry]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        if (entry.number as usize) <= names.len() {
            continue;
        }
        names.push(entry.full_name.clone());
    }
    names
}

/// One step of moving buffers into place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapStep {
    pub name: String,
    /// 1-based target position.
    pub position: usize,
}

impl fmt::Display for SwapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/buffer swap {} {}", self.name, self.position)
    }
}

/// Steps that bring buffers into `ordered` order when executed in sequence.
///
/// Step *i* swaps the named buffer into position *i*. A step only moves
/// buffers at or after its own position, so filled positions stay put.
pub fn swap_plan<S: AsRef<str>>(ordered: &[S]) -> Vec<SwapStep> {
    ordered
        .iter()
        .enumerate()
        .map(|(i, name)| SwapStep {
            name: name.as_ref().to_string(),
            position: i + 1,
        })
        .collect()
}
