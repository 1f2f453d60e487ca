#![deny(missing_docs)]

//! # View State
//!
//! Caller-owned mutable state for one document view: which shapes are expanded
//! and which branch is active for each union. Every resolution and synthesis
//! call takes this state by reference, so repeated calls stay consistent until
//! the caller changes a selection.
//!
//! Independent views must use independent instances.

use crate::shape::Shape;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Union shape id → active branch id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionRegistry(BTreeMap<String, String>);

impl SelectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded branch for a union, if any.
    pub fn get(&self, union_id: &str) -> Option<&str> {
        self.0.get(union_id).map(String::as_str)
    }

    /// Records a branch without checking it against the union's members.
    ///
    /// Used to seed a registry from stored state. A stale entry is harmless:
    /// selection falls back to the default branch when the id is unknown.
    pub fn insert(&mut self, union_id: impl Into<String>, branch_id: impl Into<String>) {
        self.0.insert(union_id.into(), branch_id.into());
    }

    /// Selects `branch_id` for `union` if it names one of the union's
    /// alternative branches. Returns whether the selection was recorded.
    pub fn select(&mut self, union: &Shape, branch_id: &str) -> bool {
        let known = union
            .as_union()
            .and_then(|u| u.branches())
            .filter(|(mode, _)| !mode.is_combined())
            .is_some_and(|(_, members)| members.iter().any(|m| m.id() == branch_id));

        if !known {
            debug!(union_id = union.id(), branch_id = branch_id; "Ignoring selection of unknown branch");
            return false;
        }
        self.insert(union.id(), branch_id);
        true
    }

    /// Forgets the selection for a union.
    pub fn clear(&mut self, union_id: &str) -> Option<String> {
        self.0.remove(union_id)
    }

    /// Number of recorded selections.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded selections ordered by union id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Expansion and selection state for one rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Ids of shapes or properties the reader has expanded.
    #[serde(default)]
    pub expanded: BTreeSet<String>,
    /// Active union branches.
    #[serde(default)]
    pub selections: SelectionRegistry,
}

impl ViewState {
    /// Creates an empty view state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the expansion of `id`. Returns the new state.
    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Selects a branch of `union`. See [`SelectionRegistry::select`].
    pub fn select(&mut self, union: &Shape, branch_id: &str) -> bool {
        self.selections.select(union, branch_id)
    }

    /// The recorded branch for a union, if any.
    pub fn selection(&self, union_id: &str) -> Option<&str> {
        self.selections.get(union_id)
    }
}
