#![deny(missing_docs)]

//! # Union Selection
//!
//! Decides which members of a union are active for documentation and
//! example purposes.
//!
//! - Alternatives (`anyOf`, `xone`, `or`): exactly one branch is active. The
//!   registry entry wins when it names an existing branch; otherwise the first
//!   branch is chosen and written back so later calls agree.
//! - Combinations (`and`): every member is active and carries an optional
//!   provenance label for "inherited from X" annotations.

use crate::shape::{Shape, UnionMode};
use crate::view::SelectionRegistry;
use log::debug;

/// Prefix the modelling framework uses for anonymous inline members.
const ANONYMOUS_PREFIX: &str = "item";

/// Result of resolving a union against the selection registry.
#[derive(Debug, Clone)]
pub enum UnionSelection<'a> {
    /// One branch out of several alternatives.
    Alternative {
        /// How the branches combine.
        mode: UnionMode,
        /// The active branch.
        active: &'a Shape,
        /// All branches in declaration order.
        branches: &'a [Shape],
    },
    /// All members at once.
    Combined {
        /// Members in declaration order.
        members: Vec<UnionMember<'a>>,
    },
}

impl<'a> UnionSelection<'a> {
    /// Id of the active branch. `None` for combined unions.
    pub fn active_id(&self) -> Option<&'a str> {
        match self {
            UnionSelection::Alternative { active, .. } => Some(active.id()),
            UnionSelection::Combined { .. } => None,
        }
    }

    /// Every active shape.
    pub fn active_shapes(&self) -> Vec<&'a Shape> {
        match self {
            UnionSelection::Alternative { active, .. } => vec![*active],
            UnionSelection::Combined { members } => members.iter().map(|m| m.shape).collect(),
        }
    }
}

/// A member of an `and` union.
#[derive(Debug, Clone, Copy)]
pub struct UnionMember<'a> {
    /// The member shape.
    pub shape: &'a Shape,
    /// Name to show as origin. `None` for anonymous inline members.
    pub provenance: Option<&'a str>,
}

/// Resolves the active branch(es) of `shape`.
///
/// Returns `None` when `shape` is not a union or has no members.
pub fn select_branch<'a>(
    shape: &'a Shape,
    registry: &mut SelectionRegistry,
) -> Option<UnionSelection<'a>> {
    let (mode, members) = shape.as_union()?.branches()?;

    if mode.is_combined() {
        let members = members
            .iter()
            .map(|member| UnionMember {
                shape: member,
                provenance: provenance_label(member),
            })
            .collect();
        return Some(UnionSelection::Combined { members });
    }

    let selected = registry
        .get(shape.id())
        .and_then(|branch_id| members.iter().find(|m| m.id() == branch_id));

    let active = match selected {
        Some(active) => active,
        None => {
            let first = members.first()?;
            debug!(union_id = shape.id(), branch_id = first.id(); "Recording default union branch");
            registry.insert(shape.id(), first.id());
            first
        }
    };

    Some(UnionSelection::Alternative {
        mode,
        active,
        branches: members,
    })
}

/// Origin label for an `and` member, or `None` when the member is anonymous.
pub fn provenance_label(member: &Shape) -> Option<&str> {
    member
        .name()
        .filter(|name| !name.is_empty() && !name.starts_with(ANONYMOUS_PREFIX))
}
