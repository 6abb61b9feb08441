//! Labelling and association.
//!
//! [`label`] gives every node of a typed tree a unique integer; [`associate`]
//! indexes a labelled tree by those integers so later consumers (diagnostics,
//! optimizations) can refer to sub-expressions by number.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::meta::{Label, Labelled, LabelledExpr, TypedExpr};

/// Label every node of `expr`, starting from `start`.
///
/// Labels are assigned in pre-order: the root gets `start`, then each child
/// subtree left to right (index bounds included, in order). The result uses
/// the contiguous range `start..start + expr.size()`, and labelling the same
/// input twice yields the same labels. Fails without labelling anything if
/// that range does not fit in `u32`.
pub fn label(expr: &TypedExpr, start: u32) -> Result<LabelledExpr, LabelError> {
    let nodes = expr.size();
    let available = u64::from(u32::MAX - start) + 1;
    if u64::try_from(nodes).map_or(true, |n| n > available) {
        return Err(LabelError::RangeExhausted { start, nodes });
    }
    let mut next = Some(start);
    Ok(expr.map_meta(|meta| {
        let Some(raw) = next else {
            unreachable!("label range was checked against the tree size");
        };
        next = raw.checked_add(1);
        Labelled::from_typed(meta, Label::new(raw))
    }))
}

/// Failure to label a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LabelError {
    /// `nodes` labels starting at `start` would run past `u32::MAX`.
    #[error("cannot assign {nodes} labels starting at {start}")]
    RangeExhausted { start: u32, nodes: usize },
}

/// Failure to index a labelled tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssociateError {
    /// Two nodes carry the same label. A correct labelling never produces
    /// this; it indicates the tree was assembled from separately labelled
    /// pieces.
    #[error("label {label} is assigned to more than one node")]
    DuplicateLabel { label: Label },
}

/// Label-to-node lookup table built by [`associate`].
#[derive(Debug)]
pub struct LabelMap<'a> {
    nodes: FxHashMap<Label, &'a LabelledExpr>,
}

impl<'a> LabelMap<'a> {
    #[inline]
    pub fn get(&self, label: Label) -> Option<&'a LabelledExpr> {
        self.nodes.get(&label).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entries in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &'a LabelledExpr)> + '_ {
        let mut entries: Vec<_> = self.nodes.iter().map(|(&l, &node)| (l, node)).collect();
        entries.sort_unstable_by_key(|&(l, _)| l);
        entries.into_iter()
    }
}

/// Index every node of `expr` by its label.
///
/// Every node is visited, including index-bound sub-expressions, so a tree
/// labelled by [`label`] yields exactly one entry per node.
pub fn associate(expr: &LabelledExpr) -> Result<LabelMap<'_>, AssociateError> {
    let mut nodes = FxHashMap::default();
    for node in expr.iter() {
        match nodes.entry(node.label()) {
            Entry::Occupied(_) => {
                return Err(AssociateError::DuplicateLabel {
                    label: node.label(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
        }
    }
    Ok(LabelMap { nodes })
}
