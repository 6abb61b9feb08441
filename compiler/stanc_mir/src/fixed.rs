//! The annotated expression tree: a [`Pattern`] tied to itself.
//!
//! `Expr<M>` pairs one annotation `M` with one level of structure whose
//! children are again `Expr<M>`. All metadata variants (untyped, typed,
//! labelled) share this one type, so traversal is written once here.
//!
//! # Stack safety
//!
//! Parenthesized input can nest many thousands of levels deep. Everything
//! in this module that walks a whole tree (fold, map, iteration, clone,
//! comparison, hashing, drop) runs on an explicit work-list and never
//! recurses on the call stack.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::pattern::{next_child, Pattern};

/// An annotated expression tree.
pub struct Expr<M> {
    pub(crate) meta: M,
    pub(crate) pattern: Box<Pattern<Expr<M>>>,
}

impl<M> Expr<M> {
    /// Build a node from its annotation and one level of already-built
    /// children.
    #[inline]
    pub fn new(meta: M, pattern: Pattern<Expr<M>>) -> Self {
        Expr {
            meta,
            pattern: Box::new(pattern),
        }
    }

    #[inline]
    pub fn meta(&self) -> &M {
        &self.meta
    }

    /// The top level of structure, without recursing.
    #[inline]
    pub fn pattern(&self) -> &Pattern<Expr<M>> {
        &self.pattern
    }

    /// Expose one level: the annotation and the pattern over the children.
    #[inline]
    pub fn project(&self) -> (&M, &Pattern<Expr<M>>) {
        (&self.meta, &self.pattern)
    }

    /// Take the node apart into its annotation and top-level pattern.
    ///
    /// Exact inverse of [`Expr::new`]. The annotation is cloned because the
    /// node keeps its own (iterative) drop glue.
    pub fn into_parts(mut self) -> (M, Pattern<Expr<M>>)
    where
        M: Clone,
    {
        let pattern = std::mem::replace(&mut *self.pattern, placeholder());
        (self.meta.clone(), pattern)
    }

    /// Ordered direct children, including index bounds.
    #[inline]
    pub fn children(&self) -> SmallVec<[&Expr<M>; 4]> {
        self.pattern.children()
    }

    /// Pre-order iterator over every node of the tree.
    pub fn iter(&self) -> Iter<'_, M> {
        Iter { stack: vec![self] }
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Post-order traversal with a pre-order hook.
    ///
    /// `enter` runs on each node before any of its children are visited;
    /// `exit` receives that value together with the node's pattern rebuilt
    /// over the children's results. Children are always visited left to
    /// right.
    pub fn fold_with<'a, A, R>(
        &'a self,
        mut enter: impl FnMut(&'a Expr<M>) -> A,
        mut exit: impl FnMut(A, Pattern<R>) -> R,
    ) -> R {
        enum Frame<'a, M, A> {
            Enter(&'a Expr<M>),
            Exit(&'a Expr<M>, A),
        }

        let mut work = vec![Frame::Enter(self)];
        let mut done: Vec<R> = Vec::new();
        while let Some(frame) = work.pop() {
            match frame {
                Frame::Enter(node) => {
                    let acc = enter(node);
                    work.push(Frame::Exit(node, acc));
                    work.extend(node.children().into_iter().rev().map(Frame::Enter));
                }
                Frame::Exit(node, acc) => {
                    let first = done.len() - node.pattern.arity();
                    let pattern = {
                        let mut results = done.drain(first..);
                        node.pattern.as_borrowed().map(|_| next_child(&mut results))
                    };
                    done.push(exit(acc, pattern));
                }
            }
        }
        match done.pop() {
            Some(result) => result,
            None => unreachable!("fold work-list finished without a root result"),
        }
    }

    /// Catamorphism: combine each node's annotation with its children's
    /// results, bottom-up.
    pub fn fold<R>(&self, mut alg: impl FnMut(&M, Pattern<R>) -> R) -> R {
        self.fold_with(|node| node, |node, pattern| alg(&node.meta, pattern))
    }

    /// Rebuild the tree with every annotation transformed.
    ///
    /// `f` is called once per node in pre-order, so stateful closures (such
    /// as label counters) observe a deterministic order.
    pub fn map_meta<N>(&self, mut f: impl FnMut(&M) -> N) -> Expr<N> {
        self.fold_with(|node| f(&node.meta), Expr::new)
    }
}

fn placeholder<C>() -> Pattern<C> {
    Pattern::Variable(String::new())
}

/// Move a node's children out into `out`, leaving a leaf behind.
fn detach_children<M>(pattern: &mut Pattern<Expr<M>>, out: &mut Vec<Expr<M>>) {
    if pattern.is_leaf() {
        return;
    }
    let owned = std::mem::replace(pattern, placeholder());
    let _shell = owned.map(|child| out.push(child));
}

impl<M> Drop for Expr<M> {
    fn drop(&mut self) {
        if self.pattern.is_leaf() {
            return;
        }
        let mut pending = Vec::new();
        detach_children(&mut self.pattern, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node.pattern, &mut pending);
        }
    }
}

/// Pre-order iterator returned by [`Expr::iter`].
pub struct Iter<'a, M> {
    stack: Vec<&'a Expr<M>>,
}

impl<'a, M> Iterator for Iter<'a, M> {
    type Item = &'a Expr<M>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

impl<M: Clone> Clone for Expr<M> {
    fn clone(&self) -> Self {
        self.map_meta(M::clone)
    }
}

impl<M: PartialEq> PartialEq for Expr<M> {
    fn eq(&self, other: &Self) -> bool {
        let mut work = vec![(self, other)];
        while let Some((a, b)) = work.pop() {
            if a.meta != b.meta || a.pattern.key() != b.pattern.key() {
                return false;
            }
            work.extend(a.children().into_iter().zip(b.children()));
        }
        true
    }
}

impl<M: Eq> Eq for Expr<M> {}

impl<M: Ord> PartialOrd for Expr<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic order over the pre-order sequence of (annotation, node).
impl<M: Ord> Ord for Expr<M> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut work = vec![(self, other)];
        while let Some((a, b)) = work.pop() {
            let ord = a
                .meta
                .cmp(&b.meta)
                .then_with(|| a.pattern.key().cmp(&b.pattern.key()));
            if ord != Ordering::Equal {
                return ord;
            }
            work.extend(a.children().into_iter().zip(b.children()).rev());
        }
        Ordering::Equal
    }
}

impl<M: Hash> Hash for Expr<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in self.iter() {
            node.meta.hash(state);
            node.pattern.key().hash(state);
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for Expr<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("meta", &self.meta)
            .field("pattern", &self.pattern)
            .finish()
    }
}

#[cfg(feature = "cache")]
impl<M: serde::Serialize> serde::Serialize for Expr<M> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.meta, &*self.pattern).serialize(serializer)
    }
}

#[cfg(feature = "cache")]
impl<'de, M: serde::Deserialize<'de>> serde::Deserialize<'de> for Expr<M> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (meta, pattern) = <(M, Pattern<Expr<M>>)>::deserialize(deserializer)?;
        Ok(Expr::new(meta, pattern))
    }
}
