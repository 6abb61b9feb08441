//! One level of expression structure, generic over the child type.
//!
//! `Pattern<C>` is never recursive on its own. [`crate::Expr`] ties it to
//! itself with `C = Expr<M>`; traversals instantiate `C` with borrowed nodes,
//! fold results, or `()` for a childless shell. Child order (arguments, then
//! index specifiers left to right) is part of the meaning of a node and every
//! method here preserves it.

use smallvec::SmallVec;

use crate::operator::Operator;

/// Kind of a literal. The value itself stays textual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LitKind {
    Int,
    Real,
    Str,
}

/// Who provides a function that is applied with conditional (`|`) notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    StandardLibrary,
    UserDefined,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CallKind {
    StandardLibrary,
    UserDefined,
    CompilerInternal,
    /// A density or mass function applied as `foo_lpdf(y | theta)`.
    ConditionalDistribution(Origin),
}

impl CallKind {
    /// The plain call kind for a function provided by `origin`.
    pub const fn plain(origin: Origin) -> CallKind {
        match origin {
            Origin::StandardLibrary => CallKind::StandardLibrary,
            Origin::UserDefined => CallKind::UserDefined,
        }
    }

    /// Provider of the called function; `None` for compiler internals.
    pub const fn origin(self) -> Option<Origin> {
        match self {
            CallKind::StandardLibrary => Some(Origin::StandardLibrary),
            CallKind::UserDefined => Some(Origin::UserDefined),
            CallKind::CompilerInternal => None,
            CallKind::ConditionalDistribution(origin) => Some(origin),
        }
    }

    /// `true` for library functions, whether or not applied conditionally.
    #[inline]
    pub const fn is_library(self) -> bool {
        matches!(
            self,
            CallKind::StandardLibrary | CallKind::ConditionalDistribution(Origin::StandardLibrary)
        )
    }
}

/// One index specifier inside `base[...]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Index<C> {
    /// `:`
    All,
    /// `e`
    Single(C),
    /// `e:`
    Upfrom(C),
    /// `lo:hi`
    Between(C, C),
    /// An integer array selecting several positions.
    MultiIndex(C),
}

impl<C> Index<C> {
    /// Apply `f` to each bound in left-to-right order.
    pub fn map<D>(self, mut f: impl FnMut(C) -> D) -> Index<D> {
        match self {
            Index::All => Index::All,
            Index::Single(e) => Index::Single(f(e)),
            Index::Upfrom(e) => Index::Upfrom(f(e)),
            Index::Between(lo, hi) => {
                let lo = f(lo);
                Index::Between(lo, f(hi))
            }
            Index::MultiIndex(e) => Index::MultiIndex(f(e)),
        }
    }

    pub fn as_borrowed(&self) -> Index<&C> {
        match self {
            Index::All => Index::All,
            Index::Single(e) => Index::Single(e),
            Index::Upfrom(e) => Index::Upfrom(e),
            Index::Between(lo, hi) => Index::Between(lo, hi),
            Index::MultiIndex(e) => Index::MultiIndex(e),
        }
    }

    pub(crate) fn kind(&self) -> IndexKind {
        match self {
            Index::All => IndexKind::All,
            Index::Single(_) => IndexKind::Single,
            Index::Upfrom(_) => IndexKind::Upfrom,
            Index::Between(..) => IndexKind::Between,
            Index::MultiIndex(_) => IndexKind::MultiIndex,
        }
    }

    fn push_bounds<'a>(&'a self, out: &mut SmallVec<[&'a C; 4]>) {
        match self {
            Index::All => {}
            Index::Single(e) | Index::Upfrom(e) | Index::MultiIndex(e) => out.push(e),
            Index::Between(lo, hi) => {
                out.push(lo);
                out.push(hi);
            }
        }
    }
}

/// One level of an expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern<C> {
    Variable(String),
    /// Literal kind and its source text.
    Literal(LitKind, String),
    FunApp(CallKind, String, Vec<C>),
    TernaryIf(C, C, C),
    And(C, C),
    Or(C, C),
    Indexed(C, Vec<Index<C>>),
    /// Explicit grouping written in the source, `(e)`.
    Paren(C),
}

impl<C> Pattern<C> {
    /// Replace every child with `f(child)`, visiting children in order.
    pub fn map<D>(self, mut f: impl FnMut(C) -> D) -> Pattern<D> {
        match self {
            Pattern::Variable(name) => Pattern::Variable(name),
            Pattern::Literal(kind, value) => Pattern::Literal(kind, value),
            Pattern::FunApp(kind, name, args) => {
                Pattern::FunApp(kind, name, args.into_iter().map(&mut f).collect())
            }
            Pattern::TernaryIf(cond, then, els) => {
                let cond = f(cond);
                let then = f(then);
                Pattern::TernaryIf(cond, then, f(els))
            }
            Pattern::And(a, b) => {
                let a = f(a);
                Pattern::And(a, f(b))
            }
            Pattern::Or(a, b) => {
                let a = f(a);
                Pattern::Or(a, f(b))
            }
            Pattern::Indexed(base, indices) => {
                let base = f(base);
                let indices = indices.into_iter().map(|idx| idx.map(&mut f)).collect();
                Pattern::Indexed(base, indices)
            }
            Pattern::Paren(e) => Pattern::Paren(f(e)),
        }
    }

    /// Borrow every child. Names and literal text are cloned.
    pub fn as_borrowed(&self) -> Pattern<&C> {
        match self {
            Pattern::Variable(name) => Pattern::Variable(name.clone()),
            Pattern::Literal(kind, value) => Pattern::Literal(*kind, value.clone()),
            Pattern::FunApp(kind, name, args) => {
                Pattern::FunApp(*kind, name.clone(), args.iter().collect())
            }
            Pattern::TernaryIf(cond, then, els) => Pattern::TernaryIf(cond, then, els),
            Pattern::And(a, b) => Pattern::And(a, b),
            Pattern::Or(a, b) => Pattern::Or(a, b),
            Pattern::Indexed(base, indices) => {
                Pattern::Indexed(base, indices.iter().map(Index::as_borrowed).collect())
            }
            Pattern::Paren(e) => Pattern::Paren(e),
        }
    }

    /// Children in traversal order, including index bounds.
    pub fn children(&self) -> SmallVec<[&C; 4]> {
        let mut out = SmallVec::new();
        match self {
            Pattern::Variable(_) | Pattern::Literal(..) => {}
            Pattern::FunApp(_, _, args) => out.extend(args.iter()),
            Pattern::TernaryIf(cond, then, els) => {
                out.push(cond);
                out.push(then);
                out.push(els);
            }
            Pattern::And(a, b) | Pattern::Or(a, b) => {
                out.push(a);
                out.push(b);
            }
            Pattern::Indexed(base, indices) => {
                out.push(base);
                for idx in indices {
                    idx.push_bounds(&mut out);
                }
            }
            Pattern::Paren(e) => out.push(e),
        }
        out
    }

    /// Number of children, counted the way [`Pattern::children`] lists them.
    pub fn arity(&self) -> usize {
        match self {
            Pattern::Variable(_) | Pattern::Literal(..) => 0,
            Pattern::FunApp(_, _, args) => args.len(),
            Pattern::TernaryIf(..) => 3,
            Pattern::And(..) | Pattern::Or(..) => 2,
            Pattern::Indexed(_, indices) => {
                1 + indices
                    .iter()
                    .map(|idx| match idx {
                        Index::All => 0,
                        Index::Between(..) => 2,
                        _ => 1,
                    })
                    .sum::<usize>()
            }
            Pattern::Paren(_) => 1,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Pattern::Variable(_) | Pattern::Literal(..))
    }

    /// The operator this node applies, if it is a library operator call.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Pattern::FunApp(CallKind::StandardLibrary, name, _) => Operator::from_name(name),
            _ => None,
        }
    }

    /// `true` for nodes that print as operator syntax: infix, prefix and
    /// postfix operators, `?:`, `&&` and `||`.
    pub fn is_operator_like(&self) -> bool {
        matches!(
            self,
            Pattern::TernaryIf(..) | Pattern::And(..) | Pattern::Or(..)
        ) || self.operator().is_some()
    }

    /// Name of the applied function, if this is a call.
    pub fn fun_name(&self) -> Option<&str> {
        match self {
            Pattern::FunApp(_, name, _) => Some(name),
            _ => None,
        }
    }

    /// Detach the children, leaving a childless shell.
    pub fn split(self) -> (Pattern<()>, SmallVec<[C; 4]>) {
        let mut children = SmallVec::new();
        let shell = self.map(|child| children.push(child));
        (shell, children)
    }

    /// Everything about this node except its children, for structural
    /// comparison and hashing.
    pub(crate) fn key(&self) -> NodeKey<'_> {
        match self {
            Pattern::Variable(name) => NodeKey::Variable(name),
            Pattern::Literal(kind, value) => NodeKey::Literal(*kind, value),
            Pattern::FunApp(kind, name, args) => NodeKey::FunApp(*kind, name, args.len()),
            Pattern::TernaryIf(..) => NodeKey::TernaryIf,
            Pattern::And(..) => NodeKey::And,
            Pattern::Or(..) => NodeKey::Or,
            Pattern::Indexed(_, indices) => {
                NodeKey::Indexed(indices.iter().map(Index::kind).collect())
            }
            Pattern::Paren(_) => NodeKey::Paren,
        }
    }
}

impl Pattern<()> {
    /// Refill a shell produced by [`Pattern::split`]. `children` must yield
    /// exactly [`Pattern::arity`] items.
    pub fn fill<D>(self, children: impl IntoIterator<Item = D>) -> Pattern<D> {
        let mut children = children.into_iter();
        self.map(|()| next_child(&mut children))
    }
}

/// Pull the next child from an iterator sized by a node's arity.
pub(crate) fn next_child<D>(children: &mut impl Iterator<Item = D>) -> D {
    match children.next() {
        Some(child) => child,
        None => unreachable!("fewer children supplied than the node's arity"),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum IndexKind {
    All,
    Single,
    Upfrom,
    Between,
    MultiIndex,
}

/// Node identity without children. Two trees are structurally equal when
/// their pre-order sequences of metadata and keys are equal.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum NodeKey<'a> {
    Variable(&'a str),
    Literal(LitKind, &'a str),
    FunApp(CallKind, &'a str, usize),
    TernaryIf,
    And,
    Or,
    Indexed(SmallVec<[IndexKind; 4]>),
    Paren,
}
