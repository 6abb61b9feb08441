//! Stan MIR - the annotation-parameterized expression tree.
//!
//! This crate contains the tree shared by every middle-end pass:
//! - [`Pattern`]: one level of expression structure, generic over children
//! - [`Expr`]: the pattern tied to itself, carrying one annotation per node,
//!   with stack-safe fold / map / iteration / comparison
//! - Metadata variants: [`Untyped`], [`Typed`], [`Labelled`]
//! - [`label`] / [`associate`]: unique node identifiers and their lookup table
//! - [`Statement`] / [`Program`]: the statement forms hosting expressions
//!
//! # Design Philosophy
//!
//! - **One traversal, many annotations**: untyped, typed and labelled trees
//!   are all `Expr<M>`; nothing is duplicated per variant.
//! - **Order is meaning**: argument and index order is never permuted.
//! - **Spans are not semantics**: equality and hashing ignore source spans
//!   and labels.
//! - **No recursion on the call stack** for whole-tree operations.

mod fixed;
mod label;
mod meta;
mod operator;
mod pattern;
mod span;
mod stack;
mod stmt;
mod types;

pub use fixed::{Expr, Iter};
pub use label::{associate, label, AssociateError, LabelError, LabelMap};
pub use meta::{Label, Labelled, LabelledExpr, Typed, TypedExpr, Untyped, UntypedExpr};
pub use operator::Operator;
pub use pattern::{CallKind, Index, LitKind, Origin, Pattern};
pub use span::Span;
pub use stack::ensure_sufficient_stack;
pub use stmt::{AssignOp, Program, Statement, Truncation, TypedProgram, UntypedProgram};
pub use types::{AdLevel, UnsizedType};
