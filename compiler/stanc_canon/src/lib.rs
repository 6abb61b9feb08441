//! Canonicalization for the Stan MIR.
//!
//! This crate brings parsed and type-checked programs into one standard
//! shape before code generation. It also provides the smart constructors
//! that build already-canonical expressions.
//!
//! # Pipeline Position
//!
//! ```text
//! Parse → **Repair** → Type Check → **Replace Deprecated** → **Normalize Parens** → Codegen
//! ```
//!
//! The order is mandatory. Deprecation replacement relies on the call
//! tagging established by syntax repair, and parenthesization assumes the
//! groupings introduced by deprecation replacement are already present.
//! Running passes out of order is not detected.
//!
//! # Passes
//!
//! 1. **Syntax repair** (`repair`, untyped): density and mass calls are
//!    tagged as conditional distribution applications, sampling statements
//!    name a family rather than a density.
//! 2. **Deprecated-construct replacement** (`deprecation`, typed): legacy
//!    function names, density spellings, `get_lp()`, `if_else`,
//!    `increment_log_prob` and `<-`.
//! 3. **Parenthesization normalization** (`parens`, typed): redundant
//!    grouping is removed.
//!
//! Every pass is total. Shapes a pass does not recognize are passed through
//! unchanged and no pass returns an error.

mod catalog;
mod deprecation;
mod glm;
mod parens;
mod repair;
pub mod smart;

pub use catalog::{
    density_suffix, strip_density_suffix, DistributionFamily, SignatureCatalog, StanCatalog,
    Support, Variants, DENSITY_SUFFIXES,
};
pub use deprecation::{
    replace_deprecated, replace_deprecated_expr, replace_deprecated_with, DeprecationTable,
};
pub use glm::{fuse_call, fuse_tilde};
pub use parens::{normalize_parens, normalize_parens_expr};
pub use repair::{repair_expr, repair_syntax};

use stanc_mir::TypedProgram;

/// Run the typed passes, deprecation replacement then parenthesization
/// normalization, on a program that has been repaired and type checked.
#[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
pub fn canonicalize(program: &TypedProgram, catalog: &dyn SignatureCatalog) -> TypedProgram {
    normalize_parens(&replace_deprecated(program, catalog))
}
