//! Deprecated-construct replacement.
//!
//! Runs on the typed program, after syntax repair and type checking:
//! - deprecated library functions are renamed (`multiply_log` → `lmultiply`)
//! - legacy density spellings are renamed (`normal_log` → `normal_lpdf`,
//!   `normal_cdf_log` → `normal_lcdf`, `normal_ccdf_log` → `normal_lccdf`)
//! - `get_lp()` becomes `target()`
//! - `if_else(c, a, b)` becomes `(c) ? a : b`
//! - `increment_log_prob(e)` becomes `target += e`
//! - `x <- e` becomes `x = e`

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use stanc_mir::{
    AssignOp, CallKind, Expr, Origin, Pattern, Statement, Typed, TypedExpr, TypedProgram,
};

use crate::catalog::{SignatureCatalog, StanCatalog, Variants};

/// Library functions replaced by a differently named equivalent.
const DEPRECATED_FUNCTIONS: &[(&str, &str)] = &[
    ("binomial_coefficient_log", "lchoose"),
    ("multiply_log", "lmultiply"),
    ("cov_exp_quad", "gp_exp_quad_cov"),
    ("fabs", "abs"),
];

/// A rename target and whether the new name is applied conditionally.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Replacement {
    name: String,
    conditional: bool,
}

/// Old-name to new-name table for library functions.
#[derive(Debug)]
pub struct DeprecationTable {
    renames: FxHashMap<String, Replacement>,
}

impl DeprecationTable {
    /// Build the table for the families in `catalog`.
    pub fn new(catalog: &dyn SignatureCatalog) -> Self {
        let mut renames = FxHashMap::default();
        for &(old, new) in DEPRECATED_FUNCTIONS {
            renames.insert(
                old.to_owned(),
                Replacement {
                    name: new.to_owned(),
                    conditional: false,
                },
            );
        }
        for family in catalog.families() {
            let name = family.name;
            if family.variants.contains(Variants::DENSITY) {
                let modern = format!("{name}{}", family.support.density_suffix());
                renames.insert(
                    format!("{name}_log"),
                    Replacement {
                        name: modern,
                        conditional: true,
                    },
                );
            }
            if family.variants.contains(Variants::LCDF) {
                renames.insert(
                    format!("{name}_cdf_log"),
                    Replacement {
                        name: format!("{name}_lcdf"),
                        conditional: false,
                    },
                );
            }
            if family.variants.contains(Variants::LCCDF) {
                renames.insert(
                    format!("{name}_ccdf_log"),
                    Replacement {
                        name: format!("{name}_lccdf"),
                        conditional: false,
                    },
                );
            }
        }
        DeprecationTable { renames }
    }

    /// The table for the built-in Stan catalog, built on first use.
    pub fn builtin() -> &'static DeprecationTable {
        static BUILTIN: OnceLock<DeprecationTable> = OnceLock::new();
        BUILTIN.get_or_init(|| DeprecationTable::new(&StanCatalog))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Modern name and call kind for a deprecated library function.
    ///
    /// User-defined functions are never renamed, even when they share a
    /// deprecated library name.
    pub fn rename(&self, kind: CallKind, name: &str) -> Option<(CallKind, &str)> {
        if !kind.is_library() {
            return None;
        }
        let replacement = self.renames.get(name)?;
        let kind = if replacement.conditional {
            CallKind::ConditionalDistribution(Origin::StandardLibrary)
        } else {
            kind
        };
        Some((kind, replacement.name.as_str()))
    }
}

/// Result of modernizing one call node.
pub(crate) enum Modernized {
    /// The call was replaced by a different node shape.
    Replaced(TypedExpr),
    /// Still a call, possibly renamed.
    Call(CallKind, String, Vec<TypedExpr>),
}

/// Replace a deprecated call with its modern form.
pub(crate) fn modernize_call(
    meta: &Typed,
    kind: CallKind,
    name: String,
    args: Vec<TypedExpr>,
    table: &DeprecationTable,
) -> Modernized {
    if name == "if_else" && kind.is_library() {
        return match <[TypedExpr; 3]>::try_from(args) {
            Ok([cond, then, els]) => {
                tracing::trace!("if_else call rewritten to conditional expression");
                let group = Expr::new(cond.meta().clone(), Pattern::Paren(cond));
                Modernized::Replaced(Expr::new(
                    meta.clone(),
                    Pattern::TernaryIf(group, then, els),
                ))
            }
            Err(args) => Modernized::Call(kind, name, args),
        };
    }
    if name == "get_lp" && args.is_empty() && kind != CallKind::UserDefined {
        tracing::trace!("get_lp() rewritten to target()");
        return Modernized::Call(CallKind::CompilerInternal, "target".to_owned(), args);
    }
    match table.rename(kind, &name) {
        Some((new_kind, new_name)) => {
            tracing::trace!(old = %name, new = %new_name, "deprecated function renamed");
            Modernized::Call(new_kind, new_name.to_owned(), args)
        }
        None => Modernized::Call(kind, name, args),
    }
}

/// Replace deprecated constructs in one expression tree.
pub fn replace_deprecated_expr(expr: &TypedExpr, table: &DeprecationTable) -> TypedExpr {
    expr.fold(|meta, pattern| match pattern {
        Pattern::FunApp(kind, name, args) => match modernize_call(meta, kind, name, args, table) {
            Modernized::Replaced(expr) => expr,
            Modernized::Call(kind, name, args) => {
                Expr::new(meta.clone(), Pattern::FunApp(kind, name, args))
            }
        },
        other => Expr::new(meta.clone(), other),
    })
}

fn replace_deprecated_stmt(
    stmt: Statement<TypedExpr>,
    table: &DeprecationTable,
) -> Statement<TypedExpr> {
    match stmt {
        Statement::IncrementLogProb(e) => {
            tracing::trace!("increment_log_prob rewritten to target +=");
            Statement::TargetPlusAssign(e)
        }
        Statement::Assignment {
            lhs,
            op: AssignOp::ArrowAssign,
            rhs,
        } => Statement::Assignment {
            lhs,
            op: AssignOp::Assign,
            rhs,
        },
        Statement::NRFunApp(kind, name, args) => match table.rename(kind, &name) {
            Some((kind, new_name)) => Statement::NRFunApp(kind, new_name.to_owned(), args),
            None => Statement::NRFunApp(kind, name, args),
        },
        other => other,
    }
}

/// Replace deprecated constructs throughout a typed program, using the
/// legacy spellings derived from `catalog`.
#[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
pub fn replace_deprecated(
    program: &TypedProgram,
    catalog: &dyn SignatureCatalog,
) -> TypedProgram {
    let table = DeprecationTable::new(catalog);
    replace_deprecated_with(program, &table)
}

/// [`replace_deprecated`] with a prebuilt table.
pub fn replace_deprecated_with(program: &TypedProgram, table: &DeprecationTable) -> TypedProgram {
    let statements = program
        .statements
        .iter()
        .map(|stmt| {
            stmt.map_exprs(&mut |e| replace_deprecated_expr(e, table))
                .rewrite(&mut |s| replace_deprecated_stmt(s, table))
        })
        .collect();
    TypedProgram::new(statements)
}

#[cfg(test)]
mod tests;
