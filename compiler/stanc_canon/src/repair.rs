//! Syntax repair, run on the untyped program before type checking.
//!
//! A call is a conditional distribution application exactly when its name
//! ends in a density or mass suffix. Calls tagged otherwise are retagged
//! here, keeping the provider of the function. Sampling statements name a
//! family, so a suffix on their distribution is dropped.

use stanc_mir::{CallKind, Expr, Pattern, Statement, UntypedProgram};

use crate::catalog::{density_suffix, strip_density_suffix};

/// Retag every call in `expr` to agree with its name.
pub fn repair_expr<M: Clone>(expr: &Expr<M>) -> Expr<M> {
    expr.fold(|meta, pattern| {
        let pattern = match pattern {
            Pattern::FunApp(kind, name, args) => {
                let kind = retag(kind, &name);
                Pattern::FunApp(kind, name, args)
            }
            other => other,
        };
        Expr::new(meta.clone(), pattern)
    })
}

fn retag(kind: CallKind, name: &str) -> CallKind {
    let suffixed = density_suffix(name).is_some();
    let repaired = match kind {
        CallKind::StandardLibrary | CallKind::UserDefined if suffixed => {
            kind.origin().map_or(kind, CallKind::ConditionalDistribution)
        }
        CallKind::ConditionalDistribution(origin) if !suffixed => CallKind::plain(origin),
        _ => kind,
    };
    if repaired != kind {
        tracing::trace!(%name, from = ?kind, to = ?repaired, "call retagged");
    }
    repaired
}

#[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
pub fn repair_syntax(program: &UntypedProgram) -> UntypedProgram {
    let statements = program
        .statements
        .iter()
        .map(|stmt| {
            stmt.map_exprs(&mut |e| repair_expr(e))
                .rewrite(&mut |s| match s {
                    Statement::Tilde {
                        arg,
                        distribution,
                        args,
                        truncation,
                    } => Statement::Tilde {
                        arg,
                        distribution: strip_density_suffix(&distribution).to_owned(),
                        args,
                        truncation,
                    },
                    other => other,
                })
        })
        .collect();
    UntypedProgram::new(statements)
}
