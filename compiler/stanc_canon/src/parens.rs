//! Parenthesization normalization.
//!
//! Two mutually recursive modes walk the tree:
//! - **strip** drops every grouping around a node. Used for whole statement
//!   expressions, call arguments and index bounds, where grouping never
//!   changes meaning.
//! - **protect** keeps a single layer of grouping around an operator-like
//!   node that was grouped in the input. Used for operands of operators,
//!   conditionals and `&&`/`||`, for indexed bases and for loop bounds.
//!
//! Protect never invents grouping: an ungrouped operand stays ungrouped.
//! Normalizing twice gives the same tree as normalizing once.

use stanc_mir::{ensure_sufficient_stack, Pattern, Statement, TypedExpr, TypedProgram};

/// Normalize grouping in a standalone expression.
pub fn normalize_parens_expr(expr: &TypedExpr) -> TypedExpr {
    strip(expr)
}

fn strip(expr: &TypedExpr) -> TypedExpr {
    ensure_sufficient_stack(|| {
        let mut node = expr;
        while let Pattern::Paren(inner) = node.pattern() {
            node = inner;
        }
        let pattern = match node.pattern() {
            p if p.is_operator_like() => p.as_borrowed().map(protect),
            Pattern::Indexed(base, indices) => Pattern::Indexed(
                protect(base),
                indices.iter().map(|index| index.as_borrowed().map(strip)).collect(),
            ),
            p => p.as_borrowed().map(strip),
        };
        TypedExpr::new(node.meta().clone(), pattern)
    })
}

fn protect(expr: &TypedExpr) -> TypedExpr {
    let mut group = None;
    let mut node = expr;
    while let Pattern::Paren(inner) = node.pattern() {
        group = Some(node.meta());
        node = inner;
    }
    match group {
        Some(meta) if node.pattern().is_operator_like() => {
            TypedExpr::new(meta.clone(), Pattern::Paren(strip(node)))
        }
        _ => strip(node),
    }
}

fn normalize_stmt(stmt: &Statement<TypedExpr>) -> Statement<TypedExpr> {
    ensure_sufficient_stack(|| match stmt {
        Statement::For {
            var,
            lower,
            upper,
            body,
        } => Statement::For {
            var: var.clone(),
            lower: protect(lower),
            upper: protect(upper),
            body: Box::new(normalize_stmt(body)),
        },
        Statement::While { cond, body } => Statement::While {
            cond: strip(cond),
            body: Box::new(normalize_stmt(body)),
        },
        Statement::IfThenElse { cond, then, els } => Statement::IfThenElse {
            cond: strip(cond),
            then: Box::new(normalize_stmt(then)),
            els: els.as_deref().map(|s| Box::new(normalize_stmt(s))),
        },
        Statement::Block(stmts) => Statement::Block(stmts.iter().map(normalize_stmt).collect()),
        other => other.map_exprs(&mut |e| strip(e)),
    })
}

/// Drop redundant grouping throughout a typed program.
#[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
pub fn normalize_parens(program: &TypedProgram) -> TypedProgram {
    TypedProgram::new(program.statements.iter().map(normalize_stmt).collect())
}

#[cfg(test)]
mod tests;
