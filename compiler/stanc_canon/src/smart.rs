//! Smart constructors for typed expressions.
//!
//! Building a node through these functions gives the canonical shape
//! directly: deprecated names are modernized, distribution calls over a
//! linear predictor are fused into their GLM form, and a small set of
//! licensed identities is applied. Input that matches none of this is built
//! as written. There is no error path.
//!
//! The identities are syntactic. Exponents are matched by literal value and
//! nothing is evaluated:
//!
//! | Built                       | Becomes              | When                  |
//! |-----------------------------|----------------------|-----------------------|
//! | `pow(x, 2)`                 | `square(x)`          | result type matches   |
//! | `pow(x, 0.5)`               | `sqrt(x)`            | result type matches   |
//! | `log(exp(x))`               | `x`                  | `x` has result type   |
//! | `v' * v`                    | `dot_self(v)`        | `v` a vector          |
//! | `r * r'`                    | `dot_self(r)`        | `r` a row vector      |
//! | `m' * m`                    | `crossprod(m)`       | `m` a matrix          |
//! | `m * m'`                    | `tcrossprod(m)`      | `m` a matrix          |
//! | `dot_product(v, v)`         | `dot_self(v)`        | `v` vector-like       |
//! | `columns_dot_product(m, m)` | `columns_dot_self(m)`|                       |
//! | `rows_dot_product(m, m)`    | `rows_dot_self(m)`   |                       |

use stanc_mir::{
    CallKind, Expr, Index, LitKind, Operator, Pattern, Statement, Truncation, Typed, TypedExpr,
    UnsizedType,
};

use crate::deprecation::{modernize_call, DeprecationTable, Modernized};
use crate::glm;

pub fn variable(meta: Typed, name: impl Into<String>) -> TypedExpr {
    Expr::new(meta, Pattern::Variable(name.into()))
}

pub fn literal(meta: Typed, kind: LitKind, value: impl Into<String>) -> TypedExpr {
    Expr::new(meta, Pattern::Literal(kind, value.into()))
}

/// Apply a function, canonicalizing the call.
pub fn fun_app(
    meta: Typed,
    kind: CallKind,
    name: impl Into<String>,
    args: Vec<TypedExpr>,
) -> TypedExpr {
    let (kind, name, args) =
        match modernize_call(&meta, kind, name.into(), args, DeprecationTable::builtin()) {
            Modernized::Replaced(expr) => return expr,
            Modernized::Call(kind, name, args) => (kind, name, args),
        };
    if kind.is_library() {
        if let Some((fused, fused_args)) = glm::fuse_call(&name, &args) {
            return Expr::new(meta, Pattern::FunApp(kind, fused, fused_args));
        }
    }
    if kind == CallKind::StandardLibrary {
        if let Some(simplified) = simplify(&meta, &name, &args) {
            return simplified;
        }
    }
    Expr::new(meta, Pattern::FunApp(kind, name, args))
}

/// Apply a surface operator, `a + b` being `Plus__(a, b)`.
pub fn operator(meta: Typed, op: Operator, args: Vec<TypedExpr>) -> TypedExpr {
    fun_app(meta, CallKind::StandardLibrary, op.name(), args)
}

pub fn ternary_if(meta: Typed, cond: TypedExpr, then: TypedExpr, els: TypedExpr) -> TypedExpr {
    Expr::new(meta, Pattern::TernaryIf(cond, then, els))
}

pub fn and(meta: Typed, lhs: TypedExpr, rhs: TypedExpr) -> TypedExpr {
    Expr::new(meta, Pattern::And(lhs, rhs))
}

pub fn or(meta: Typed, lhs: TypedExpr, rhs: TypedExpr) -> TypedExpr {
    Expr::new(meta, Pattern::Or(lhs, rhs))
}

pub fn indexed(meta: Typed, base: TypedExpr, indices: Vec<Index<TypedExpr>>) -> TypedExpr {
    Expr::new(meta, Pattern::Indexed(base, indices))
}

pub fn paren(meta: Typed, inner: TypedExpr) -> TypedExpr {
    Expr::new(meta, Pattern::Paren(inner))
}

/// Build `arg ~ distribution(args)`, fusing GLM shapes like [`fun_app`].
pub fn tilde(
    arg: TypedExpr,
    distribution: impl Into<String>,
    args: Vec<TypedExpr>,
    truncation: Truncation<TypedExpr>,
) -> Statement<TypedExpr> {
    let distribution = distribution.into();
    let mut sampled = Vec::with_capacity(args.len() + 1);
    sampled.push(arg);
    sampled.extend(args);

    let (distribution, mut sampled) = match glm::fuse_tilde(&distribution, &sampled) {
        Some(fused) => fused,
        None => (distribution, sampled),
    };
    let arg = sampled.remove(0);
    Statement::Tilde {
        arg,
        distribution,
        args: sampled,
        truncation,
    }
}

fn simplify(meta: &Typed, name: &str, args: &[TypedExpr]) -> Option<TypedExpr> {
    let rewritten = match (name, args) {
        ("pow" | "Pow__", [x, exponent]) if meta.ty == x.ty().promoted() => {
            if literal_equals(exponent, 2.0) {
                library(meta, "square", x)
            } else if literal_equals(exponent, 0.5) {
                library(meta, "sqrt", x)
            } else {
                return None;
            }
        }
        ("log", [inner]) => match inner.pattern() {
            Pattern::FunApp(CallKind::StandardLibrary, exp, exp_args) if exp == "exp" => {
                match exp_args.as_slice() {
                    [x] if *x.ty() == meta.ty => x.clone(),
                    _ => return None,
                }
            }
            _ => return None,
        },
        ("Times__", [lhs, rhs]) => self_product(meta, lhs, rhs)?,
        ("dot_product", [a, b]) if a == b && a.ty().is_vector_like() => {
            library(meta, "dot_self", a)
        }
        ("columns_dot_product", [a, b]) if a == b => library(meta, "columns_dot_self", a),
        ("rows_dot_product", [a, b]) if a == b => library(meta, "rows_dot_self", a),
        _ => return None,
    };
    tracing::trace!(
        from = name,
        to = ?rewritten.pattern().fun_name(),
        "identity applied"
    );
    Some(rewritten)
}

/// `a' * a` or `a * a'`.
fn self_product(meta: &Typed, lhs: &TypedExpr, rhs: &TypedExpr) -> Option<TypedExpr> {
    if transpose_of(lhs).is_some_and(|a| a == rhs) {
        return match rhs.ty() {
            UnsizedType::Vector => Some(library(meta, "dot_self", rhs)),
            UnsizedType::Matrix => Some(library(meta, "crossprod", rhs)),
            _ => None,
        };
    }
    if transpose_of(rhs).is_some_and(|a| a == lhs) {
        return match lhs.ty() {
            UnsizedType::RowVector => Some(library(meta, "dot_self", lhs)),
            UnsizedType::Matrix => Some(library(meta, "tcrossprod", lhs)),
            _ => None,
        };
    }
    None
}

fn transpose_of(e: &TypedExpr) -> Option<&TypedExpr> {
    match e.pattern() {
        Pattern::FunApp(CallKind::StandardLibrary, name, args)
            if Operator::from_name(name) == Some(Operator::Transpose) =>
        {
            match args.as_slice() {
                [a] => Some(a),
                _ => None,
            }
        }
        _ => None,
    }
}

// Exact comparison against the written literal, not a tolerance.
#[allow(clippy::float_cmp)]
fn literal_equals(e: &TypedExpr, expected: f64) -> bool {
    match e.pattern() {
        Pattern::Literal(LitKind::Int | LitKind::Real, value) => {
            value.parse::<f64>().is_ok_and(|v| v == expected)
        }
        _ => false,
    }
}

fn library(meta: &Typed, name: &str, arg: &TypedExpr) -> TypedExpr {
    Expr::new(
        meta.clone(),
        Pattern::FunApp(
            CallKind::StandardLibrary,
            name.to_owned(),
            vec![arg.clone()],
        ),
    )
}

#[cfg(test)]
mod tests;
