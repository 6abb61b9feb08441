//! Generalized-linear-model recognition for distribution calls.
//!
//! A density whose linked parameter is a link function over a linear
//! predictor is replaced by the fused GLM density, which takes the design
//! matrix and coefficients directly:
//!
//! ```text
//! bernoulli_lpmf(y | inv_logit(alpha + x * beta))
//!     => bernoulli_logit_glm_lpmf(y | x, alpha, beta)
//! ```
//!
//! Shapes are tried in a fixed order and the first match wins:
//! 1. `link(alpha + x * beta)`, `x` a matrix
//! 2. `link(x * beta + alpha)`, `x` a matrix
//! 3. `link(x * beta)`, `x` a matrix (zero intercept)
//! 4. `link(eta)`: only the name changes, to the link-specialized density
//!
//! Nothing else is recognized. In particular `alpha + (x * beta)`,
//! `(alpha + x * beta) + gamma` and other regroupings stay as written.

use stanc_mir::{
    AdLevel, CallKind, Expr, LitKind, Operator, Pattern, Typed, TypedExpr, UnsizedType,
};

/// A family whose linked parameter can absorb a link function.
struct GlmFamily {
    family: &'static str,
    link: &'static str,
    /// Family name with the link built in.
    linked: &'static str,
}

const GLM_FAMILIES: [GlmFamily; 4] = [
    GlmFamily {
        family: "bernoulli",
        link: "inv_logit",
        linked: "bernoulli_logit",
    },
    GlmFamily {
        family: "poisson",
        link: "exp",
        linked: "poisson_log",
    },
    GlmFamily {
        family: "neg_binomial_2",
        link: "exp",
        linked: "neg_binomial_2_log",
    },
    GlmFamily {
        family: "categorical",
        link: "softmax",
        linked: "categorical_logit",
    },
];

/// Suffixes under which the mass functions above are recognized.
const MASS_SUFFIXES: [&str; 2] = ["_lpmf", "_lupmf"];

/// Fuse a density call such as `poisson_lpmf(y, exp(eta))`.
///
/// Returns the new function name and argument list, or `None` when the call
/// is not a recognized shape. The mass suffix is carried over.
pub fn fuse_call(name: &str, args: &[TypedExpr]) -> Option<(String, Vec<TypedExpr>)> {
    let (family, suffix) = MASS_SUFFIXES
        .into_iter()
        .find_map(|suffix| name.strip_suffix(suffix).map(|family| (family, suffix)))?;
    fuse(family, suffix, args)
}

/// Fuse the distribution of a sampling statement, `y ~ poisson(exp(eta))`.
pub fn fuse_tilde(distribution: &str, args: &[TypedExpr]) -> Option<(String, Vec<TypedExpr>)> {
    fuse(distribution, "", args)
}

fn fuse(family: &str, suffix: &str, args: &[TypedExpr]) -> Option<(String, Vec<TypedExpr>)> {
    let glm = GLM_FAMILIES.iter().find(|glm| glm.family == family)?;
    let [y, linked, rest @ ..] = args else {
        return None;
    };
    let [eta] = library_call(linked, glm.link)? else {
        return None;
    };

    let (name, mut fused) = match linear_predictor(eta) {
        Some(LinearPredictor { x, alpha, beta }) => (
            format!("{}_glm{suffix}", glm.linked),
            vec![y.clone(), x.clone(), alpha, beta.clone()],
        ),
        None => (format!("{}{suffix}", glm.linked), vec![y.clone(), eta.clone()]),
    };
    fused.extend(rest.iter().cloned());
    tracing::trace!(%family, fused = %name, "distribution call fused");
    Some((name, fused))
}

struct LinearPredictor<'a> {
    x: &'a TypedExpr,
    alpha: TypedExpr,
    beta: &'a TypedExpr,
}

fn linear_predictor(eta: &TypedExpr) -> Option<LinearPredictor<'_>> {
    if let Some([lhs, rhs]) = operands(eta, Operator::Plus) {
        if let Some((x, beta)) = matrix_product(rhs) {
            return Some(LinearPredictor {
                x,
                alpha: lhs.clone(),
                beta,
            });
        }
        let (x, beta) = matrix_product(lhs)?;
        return Some(LinearPredictor {
            x,
            alpha: rhs.clone(),
            beta,
        });
    }
    let (x, beta) = matrix_product(eta)?;
    Some(LinearPredictor {
        x,
        alpha: zero_intercept(eta),
        beta,
    })
}

/// `x * beta` with a matrix-typed `x`.
fn matrix_product(e: &TypedExpr) -> Option<(&TypedExpr, &TypedExpr)> {
    let [x, beta] = operands(e, Operator::Times)?;
    x.ty().is_matrix().then_some((x, beta))
}

fn operands(e: &TypedExpr, op: Operator) -> Option<&[TypedExpr; 2]> {
    library_call(e, op.name())?.try_into().ok()
}

/// Arguments of `e` if it is a standard-library call to `name`.
fn library_call<'a>(e: &'a TypedExpr, name: &str) -> Option<&'a [TypedExpr]> {
    match e.pattern() {
        Pattern::FunApp(CallKind::StandardLibrary, fun, args) if fun == name => Some(args),
        _ => None,
    }
}

fn zero_intercept(at: &TypedExpr) -> TypedExpr {
    Expr::new(
        Typed::new(UnsizedType::Int, AdLevel::DataOnly, at.span()),
        Pattern::Literal(LitKind::Int, "0".to_owned()),
    )
}
