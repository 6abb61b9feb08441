use super::*;
use pretty_assertions::assert_eq;
use stanc_mir::{AdLevel, Origin, Span};

fn ty(ty: UnsizedType) -> Typed {
    Typed::new(ty, AdLevel::AutoDiffable, Span::DUMMY)
}

fn var(name: &str, t: UnsizedType) -> TypedExpr {
    variable(ty(t), name)
}

fn int(value: &str) -> TypedExpr {
    literal(Typed::data(UnsizedType::Int), LitKind::Int, value)
}

fn real_lit(value: &str) -> TypedExpr {
    literal(Typed::data(UnsizedType::Real), LitKind::Real, value)
}

fn lib(meta: Typed, name: &str, args: Vec<TypedExpr>) -> TypedExpr {
    fun_app(meta, CallKind::StandardLibrary, name, args)
}

fn transpose(e: TypedExpr, result: UnsizedType) -> TypedExpr {
    operator(ty(result), Operator::Transpose, vec![e])
}

#[test]
fn pow_two_is_square() {
    let x = || var("x", UnsizedType::Real);
    let pow = lib(ty(UnsizedType::Real), "pow", vec![x(), int("2")]);
    assert_eq!(pow, lib(ty(UnsizedType::Real), "square", vec![x()]));

    let op = operator(ty(UnsizedType::Real), Operator::Pow, vec![x(), real_lit("2.0")]);
    assert_eq!(op, lib(ty(UnsizedType::Real), "square", vec![x()]));
}

#[test]
fn pow_half_is_sqrt() {
    let n = || var("n", UnsizedType::Int);
    let pow = lib(ty(UnsizedType::Real), "pow", vec![n(), real_lit("0.5")]);
    assert_eq!(pow, lib(ty(UnsizedType::Real), "sqrt", vec![n()]));
}

#[test]
fn other_exponents_are_kept() {
    let x = var("x", UnsizedType::Real);
    let pow = lib(ty(UnsizedType::Real), "pow", vec![x, int("3")]);
    assert_eq!(pow.pattern().fun_name(), Some("pow"));

    let y = var("y", UnsizedType::Real);
    let symbolic = lib(ty(UnsizedType::Real), "pow", vec![y, var("two", UnsizedType::Int)]);
    assert_eq!(symbolic.pattern().fun_name(), Some("pow"));
}

#[test]
fn log_of_exp_cancels() {
    let x = || var("x", UnsizedType::Vector);
    let exp = lib(ty(UnsizedType::Vector), "exp", vec![x()]);
    assert_eq!(lib(ty(UnsizedType::Vector), "log", vec![exp]), x());

    // An integer operand would change type, so the calls stay.
    let n = var("n", UnsizedType::Int);
    let exp = lib(ty(UnsizedType::Real), "exp", vec![n]);
    let log = lib(ty(UnsizedType::Real), "log", vec![exp]);
    assert_eq!(log.pattern().fun_name(), Some("log"));
}

#[test]
fn self_products() {
    let v = || var("v", UnsizedType::Vector);
    let vtv = operator(
        ty(UnsizedType::Real),
        Operator::Times,
        vec![transpose(v(), UnsizedType::RowVector), v()],
    );
    assert_eq!(vtv, lib(ty(UnsizedType::Real), "dot_self", vec![v()]));

    let r = || var("r", UnsizedType::RowVector);
    let rrt = operator(
        ty(UnsizedType::Real),
        Operator::Times,
        vec![r(), transpose(r(), UnsizedType::Vector)],
    );
    assert_eq!(rrt, lib(ty(UnsizedType::Real), "dot_self", vec![r()]));

    let m = || var("m", UnsizedType::Matrix);
    let mtm = operator(
        ty(UnsizedType::Matrix),
        Operator::Times,
        vec![transpose(m(), UnsizedType::Matrix), m()],
    );
    assert_eq!(mtm, lib(ty(UnsizedType::Matrix), "crossprod", vec![m()]));
    let mmt = operator(
        ty(UnsizedType::Matrix),
        Operator::Times,
        vec![m(), transpose(m(), UnsizedType::Matrix)],
    );
    assert_eq!(mmt, lib(ty(UnsizedType::Matrix), "tcrossprod", vec![m()]));
}

#[test]
fn outer_product_is_not_a_self_product() {
    // v * v' is a matrix, not a sum of squares.
    let v = || var("v", UnsizedType::Vector);
    let outer = operator(
        ty(UnsizedType::Matrix),
        Operator::Times,
        vec![v(), transpose(v(), UnsizedType::RowVector)],
    );
    assert_eq!(outer.pattern().operator(), Some(Operator::Times));
}

#[test]
fn dot_products_of_one_operand() {
    let v = || var("v", UnsizedType::Vector);
    let dot = lib(ty(UnsizedType::Real), "dot_product", vec![v(), v()]);
    assert_eq!(dot, lib(ty(UnsizedType::Real), "dot_self", vec![v()]));

    let w = var("w", UnsizedType::Vector);
    let mixed = lib(ty(UnsizedType::Real), "dot_product", vec![v(), w]);
    assert_eq!(mixed.pattern().fun_name(), Some("dot_product"));

    let m = || var("m", UnsizedType::Matrix);
    let cols = lib(ty(UnsizedType::RowVector), "columns_dot_product", vec![m(), m()]);
    assert_eq!(
        cols,
        lib(ty(UnsizedType::RowVector), "columns_dot_self", vec![m()])
    );
    let rows = lib(ty(UnsizedType::Vector), "rows_dot_product", vec![m(), m()]);
    assert_eq!(rows, lib(ty(UnsizedType::Vector), "rows_dot_self", vec![m()]));
}

#[test]
fn deprecated_names_build_their_replacement() {
    let args = || vec![var("a", UnsizedType::Int), var("b", UnsizedType::Int)];
    assert_eq!(
        lib(ty(UnsizedType::Real), "binomial_coefficient_log", args()),
        lib(ty(UnsizedType::Real), "lchoose", args())
    );
    assert_eq!(
        lib(ty(UnsizedType::Real), "multiply_log", args()),
        lib(ty(UnsizedType::Real), "lmultiply", args())
    );
}

#[test]
fn identities_are_library_only() {
    let x = || var("x", UnsizedType::Real);
    let user = fun_app(
        ty(UnsizedType::Real),
        CallKind::UserDefined,
        "pow",
        vec![x(), int("2")],
    );
    assert_eq!(user.pattern().fun_name(), Some("pow"));
}

fn linear_predictor(intercept_first: bool, x_ty: UnsizedType) -> TypedExpr {
    let xb = operator(
        ty(UnsizedType::Vector),
        Operator::Times,
        vec![var("x", x_ty), var("beta", UnsizedType::Vector)],
    );
    let alpha = var("alpha", UnsizedType::Real);
    let args = if intercept_first {
        vec![alpha, xb]
    } else {
        vec![xb, alpha]
    };
    operator(ty(UnsizedType::Vector), Operator::Plus, args)
}

fn bernoulli(eta: TypedExpr) -> TypedExpr {
    let p = lib(ty(UnsizedType::Vector), "inv_logit", vec![eta]);
    fun_app(
        ty(UnsizedType::Real),
        CallKind::ConditionalDistribution(Origin::StandardLibrary),
        "bernoulli_lpmf",
        vec![var("y", UnsizedType::Array(Box::new(UnsizedType::Int))), p],
    )
}

#[test]
fn glm_fusion_is_symmetric() {
    let a = bernoulli(linear_predictor(true, UnsizedType::Matrix));
    let b = bernoulli(linear_predictor(false, UnsizedType::Matrix));
    assert_eq!(a, b);
    assert_eq!(a.pattern().fun_name(), Some("bernoulli_logit_glm_lpmf"));
    assert_eq!(a.children().len(), 4);
}

#[test]
fn glm_needs_a_design_matrix() {
    for intercept_first in [true, false] {
        let fused = bernoulli(linear_predictor(intercept_first, UnsizedType::RowVector));
        assert_eq!(fused.pattern().fun_name(), Some("bernoulli_logit_lpmf"));
        let children = fused.children();
        assert_eq!(children.len(), 2);
        assert_eq!(
            *children[1],
            linear_predictor(intercept_first, UnsizedType::RowVector)
        );
    }
}

#[test]
fn sampling_statements_are_fused() {
    let xb = operator(
        ty(UnsizedType::Vector),
        Operator::Times,
        vec![var("x", UnsizedType::Matrix), var("beta", UnsizedType::Vector)],
    );
    let mu = lib(ty(UnsizedType::Vector), "exp", vec![xb]);
    let y = var("y", UnsizedType::Array(Box::new(UnsizedType::Int)));
    let phi = var("phi", UnsizedType::Real);
    let stmt = tilde(y, "neg_binomial_2", vec![mu, phi], Truncation::None);

    let Statement::Tilde {
        arg,
        distribution,
        args,
        truncation,
    } = stmt
    else {
        panic!("expected a sampling statement");
    };
    assert_eq!(arg.pattern(), &Pattern::Variable("y".to_owned()));
    assert_eq!(distribution, "neg_binomial_2_log_glm");
    let names: Vec<_> = args
        .iter()
        .map(|a| match a.pattern() {
            Pattern::Variable(name) => name.clone(),
            Pattern::Literal(_, value) => value.clone(),
            _ => String::new(),
        })
        .collect();
    assert_eq!(names, ["x", "0", "beta", "phi"]);
    assert_eq!(truncation, Truncation::None);
}

#[test]
fn unrecognized_sampling_statements_pass_through() {
    let y = var("y", UnsizedType::Real);
    let stmt = tilde(
        y.clone(),
        "normal",
        vec![var("mu", UnsizedType::Real), var("sigma", UnsizedType::Real)],
        Truncation::Lower(real_lit("0")),
    );
    assert_eq!(
        stmt,
        Statement::Tilde {
            arg: y,
            distribution: "normal".to_owned(),
            args: vec![var("mu", UnsizedType::Real), var("sigma", UnsizedType::Real)],
            truncation: Truncation::Lower(real_lit("0")),
        }
    );
}
