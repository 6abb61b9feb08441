use super::*;
use pretty_assertions::assert_eq;
use stanc_mir::{LitKind, Operator, UnsizedType};

fn real(name: &str) -> TypedExpr {
    Expr::new(
        Typed::data(UnsizedType::Real),
        Pattern::Variable(name.to_owned()),
    )
}

fn call(kind: CallKind, name: &str, args: Vec<TypedExpr>) -> TypedExpr {
    Expr::new(
        Typed::data(UnsizedType::Real),
        Pattern::FunApp(kind, name.to_owned(), args),
    )
}

fn lib(name: &str, args: Vec<TypedExpr>) -> TypedExpr {
    call(CallKind::StandardLibrary, name, args)
}

fn cond_dist(name: &str, args: Vec<TypedExpr>) -> TypedExpr {
    call(
        CallKind::ConditionalDistribution(Origin::StandardLibrary),
        name,
        args,
    )
}

fn modernize(expr: &TypedExpr) -> TypedExpr {
    replace_deprecated_expr(expr, DeprecationTable::builtin())
}

#[test]
fn fixed_renames() {
    let ab = || vec![real("a"), real("b")];
    assert_eq!(
        modernize(&lib("binomial_coefficient_log", ab())),
        lib("lchoose", ab())
    );
    assert_eq!(modernize(&lib("multiply_log", ab())), lib("lmultiply", ab()));
    assert_eq!(modernize(&lib("fabs", vec![real("a")])), lib("abs", vec![real("a")]));
}

#[test]
fn legacy_density_becomes_conditional() {
    let args = || vec![real("y"), real("mu"), real("sigma")];
    assert_eq!(
        modernize(&lib("normal_log", args())),
        cond_dist("normal_lpdf", args())
    );
}

#[test]
fn family_names_ending_in_log() {
    let args = || vec![real("n"), real("eta")];
    // `poisson_log` is the legacy spelling of the poisson mass function...
    assert_eq!(
        modernize(&lib("poisson_log", args())),
        cond_dist("poisson_lpmf", args())
    );
    // ...and `poisson_log_log` that of the log-rate family.
    assert_eq!(
        modernize(&lib("poisson_log_log", args())),
        cond_dist("poisson_log_lpmf", args())
    );
}

#[test]
fn legacy_cdf_spellings() {
    let args = || vec![real("y"), real("mu"), real("sigma")];
    assert_eq!(
        modernize(&lib("normal_cdf_log", args())),
        lib("normal_lcdf", args())
    );
    assert_eq!(
        modernize(&lib("normal_ccdf_log", args())),
        lib("normal_lccdf", args())
    );
    // Families without cdfs get no cdf renames.
    assert_eq!(
        modernize(&lib("multi_normal_cdf_log", args())),
        lib("multi_normal_cdf_log", args())
    );
}

#[test]
fn user_defined_functions_keep_their_names() {
    let f = call(CallKind::UserDefined, "multiply_log", vec![real("a"), real("b")]);
    assert_eq!(modernize(&f), f);
    let g = call(CallKind::UserDefined, "get_lp", vec![]);
    assert_eq!(modernize(&g), g);
}

#[test]
fn get_lp_reads_target() {
    assert_eq!(
        modernize(&lib("get_lp", vec![])),
        call(CallKind::CompilerInternal, "target", vec![])
    );
}

#[test]
fn if_else_becomes_conditional_expression() {
    let c = Expr::new(
        Typed::data(UnsizedType::Int),
        Pattern::Variable("c".to_owned()),
    );
    let expr = lib("if_else", vec![c.clone(), real("a"), real("b")]);
    let expected = Expr::new(
        Typed::data(UnsizedType::Real),
        Pattern::TernaryIf(
            Expr::new(Typed::data(UnsizedType::Int), Pattern::Paren(c)),
            real("a"),
            real("b"),
        ),
    );
    assert_eq!(modernize(&expr), expected);

    // Wrong arity is left alone.
    let short = lib("if_else", vec![real("a"), real("b")]);
    assert_eq!(modernize(&short), short);
}

#[test]
fn renames_reach_nested_calls() {
    let inner = lib("fabs", vec![real("x")]);
    let index = Expr::new(
        Typed::data(UnsizedType::Int),
        Pattern::Literal(LitKind::Int, "1".to_owned()),
    );
    let indexed = Expr::new(
        Typed::data(UnsizedType::Real),
        Pattern::Indexed(real("v"), vec![stanc_mir::Index::Single(index.clone())]),
    );
    let expr = lib(Operator::Plus.name(), vec![inner, indexed.clone()]);
    let expected = lib(
        Operator::Plus.name(),
        vec![lib("abs", vec![real("x")]), indexed],
    );
    assert_eq!(modernize(&expr), expected);
}

#[test]
fn statements_are_modernized() {
    let program = TypedProgram::new(vec![
        Statement::IncrementLogProb(lib("normal_log", vec![real("y"), real("mu"), real("s")])),
        Statement::Assignment {
            lhs: real("x"),
            op: AssignOp::ArrowAssign,
            rhs: lib("get_lp", vec![]),
        },
        Statement::For {
            var: "i".to_owned(),
            lower: real("lo"),
            upper: real("hi"),
            body: Box::new(Statement::Block(vec![Statement::NRFunApp(
                CallKind::StandardLibrary,
                "fabs".to_owned(),
                vec![real("z")],
            )])),
        },
    ]);
    let out = replace_deprecated(&program, &StanCatalog);

    let expected = TypedProgram::new(vec![
        Statement::TargetPlusAssign(cond_dist(
            "normal_lpdf",
            vec![real("y"), real("mu"), real("s")],
        )),
        Statement::Assignment {
            lhs: real("x"),
            op: AssignOp::Assign,
            rhs: call(CallKind::CompilerInternal, "target", vec![]),
        },
        Statement::For {
            var: "i".to_owned(),
            lower: real("lo"),
            upper: real("hi"),
            body: Box::new(Statement::Block(vec![Statement::NRFunApp(
                CallKind::StandardLibrary,
                "abs".to_owned(),
                vec![real("z")],
            )])),
        },
    ]);
    assert_eq!(out, expected);
}

#[test]
fn custom_catalog_drives_legacy_names() {
    struct NoFamilies;
    impl SignatureCatalog for NoFamilies {
        fn families(&self) -> &[crate::catalog::DistributionFamily] {
            &[]
        }
    }
    let table = DeprecationTable::new(&NoFamilies);
    // Only the fixed renames remain.
    assert_eq!(table.len(), DEPRECATED_FUNCTIONS.len());
    assert_eq!(table.rename(CallKind::StandardLibrary, "normal_log"), None);
    assert_eq!(
        table.rename(CallKind::StandardLibrary, "fabs"),
        Some((CallKind::StandardLibrary, "abs"))
    );
}
