use super::*;
use pretty_assertions::assert_eq;
use stanc_mir::{CallKind, Expr, Index, Operator, Typed, UnsizedType};

fn meta() -> Typed {
    Typed::data(UnsizedType::Int)
}

fn var(name: &str) -> TypedExpr {
    Expr::new(meta(), Pattern::Variable(name.to_owned()))
}

fn group(inner: TypedExpr) -> TypedExpr {
    Expr::new(meta(), Pattern::Paren(inner))
}

fn op(op: Operator, args: Vec<TypedExpr>) -> TypedExpr {
    Expr::new(
        meta(),
        Pattern::FunApp(CallKind::StandardLibrary, op.name().to_owned(), args),
    )
}

fn call(name: &str, args: Vec<TypedExpr>) -> TypedExpr {
    Expr::new(
        meta(),
        Pattern::FunApp(CallKind::StandardLibrary, name.to_owned(), args),
    )
}

fn sum() -> TypedExpr {
    op(Operator::Plus, vec![var("b"), var("c")])
}

#[test]
fn grouping_around_leaves_is_dropped() {
    assert_eq!(normalize_parens_expr(&group(group(var("x")))), var("x"));
    let product = op(Operator::Times, vec![var("a"), group(var("b"))]);
    assert_eq!(
        normalize_parens_expr(&product),
        op(Operator::Times, vec![var("a"), var("b")])
    );
}

#[test]
fn operator_operands_keep_one_layer() {
    let product = op(Operator::Times, vec![var("a"), group(group(group(sum())))]);
    assert_eq!(
        normalize_parens_expr(&product),
        op(Operator::Times, vec![var("a"), group(sum())])
    );
}

#[test]
fn grouping_is_never_invented() {
    let product = op(Operator::Times, vec![var("a"), sum()]);
    assert_eq!(normalize_parens_expr(&product), product);
}

#[test]
fn top_level_and_arguments_are_stripped() {
    assert_eq!(normalize_parens_expr(&group(sum())), sum());
    let f = call("f", vec![group(sum()), group(var("d"))]);
    assert_eq!(normalize_parens_expr(&f), call("f", vec![sum(), var("d")]));
}

#[test]
fn indexing() {
    let expr = Expr::new(
        meta(),
        Pattern::Indexed(
            group(sum()),
            vec![
                Index::Single(group(op(Operator::Minus, vec![var("i"), var("j")]))),
                Index::Between(group(var("lo")), var("hi")),
            ],
        ),
    );
    let expected = Expr::new(
        meta(),
        Pattern::Indexed(
            group(sum()),
            vec![
                Index::Single(op(Operator::Minus, vec![var("i"), var("j")])),
                Index::Between(var("lo"), var("hi")),
            ],
        ),
    );
    assert_eq!(normalize_parens_expr(&expr), expected);
}

#[test]
fn conditional_operands_are_protected() {
    let cond = Expr::new(
        meta(),
        Pattern::TernaryIf(group(var("c")), group(sum()), var("d")),
    );
    let expected = Expr::new(meta(), Pattern::TernaryIf(var("c"), group(sum()), var("d")));
    assert_eq!(normalize_parens_expr(&cond), expected);
}

#[test]
fn normalization_is_idempotent() {
    let expr = op(
        Operator::Minus,
        vec![
            group(group(op(
                Operator::Times,
                vec![group(sum()), group(call("g", vec![group(group(sum()))]))],
            ))),
            Expr::new(meta(), Pattern::Or(group(var("p")), group(group(sum())))),
        ],
    );
    let once = normalize_parens_expr(&expr);
    assert_eq!(normalize_parens_expr(&once), once);
}

#[test]
fn loop_bounds_are_protected() {
    let program = TypedProgram::new(vec![Statement::For {
        var: "i".to_owned(),
        lower: group(group(sum())),
        upper: group(var("n")),
        body: Box::new(Statement::IfThenElse {
            cond: group(sum()),
            then: Box::new(Statement::TargetPlusAssign(group(var("x")))),
            els: Some(Box::new(Statement::Block(vec![Statement::Print(vec![
                group(sum()),
            ])]))),
        }),
    }]);
    let expected = TypedProgram::new(vec![Statement::For {
        var: "i".to_owned(),
        lower: group(sum()),
        upper: var("n"),
        body: Box::new(Statement::IfThenElse {
            cond: sum(),
            then: Box::new(Statement::TargetPlusAssign(var("x"))),
            els: Some(Box::new(Statement::Block(vec![Statement::Print(vec![sum()])]))),
        }),
    }]);
    assert_eq!(normalize_parens(&program), expected);
}

#[test]
fn deep_grouping_does_not_overflow() {
    let mut expr = var("x");
    for _ in 0..100_000 {
        expr = group(expr);
    }
    let wrapped = op(Operator::Times, vec![var("a"), expr]);
    assert_eq!(
        normalize_parens_expr(&wrapped),
        op(Operator::Times, vec![var("a"), var("x")])
    );
}
