//! Surface statements that host expressions.
//!
//! The canonicalization passes rewrite a handful of statement forms
//! (sampling statements, deprecated accumulator and assignment syntax, loop
//! bounds). Statements are generic over the expression type so the same
//! shape serves untyped and typed programs.

use crate::meta::{TypedExpr, UntypedExpr};
use crate::operator::Operator;
use crate::pattern::CallKind;
use crate::stack::ensure_sufficient_stack;

pub type UntypedProgram = Program<UntypedExpr>;
pub type TypedProgram = Program<TypedExpr>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `<-`, removed from the language.
    ArrowAssign,
    /// `+=`, `*=`, ...
    Compound(Operator),
}

/// Truncation bounds of a sampling statement, `T[lo, hi]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Truncation<E> {
    None,
    Lower(E),
    Upper(E),
    Both(E, E),
}

impl<E> Truncation<E> {
    pub fn map<F>(&self, mut f: impl FnMut(&E) -> F) -> Truncation<F> {
        match self {
            Truncation::None => Truncation::None,
            Truncation::Lower(lo) => Truncation::Lower(f(lo)),
            Truncation::Upper(hi) => Truncation::Upper(f(hi)),
            Truncation::Both(lo, hi) => {
                let lo = f(lo);
                Truncation::Both(lo, f(hi))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement<E> {
    Assignment {
        lhs: E,
        op: AssignOp,
        rhs: E,
    },
    /// `arg ~ distribution(args) T[...]`. `distribution` names a family.
    Tilde {
        arg: E,
        distribution: String,
        args: Vec<E>,
        truncation: Truncation<E>,
    },
    /// `target += e`
    TargetPlusAssign(E),
    /// `increment_log_prob(e)`, removed from the language.
    IncrementLogProb(E),
    /// A call in statement position.
    NRFunApp(CallKind, String, Vec<E>),
    For {
        var: String,
        lower: E,
        upper: E,
        body: Box<Statement<E>>,
    },
    While {
        cond: E,
        body: Box<Statement<E>>,
    },
    IfThenElse {
        cond: E,
        then: Box<Statement<E>>,
        els: Option<Box<Statement<E>>>,
    },
    Block(Vec<Statement<E>>),
    Print(Vec<E>),
    Reject(Vec<E>),
    Return(Option<E>),
    Break,
    Continue,
    Skip,
}

impl<E> Statement<E> {
    /// Rebuild the statement with every expression transformed, nested
    /// statements included. Expressions are visited in source order.
    pub fn map_exprs<F>(&self, f: &mut impl FnMut(&E) -> F) -> Statement<F> {
        ensure_sufficient_stack(|| match self {
            Statement::Assignment { lhs, op, rhs } => {
                let lhs = f(lhs);
                Statement::Assignment {
                    lhs,
                    op: *op,
                    rhs: f(rhs),
                }
            }
            Statement::Tilde {
                arg,
                distribution,
                args,
                truncation,
            } => {
                let arg = f(arg);
                let args = args.iter().map(&mut *f).collect();
                Statement::Tilde {
                    arg,
                    distribution: distribution.clone(),
                    args,
                    truncation: truncation.map(&mut *f),
                }
            }
            Statement::TargetPlusAssign(e) => Statement::TargetPlusAssign(f(e)),
            Statement::IncrementLogProb(e) => Statement::IncrementLogProb(f(e)),
            Statement::NRFunApp(kind, name, args) => {
                Statement::NRFunApp(*kind, name.clone(), args.iter().map(&mut *f).collect())
            }
            Statement::For {
                var,
                lower,
                upper,
                body,
            } => {
                let lower = f(lower);
                let upper = f(upper);
                Statement::For {
                    var: var.clone(),
                    lower,
                    upper,
                    body: Box::new(body.map_exprs(f)),
                }
            }
            Statement::While { cond, body } => {
                let cond = f(cond);
                Statement::While {
                    cond,
                    body: Box::new(body.map_exprs(f)),
                }
            }
            Statement::IfThenElse { cond, then, els } => {
                let cond = f(cond);
                let then = Box::new(then.map_exprs(f));
                Statement::IfThenElse {
                    cond,
                    then,
                    els: els.as_ref().map(|s| Box::new(s.map_exprs(f))),
                }
            }
            Statement::Block(stmts) => {
                Statement::Block(stmts.iter().map(|s| s.map_exprs(f)).collect())
            }
            Statement::Print(args) => Statement::Print(args.iter().map(&mut *f).collect()),
            Statement::Reject(args) => Statement::Reject(args.iter().map(&mut *f).collect()),
            Statement::Return(e) => Statement::Return(e.as_ref().map(&mut *f)),
            Statement::Break => Statement::Break,
            Statement::Continue => Statement::Continue,
            Statement::Skip => Statement::Skip,
        })
    }

    /// Rewrite statements bottom-up: nested statements first, then `f` on
    /// the rebuilt parent.
    #[must_use]
    pub fn rewrite(self, f: &mut impl FnMut(Statement<E>) -> Statement<E>) -> Statement<E> {
        ensure_sufficient_stack(|| {
            let rebuilt = match self {
                Statement::For {
                    var,
                    lower,
                    upper,
                    body,
                } => Statement::For {
                    var,
                    lower,
                    upper,
                    body: Box::new((*body).rewrite(f)),
                },
                Statement::While { cond, body } => Statement::While {
                    cond,
                    body: Box::new((*body).rewrite(f)),
                },
                Statement::IfThenElse { cond, then, els } => Statement::IfThenElse {
                    cond,
                    then: Box::new((*then).rewrite(f)),
                    els: els.map(|s| Box::new((*s).rewrite(f))),
                },
                Statement::Block(stmts) => {
                    Statement::Block(stmts.into_iter().map(|s| s.rewrite(f)).collect())
                }
                other => other,
            };
            f(rebuilt)
        })
    }
}

/// An ordered list of top-level statements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Program<E> {
    pub statements: Vec<Statement<E>>,
}

impl<E> Program<E> {
    pub fn new(statements: Vec<Statement<E>>) -> Self {
        Program { statements }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn map_exprs<F>(&self, mut f: impl FnMut(&E) -> F) -> Program<F> {
        Program::new(self.statements.iter().map(|s| s.map_exprs(&mut f)).collect())
    }
}
