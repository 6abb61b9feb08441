//! Metadata variants carried by [`Expr`] nodes.
//!
//! | Variant     | Fields                              | Used for                |
//! |-------------|-------------------------------------|-------------------------|
//! | `Untyped`   | none                                | syntax-only passes      |
//! | `Typed`     | type, autodiff level, span          | post-type-check passes  |
//! | `Labelled`  | `Typed` fields + unique label       | cross-referencing       |
//!
//! Equality, ordering and hashing skip the span, and for `Labelled` also the
//! label: two trees built at different source locations are the same tree.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::fixed::Expr;
use crate::span::Span;
use crate::types::{AdLevel, UnsizedType};

pub type UntypedExpr = Expr<Untyped>;
pub type TypedExpr = Expr<Typed>;
pub type LabelledExpr = Expr<Labelled>;

/// Annotation for trees straight out of the parser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Untyped;

/// Annotation attached by the type checker.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Typed {
    pub ty: UnsizedType,
    pub adlevel: AdLevel,
    pub span: Span,
}

impl Typed {
    pub fn new(ty: UnsizedType, adlevel: AdLevel, span: Span) -> Self {
        Typed { ty, adlevel, span }
    }

    /// Data-only annotation with no source location, for generated nodes.
    pub fn data(ty: UnsizedType) -> Self {
        Typed::new(ty, AdLevel::DataOnly, Span::DUMMY)
    }

    fn semantic(&self) -> (&UnsizedType, AdLevel) {
        (&self.ty, self.adlevel)
    }
}

impl PartialEq for Typed {
    fn eq(&self, other: &Self) -> bool {
        self.semantic() == other.semantic()
    }
}

impl Eq for Typed {}

impl PartialOrd for Typed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Typed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semantic().cmp(&other.semantic())
    }
}

impl Hash for Typed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semantic().hash(state);
    }
}

/// Unique identifier assigned to a node by [`crate::label`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Label(u32);

impl Label {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Label(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed annotation plus a label.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Labelled {
    pub ty: UnsizedType,
    pub adlevel: AdLevel,
    pub span: Span,
    pub label: Label,
}

impl Labelled {
    pub fn from_typed(meta: &Typed, label: Label) -> Self {
        Labelled {
            ty: meta.ty.clone(),
            adlevel: meta.adlevel,
            span: meta.span,
            label,
        }
    }

    /// Drop the label.
    pub fn typed(&self) -> Typed {
        Typed::new(self.ty.clone(), self.adlevel, self.span)
    }

    fn semantic(&self) -> (&UnsizedType, AdLevel) {
        (&self.ty, self.adlevel)
    }
}

impl PartialEq for Labelled {
    fn eq(&self, other: &Self) -> bool {
        self.semantic() == other.semantic()
    }
}

impl Eq for Labelled {}

impl PartialOrd for Labelled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Labelled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semantic().cmp(&other.semantic())
    }
}

impl Hash for Labelled {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semantic().hash(state);
    }
}

impl TypedExpr {
    #[inline]
    pub fn ty(&self) -> &UnsizedType {
        &self.meta.ty
    }

    #[inline]
    pub fn adlevel(&self) -> AdLevel {
        self.meta.adlevel
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.meta.span
    }

    /// Replace the root's type, keeping its span and autodiff level.
    #[must_use]
    pub fn with_type(mut self, ty: UnsizedType) -> Self {
        self.meta.ty = ty;
        self
    }

    /// Forget all type information.
    pub fn untyped(&self) -> UntypedExpr {
        self.map_meta(|_| Untyped)
    }
}

impl LabelledExpr {
    #[inline]
    pub fn label(&self) -> Label {
        self.meta.label
    }

    /// Forget the labels.
    pub fn unlabel(&self) -> TypedExpr {
        self.map_meta(Labelled::typed)
    }
}
