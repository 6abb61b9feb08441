//! Unsized types and autodiff levels attached by the type checker.

use std::fmt;

/// The shape-free type of an expression.
///
/// Container sizes are a runtime property; the MIR only records the kind of
/// container. `Array` nests to express multi-dimensional arrays.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnsizedType {
    Int,
    Real,
    Complex,
    Vector,
    RowVector,
    Matrix,
    ComplexVector,
    ComplexRowVector,
    ComplexMatrix,
    Array(Box<UnsizedType>),
    Void,
}

impl UnsizedType {
    #[inline]
    pub fn is_matrix(&self) -> bool {
        matches!(self, UnsizedType::Matrix)
    }

    /// `true` for (real-valued) column and row vectors.
    #[inline]
    pub fn is_vector_like(&self) -> bool {
        matches!(self, UnsizedType::Vector | UnsizedType::RowVector)
    }

    /// The type of the innermost array element (the type itself for non-arrays).
    pub fn innermost(&self) -> &UnsizedType {
        let mut ty = self;
        while let UnsizedType::Array(elem) = ty {
            ty = elem;
        }
        ty
    }

    /// Number of array dimensions wrapped around the innermost type.
    pub fn array_dims(&self) -> usize {
        let mut dims = 0;
        let mut ty = self;
        while let UnsizedType::Array(elem) = ty {
            dims += 1;
            ty = elem;
        }
        dims
    }

    /// The type after integer-to-real promotion, as applied to real-valued
    /// library functions receiving integer arguments.
    #[must_use]
    pub fn promoted(&self) -> UnsizedType {
        match self {
            UnsizedType::Int => UnsizedType::Real,
            UnsizedType::Array(elem) => UnsizedType::Array(Box::new(elem.promoted())),
            other => other.clone(),
        }
    }
}

impl fmt::Display for UnsizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsizedType::Int => f.write_str("int"),
            UnsizedType::Real => f.write_str("real"),
            UnsizedType::Complex => f.write_str("complex"),
            UnsizedType::Vector => f.write_str("vector"),
            UnsizedType::RowVector => f.write_str("row_vector"),
            UnsizedType::Matrix => f.write_str("matrix"),
            UnsizedType::ComplexVector => f.write_str("complex_vector"),
            UnsizedType::ComplexRowVector => f.write_str("complex_row_vector"),
            UnsizedType::ComplexMatrix => f.write_str("complex_matrix"),
            UnsizedType::Void => f.write_str("void"),
            UnsizedType::Array(_) => {
                let commas = ",".repeat(self.array_dims() - 1);
                write!(f, "array[{commas}] {}", self.innermost())
            }
        }
    }
}

/// Whether a value participates in automatic differentiation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum AdLevel {
    #[default]
    DataOnly,
    AutoDiffable,
}
