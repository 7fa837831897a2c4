/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use serde::{Deserialize, Serialize};

use crate::traits::{Matrix, Numberish};

/// The structural guarantees carried by a matrix.
///
/// These are independent facts rather than a single tag: a diagonal
/// matrix is at the same time `lower`, `upper` and `symmetric`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Structure {
    /// `A == transpose(A)`
    pub symmetric: bool,
    /// `A == conj(transpose(A))`
    pub hermitian: bool,
    /// Every element above the diagonal is zero
    pub lower: bool,
    /// Every element below the diagonal is zero
    pub upper: bool,
}

impl Structure {
    /// No guarantees at all.
    pub const GENERAL: Self = Self {
        symmetric: false,
        hermitian: false,
        lower: false,
        upper: false,
    };

    /// Only symmetric.
    pub const SYMMETRIC: Self = Self {
        symmetric: true,
        ..Self::GENERAL
    };

    /// Only Hermitian.
    pub const HERMITIAN: Self = Self {
        hermitian: true,
        ..Self::GENERAL
    };

    /// Only lower-triangular.
    pub const LOWER: Self = Self {
        lower: true,
        ..Self::GENERAL
    };

    /// Only upper-triangular.
    pub const UPPER: Self = Self {
        upper: true,
        ..Self::GENERAL
    };

    /// Everything a real diagonal matrix guarantees.
    pub const DIAGONAL: Self = Self {
        symmetric: true,
        hermitian: true,
        lower: true,
        upper: true,
    };

    /// Is the matrix guaranteed to be symmetric?
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Is the matrix guaranteed to be Hermitian?
    pub fn is_hermitian(&self) -> bool {
        self.hermitian
    }

    /// Is the matrix guaranteed to be lower-triangular?
    pub fn is_lower(&self) -> bool {
        self.lower
    }

    /// Is the matrix guaranteed to be upper-triangular?
    pub fn is_upper(&self) -> bool {
        self.upper
    }

    /// Is nothing guaranteed?
    pub fn is_general(&self) -> bool {
        *self == Self::GENERAL
    }

    /// Checks a single fact.
    pub fn contains(&self, kind: StructureKind) -> bool {
        match kind {
            StructureKind::General => true,
            StructureKind::Symmetric => self.symmetric,
            StructureKind::Hermitian => self.hermitian,
            StructureKind::Lower => self.lower,
            StructureKind::Upper => self.upper,
        }
    }

    /// The facts that hold in both `self` and `other`
    pub fn intersection(self, other: Self) -> Self {
        Self {
            symmetric: self.symmetric && other.symmetric,
            hermitian: self.hermitian && other.hermitian,
            lower: self.lower && other.lower,
            upper: self.upper && other.upper,
        }
    }

    /// Inspects the values of `matrix` and returns every fact that holds.
    ///
    /// Non-square matrices are never symmetric, Hermitian or triangular.
    pub fn detect<T: Numberish, M: Matrix<T> + ?Sized>(matrix: &M) -> Self {
        let (nrows, ncols) = matrix.size();
        if nrows != ncols {
            return Self::GENERAL;
        }
        let n = nrows;
        let mut ret = Self::DIAGONAL;
        for r in 0..n {
            for c in 0..n {
                let Ok(v) = matrix.get(r, c) else {
                    return Self::GENERAL;
                };
                if c > r && !v.is_zero() {
                    ret.lower = false;
                }
                if r > c && !v.is_zero() {
                    ret.upper = false;
                }
                if let Ok(t) = matrix.get(c, r) {
                    if v != t {
                        ret.symmetric = false;
                    }
                    if v != t.conj() {
                        ret.hermitian = false;
                    }
                }
            }
        }
        ret
    }
}

impl std::ops::BitOr for Structure {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self {
            symmetric: self.symmetric || other.symmetric,
            hermitian: self.hermitian || other.hermitian,
            lower: self.lower || other.lower,
            upper: self.upper || other.upper,
        }
    }
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_general() {
            return write!(f, "general");
        }
        let names: Vec<&str> = [
            (self.symmetric, "symmetric"),
            (self.hermitian, "hermitian"),
            (self.lower, "lower"),
            (self.upper, "upper"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect();
        write!(f, "{}", names.join("+"))
    }
}

/// The closed set of structural tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// No structure
    General,
    /// Symmetric
    Symmetric,
    /// Hermitian
    Hermitian,
    /// Lower-triangular
    Lower,
    /// Upper-triangular
    Upper,
}

impl StructureKind {
    /// The guarantee that consists only of this tag.
    pub fn as_structure(self) -> Structure {
        match self {
            StructureKind::General => Structure::GENERAL,
            StructureKind::Symmetric => Structure::SYMMETRIC,
            StructureKind::Hermitian => Structure::HERMITIAN,
            StructureKind::Lower => Structure::LOWER,
            StructureKind::Upper => Structure::UPPER,
        }
    }
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StructureKind::General => "general",
            StructureKind::Symmetric => "symmetric",
            StructureKind::Hermitian => "hermitian",
            StructureKind::Lower => "lower",
            StructureKind::Upper => "upper",
        };
        write!(f, "{}", s)
    }
}

/// Which structures survive when an operation is applied element-wise.
///
/// Everything defaults to `false`, so an operation that does not
/// override anything yields a general matrix.
///
/// * An operation that commutes with transposition keeps symmetry.
/// * An operation that commutes with the conjugate transpose keeps
///   Hermitian matrices Hermitian.
/// * An operation with `f(0) = 0` keeps both triangular structures.
pub trait YieldsStructure {
    /// Applied to a symmetric matrix, the result is symmetric.
    const PRESERVES_SYMMETRIC: bool = false;
    /// Applied to a Hermitian matrix, the result is Hermitian.
    const PRESERVES_HERMITIAN: bool = false;
    /// Applied to a lower-triangular matrix, the result is lower-triangular.
    const PRESERVES_LOWER: bool = false;
    /// Applied to an upper-triangular matrix, the result is upper-triangular.
    const PRESERVES_UPPER: bool = false;
}

/// The structure of `Op` applied to a matrix with structure `input`.
pub fn yields<Op: YieldsStructure + ?Sized>(input: Structure) -> Structure {
    input.intersection(Structure {
        symmetric: Op::PRESERVES_SYMMETRIC,
        hermitian: Op::PRESERVES_HERMITIAN,
        lower: Op::PRESERVES_LOWER,
        upper: Op::PRESERVES_UPPER,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KeepsNothing;
    impl YieldsStructure for KeepsNothing {}

    struct KeepsTriangles;
    impl YieldsStructure for KeepsTriangles {
        const PRESERVES_LOWER: bool = true;
        const PRESERVES_UPPER: bool = true;
    }

    #[test]
    fn test_unregistered_yields_general() {
        assert_eq!(yields::<KeepsNothing>(Structure::DIAGONAL), Structure::GENERAL);
        assert_eq!(yields::<KeepsNothing>(Structure::LOWER), Structure::GENERAL);
    }

    #[test]
    fn test_yields_never_adds() {
        // A general input stays general no matter what the op preserves
        assert_eq!(yields::<KeepsTriangles>(Structure::GENERAL), Structure::GENERAL);
        assert_eq!(yields::<KeepsTriangles>(Structure::LOWER), Structure::LOWER);
        assert_eq!(
            yields::<KeepsTriangles>(Structure::DIAGONAL),
            Structure::LOWER | Structure::UPPER
        );
    }

    #[test]
    fn test_contains() {
        let s = Structure::LOWER | Structure::SYMMETRIC;
        assert!(s.contains(StructureKind::Lower));
        assert!(s.contains(StructureKind::Symmetric));
        assert!(!s.contains(StructureKind::Upper));
        assert!(s.contains(StructureKind::General));
        assert_eq!(StructureKind::Upper.as_structure(), Structure::UPPER);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Structure::GENERAL), "general");
        assert_eq!(format!("{}", Structure::LOWER | Structure::UPPER), "lower+upper");
    }
}
