//! Field descriptors and standard irreducible polynomials.
//!
//! This module provides:
//! - The `GaloisField` descriptor holding the characteristic `p`, the
//!   extension degree `m` and, for `m > 1`, the modulus polynomial
//! - `GaloisField::reduce`, the single point where arbitrary polynomials
//!   are mapped onto canonical field representatives
//! - A helper to find an irreducible polynomial of a given degree

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{FieldError, Result};
use crate::structures::element::FieldElement;
use crate::structures::poly::Polynomial;
use crate::utils::{is_prime, residue};

/// A finite field GF(p^m).
///
/// For `m == 1` this is the prime field of integers modulo `p`. For
/// `m > 1` elements are polynomials of degree `< m` with coefficients in
/// GF(p), multiplied modulo the irreducible polynomial.
///
/// Descriptors are immutable. Elements hold them through an `Arc`, so one
/// descriptor can be shared by any number of elements across threads.
///
/// # Example
///
/// ```
/// use galois_field::{FieldOps, GaloisField, Polynomial};
/// use std::sync::Arc;
///
/// // GF(2^3) defined by x^3 + x + 1
/// let irr = Polynomial::new([(0, 1), (1, 1), (3, 1)]);
/// let field = Arc::new(GaloisField::new(2, 3, Some(irr)).unwrap());
///
/// let e1 = field.element(Polynomial::new([(0, 1), (1, 1)])).unwrap();
/// let e2 = e1.clone();
/// let product = e1.try_mul(&e2).unwrap();
/// assert_eq!(product.try_div(&e1).unwrap(), e2);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GaloisField {
    p: u64,
    m: usize,
    irreducible: Option<Polynomial>,
}

impl GaloisField {
    /// Create a field descriptor, validating its shape only.
    ///
    /// The irreducible polynomial's coefficients are reduced modulo `p`
    /// before its degree is checked. For prime fields (`m == 1`) any
    /// supplied polynomial is ignored.
    ///
    /// `p` is assumed prime and `irreducible` irreducible over GF(p);
    /// neither is verified. Use [`GaloisField::new_checked`] to verify them.
    ///
    /// # Errors
    ///
    /// - `FieldError::InvalidModulus` if `p < 2` or `p` does not fit an `i64`.
    /// - `FieldError::InvalidExtensionDegree` if `m == 0`.
    /// - `FieldError::MissingIrreducible` if `m > 1` and no polynomial is given.
    /// - `FieldError::IrreducibleDegree` if the polynomial's degree is not `m`.
    pub fn new(p: u64, m: usize, irreducible: Option<Polynomial>) -> Result<Self> {
        if p < 2 || p > i64::MAX as u64 {
            return Err(FieldError::InvalidModulus { p });
        }
        if m == 0 {
            return Err(FieldError::InvalidExtensionDegree);
        }

        let irreducible = if m == 1 {
            if let Some(poly) = irreducible {
                warn!(p, %poly, "ignoring irreducible polynomial for prime field");
            }
            None
        } else {
            let poly = irreducible
                .ok_or(FieldError::MissingIrreducible { m })?
                .reduce_coefficients(p);
            if poly.degree() != Some(m) {
                return Err(FieldError::IrreducibleDegree {
                    expected: m,
                    got: poly.degree(),
                });
            }
            Some(poly)
        };

        debug!(p, m, "constructed field");
        Ok(Self { p, m, irreducible })
    }

    /// Create a field descriptor, also verifying that `p` is prime and
    /// that the modulus polynomial is irreducible over GF(p).
    ///
    /// # Errors
    ///
    /// Everything [`GaloisField::new`] reports, plus
    /// `FieldError::NotPrime` and `FieldError::Reducible`.
    pub fn new_checked(p: u64, m: usize, irreducible: Option<Polynomial>) -> Result<Self> {
        let field = Self::new(p, m, irreducible)?;

        if !is_prime(p) {
            return Err(FieldError::NotPrime { p });
        }
        if let Some(poly) = &field.irreducible {
            if !poly.is_irreducible(p) {
                return Err(FieldError::Reducible);
            }
        }

        debug!(p, m, "verified field parameters");
        Ok(field)
    }

    /// The prime field GF(p).
    pub fn prime(p: u64) -> Result<Self> {
        Self::new(p, 1, None)
    }

    /// The extension field GF(p^m) defined by `irreducible`.
    pub fn extension(p: u64, m: usize, irreducible: Polynomial) -> Result<Self> {
        Self::new(p, m, Some(irreducible))
    }

    /// The characteristic `p`.
    pub fn p(&self) -> u64 {
        self.p
    }

    /// The extension degree `m`.
    pub fn m(&self) -> usize {
        self.m
    }

    /// The modulus polynomial, `None` for prime fields.
    pub fn irreducible(&self) -> Option<&Polynomial> {
        self.irreducible.as_ref()
    }

    /// Check if this is a prime field (`m == 1`).
    pub fn is_prime_field(&self) -> bool {
        self.m == 1
    }

    /// Number of elements `p^m`, or `None` if it overflows a `u64`.
    pub fn order(&self) -> Option<u64> {
        self.p.checked_pow(u32::try_from(self.m).ok()?)
    }

    /// Map a polynomial onto its canonical representative in this field.
    ///
    /// Coefficients are reduced modulo `p`; for extension fields the result
    /// is then the remainder modulo the irreducible polynomial.
    ///
    /// # Errors
    ///
    /// - `FieldError::PrimeFieldNoFit` if this is a prime field and the
    ///   polynomial still has positive degree after coefficient reduction.
    /// - `FieldError::DivisionUndefined` if the modulus polynomial's leading
    ///   coefficient is not invertible (only possible for composite `p`).
    pub fn reduce(&self, poly: &Polynomial) -> Result<Polynomial> {
        let reduced = poly.reduce_coefficients(self.p);
        match &self.irreducible {
            Some(irreducible) => reduced.rem(irreducible, self.p),
            None => match reduced.degree() {
                Some(degree) if degree > 0 => Err(FieldError::PrimeFieldNoFit { degree }),
                _ => Ok(reduced),
            },
        }
    }

    /// Create an element of this field from a raw polynomial.
    pub fn element(self: &Arc<Self>, value: Polynomial) -> Result<FieldElement> {
        FieldElement::new(Arc::clone(self), value)
    }

    /// The additive identity.
    pub fn zero(self: &Arc<Self>) -> FieldElement {
        FieldElement::from_canonical(Arc::clone(self), Polynomial::zero())
    }

    /// The multiplicative identity.
    pub fn one(self: &Arc<Self>) -> FieldElement {
        self.from_int(1)
    }

    /// The image of the integer `n` in this field.
    pub fn from_int(self: &Arc<Self>, n: i64) -> FieldElement {
        let value = Polynomial::constant(residue(n as i128, self.p));
        FieldElement::from_canonical(Arc::clone(self), value)
    }
}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GaloisField({self})")
    }
}

impl fmt::Display for GaloisField {
    /// `GF(p)` for prime fields, `GF(p^m)[X] / f(x)` for extensions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.irreducible {
            Some(irreducible) => write!(f, "GF({}^{})[X] / {}", self.p, self.m, irreducible),
            None => write!(f, "GF({})", self.p),
        }
    }
}

/// Returns an irreducible polynomial of the given degree over GF(p).
///
/// Sparse candidates are tried first: `x^d - a`, then trinomials
/// `x^d + x^k + a`. If none is irreducible and the search space is small,
/// every monic polynomial of degree `d` is tried in turn.
///
/// Returns `None` for `degree == 0`, for a composite `p`, or when the
/// search gives up.
///
/// # Example
///
/// ```
/// use galois_field::gf::find_irreducible;
///
/// let poly = find_irreducible(5, 4).unwrap();
/// assert!(poly.is_irreducible(5));
/// assert_eq!(poly.degree(), Some(4));
/// ```
pub fn find_irreducible(p: u64, degree: usize) -> Option<Polynomial> {
    if degree == 0 || !is_prime(p) || p > i64::MAX as u64 {
        return None;
    }
    if degree == 1 {
        return Some(Polynomial::x());
    }

    let bound = p.min(256) as i64;

    // x^d - a
    for a in 1..bound {
        let poly = Polynomial::new([(0, -a), (degree, 1)]);
        if poly.is_irreducible(p) {
            return Some(poly.reduce_coefficients(p));
        }
    }

    // x^d + x^k + a
    for k in 1..degree {
        for a in 1..bound {
            let poly = Polynomial::new([(0, a), (k, 1), (degree, 1)]);
            if poly.is_irreducible(p) {
                return Some(poly);
            }
        }
    }

    // Exhaustive search over the p^d monic candidates of degree d.
    let count = p.checked_pow(u32::try_from(degree).ok()?)?;
    if count > 1 << 16 {
        return None;
    }
    (0..count).find_map(|mut index| {
        let mut terms = vec![(degree, 1)];
        for e in 0..degree {
            terms.push((e, (index % p) as i64));
            index /= p;
        }
        let poly = Polynomial::new(terms);
        poly.is_irreducible(p).then_some(poly)
    })
}
