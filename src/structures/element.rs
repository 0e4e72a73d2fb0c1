//! Elements of a runtime-defined finite field.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use tracing::trace;

use crate::algebra::field::FieldOps;
use crate::error::{FieldError, Result};
use crate::structures::gf::GaloisField;
use crate::structures::poly::Polynomial;
use crate::utils::mod_inverse;

/// An element of GF(p^m) bundled with its field descriptor.
///
/// The value is always the canonical representative: coefficients in
/// `[0, p-1]` and, for extension fields, degree `< m`. The descriptor is
/// shared via `Arc` so that elements can be cloned cheaply and sent across
/// threads while referring to the same field.
///
/// Binary operators return `Result`, since mixing fields or dividing by
/// zero is reported rather than panicking.
///
/// # Example
///
/// ```
/// use galois_field::{FieldElement, GaloisField, Polynomial};
/// use std::sync::Arc;
///
/// let field = Arc::new(GaloisField::prime(5).unwrap());
/// let a = FieldElement::new(Arc::clone(&field), Polynomial::constant(3)).unwrap();
/// let b = FieldElement::new(Arc::clone(&field), Polynomial::constant(4)).unwrap();
///
/// // 3 + 4 = 7 ≡ 2 (mod 5)
/// let c = (&a + &b).unwrap();
/// assert_eq!(c, field.from_int(2));
/// ```
#[derive(Clone)]
pub struct FieldElement {
    field: Arc<GaloisField>,
    value: Polynomial,
}

impl FieldElement {
    /// Create an element from a raw polynomial, reducing it into `field`.
    ///
    /// # Errors
    ///
    /// Whatever [`GaloisField::reduce`] reports, e.g.
    /// `FieldError::PrimeFieldNoFit` for a non-constant polynomial in a
    /// prime field.
    pub fn new(field: Arc<GaloisField>, value: Polynomial) -> Result<Self> {
        let value = field.reduce(&value)?;
        Ok(Self { field, value })
    }

    /// Wrap a value the caller knows to be canonical.
    pub(crate) fn from_canonical(field: Arc<GaloisField>, value: Polynomial) -> Self {
        debug_assert!(field.reduce(&value).as_ref() == Ok(&value));
        Self { field, value }
    }

    /// Sample a uniformly random element.
    #[cfg(feature = "rand")]
    pub fn random<R: rand::Rng + ?Sized>(field: Arc<GaloisField>, rng: &mut R) -> Self {
        let p = field.p() as i64;
        let value = (0..field.m()).map(|i| (i, rng.gen_range(0..p))).collect();
        Self::from_canonical(field, value)
    }

    /// The field this element belongs to.
    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    /// The shared field handle.
    pub fn field_arc(&self) -> Arc<GaloisField> {
        Arc::clone(&self.field)
    }

    /// The canonical polynomial value.
    pub fn value(&self) -> &Polynomial {
        &self.value
    }

    /// Check if this is the one element.
    pub fn is_one(&self) -> bool {
        self.value.degree() == Some(0) && self.value.coeff(0) == 1
    }

    fn same_field(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.field, &other.field) || *self.field == *other.field
    }

    fn check_same_field(&self, other: &Self) -> Result<()> {
        if self.same_field(other) {
            Ok(())
        } else {
            Err(FieldError::FieldMismatch)
        }
    }

    /// Reduce `value` into this element's field.
    fn with_value(&self, value: Polynomial) -> Result<Self> {
        let value = self.field.reduce(&value)?;
        Ok(Self {
            field: Arc::clone(&self.field),
            value,
        })
    }
}

impl FieldOps for FieldElement {
    type Error = FieldError;

    fn zero_like(&self) -> Self {
        self.field.zero()
    }

    fn one_like(&self) -> Self {
        self.field.one()
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.check_same_field(rhs)?;
        self.with_value(self.value.add(&rhs.value, self.field.p()))
    }

    fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.check_same_field(rhs)?;
        self.with_value(self.value.sub(&rhs.value, self.field.p()))
    }

    fn try_mul(&self, rhs: &Self) -> Result<Self> {
        self.check_same_field(rhs)?;
        self.with_value(self.value.mul(&rhs.value, self.field.p()))
    }

    /// Multiplicative inverse.
    ///
    /// Prime fields invert the single coefficient with the integer extended
    /// Euclidean algorithm. Extension fields run the polynomial extended
    /// Euclidean algorithm against the irreducible polynomial: the Bézout
    /// coefficient of the value, divided by the constant gcd, is the inverse.
    ///
    /// # Errors
    ///
    /// `FieldError::DivisionUndefined` for zero, and for values sharing a
    /// factor with a (wrongly supplied) reducible modulus.
    fn inverse(&self) -> Result<Self> {
        if self.value.is_zero() {
            return Err(FieldError::DivisionUndefined);
        }

        let p = self.field.p();
        let inverse = match self.field.irreducible() {
            None => {
                let inv = mod_inverse(self.value.coeff(0), p)
                    .ok_or(FieldError::DivisionUndefined)?;
                Polynomial::constant(inv)
            }
            Some(irreducible) => {
                let (g, s, _) = Polynomial::extended_gcd(&self.value, irreducible, p)?;
                let Some((0, unit)) = g.leading_term() else {
                    trace!(%g, "value shares a factor with the modulus");
                    return Err(FieldError::DivisionUndefined);
                };
                let unit_inv = mod_inverse(unit, p).ok_or(FieldError::DivisionUndefined)?;
                s.scale(unit_inv, p)
            }
        };

        self.with_value(inverse)
    }

    fn try_div(&self, rhs: &Self) -> Result<Self> {
        self.check_same_field(rhs)?;
        self.try_mul(&rhs.inverse()?)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:ident) => {
        impl $trait for &FieldElement {
            type Output = Result<FieldElement>;

            fn $method(self, rhs: Self) -> Self::Output {
                self.$op(rhs)
            }
        }

        impl $trait for FieldElement {
            type Output = Result<FieldElement>;

            fn $method(self, rhs: Self) -> Self::Output {
                self.$op(&rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, try_add);
impl_binary_op!(Sub, sub, try_sub);
impl_binary_op!(Mul, mul, try_mul);
impl_binary_op!(Div, div, try_div);

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> Self::Output {
        FieldElement {
            field: Arc::clone(&self.field),
            value: self.value.neg(self.field.p()),
        }
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.same_field(other) && self.value == other.value
    }
}

impl Eq for FieldElement {}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.value)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf5() -> Arc<GaloisField> {
        Arc::new(GaloisField::prime(5).unwrap())
    }

    fn gf8() -> Arc<GaloisField> {
        let irr = Polynomial::new([(0, 1), (1, 1), (3, 1)]);
        Arc::new(GaloisField::extension(2, 3, irr).unwrap())
    }

    fn elem(field: &Arc<GaloisField>, terms: &[(usize, i64)]) -> FieldElement {
        FieldElement::new(Arc::clone(field), Polynomial::new(terms.iter().copied())).unwrap()
    }

    #[test]
    fn new_canonicalizes() {
        let field = gf5();
        assert_eq!(elem(&field, &[(0, 13)]).value(), &Polynomial::constant(3));
        assert_eq!(elem(&field, &[(0, -1)]).value(), &Polynomial::constant(4));
    }

    #[test]
    fn new_rejects_positive_degree_in_prime_field() {
        let result = FieldElement::new(gf5(), Polynomial::x());
        assert!(matches!(
            result,
            Err(FieldError::PrimeFieldNoFit { degree: 1 })
        ));
    }

    #[test]
    fn add_prime_field() {
        let field = gf5();
        let c = elem(&field, &[(0, 3)]).try_add(&elem(&field, &[(0, 4)])).unwrap();
        assert_eq!(c, elem(&field, &[(0, 2)]));
    }

    #[test]
    fn add_extension_field() {
        // (x^2 + x + 1) + (x^2 + 1) = x
        let field = gf8();
        let a = elem(&field, &[(0, 1), (1, 1), (2, 1)]);
        let b = elem(&field, &[(0, 1), (2, 1)]);
        assert_eq!((&a + &b).unwrap(), elem(&field, &[(1, 1)]));
        assert_eq!((&a - &b).unwrap(), elem(&field, &[(1, 1)]));
    }

    #[test]
    fn mul_extension_field() {
        // (x^2 + x + 1) * x = x^3 + x^2 + x ≡ x^2 + 1
        let field = gf8();
        let a = elem(&field, &[(0, 1), (1, 1), (2, 1)]);
        let b = elem(&field, &[(1, 1)]);
        assert_eq!((&a * &b).unwrap(), elem(&field, &[(0, 1), (2, 1)]));
    }

    #[test]
    fn owned_operators() {
        let field = gf5();
        let a = elem(&field, &[(0, 2)]);
        let b = elem(&field, &[(0, 3)]);
        assert_eq!((a.clone() * b.clone()).unwrap(), field.from_int(1));
        assert_eq!((a.clone() / b.clone()).unwrap(), field.from_int(4));
        assert_eq!((a - b).unwrap(), field.from_int(4));
    }

    #[test]
    fn neg_operator() {
        let field = gf5();
        let a = elem(&field, &[(0, 2)]);
        assert_eq!(-&a, field.from_int(3));
        assert!((&a + &(-a.clone())).unwrap().is_zero());
        assert!((-field.zero()).is_zero());
    }

    #[test]
    fn inverse_prime_field() {
        let field = gf5();
        for n in 1..5 {
            let a = field.from_int(n);
            let inv = a.inverse().unwrap();
            assert!((&a * &inv).unwrap().is_one());
        }
    }

    #[test]
    fn inverse_extension_field() {
        let field = gf8();
        let a = elem(&field, &[(0, 1), (1, 1), (2, 1)]);
        let inv = a.inverse().unwrap();
        assert_eq!((&a * &inv).unwrap(), field.one());
    }

    #[test]
    fn inverse_of_one() {
        let field = gf8();
        assert_eq!(field.one().inverse().unwrap(), field.one());
    }

    #[test]
    fn inverse_of_zero_fails() {
        assert_eq!(gf5().zero().inverse(), Err(FieldError::DivisionUndefined));
        assert_eq!(gf8().zero().inverse(), Err(FieldError::DivisionUndefined));
    }

    #[test]
    fn inverse_with_reducible_modulus_fails() {
        // x^2 + 1 = (x + 1)^2 over GF(2), so x + 1 has no inverse
        let field = Arc::new(
            GaloisField::extension(2, 2, Polynomial::new([(0, 1), (2, 1)])).unwrap(),
        );
        let a = elem(&field, &[(0, 1), (1, 1)]);
        assert_eq!(a.inverse(), Err(FieldError::DivisionUndefined));
    }

    #[test]
    fn div_by_zero_fails() {
        let field = gf8();
        let a = elem(&field, &[(1, 1)]);
        assert_eq!(a.try_div(&field.zero()), Err(FieldError::DivisionUndefined));
    }

    #[test]
    fn mismatch_reported_before_zero_division() {
        let a = gf5().from_int(1);
        let zero = Arc::new(GaloisField::prime(7).unwrap()).zero();
        assert_eq!(a.try_div(&zero), Err(FieldError::FieldMismatch));
    }

    #[test]
    fn mismatched_fields() {
        let a = gf5().from_int(1);
        let b = Arc::new(GaloisField::prime(7).unwrap()).from_int(1);
        assert_eq!(a.try_add(&b), Err(FieldError::FieldMismatch));
        assert_eq!(a.try_sub(&b), Err(FieldError::FieldMismatch));
        assert_eq!(a.try_mul(&b), Err(FieldError::FieldMismatch));
        assert_eq!(a.try_div(&b), Err(FieldError::FieldMismatch));
        assert_ne!(a, b);
    }

    #[test]
    fn equal_descriptors_are_the_same_field() {
        // separately constructed but identical descriptors interoperate
        let a = gf8().one();
        let b = gf8().one();
        assert!(!Arc::ptr_eq(&a.field_arc(), &b.field_arc()));
        assert_eq!(a, b);
        assert!((&a + &b).unwrap().is_zero());
    }

    #[test]
    fn pow_matches_repeated_mul() {
        let field = gf8();
        let a = elem(&field, &[(0, 1), (1, 1)]);
        assert!(a.pow(0).unwrap().is_one());
        assert_eq!(a.pow(1).unwrap(), a);
        assert_eq!(a.pow(2).unwrap(), (&a * &a).unwrap());
        // multiplicative group of GF(8) has order 7
        assert!(a.pow(7).unwrap().is_one());
    }

    #[test]
    fn zero_and_one_like() {
        let field = gf8();
        let a = elem(&field, &[(2, 1)]);
        assert!(a.zero_like().is_zero());
        assert!(a.one_like().is_one());
        assert!(!a.is_zero());
        assert!(!a.is_one());
    }

    #[test]
    fn display_and_debug() {
        let field = gf8();
        let a = elem(&field, &[(0, 1), (1, 1)]);
        assert_eq!(a.to_string(), "x + 1");
        assert_eq!(format!("{:?}", a), "GF(2^3)[X] / x^3 + x + 1: x + 1");
        assert_eq!(gf5().zero().to_string(), "0");
    }

    #[test]
    fn elements_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldElement>();
        assert_send_sync::<GaloisField>();
    }

    #[cfg(feature = "rand")]
    #[test]
    fn random_elements_are_canonical() {
        let field = gf8();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let a = FieldElement::random(Arc::clone(&field), &mut rng);
            assert_eq!(field.reduce(a.value()).unwrap(), *a.value());
        }
    }
}
