use std::collections::btree_map::{BTreeMap, Entry};
use std::fmt;

use crate::error::{FieldError, Result};
use crate::utils::{mod_inverse, mul_mod, pow_mod, residue};

/// Sparse polynomial with integer coefficients.
///
/// Terms are stored as an exponent → coefficient map ordered by exponent.
/// Zero coefficients are never stored: the zero polynomial is the empty
/// map, and two polynomials are equal exactly when their maps are.
///
/// Operations taking a modulus `p` reduce every coefficient of their
/// result into `[0, p-1]`. Inputs may carry arbitrary (even negative)
/// coefficients.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    terms: BTreeMap<usize, i64>,
}

impl Polynomial {
    /// Create a polynomial from `(exponent, coefficient)` pairs.
    ///
    /// Zero coefficients are dropped. If an exponent appears more than
    /// once, the last coefficient given for it wins.
    ///
    /// # Example
    ///
    /// ```
    /// use galois_field::Polynomial;
    ///
    /// // x^3 + x + 1
    /// let p = Polynomial::new([(0, 1), (1, 1), (3, 1)]);
    /// assert_eq!(p.degree(), Some(3));
    /// assert_eq!(p.to_string(), "x^3 + x + 1");
    /// ```
    pub fn new<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (usize, i64)>,
    {
        terms.into_iter().collect()
    }

    /// Create the zero polynomial.
    pub fn zero() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    /// Create a constant polynomial.
    pub fn constant(c: i64) -> Self {
        Self::monomial(c, 0)
    }

    /// Create the polynomial `x`.
    pub fn x() -> Self {
        Self::monomial(1, 1)
    }

    /// Create a monomial `c * x^n`.
    pub fn monomial(c: i64, n: usize) -> Self {
        let mut terms = BTreeMap::new();
        if c != 0 {
            terms.insert(n, c);
        }
        Self { terms }
    }

    /// Check if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check if this polynomial has degree at most zero.
    pub fn is_constant(&self) -> bool {
        matches!(self.degree(), None | Some(0))
    }

    /// Get the degree of the polynomial.
    ///
    /// Returns `None` for the zero polynomial, `Some(n)` otherwise
    /// where `n` is the highest exponent present.
    pub fn degree(&self) -> Option<usize> {
        self.terms.keys().next_back().copied()
    }

    /// Get the highest-degree term as `(exponent, coefficient)`.
    pub fn leading_term(&self) -> Option<(usize, i64)> {
        self.terms.iter().next_back().map(|(&e, &c)| (e, c))
    }

    /// Get the leading coefficient.
    pub fn leading_coeff(&self) -> Option<i64> {
        self.leading_term().map(|(_, c)| c)
    }

    /// Get the coefficient of `x^i`, zero if absent.
    pub fn coeff(&self, i: usize) -> i64 {
        self.terms.get(&i).copied().unwrap_or(0)
    }

    /// Iterate over the non-zero terms in ascending exponent order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (usize, i64)> + '_ {
        self.terms.iter().map(|(&e, &c)| (e, c))
    }

    /// Number of non-zero terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Map every coefficient to its residue in `[0, p-1]`, dropping the
    /// terms that vanish.
    pub fn reduce_coefficients(&self, p: u64) -> Self {
        self.terms()
            .map(|(e, c)| (e, residue(c as i128, p)))
            .collect()
    }

    /// Evaluate the polynomial at `x` modulo `p`.
    ///
    /// Horner's method, skipping the gaps between sparse exponents with
    /// a modular power.
    pub fn eval(&self, x: i64, p: u64) -> i64 {
        let Some(mut prev) = self.degree() else {
            return 0;
        };

        let mut acc = 0i64;
        for (e, c) in self.terms().rev() {
            acc = mul_mod(acc, pow_mod(x, (prev - e) as u64, p), p);
            acc = residue(acc as i128 + c as i128, p);
            prev = e;
        }
        mul_mod(acc, pow_mod(x, prev as u64, p), p)
    }

    /// `self + other` with coefficients reduced modulo `p`.
    pub fn add(&self, other: &Self, p: u64) -> Self {
        let mut terms = self.reduce_coefficients(p).terms;
        for (e, c) in other.terms() {
            accumulate(&mut terms, e, c as i128, p);
        }
        Self { terms }
    }

    /// `self - other` with coefficients reduced modulo `p`.
    pub fn sub(&self, other: &Self, p: u64) -> Self {
        let mut terms = self.reduce_coefficients(p).terms;
        for (e, c) in other.terms() {
            accumulate(&mut terms, e, -(c as i128), p);
        }
        Self { terms }
    }

    /// `-self` with coefficients reduced modulo `p`.
    pub fn neg(&self, p: u64) -> Self {
        self.terms()
            .map(|(e, c)| (e, residue(-(c as i128), p)))
            .collect()
    }

    /// `self * other` modulo `p`.
    ///
    /// Sparse convolution: the cost is the product of the term counts,
    /// independent of the degrees.
    pub fn mul(&self, other: &Self, p: u64) -> Self {
        let mut terms = BTreeMap::new();
        for (i, a) in self.terms() {
            for (j, b) in other.terms() {
                accumulate(&mut terms, i + j, a as i128 * b as i128, p);
            }
        }
        Self { terms }
    }

    /// Multiply every coefficient by the scalar `c` modulo `p`.
    pub fn scale(&self, c: i64, p: u64) -> Self {
        self.terms().map(|(e, a)| (e, mul_mod(a, c, p))).collect()
    }

    /// Scale so that the leading coefficient is 1 modulo `p`.
    ///
    /// Returns `None` for the zero polynomial, or when the leading
    /// coefficient has no inverse modulo `p`.
    pub fn monic(&self, p: u64) -> Option<Self> {
        let inv = mod_inverse(self.leading_coeff()?, p)?;
        Some(self.scale(inv, p))
    }

    /// Polynomial long division modulo `p`.
    ///
    /// Returns `(q, r)` such that `self ≡ q * divisor + r` and
    /// `deg(r) < deg(divisor)`.
    ///
    /// # Errors
    ///
    /// `FieldError::DivisionUndefined` if the divisor is zero modulo `p`,
    /// or its leading coefficient is not invertible modulo `p`.
    ///
    /// # Example
    ///
    /// ```
    /// use galois_field::Polynomial;
    ///
    /// // (x^2 + 2x + 1) / (x + 1) = x + 1 over GF(17)
    /// let dividend = Polynomial::new([(0, 1), (1, 2), (2, 1)]);
    /// let divisor = Polynomial::new([(0, 1), (1, 1)]);
    /// let (q, r) = dividend.div_rem(&divisor, 17).unwrap();
    ///
    /// assert_eq!(q, divisor);
    /// assert!(r.is_zero());
    /// ```
    pub fn div_rem(&self, divisor: &Self, p: u64) -> Result<(Self, Self)> {
        let divisor = divisor.reduce_coefficients(p);
        let (divisor_deg, divisor_lc) = divisor
            .leading_term()
            .ok_or(FieldError::DivisionUndefined)?;
        let lc_inv = mod_inverse(divisor_lc, p).ok_or(FieldError::DivisionUndefined)?;

        let mut remainder = self.reduce_coefficients(p).terms;
        let mut quotient = BTreeMap::new();

        while let Some((rem_deg, rem_lc)) = remainder.last_key_value().map(|(&e, &c)| (e, c)) {
            if rem_deg < divisor_deg {
                break;
            }

            let factor = mul_mod(rem_lc, lc_inv, p);
            let shift = rem_deg - divisor_deg;
            quotient.insert(shift, factor);

            // remainder -= factor * x^shift * divisor; cancels the leading term
            for (e, c) in divisor.terms() {
                accumulate(&mut remainder, e + shift, -(factor as i128 * c as i128), p);
            }
        }

        Ok((Self { terms: quotient }, Self { terms: remainder }))
    }

    /// Remainder of division by `divisor` modulo `p`.
    pub fn rem(&self, divisor: &Self, p: u64) -> Result<Self> {
        self.div_rem(divisor, p).map(|(_, r)| r)
    }

    /// Monic greatest common divisor modulo `p`.
    ///
    /// The gcd of two zero polynomials is zero.
    pub fn gcd(a: &Self, b: &Self, p: u64) -> Result<Self> {
        let mut a = a.reduce_coefficients(p);
        let mut b = b.reduce_coefficients(p);

        while !b.is_zero() {
            let r = a.rem(&b, p)?;
            a = std::mem::replace(&mut b, r);
        }

        if a.is_zero() {
            return Ok(a);
        }
        a.monic(p).ok_or(FieldError::DivisionUndefined)
    }

    /// Extended Euclidean algorithm modulo `p`.
    ///
    /// Returns `(g, s, t)` such that `g = gcd(a, b) ≡ s*a + t*b`, with `g`
    /// monic unless both inputs are zero.
    ///
    /// # Example
    ///
    /// ```
    /// use galois_field::Polynomial;
    ///
    /// let a = Polynomial::new([(0, 2), (1, 1)]); // x + 2
    /// let b = Polynomial::new([(0, 1), (2, 1)]); // x^2 + 1
    /// let (g, s, t) = Polynomial::extended_gcd(&a, &b, 17).unwrap();
    ///
    /// assert_eq!(g, Polynomial::constant(1));
    /// assert_eq!(s.mul(&a, 17).add(&t.mul(&b, 17), 17), g);
    /// ```
    pub fn extended_gcd(a: &Self, b: &Self, p: u64) -> Result<(Self, Self, Self)> {
        let (mut old_r, mut r) = (a.reduce_coefficients(p), b.reduce_coefficients(p));
        let (mut old_s, mut s) = (Self::constant(1), Self::zero());
        let (mut old_t, mut t) = (Self::zero(), Self::constant(1));

        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r, p)?;
            let next_s = old_s.sub(&q.mul(&s, p), p);
            let next_t = old_t.sub(&q.mul(&t, p), p);

            old_r = std::mem::replace(&mut r, rem);
            old_s = std::mem::replace(&mut s, next_s);
            old_t = std::mem::replace(&mut t, next_t);
        }

        let Some(lc) = old_r.leading_coeff() else {
            return Ok((Self::zero(), Self::zero(), Self::zero()));
        };
        let inv = mod_inverse(lc, p).ok_or(FieldError::DivisionUndefined)?;

        Ok((
            old_r.scale(inv, p),
            old_s.scale(inv, p),
            old_t.scale(inv, p),
        ))
    }

    /// Compute `self^exp mod modulus` with coefficients modulo `p`.
    pub fn pow_mod(&self, exp: u64, modulus: &Self, p: u64) -> Result<Self> {
        let mut base = self.rem(modulus, p)?;
        let mut result = Self::constant(1).rem(modulus, p)?;
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base, p).rem(modulus, p)?;
            }
            base = base.mul(&base, p).rem(modulus, p)?;
            e >>= 1;
        }

        Ok(result)
    }

    /// Test if this polynomial is irreducible over GF(p) using Rabin's algorithm.
    ///
    /// A polynomial f(x) of degree n is irreducible if and only if:
    /// 1. `x^{p^n} ≡ x (mod f(x))`
    /// 2. `gcd(x^{p^{n/q}} - x, f(x)) = 1` for each prime divisor q of n
    ///
    /// `p` must be prime for the answer to be meaningful. Returns `false`
    /// for constant or zero polynomials.
    ///
    /// # Example
    ///
    /// ```
    /// use galois_field::Polynomial;
    ///
    /// // x^3 + x + 1 is irreducible over GF(2)
    /// assert!(Polynomial::new([(0, 1), (1, 1), (3, 1)]).is_irreducible(2));
    ///
    /// // x^2 + 1 = (x + 1)^2 over GF(2)
    /// assert!(!Polynomial::new([(0, 1), (2, 1)]).is_irreducible(2));
    /// ```
    pub fn is_irreducible(&self, p: u64) -> bool {
        let f = self.reduce_coefficients(p);
        let n = match f.degree() {
            None | Some(0) => return false,
            Some(1) => return true,
            Some(d) => d,
        };
        let Some(f) = f.monic(p) else {
            return false;
        };

        let x = Self::x();
        let prime_divisors = prime_divisors(n);

        // h = x^{p^i} mod f
        let mut h = x.clone();
        for i in 1..=n {
            h = match h.pow_mod(p, &f, p) {
                Ok(h) => h,
                Err(_) => return false,
            };

            for &q in &prime_divisors {
                if n == i * q {
                    match Self::gcd(&h.sub(&x, p), &f, p) {
                        Ok(g) if g.degree() == Some(0) => {}
                        _ => return false,
                    }
                }
            }
        }

        h.sub(&x, p).is_zero()
    }
}

/// Add `c` to the coefficient of `x^e` modulo `p`, removing the term if it
/// cancels.
fn accumulate(terms: &mut BTreeMap<usize, i64>, e: usize, c: i128, p: u64) {
    match terms.entry(e) {
        Entry::Vacant(slot) => {
            let c = residue(c, p);
            if c != 0 {
                slot.insert(c);
            }
        }
        Entry::Occupied(mut slot) => {
            let c = residue(*slot.get() as i128 + c, p);
            if c == 0 {
                slot.remove();
            } else {
                *slot.get_mut() = c;
            }
        }
    }
}

/// Find all prime divisors of n.
fn prime_divisors(mut n: usize) -> Vec<usize> {
    let mut primes = Vec::new();
    let mut d = 2;

    while d <= n / d {
        if n % d == 0 {
            primes.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }

    if n > 1 {
        primes.push(n);
    }

    primes
}

impl FromIterator<(usize, i64)> for Polynomial {
    fn from_iter<I: IntoIterator<Item = (usize, i64)>>(iter: I) -> Self {
        let mut terms: BTreeMap<usize, i64> = iter.into_iter().collect();
        terms.retain(|_, c| *c != 0);
        Self { terms }
    }
}

impl From<BTreeMap<usize, i64>> for Polynomial {
    fn from(mut terms: BTreeMap<usize, i64>) -> Self {
        terms.retain(|_, c| *c != 0);
        Self { terms }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (e, c) in self.terms().rev() {
            match (first, c < 0) {
                (true, true) => write!(f, "-")?,
                (true, false) => {}
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            first = false;

            let abs = c.unsigned_abs();
            if e == 0 || abs != 1 {
                write!(f, "{abs}")?;
            }
            match e {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{e}")?,
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial({self})")
    }
}
