/// Arithmetic capability of a field element whose field is only known at
/// runtime.
///
/// Binary operations are fallible: the operands may belong to different
/// fields, and division may hit zero.
///
/// Laws (tested for concrete types):
/// - `(F, +)` is an abelian group with identity `zero_like`
/// - `(F \ {0}, ·)` is an abelian group with identity `one_like`
/// - multiplication distributes over addition
pub trait FieldOps: Sized + Clone + PartialEq {
    /// Error returned by fallible operations.
    type Error;

    /// The additive identity of `self`'s field.
    fn zero_like(&self) -> Self;

    /// The multiplicative identity of `self`'s field.
    fn one_like(&self) -> Self;

    #[inline]
    fn is_zero(&self) -> bool {
        *self == self.zero_like()
    }

    /// `self + rhs`.
    fn try_add(&self, rhs: &Self) -> Result<Self, Self::Error>;

    /// `self - rhs`.
    fn try_sub(&self, rhs: &Self) -> Result<Self, Self::Error>;

    /// `self · rhs`.
    fn try_mul(&self, rhs: &Self) -> Result<Self, Self::Error>;

    /// Multiplicative inverse `a⁻¹`; fails for zero.
    fn inverse(&self) -> Result<Self, Self::Error>;

    /// `self / rhs`, i.e. `self · rhs⁻¹`.
    #[inline]
    fn try_div(&self, rhs: &Self) -> Result<Self, Self::Error> {
        self.try_mul(&rhs.inverse()?)
    }

    /// Exponentiation by a non-negative integer using square-and-multiply.
    fn pow(&self, exp: u64) -> Result<Self, Self::Error> {
        let mut base = self.clone();
        let mut result = self.one_like();

        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result.try_mul(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.try_mul(&base)?;
            }
        }
        Ok(result)
    }
}
