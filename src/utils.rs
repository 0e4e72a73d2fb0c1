/// Check if `n` is a prime number.
///
/// Uses trial division up to sqrt(n). Suitable for validating
/// moduli at construction, not for high-performance primality testing.
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // Remaining candidates are of the form 6k ± 1.
    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Returns `(g, x, y)` such that `g = gcd(a, b)` and `a*x + b*y = g`.
pub fn egcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (1i128, 0i128);
    let (mut old_y, mut y) = (0i128, 1i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_x, x) = (x, old_x - q * x);
        (old_y, y) = (y, old_y - q * y);
    }

    (old_r, old_x, old_y)
}

/// Canonical residue of `c` modulo `p`, in `[0, p-1]`.
///
/// `p` must fit in an `i64`; field construction guarantees this.
#[inline]
pub fn residue(c: i128, p: u64) -> i64 {
    c.rem_euclid(p as i128) as i64
}

/// `(a * b) mod p` without overflow.
#[inline]
pub fn mul_mod(a: i64, b: i64, p: u64) -> i64 {
    residue(a as i128 * b as i128, p)
}

/// Multiplicative inverse of `a` modulo `p`.
///
/// Returns `None` when `a ≡ 0 (mod p)` or, for composite `p`, when
/// `gcd(a, p) != 1`.
pub fn mod_inverse(a: i64, p: u64) -> Option<i64> {
    let a = residue(a as i128, p);
    if a == 0 {
        return None;
    }

    let (g, x, _) = egcd(a as i128, p as i128);
    if g != 1 {
        return None;
    }
    Some(residue(x, p))
}

/// `base^exp mod p` by square-and-multiply.
pub fn pow_mod(base: i64, exp: u64, p: u64) -> i64 {
    let mut base = residue(base as i128, p);
    let mut result = residue(1, p);
    let mut e = exp;

    while e > 0 {
        if e & 1 == 1 {
            result = mul_mod(result, base, p);
        }
        base = mul_mod(base, base, p);
        e >>= 1;
    }
    result
}
