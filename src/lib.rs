//! Exact arithmetic over finite fields.
//!
//! Prime fields GF(p) and extension fields GF(p^m) are described at
//! runtime by a [`GaloisField`]. Values are [`FieldElement`]s holding a
//! shared handle to their field and a canonical sparse [`Polynomial`].
//! Every operation reduces its result back into the field, so elements are
//! always canonical.
//!
//! ```
//! use galois_field::{FieldOps, GaloisField, Polynomial};
//! use std::sync::Arc;
//!
//! let irr = Polynomial::new([(0, 1), (1, 1), (3, 1)]);
//! let field = Arc::new(GaloisField::extension(2, 3, irr).unwrap());
//!
//! let e1 = field.element(Polynomial::new([(0, 1), (1, 1)])).unwrap();
//! let e2 = e1.clone();
//! let e_res = (&e1 * &e2).unwrap();
//! assert_eq!((&e_res / &e1).unwrap(), e2);
//! ```

pub mod algebra;
pub mod error;
pub mod structures;
pub mod utils;

pub use algebra::field::FieldOps;
pub use error::{FieldError, Result};

pub use structures::element::FieldElement;
pub use structures::gf;
pub use structures::gf::GaloisField;
pub use structures::poly::Polynomial;
pub use utils::{is_prime, mod_inverse};
