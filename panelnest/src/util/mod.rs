/// Set of functions used throughout to assure the correctness of produced layouts.
pub mod assertions;

mod fpa;

#[doc(inline)]
pub use fpa::FPA;
