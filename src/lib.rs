// ============================================================================
// dec96 Library
// 96-bit fixed-point decimal arithmetic with exact scaling and banker's
// rounding
// ============================================================================

//! # dec96
//!
//! A 96-bit-mantissa, scaled, signed decimal numeric type with exact
//! add/subtract/multiply/divide/compare/round/convert operations.
//!
//! ## Features
//!
//! - **96-bit mantissa, scale 0-28** in a 16-byte `Copy` value with the
//!   classic flags/hi/lo/mid wire layout
//! - **Exact arithmetic** over 128- and 192-bit intermediates; results are
//!   rounded half-to-even only at the final scale reduction
//! - **Fallible `checked_*` operations** returning explicit error codes
//!   (overflow, invalid character, divide by zero) instead of panicking
//! - **Stateless conversions** to and from strings, `f64`/`f32`, and 64-bit
//!   integers
//!
//! ## Example
//!
//! ```rust
//! use dec96::prelude::*;
//!
//! let price: Decimal = "1.50".parse()?;
//! let total = price.checked_mul(Decimal::from(2))?;
//! assert_eq!(total.to_string(), "3.00");
//!
//! // Banker's rounding: ties go to the even digit.
//! assert_eq!("2.5".parse::<Decimal>()?.round_dp(0), Decimal::from(2));
//! assert_eq!("3.5".parse::<Decimal>()?.round_dp(0), Decimal::from(4));
//!
//! // Division fills the scale and reports its own failure mode.
//! let third = Decimal::ONE.checked_div(Decimal::from(3))?;
//! assert_eq!(third.to_string(), "0.3333333333333333333333333333");
//! assert_eq!(
//!     Decimal::ONE.checked_div(Decimal::ZERO),
//!     Err(DecimalError::DivideByZero)
//! );
//! # Ok::<(), dec96::DecimalError>(())
//! ```

mod convert;
mod decimal;
mod error;
mod ops;
mod scale;
mod wide;

pub use decimal::Decimal;
pub use error::{DecimalError, DecimalResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::{Decimal, DecimalError, DecimalResult};
}
