// ============================================================================
// Conversion Layer
// Decimal <-> string, double, and integer conversions
// ============================================================================

mod float;
mod int;
mod string;
