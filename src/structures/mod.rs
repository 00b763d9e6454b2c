pub mod bits;
pub mod exponents;
pub mod field_poly;
pub mod format;
pub mod poly;
