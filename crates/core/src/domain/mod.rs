pub mod candidate;
pub mod chapter;
pub mod product;
pub mod rule;
