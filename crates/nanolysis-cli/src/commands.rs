pub mod bounds;
pub mod reduce;
