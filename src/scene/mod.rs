pub mod base;
pub mod line;
pub mod model;
