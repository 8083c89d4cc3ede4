pub mod a1_notation;
pub mod column;
pub mod locator;
pub mod row;
