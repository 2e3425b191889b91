pub mod fields;
pub mod render;
pub mod select;
