// Core modules implementing shapes, primitive boxing, and error modeling.
pub mod error;
pub mod shape;
pub mod value_box;
