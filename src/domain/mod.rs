pub mod aggregates;
pub mod entities;
pub mod value_objects;
