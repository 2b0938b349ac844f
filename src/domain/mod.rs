pub mod collections;
pub mod declaration;
pub mod entities;
pub mod value_objects;
