//! Sea-ORM entities for the catalog tables.

pub mod brands;
pub mod categories;
pub mod products;
