pub mod table;
pub mod tracker;
