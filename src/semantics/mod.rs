pub mod lower;
pub mod scope;
pub mod symbol_table;
pub mod types;
