pub mod demo;
pub mod department;
pub mod table;
