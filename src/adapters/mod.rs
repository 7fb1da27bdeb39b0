pub mod database;
pub mod demo;
pub mod email;
