pub mod catalog;
pub mod user;
