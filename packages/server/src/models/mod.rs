pub mod account;
pub mod form;
pub mod recipe;
