pub mod form;
pub mod page;
pub mod session;
