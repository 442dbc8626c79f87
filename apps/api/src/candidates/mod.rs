pub mod handlers;
pub mod phone;
pub mod resume;
