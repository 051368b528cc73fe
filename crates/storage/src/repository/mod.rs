pub mod admin;
pub mod department;
pub mod event_result;
pub mod media;
pub mod session;
