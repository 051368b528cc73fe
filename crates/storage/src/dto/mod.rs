pub mod auth;
pub mod common;
pub mod department;
pub mod media;
pub mod result;
