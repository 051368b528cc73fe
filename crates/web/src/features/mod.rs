pub mod auth;
pub mod departments;
pub mod media;
pub mod results;
