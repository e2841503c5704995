pub mod auth;
pub mod dictionary;
pub mod study;
pub mod user;
