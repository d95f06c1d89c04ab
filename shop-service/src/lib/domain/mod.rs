pub mod auth;
pub mod business;
pub mod product;
pub mod user;
pub mod verification;
