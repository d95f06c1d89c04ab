pub mod business;
pub mod product;
pub mod user;

pub use business::PostgresBusinessRepository;
pub use product::PostgresProductRepository;
pub use user::PostgresUserRepository;
