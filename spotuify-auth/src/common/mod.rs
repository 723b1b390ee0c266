mod models;

pub use models::{AuthorizationResult, TokenRecord};
