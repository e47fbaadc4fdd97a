//! Backend module — service abstraction + HTTP implementation

mod auth;
mod backend;
mod error;
mod http;
mod query;
mod schema;

pub use auth::*;
pub use backend::*;
pub use error::*;
pub use http::*;
pub use query::*;
pub use schema::*;
