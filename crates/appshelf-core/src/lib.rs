pub mod auth;
pub mod collate;
pub mod config;
pub mod context;
pub mod error;
pub mod form;
pub mod navigation;
pub mod query;
pub mod seed;
pub mod splash;
pub mod store;

pub use auth::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use form::*;
pub use navigation::*;
pub use query::*;
pub use seed::*;
pub use splash::*;
pub use store::*;
