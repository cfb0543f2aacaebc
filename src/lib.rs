//! # ModelHaus
//!
//! Active-record style models for PostgreSQL: define a table once, get every CRUD verb.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modelhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "modelhaus".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let mut haus = ModelHaus::new(config).await?;
//!
//!     let users = haus.extend(
//!         PartialModel::new()
//!             .table("users")
//!             .field("name", FieldType::Text)
//!             .field("email", FieldType::Text),
//!     )?;
//!
//!     let created = users
//!         .create(Values::new().set("name", json!("John Doe")).set("email", json!("john@example.com")))
//!         .await?;
//!     println!("Created user: {:?}", created.key());
//!
//!     haus.register_model("users".to_string(), users)?;
//!     let users = haus.get_model::<GenericModel>("users")?;
//!     println!("{} users", users.count(Query::new()).await?);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::ModelHaus;
pub use errors::ModelHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export member crates
pub use record_model;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
