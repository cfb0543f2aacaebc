//! Traits for record access
//!
//! [`RecordStore`] is the boundary to the underlying database; [`Model`] is the
//! CRUD capability set every concrete table model gets.

pub mod model;
pub mod record_store;

pub use model::Model;
pub use record_store::RecordStore;
