//! Session state: concurrent store and inactivity sweeper

pub mod store;
pub mod sweeper;

pub use store::SessionStore;
pub use sweeper::spawn_sweeper;
