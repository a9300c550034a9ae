//! Save persistence for the Waypoint simulation.
//!
//! A save is a single JSON document. Writing goes through a two-phase
//! codec that reduces task instances to catalog ids; loading resolves
//! those ids back through the catalog so the restored state shares
//! definitions with the running catalog.
//!
//! # Modules
//!
//! - [`codec`] -- [`SaveData`] and the projection to and from `Gamestate`
//! - [`error`] -- Save read, write and validation errors
//! - [`gateway`] -- [`SaveGateway`], the session's save sink
//! - [`store`] -- File and in-memory document stores

pub mod codec;
pub mod error;
pub mod gateway;
pub mod store;

pub use codec::{SAVE_VERSION, SaveData, TaskStateData};
pub use error::SaveError;
pub use gateway::SaveGateway;
pub use store::{FileStore, MemoryStore, SAVE_LOCATION, SaveStore};
