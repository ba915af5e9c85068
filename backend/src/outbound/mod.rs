//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and infrastructure
//! concerns; they contain no business logic:
//!
//! - **persistence**: the transactional store backend and its unit of work
//! - **directory**: user profile lookups
//! - **notify**: notification sinks

pub mod directory;
pub mod notify;
pub mod persistence;
