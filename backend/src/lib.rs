//! Backend library modules.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
