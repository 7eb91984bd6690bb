//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that infrastructure adapters implement:
//! - CiDataSource: CI provider reads and workflow triggers
//! - TestMethodSource: test methods of an instrumented test artifact

pub mod ci_data_source;
pub mod test_method_source;

pub use ci_data_source::CiDataSource;
pub use test_method_source::TestMethodSource;
