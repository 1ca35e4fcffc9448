//! Reviewer assignment engine.
//!
//! Decides who reviews a pull request when it is opened, who replaces a
//! reviewer on request, and which lifecycle states allow either. Storage is
//! reached only through [`ReviewStore`]; randomness only through
//! [`RandomSource`].

pub mod eligibility;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod sampler;
pub mod service;
pub mod store;

pub use error::{EngineError, EngineResult, Missing};
pub use memory::InMemoryStore;
pub use sampler::{RandomSource, SeededRandom};
pub use service::{REVIEWERS_PER_PR, ReviewService};
pub use store::{NewUser, Replacement, ReviewStore};
