//! ptcg-sets library interface
//!
//! Builds the set → creature dataset from either the local catalog mirror
//! ([`workflow::local`]) or the remote catalog API ([`workflow::remote`]).
//! Both front ends share the aggregation core in [`services`].

pub mod error;
pub mod services;
pub mod workflow;

pub use crate::error::{SetsError, SetsResult};
pub use crate::workflow::{BuildOutcome, Problem, ProblemSet};
