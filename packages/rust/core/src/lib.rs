//! Graph generation pipeline for Galaxy.
//!
//! Ties together corpus loading, reference resolution, graph assembly and
//! artifact writing into the end-to-end [`pipeline::generate`] workflow.

pub mod assembler;
pub mod pipeline;
pub mod resolver;

pub use assembler::{Assembled, GraphAssembler, ResolveStats};
pub use pipeline::{GenerateResult, ProgressReporter, SilentProgress, generate};
pub use resolver::{Resolution, Resolver};
