//! Project bootstrapper for C and C++ source trees.
//!
//! A static language table describes directories, base files, flag rules,
//! and library fragments per language. The planner turns the table and a
//! request into a plan without side effects; the executor performs the plan.
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod language;
pub mod output;
pub mod plan;
pub mod prompt;
pub mod repo;
pub mod substitute;
pub mod table;
pub mod templates;
pub mod workflow;

pub use error::{Result, ScaffoldError};
pub use executor::{ExecutionReport, Executor};
pub use language::Language;
pub use plan::{plan, GenerationPlan, GenerationRequest};
pub use substitute::{substitute, Substitution};
pub use table::ConfigTable;
