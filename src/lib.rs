//! Educa Scheduler - Greedy weekly timetable generator for school classes
//!
//! This library consolidates a school's pedagogical demand (which classes
//! need how many weekly lessons of which subjects, taught by which teachers)
//! into a self-contained problem instance, pre-validates it, and places
//! every required lesson into a `(day, period)` slot.
//!
//! # Pipeline
//!
//! 1. **Payload builder**: union the store's relational inputs into a
//!    `ProblemInstance`
//! 2. **Pre-solve validator**: consistency checks, report-only
//! 3. **Greedy solver**: one pass over the lessons, hard constraints plus
//!    soft pedagogical penalties (consecutiveness, per-day caps)
//! 4. **Reporter**: dense per-class and per-teacher grids with diagnostics
//!
//! # Example
//!
//! ```no_run
//! use educa_scheduler::gateway::JsonStore;
//! use educa_scheduler::payload::build_problem;
//! use educa_scheduler::scheduler::solve;
//! use educa_scheduler::types::{ClassId, SchoolId};
//! use educa_scheduler::validator::run_pre_solve;
//!
//! let store = JsonStore::open("./data/demo");
//! let instance = build_problem(&store, SchoolId(1), "manha", &[ClassId(1)], None, None).unwrap();
//! let report = run_pre_solve(&instance);
//! let schedule = solve(&instance, false);
//! println!("coverage: {}%", schedule.metrics.cobertura);
//! ```

pub mod error;
pub mod gateway;
pub mod payload;
pub mod reporter;
pub mod request;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, TimetableError};
