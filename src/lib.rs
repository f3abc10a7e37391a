//! A nonsmooth, nonconvex unconstrained optimization solver built around a
//! cutting-plane (bundle) method.
//!
//! Given an objective that may be nondifferentiable (only a subgradient is
//! required, not a gradient) and possibly nonconvex, `compute_direction`
//! repeatedly builds and solves a trust-region-constrained QP over a
//! growing bundle of subgradient cuts, with gradient and shortened-step
//! fast paths, optional bundle aggregation to cap memory, and a recovery
//! path when the QP itself fails to solve. `BundleSolver` wraps the core
//! into a runnable outer loop; everything else in this crate (QP solver,
//! termination test, line search, Hessian update, point-set maintenance,
//! reporter) is a pluggable collaborator the core consumes through a
//! narrow trait.

use nalgebra::{DMatrix, DVector};
use std::rc::Rc;

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

pub mod tracer;
pub use tracer::*;

pub mod number;
pub use number::*;

pub mod func_eval;
pub use func_eval::*;

pub mod oracle;
pub use oracle::*;

pub mod iterate;
pub use iterate::*;

pub mod status;
pub use status::*;

pub mod quantities;
pub use quantities::*;

pub mod options;
pub use options::*;

pub mod qp;
pub use qp::*;

pub mod termination;
pub use termination::*;

pub mod point_set_update;
pub use point_set_update::*;

pub mod hessian_update;
pub use hessian_update::*;

pub mod line_search;
pub use line_search::*;

pub mod strategies;
pub use strategies::*;

pub mod reporter;
pub use reporter::*;

pub mod bundle;
pub use bundle::*;

pub mod solver;
pub use solver::*;
