//! # Debreu Math
//!
//! Numerical building blocks shared by the Debreu crates.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Bisection, Newton-Raphson, Secant)
//! - **Linear Algebra**: LU factorization with partial pivoting, rank, block assembly
//!
//! Everything operates on `f64`; dense matrices are `nalgebra` types.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod linear_algebra;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{
        block_diagonal, matrix_rank, solve_linear_system, LuFactorization,
    };
    pub use crate::solvers::{
        bisection, newton_raphson, newton_raphson_numerical, secant, BisectionSolver,
        NewtonSolver, SecantSolver, Solver, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
