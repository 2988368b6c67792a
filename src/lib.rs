//! Exact enrichment statistics over ranked binary-labeled lists.
//!
//! The centerpiece is the minimum hypergeometric (mHG) p-value engine
//! ([`algo::mhg_pvalue`]): given a population of `N` items with `B`
//! successes and an observed minimum hypergeometric tail probability, it
//! computes the exact probability that a random ordering is at least as
//! enriched at the top, without a pre-specified cutoff. The computation
//! is a dynamic program carried out in extended precision.
//!
//! Supporting pieces: hypergeometric point probabilities built on a
//! log-gamma combinatorics helper ([`hypergeom`]), Fisher's exact test
//! ([`fisher`]) and multiple-testing corrections ([`correction`]).
//!
//! ```
//! use rsmhg::prelude::*;
//!
//! let p = mhg_pvalue(50, 184, 1000, 2.47088282429e-7).unwrap();
//! assert!(p.to_f64() < 1e-5);
//! ```

pub mod algo;
pub mod correction;
pub mod dd;
pub mod error;
pub mod fisher;
pub mod hypergeom;
pub mod prelude;

pub use crate::algo::*;
pub use crate::dd::DoubleDouble;
pub use crate::error::{MhgError, Result};
pub use crate::fisher::*;
pub use crate::hypergeom::*;
