pub use crate::algo::{mhg_pvalue, mhg_pvalue_cancellable, MAX_TABLE_CELLS};
pub use crate::correction::{benjamini_hochberg, bonferroni, holm};
pub use crate::dd::DoubleDouble;
pub use crate::error::{MhgError, Result};
pub use crate::fisher::{fisher_exact_test, FisherTails};
pub use crate::hypergeom::{hypergeometric_pmf, ln_choose};
