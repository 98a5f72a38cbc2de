//! Maximum-likelihood fitting of parametric families and exceedance
//! probabilities of a threshold.
//!
//! # Families
//!
//! | Family | Parameters | Estimator |
//! |--------|------------|-----------|
//! | [`Family::Normal`] | loc, scale | closed form (mean, population sd) |
//! | [`Family::Gumbel`] | loc, scale | Nelder-Mead MLE |
//! | [`Family::Gev`] | loc, scale, shape | Nelder-Mead MLE, `|xi| < 1` |
//! | [`Family::Gamma`] | shape, scale | Nelder-Mead MLE, support `x > 0` |
//!
//! Numerical fits run on data rescaled to unit spread and start from the
//! method-of-moments solution.
//!
//! # Direction
//!
//! [`Direction::Ascending`] asks for `P(X >= t)` (survival function),
//! [`Direction::Descending`] for `P(X <= t)` (CDF). Probabilities of exactly
//! 0 or 1 are reported as [`DistributionError::DegenerateProbability`].
//!
//! # Quick Start
//!
//! ```no_run
//! use climattr_distribution::{Direction, Family, exceedance_probability, fit};
//!
//! let annual_max = vec![31.2, 29.8, 33.1, 30.4, 32.7, 28.9, 34.0, 30.0];
//! let fitted = fit(&annual_max, Family::Gev)?;
//! let p = exceedance_probability(&fitted, 33.5, Direction::Ascending)?;
//! println!("return period: {:.1} years", 1.0 / p);
//! # Ok::<(), climattr_distribution::DistributionError>(())
//! ```

mod direction;
mod error;
mod family;
mod fitted;
pub(crate) mod gamma;
pub(crate) mod gev;
pub(crate) mod gumbel;
mod model;
pub(crate) mod normal;
pub(crate) mod optimizer;
pub(crate) mod standardize;

pub use direction::Direction;
pub use error::DistributionError;
pub use family::Family;
pub use fitted::{DistributionFit, FittedDistribution, exceedance_probability, fit};
pub use gamma::GammaParams;
pub use gev::GevParams;
pub use gumbel::GumbelParams;
pub use model::DistributionModel;
pub use normal::NormalParams;
