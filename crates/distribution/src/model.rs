//! Shared capability implemented by every fitted parametric family.

/// Evaluation interface of a fully parameterised continuous distribution.
pub trait DistributionModel {
    /// Cumulative distribution function `P(X <= x)`.
    fn cdf(&self, x: f64) -> f64;

    /// Survival function `P(X > x)`.
    ///
    /// Implementations compute this directly rather than as `1 - cdf(x)` so
    /// that far upper-tail probabilities keep their precision.
    fn sf(&self, x: f64) -> f64;

    /// Natural logarithm of the density at `x`. Returns `-inf` outside the
    /// support.
    fn ln_pdf(&self, x: f64) -> f64;

    /// Quantile function (inverse CDF). Returns NaN for `p` outside
    /// `[0, 1]` or NaN.
    fn quantile(&self, p: f64) -> f64;
}
