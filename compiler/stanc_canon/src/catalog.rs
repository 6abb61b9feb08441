//! Distribution signature catalog.
//!
//! The catalog lists, per distribution family, which density/mass, cdf and
//! rng variants the standard library provides. It is static read-only data;
//! the deprecation pass derives its legacy-spelling table from it once.

use bitflags::bitflags;

bitflags! {
    /// Function variants provided for a distribution family.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Variants: u8 {
        /// `_lpdf` (continuous) or `_lpmf` (discrete).
        const DENSITY = 1 << 0;
        /// `_lupdf` / `_lupmf`.
        const UNNORMALIZED = 1 << 1;
        const CDF = 1 << 2;
        const LCDF = 1 << 3;
        const LCCDF = 1 << 4;
        const RNG = 1 << 5;
    }
}

/// Suffixes naming a specific density or mass function of a family.
pub const DENSITY_SUFFIXES: [&str; 4] = ["_lpdf", "_lupdf", "_lpmf", "_lupmf"];

/// The density/mass suffix `name` ends with, if any.
pub fn density_suffix(name: &str) -> Option<&'static str> {
    DENSITY_SUFFIXES
        .into_iter()
        .find(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
}

/// `name` without its density/mass suffix.
pub fn strip_density_suffix(name: &str) -> &str {
    density_suffix(name).map_or(name, |suffix| &name[..name.len() - suffix.len()])
}

/// Whether a family is over a continuous or a discrete support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Support {
    Continuous,
    Discrete,
}

impl Support {
    /// Suffix of the normalized log density (`_lpdf`) or mass (`_lpmf`).
    pub const fn density_suffix(self) -> &'static str {
        match self {
            Support::Continuous => "_lpdf",
            Support::Discrete => "_lpmf",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistributionFamily {
    pub name: &'static str,
    pub support: Support,
    pub variants: Variants,
}

impl DistributionFamily {
    const fn new(name: &'static str, support: Support, variants: Variants) -> Self {
        DistributionFamily {
            name,
            support,
            variants,
        }
    }
}

/// Source of distribution signatures.
pub trait SignatureCatalog {
    fn families(&self) -> &[DistributionFamily];
}

/// The families of the Stan standard library.
#[derive(Clone, Copy, Debug, Default)]
pub struct StanCatalog;

impl SignatureCatalog for StanCatalog {
    fn families(&self) -> &[DistributionFamily] {
        STAN_FAMILIES
    }
}

const FULL: Variants = Variants::all();
const DENSITIES: Variants = Variants::DENSITY.union(Variants::UNNORMALIZED);
const SAMPLED: Variants = DENSITIES.union(Variants::RNG);

use Support::{Continuous, Discrete};

static STAN_FAMILIES: &[DistributionFamily] = &[
    // Continuous, unbounded
    DistributionFamily::new("normal", Continuous, FULL),
    DistributionFamily::new("std_normal", Continuous, FULL),
    DistributionFamily::new("student_t", Continuous, FULL),
    DistributionFamily::new("cauchy", Continuous, FULL),
    DistributionFamily::new("double_exponential", Continuous, FULL),
    DistributionFamily::new("logistic", Continuous, FULL),
    DistributionFamily::new("gumbel", Continuous, FULL),
    DistributionFamily::new("skew_normal", Continuous, FULL),
    // Continuous, positive
    DistributionFamily::new("lognormal", Continuous, FULL),
    DistributionFamily::new("chi_square", Continuous, FULL),
    DistributionFamily::new("inv_chi_square", Continuous, FULL),
    DistributionFamily::new("exponential", Continuous, FULL),
    DistributionFamily::new("gamma", Continuous, FULL),
    DistributionFamily::new("inv_gamma", Continuous, FULL),
    DistributionFamily::new("weibull", Continuous, FULL),
    DistributionFamily::new("frechet", Continuous, FULL),
    DistributionFamily::new("pareto", Continuous, FULL),
    // Continuous, bounded
    DistributionFamily::new("beta", Continuous, FULL),
    DistributionFamily::new("uniform", Continuous, FULL),
    DistributionFamily::new("von_mises", Continuous, FULL),
    // Multivariate
    DistributionFamily::new("multi_normal", Continuous, SAMPLED),
    DistributionFamily::new("multi_normal_cholesky", Continuous, SAMPLED),
    DistributionFamily::new("multi_student_t", Continuous, SAMPLED),
    DistributionFamily::new("dirichlet", Continuous, SAMPLED),
    DistributionFamily::new("lkj_corr_cholesky", Continuous, SAMPLED),
    DistributionFamily::new("wishart", Continuous, SAMPLED),
    DistributionFamily::new("normal_id_glm", Continuous, DENSITIES),
    // Discrete
    DistributionFamily::new("bernoulli", Discrete, FULL),
    DistributionFamily::new("bernoulli_logit", Discrete, SAMPLED),
    DistributionFamily::new("bernoulli_logit_glm", Discrete, SAMPLED),
    DistributionFamily::new("binomial", Discrete, FULL),
    DistributionFamily::new("binomial_logit", Discrete, DENSITIES),
    DistributionFamily::new("beta_binomial", Discrete, FULL),
    DistributionFamily::new("hypergeometric", Discrete, SAMPLED),
    DistributionFamily::new("categorical", Discrete, SAMPLED),
    DistributionFamily::new("categorical_logit", Discrete, SAMPLED),
    DistributionFamily::new("categorical_logit_glm", Discrete, DENSITIES),
    DistributionFamily::new("poisson", Discrete, FULL),
    DistributionFamily::new("poisson_log", Discrete, SAMPLED),
    DistributionFamily::new("poisson_log_glm", Discrete, DENSITIES),
    DistributionFamily::new("neg_binomial", Discrete, FULL),
    DistributionFamily::new("neg_binomial_2", Discrete, FULL),
    DistributionFamily::new("neg_binomial_2_log", Discrete, SAMPLED),
    DistributionFamily::new("neg_binomial_2_log_glm", Discrete, DENSITIES),
    DistributionFamily::new("ordered_logistic", Discrete, SAMPLED),
    DistributionFamily::new("multinomial", Discrete, SAMPLED),
];
