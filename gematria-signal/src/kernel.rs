use std::f64::consts::PI;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{Result, SignalError};

/// Widest insert-size kernel accepted, in weights.
pub const MAX_KERNEL_WIDTH: u64 = 5_000_000;

///
/// How sequencing reads are paired, parsed from a reads-model specifier:
///
/// - `S`: single-end reads
/// - `N:<mu>:<sigma>`: paired reads, insert size normally distributed
/// - `U:<min>:<max>`: paired reads, insert size uniformly distributed in `[min, max)`
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertSizeModel {
    Single,
    Normal { mu: i64, sigma: i64 },
    Uniform { min: i64, max: i64 },
}

///
/// Convolution kernel spreading one read's mapping evidence to its mate's position.
///
#[derive(Debug, Clone, PartialEq)]
pub struct InsertSizeKernel {
    /// Distance the convolved evidence is shifted by, in both directions.
    pub offset: usize,
    /// Non-negative weights, not necessarily summing to one.
    pub weights: Vec<f64>,
}

impl InsertSizeModel {
    pub fn is_paired(&self) -> bool {
        !matches!(self, InsertSizeModel::Single)
    }

    /// Number of weights of this model's kernel, `None` when it does not fit an `i64`.
    fn kernel_width(&self) -> Option<u64> {
        match *self {
            InsertSizeModel::Single => Some(1),
            InsertSizeModel::Normal { mu, sigma } => {
                let three_sigma = sigma.checked_mul(3)?;
                let lo = mu.checked_sub(three_sigma)?;
                let hi = mu.checked_add(three_sigma)?;
                hi.checked_sub(lo)?.checked_add(1).map(|w| w as u64)
            }
            InsertSizeModel::Uniform { min, max } => max.checked_sub(min).map(|w| w as u64),
        }
    }

    ///
    /// Check the parameters describe a kernel that can be built.
    ///
    /// Parsing already validates; models built by hand go through this before
    /// [`kernel`](InsertSizeModel::kernel) is called.
    ///
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| {
            SignalError::Configuration(format!("invalid reads model '{}': {}", self, reason))
        };

        match *self {
            InsertSizeModel::Single => return Ok(()),
            InsertSizeModel::Normal { sigma, .. } if sigma <= 0 => {
                return Err(invalid("sigma must be positive".to_string()));
            }
            InsertSizeModel::Uniform { min, .. } if min < 0 => {
                return Err(invalid("min must not be negative".to_string()));
            }
            InsertSizeModel::Uniform { min, max } if max <= min => {
                return Err(invalid("max must be greater than min".to_string()));
            }
            _ => {}
        }

        match self.kernel_width() {
            Some(width) if width <= MAX_KERNEL_WIDTH => Ok(()),
            _ => Err(invalid(format!(
                "kernel is wider than {} positions",
                MAX_KERNEL_WIDTH
            ))),
        }
    }

    ///
    /// Build the convolution kernel of this model.
    ///
    /// The normal density is sampled at every integer of `[mu - 3 sigma, mu + 3 sigma]`.
    /// When `mu - 3 sigma` is negative only the reported offset is clamped to zero, the
    /// sampled domain is left as is.
    ///
    /// The model must pass [`validate`](InsertSizeModel::validate).
    ///
    pub fn kernel(&self) -> InsertSizeKernel {
        match *self {
            InsertSizeModel::Single => InsertSizeKernel {
                offset: 0,
                weights: vec![1.0],
            },
            InsertSizeModel::Normal { mu, sigma } => {
                let lo = mu - 3 * sigma;
                let hi = mu + 3 * sigma;
                let norm = (2.0 * PI).sqrt() * sigma as f64;
                let variance2 = 2.0 * (sigma as f64).powi(2);

                let weights = (lo..=hi)
                    .map(|x| (-(x as f64 - mu as f64).powi(2) / variance2).exp() / norm)
                    .collect();

                InsertSizeKernel {
                    offset: lo.max(0) as usize,
                    weights,
                }
            }
            InsertSizeModel::Uniform { min, max } => {
                let width = (max - min) as usize;
                InsertSizeKernel {
                    offset: min as usize,
                    weights: vec![1.0 / width as f64; width],
                }
            }
        }
    }
}

impl FromStr for InsertSizeModel {
    type Err = SignalError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            SignalError::Configuration(format!(
                "unable to parse reads model '{}': {}",
                s, reason
            ))
        };

        let mut parts = s.trim().split(':');
        let tag = parts.next().unwrap_or_default();
        let params = parts
            .map(|p| p.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<i64>, _>>()
            .map_err(|e| invalid(&e.to_string()))?;

        let model = match (tag.to_ascii_uppercase().as_str(), params.as_slice()) {
            ("S", &[]) => InsertSizeModel::Single,
            ("N", &[mu, sigma]) => InsertSizeModel::Normal { mu, sigma },
            ("U", &[min, max]) => InsertSizeModel::Uniform { min, max },
            _ => return Err(invalid("expected S, N:<mu>:<sigma> or U:<min>:<max>")),
        };

        model.validate()?;
        Ok(model)
    }
}

impl Display for InsertSizeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertSizeModel::Single => write!(f, "S"),
            InsertSizeModel::Normal { mu, sigma } => write!(f, "N:{}:{}", mu, sigma),
            InsertSizeModel::Uniform { min, max } => write!(f, "U:{}:{}", min, max),
        }
    }
}
