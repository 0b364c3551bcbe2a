//! Kernel weight functions.
//!
//! ## Purpose
//!
//! This module provides the weighting functions applied to the normalized
//! offset `u = (query - sample) / b` of every observation inside the local
//! window. Epanechnikov is the default.
//!
//! ## Design notes
//!
//! * **Compact support**: Every kernel returns zero for `|u| > 1`, including
//!   the Gaussian, which is truncated to the window.
//! * **Symmetric**: Weights depend on `|u|` only.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Epanechnikov**: `0.75 * (1 - u^2)`, zero at the window boundary.
//! * **Uniform**: The only kernel with non-zero weight at `|u| = 1`.
//!
//! ## Invariants
//!
//! * Weights are non-negative and finite for finite `u`.
//! * Weights are non-increasing in `|u|` on `[0, 1]`.

// External dependencies
use core::f64::consts::PI;
use num_traits::Float;

/// Kernel used to weight observations inside the bandwidth window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightFunction {
    /// `0.75 * (1 - u^2)` (default).
    #[default]
    Epanechnikov,

    /// `70/81 * (1 - |u|^3)^3`.
    Tricube,

    /// `15/16 * (1 - u^2)^2`.
    Biweight,

    /// `1 - |u|`.
    Triangle,

    /// `pi/4 * cos(pi * u / 2)`.
    Cosine,

    /// `0.5` on the whole window.
    Uniform,

    /// Standard normal density truncated to `|u| <= 1`.
    Gaussian,
}

impl WeightFunction {
    /// Evaluate the kernel at normalized offset `u`.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let a = u.abs();
        if !(a <= T::one()) {
            return T::zero();
        }
        let one = T::one();
        let w = match self {
            WeightFunction::Epanechnikov => T::from(0.75).unwrap() * (one - a * a),
            WeightFunction::Tricube => {
                let c = one - a * a * a;
                T::from(70.0 / 81.0).unwrap() * c * c * c
            }
            WeightFunction::Biweight => {
                let c = one - a * a;
                T::from(15.0 / 16.0).unwrap() * c * c
            }
            WeightFunction::Triangle => one - a,
            WeightFunction::Cosine => {
                T::from(PI / 4.0).unwrap() * (T::from(PI / 2.0).unwrap() * a).cos()
            }
            WeightFunction::Uniform => T::from(0.5).unwrap(),
            WeightFunction::Gaussian => {
                T::from(1.0 / (2.0 * PI).sqrt()).unwrap()
                    * (-(a * a) / T::from(2.0).unwrap()).exp()
            }
        };
        // cos(pi/2) is not exactly zero in floating point
        w.max(T::zero())
    }

    /// Lower-case kernel name, as accepted on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Epanechnikov => "epanechnikov",
            WeightFunction::Tricube => "tricube",
            WeightFunction::Biweight => "biweight",
            WeightFunction::Triangle => "triangle",
            WeightFunction::Cosine => "cosine",
            WeightFunction::Uniform => "uniform",
            WeightFunction::Gaussian => "gaussian",
        }
    }
}
