/* ************************************************************************ **
** This file is part of tabla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

use ::tabla_slice_math::{self as slice_math, norm};

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Stop once the gap between successive iterates is at most this.
    #[serde(default = "settings__tolerance")] pub tolerance: f64,
    /// Number of updates allowed before giving up.  Zero fails immediately.
    #[serde(default = "settings__max_iterations")] pub max_iterations: u32,
    /// How the splitting solvers measure the gap.  Power iteration always
    /// uses the change in the eigenvalue estimate.
    #[serde(default = "settings__gap")] pub gap: GapMeasure,
}

fn settings__tolerance() -> f64 { 5e-5 }
fn settings__max_iterations() -> u32 { 100 }
fn settings__gap() -> GapMeasure { GapMeasure::DifferenceNorm }

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tolerance: settings__tolerance(),
            max_iterations: settings__max_iterations(),
            gap: settings__gap(),
        }
    }
}

impl Settings {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self
    { Settings { tolerance, max_iterations, ..Default::default() } }

    pub fn with_gap(self, gap: GapMeasure) -> Self
    { Settings { gap, ..self } }
}

/// Distance between successive vector iterates.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GapMeasure {
    /// `| ||x_{k+1}|| - ||x_k|| |`.
    ///
    /// This is blind to any change that preserves the norm, so it can
    /// report convergence while the iterate is still rotating.
    NormDifference,
    /// `||x_{k+1} - x_k||`.
    DifferenceNorm,
}

impl GapMeasure {
    /// Panics if the lengths differ.
    pub fn measure(self, prev: &[f64], next: &[f64]) -> f64
    {
        match self {
            GapMeasure::NormDifference => (norm(next) - norm(prev)).abs(),
            GapMeasure::DifferenceNorm => slice_math::distance(prev, next),
        }
    }
}
