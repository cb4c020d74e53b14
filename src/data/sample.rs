//! Synthetic labeled sample generation.
//!
//! Each group is a smooth S-shaped path (a duct wall between two radii),
//! sampled at evenly spaced x and perturbed with Gaussian noise. Output is
//! deterministic for a given seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Point2, SampleGroup};
use crate::error::AppError;

/// Options for `generate_groups`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub groups: usize,
    pub points_per_group: usize,
    /// Standard deviation of the y noise, in the same units as the coordinates.
    pub noise: f64,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            groups: 3,
            points_per_group: 20,
            noise: 0.01,
            seed: 42,
        }
    }
}

/// Generate `config.groups` noisy groups labeled `path1`, `path2`, ...
pub fn generate_groups(config: &SampleConfig) -> Result<Vec<SampleGroup>, AppError> {
    if config.groups == 0 {
        return Err(AppError::new(2, "Group count must be > 0."));
    }
    if config.points_per_group < 3 {
        return Err(AppError::new(2, "Each group needs at least 3 points."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let n = config.points_per_group;
    let mut out = Vec::with_capacity(config.groups);
    for g in 0..config.groups {
        // Stack the walls vertically and vary the transition steepness.
        let inlet = 1.0 + g as f64;
        let outlet = inlet + rng.gen_range(0.3..0.8);
        let steepness = rng.gen_range(4.0..9.0);

        let points = (0..n)
            .map(|i| {
                let x = i as f64 / (n - 1) as f64;
                let y = baseline_path(x, inlet, outlet, steepness) + config.noise * normal.sample(&mut rng);
                Point2::new(x, y)
            })
            .collect();

        out.push(SampleGroup {
            label: format!("path{}", g + 1),
            points,
        });
    }

    Ok(out)
}

/// Noise-free path: a logistic step from `inlet` to `outlet` centred at x = 0.5.
pub fn baseline_path(x: f64, inlet: f64, outlet: f64, steepness: f64) -> f64 {
    let s = 1.0 / (1.0 + (-steepness * (x - 0.5)).exp());
    inlet + (outlet - inlet) * s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let cfg = SampleConfig::default();
        let a = generate_groups(&cfg).unwrap();
        let b = generate_groups(&cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert!(a.iter().all(|g| g.points.len() == 20));
        assert_eq!(a[2].label, "path3");
    }

    #[test]
    fn zero_noise_follows_the_baseline() {
        let cfg = SampleConfig {
            groups: 1,
            points_per_group: 5,
            noise: 0.0,
            seed: 7,
        };
        let g = &generate_groups(&cfg).unwrap()[0];
        assert_eq!(g.points[0].x, 0.0);
        assert_eq!(g.points[4].x, 1.0);
        // Monotone rise from inlet to outlet.
        assert!(g.points.windows(2).all(|w| w[1].y > w[0].y));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let bad = SampleConfig {
            points_per_group: 2,
            ..SampleConfig::default()
        };
        assert_eq!(generate_groups(&bad).unwrap_err().exit_code(), 2);
    }
}
