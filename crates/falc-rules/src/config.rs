//! Lorenz system configuration and construction.
//!
//! [`LorenzConfig`] holds the parameters of one Lorenz run.
//! [`validate()`](LorenzConfig::validate) checks them;
//! [`build_system()`](LorenzConfig::build_system) produces a seeded
//! [`CoupledSystem`] ready to [`run()`](CoupledSystem::run).

use falc_core::{ConfigError, Real, Shape};
use falc_manager::{CoupledSystem, RecursiveManager};

use crate::lorenz::{LorenzX, LorenzY, LorenzZ};

/// Parameters of a Lorenz attractor run.
///
/// All three coordinates start from the same seed `x0`. The shared time
/// domain covers `[0, blocks * block_len * dt]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LorenzConfig {
    /// Number of blocks per relation (`I`). Default: 1000.
    pub blocks: usize,
    /// Samples per block (`J`). Default: 100.
    pub block_len: usize,
    /// Seed for `x`, `y` and `z`. Default: 1.0.
    pub x0: f64,
    /// Time step. Default: 0.001.
    pub dt: f64,
    /// Prandtl number. Default: 10.
    pub sigma: f64,
    /// Rayleigh number. Default: 28.
    pub rho: f64,
    /// Geometric factor. Default: 8/3.
    pub beta: f64,
}

impl Default for LorenzConfig {
    fn default() -> Self {
        Self {
            blocks: 1000,
            block_len: 100,
            x0: 1.0,
            dt: 0.001,
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl LorenzConfig {
    /// The default configuration seeded at `x0`.
    pub fn with_seed(x0: f64) -> Self {
        Self {
            x0,
            ..Self::default()
        }
    }

    /// Validated shape of every relation.
    pub fn shape(&self) -> Result<Shape, ConfigError> {
        Shape::new(self.blocks, self.block_len)
    }

    /// Simulated time covered by one buffer.
    pub fn duration(&self) -> f64 {
        self.blocks as f64 * self.block_len as f64 * self.dt
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyShape`]/[`ConfigError::ShapeOverflow`] for a bad
    /// shape, [`ConfigError::InvalidParameter`] for a non-finite
    /// coefficient or a non-positive `dt`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shape()?;
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "dt",
                value: self.dt,
            });
        }
        for (name, value) in [
            ("x0", self.x0),
            ("sigma", self.sigma),
            ("rho", self.rho),
            ("beta", self.beta),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        let duration = self.duration();
        if !duration.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "duration",
                value: duration,
            });
        }
        Ok(())
    }

    /// Build the seeded `x`, `y`, `z` system in sample type `T`.
    ///
    /// `x` owns and populates the time domain; `y` and `z` borrow it. The
    /// members sit in slots [`X`](crate::lorenz::X), [`Y`](crate::lorenz::Y)
    /// and [`Z`](crate::lorenz::Z) under the names `"x"`, `"y"`, `"z"`.
    ///
    /// # Errors
    ///
    /// Anything [`validate()`](Self::validate) rejects, a parameter that does
    /// not convert to `T`, or a failed allocation.
    pub fn build_system<T: Real>(&self) -> Result<CoupledSystem<'static, T>, ConfigError> {
        self.validate()?;
        let shape = self.shape()?;
        let x0 = convert::<T>("x0", self.x0)?;
        let dt = convert::<T>("dt", self.dt)?;

        let mut x = RecursiveManager::new(
            shape,
            LorenzX {
                x0,
                dt,
                sigma: convert("sigma", self.sigma)?,
            },
        )?;
        x.init_domain_and_x0(T::zero(), convert("duration", self.duration())?)?;
        let domain = x.share_domain()?;

        let mut y = RecursiveManager::with_shared_domain(
            shape,
            domain.clone(),
            LorenzY {
                x0,
                dt,
                rho: convert("rho", self.rho)?,
            },
        )?;
        y.init_x0()?;
        let mut z = RecursiveManager::with_shared_domain(
            shape,
            domain,
            LorenzZ {
                x0,
                dt,
                beta: convert("beta", self.beta)?,
            },
        )?;
        z.init_x0()?;

        tracing::debug!(%shape, x0 = self.x0, dt = self.dt, "built lorenz system");
        Ok(CoupledSystem::new([
            ("x", x.boxed()),
            ("y", y.boxed()),
            ("z", z.boxed()),
        ])?)
    }
}

fn convert<T: Real>(name: &'static str, value: f64) -> Result<T, ConfigError> {
    T::from_f64(value)
        .filter(|v| v.is_finite())
        .ok_or(ConfigError::InvalidParameter { name, value })
}
