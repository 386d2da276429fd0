use serde::{Deserialize, Serialize};

use crate::{Error, Kilometers};

/// Parameters controlling how flood proximity inflates edge costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadGraphConfig {
    /// Risk amplification factor. 0 gives pure shortest-distance routing
    pub alpha: f64,
    /// Hazard influence radius in kilometers
    pub max_risk_dist_km: Kilometers,
}

impl Default for RoadGraphConfig {
    fn default() -> Self {
        Self {
            alpha: 5.0,
            max_risk_dist_km: 0.5,
        }
    }
}

impl RoadGraphConfig {
    pub fn new(alpha: f64, max_risk_dist_km: Kilometers) -> Result<Self, Error> {
        let config = Self {
            alpha,
            max_risk_dist_km,
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a negative or non-finite `alpha`
    /// or a non-positive or non-finite `max_risk_dist_km`.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(Error::InvalidData(format!(
                "alpha must be a finite non-negative number, got {}",
                self.alpha
            )));
        }
        if !self.max_risk_dist_km.is_finite() || self.max_risk_dist_km <= 0.0 {
            return Err(Error::InvalidData(format!(
                "max_risk_dist_km must be a finite positive number, got {}",
                self.max_risk_dist_km
            )));
        }
        Ok(())
    }
}
