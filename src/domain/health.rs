//! Risk classification of a failure probability.
//!
//! Machine status and alert level are two names for the same band. Both are
//! derived from [`RiskBand`], so the thresholds exist in exactly one place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probabilities below this (percent) are healthy.
pub const AT_RISK_THRESHOLD: f64 = 30.0;
/// Probabilities at or above this (percent) are failing.
pub const FAILURE_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl RiskBand {
    pub fn from_probability(probability: f64) -> Self {
        if probability < AT_RISK_THRESHOLD {
            RiskBand::Low
        } else if probability < FAILURE_THRESHOLD {
            RiskBand::Elevated
        } else {
            RiskBand::High
        }
    }

    pub fn status(self) -> MachineStatus {
        match self {
            RiskBand::Low => MachineStatus::Healthy,
            RiskBand::Elevated => MachineStatus::AtRisk,
            RiskBand::High => MachineStatus::Failure,
        }
    }

    pub fn alert_level(self) -> AlertLevel {
        match self {
            RiskBand::Low => AlertLevel::Normal,
            RiskBand::Elevated => AlertLevel::Warning,
            RiskBand::High => AlertLevel::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    Healthy,
    #[serde(rename = "At Risk")]
    AtRisk,
    Failure,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::Healthy => write!(f, "Healthy"),
            MachineStatus::AtRisk => write!(f, "At Risk"),
            MachineStatus::Failure => write!(f, "Failure"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Normal => write!(f, "normal"),
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Critical => write!(f, "critical"),
        }
    }
}

pub fn classify_status(probability: f64) -> MachineStatus {
    RiskBand::from_probability(probability).status()
}

pub fn classify_alert_level(probability: f64) -> AlertLevel {
    RiskBand::from_probability(probability).alert_level()
}

/// Model output for one reading, with both encodings of its risk band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub failure_probability: f64,
    pub machine_status: MachineStatus,
    pub alert_level: AlertLevel,
}

impl PredictionResult {
    pub fn from_probability(failure_probability: f64) -> Self {
        let band = RiskBand::from_probability(failure_probability);
        Self {
            failure_probability,
            machine_status: band.status(),
            alert_level: band.alert_level(),
        }
    }
}
