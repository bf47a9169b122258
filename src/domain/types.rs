// ==========================================
// Rework Tracker - Domain Types
// ==========================================
// Closed enumerations shared by every layer:
// error-source taxonomy, discovery location, source table, role, period
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Error Source (7-category taxonomy)
// ==========================================
// Every repair and recut resolves to exactly one value; unknown codes → Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorSource {
    CuttingOperatorError,
    SewingOperatorError,
    CuttingMachineError,
    SewingMachineError,
    OtherMachineError,
    MaterialDefect,
    Other,
}

impl ErrorSource {
    pub const ALL: [ErrorSource; 7] = [
        ErrorSource::CuttingOperatorError,
        ErrorSource::SewingOperatorError,
        ErrorSource::CuttingMachineError,
        ErrorSource::SewingMachineError,
        ErrorSource::OtherMachineError,
        ErrorSource::MaterialDefect,
        ErrorSource::Other,
    ];

    /// Display label used as table key and in insight sentences
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSource::CuttingOperatorError => "Cutting Operator Error",
            ErrorSource::SewingOperatorError => "Sewing Operator Error",
            ErrorSource::CuttingMachineError => "Cutting Machine Error",
            ErrorSource::SewingMachineError => "Sewing Machine Error",
            ErrorSource::OtherMachineError => "Other Machine Error",
            ErrorSource::MaterialDefect => "Material Defect",
            ErrorSource::Other => "Other",
        }
    }

    /// Short form without the trailing "Error" ("Cutting Operator")
    pub fn short_label(&self) -> &'static str {
        match self {
            ErrorSource::CuttingOperatorError => "Cutting Operator",
            ErrorSource::SewingOperatorError => "Sewing Operator",
            ErrorSource::CuttingMachineError => "Cutting Machine",
            ErrorSource::SewingMachineError => "Sewing Machine",
            ErrorSource::OtherMachineError => "Other Machine",
            ErrorSource::MaterialDefect => "Material Defect",
            ErrorSource::Other => "Other",
        }
    }

    pub fn is_machine(&self) -> bool {
        matches!(
            self,
            ErrorSource::CuttingMachineError
                | ErrorSource::SewingMachineError
                | ErrorSource::OtherMachineError
        )
    }
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// Discovery Location
// ==========================================
// Where the defect was found, not where it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscoveryLocation {
    Sewing,
    Qc,
}

impl DiscoveryLocation {
    /// Case-insensitive parse of the raw cell; anything else is None
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "SEWING" => Some(DiscoveryLocation::Sewing),
            "QC" => Some(DiscoveryLocation::Qc),
            _ => None,
        }
    }
}

impl fmt::Display for DiscoveryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryLocation::Sewing => write!(f, "SEWING"),
            DiscoveryLocation::Qc => write!(f, "QC"),
        }
    }
}

// ==========================================
// Source Table
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceTable {
    Repairs, // order-level repairs sheet
    Recuts,  // piece-level recut list
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTable::Repairs => write!(f, "REPAIRS"),
            SourceTable::Recuts => write!(f, "RECUTS"),
        }
    }
}

// ==========================================
// Role (dashboard audience)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    CuttingManager,
    SewingManager,
    ProductionManager,
    QcManager,
    OperationsDirector,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::CuttingManager,
        Role::SewingManager,
        Role::ProductionManager,
        Role::QcManager,
        Role::OperationsDirector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::CuttingManager => "cutting_manager",
            Role::SewingManager => "sewing_manager",
            Role::ProductionManager => "production_manager",
            Role::QcManager => "qc_manager",
            Role::OperationsDirector => "operations_director",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::CuttingManager => "Cutting Manager",
            Role::SewingManager => "Sewing Manager",
            Role::ProductionManager => "Production Manager",
            Role::QcManager => "QC Manager",
            Role::OperationsDirector => "Operations Director",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "cutting_manager" | "cutting" => Ok(Role::CuttingManager),
            "sewing_manager" | "sewing" => Ok(Role::SewingManager),
            "production_manager" | "production" => Ok(Role::ProductionManager),
            "qc_manager" | "qc" => Ok(Role::QcManager),
            "operations_director" | "ops_director" | "director" => Ok(Role::OperationsDirector),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

// ==========================================
// Time-series granularity
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Week,  // Monday-aligned
    Month, // calendar month
}
