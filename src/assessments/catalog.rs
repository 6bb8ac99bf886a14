use serde::{Deserialize, Serialize};

/// The seven fixed axes along which a company's AI readiness is evaluated.
///
/// The catalog is configuration, not user data: the set of dimensions and
/// their default weights never change at runtime. Default weights sum to
/// 1.00 but the aggregator normalizes, so partial score sets remain valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    StrategyAndLeadership,
    DataInfrastructure,
    TechnologyStack,
    TalentAndSkills,
    GovernanceAndRisk,
    ProcessIntegration,
    CultureAndAdoption,
}

impl Dimension {
    pub const COUNT: usize = 7;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::StrategyAndLeadership,
            Self::DataInfrastructure,
            Self::TechnologyStack,
            Self::TalentAndSkills,
            Self::GovernanceAndRisk,
            Self::ProcessIntegration,
            Self::CultureAndAdoption,
        ]
    }

    /// Canonical weight applied when a score does not carry its own.
    pub const fn default_weight(self) -> f64 {
        match self {
            Self::StrategyAndLeadership => 0.20,
            Self::DataInfrastructure => 0.18,
            Self::TechnologyStack => 0.15,
            Self::TalentAndSkills => 0.15,
            Self::GovernanceAndRisk => 0.12,
            Self::ProcessIntegration => 0.10,
            Self::CultureAndAdoption => 0.10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StrategyAndLeadership => "Strategy & Leadership",
            Self::DataInfrastructure => "Data Infrastructure",
            Self::TechnologyStack => "Technology Stack",
            Self::TalentAndSkills => "Talent & Skills",
            Self::GovernanceAndRisk => "Governance & Risk",
            Self::ProcessIntegration => "Process Integration",
            Self::CultureAndAdoption => "Culture & Adoption",
        }
    }
}
