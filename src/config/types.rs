//! Configuration types for settlement calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! built-in CLT parameter table used when no files are supplied.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Metadata about the statute the parameters implement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatuteMetadata {
    /// Short code of the statute (e.g., "CLT").
    pub code: String,
    /// The human-readable name of the statute.
    pub name: String,
    /// The version or effective date of the parameter set.
    pub version: String,
    /// URL to the official text.
    pub source_url: String,
}

/// Notice-period (aviso prévio) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoticeRules {
    /// Statutory reference for the notice length.
    pub clause: String,
    /// Notice days due for any tenure.
    pub base_days: u32,
    /// Additional days per completed year of service.
    pub days_per_year: u32,
    /// Upper bound on the notice length.
    pub max_days: u32,
}

/// Parameters for proportional accruals and salary balance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccrualRules {
    /// Days worked in a month for that month to count as a full twelfth.
    pub min_days_per_month: u32,
    /// The constitutional vacation bonus is the vacation value divided by this.
    pub vacation_bonus_divisor: u32,
    /// Length of the commercial month used for daily salary.
    pub commercial_month_days: u32,
}

/// Percentage supplements folded into the wage basis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupplementRules {
    /// Danger pay (adicional de periculosidade) as a fraction of salary.
    pub danger_pay_rate: Decimal,
    /// Night-shift supplement (adicional noturno) as a fraction of salary.
    pub night_shift_rate: Decimal,
}

/// FGTS deposit, fine and withdrawal rates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FgtsRules {
    /// Monthly deposit rate applied to rescission amounts.
    pub deposit_rate: Decimal,
    /// Fine rate on dismissal without cause.
    pub full_multa_rate: Decimal,
    /// Fine rate on mutual fault or mutual agreement.
    pub reduced_multa_rate: Decimal,
    /// Share of the account withdrawable on mutual agreement.
    pub partial_withdrawal_rate: Decimal,
}

/// Statutory fine parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FineRules {
    /// Fine on uncontested amounts not paid at the hearing, as a fraction of
    /// those amounts (Art. 467).
    pub art_467_rate: Decimal,
}

/// Parameters file structure (`parameters.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParametersConfig {
    /// Notice-period parameters.
    pub notice: NoticeRules,
    /// Accrual parameters.
    pub accruals: AccrualRules,
    /// Wage supplement percentages.
    pub supplements: SupplementRules,
    /// FGTS rates.
    pub fgts: FgtsRules,
    /// Statutory fines.
    pub fines: FineRules,
}

/// The complete statutory configuration consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatutoryConfig {
    metadata: StatuteMetadata,
    parameters: ParametersConfig,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    pub fn new(metadata: StatuteMetadata, parameters: ParametersConfig) -> Self {
        Self {
            metadata,
            parameters,
        }
    }

    /// Returns the process-wide built-in CLT configuration.
    pub fn builtin() -> &'static StatutoryConfig {
        static BUILTIN: OnceLock<StatutoryConfig> = OnceLock::new();
        BUILTIN.get_or_init(StatutoryConfig::default)
    }

    /// Returns the statute metadata.
    pub fn statute(&self) -> &StatuteMetadata {
        &self.metadata
    }

    /// Returns the full parameter table.
    pub fn parameters(&self) -> &ParametersConfig {
        &self.parameters
    }

    /// Returns the notice-period parameters.
    pub fn notice(&self) -> &NoticeRules {
        &self.parameters.notice
    }

    /// Returns the accrual parameters.
    pub fn accruals(&self) -> &AccrualRules {
        &self.parameters.accruals
    }

    /// Returns the wage supplement percentages.
    pub fn supplements(&self) -> &SupplementRules {
        &self.parameters.supplements
    }

    /// Returns the FGTS rates.
    pub fn fgts(&self) -> &FgtsRules {
        &self.parameters.fgts
    }

    /// Returns the statutory fine parameters.
    pub fn fines(&self) -> &FineRules {
        &self.parameters.fines
    }

    /// Checks that the parameters can drive a calculation.
    pub fn validate(&self) -> EngineResult<()> {
        let notice = self.notice();
        if notice.max_days < notice.base_days {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "notice.max_days ({}) is below notice.base_days ({})",
                    notice.max_days, notice.base_days
                ),
            });
        }

        let accruals = self.accruals();
        if accruals.vacation_bonus_divisor == 0 || accruals.commercial_month_days == 0 {
            return Err(EngineError::InvalidConfig {
                message: "accrual divisors must be positive".to_string(),
            });
        }
        if accruals.min_days_per_month == 0 || accruals.min_days_per_month > 31 {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "accruals.min_days_per_month must be between 1 and 31, got {}",
                    accruals.min_days_per_month
                ),
            });
        }

        let rates = [
            ("supplements.danger_pay_rate", self.supplements().danger_pay_rate),
            ("supplements.night_shift_rate", self.supplements().night_shift_rate),
            ("fgts.deposit_rate", self.fgts().deposit_rate),
            ("fgts.full_multa_rate", self.fgts().full_multa_rate),
            ("fgts.reduced_multa_rate", self.fgts().reduced_multa_rate),
            ("fgts.partial_withdrawal_rate", self.fgts().partial_withdrawal_rate),
            ("fines.art_467_rate", self.fines().art_467_rate),
        ];
        if let Some((name, rate)) = rates.iter().find(|(_, rate)| rate.is_sign_negative()) {
            return Err(EngineError::InvalidConfig {
                message: format!("{} must not be negative, got {}", name, rate),
            });
        }

        Ok(())
    }
}

impl Default for StatutoryConfig {
    /// CLT parameters in force since the 2017 labour reform.
    fn default() -> Self {
        Self::new(
            StatuteMetadata {
                code: "CLT".to_string(),
                name: "Consolidação das Leis do Trabalho".to_string(),
                version: "2017-11-11".to_string(),
                source_url: "https://www.planalto.gov.br/ccivil_03/decreto-lei/del5452.htm"
                    .to_string(),
            },
            ParametersConfig {
                notice: NoticeRules {
                    clause: "Art. 487; Lei 12.506/2011".to_string(),
                    base_days: 30,
                    days_per_year: 3,
                    max_days: 90,
                },
                accruals: AccrualRules {
                    min_days_per_month: 15,
                    vacation_bonus_divisor: 3,
                    commercial_month_days: 30,
                },
                supplements: SupplementRules {
                    danger_pay_rate: Decimal::new(30, 2),
                    night_shift_rate: Decimal::new(20, 2),
                },
                fgts: FgtsRules {
                    deposit_rate: Decimal::new(8, 2),
                    full_multa_rate: Decimal::new(40, 2),
                    reduced_multa_rate: Decimal::new(20, 2),
                    partial_withdrawal_rate: Decimal::new(50, 2),
                },
                fines: FineRules {
                    art_467_rate: Decimal::ONE,
                },
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_matches_default() {
        assert_eq!(StatutoryConfig::builtin(), &StatutoryConfig::default());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(StatutoryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_notice_rules() {
        let config = StatutoryConfig::default();
        assert_eq!(config.notice().base_days, 30);
        assert_eq!(config.notice().days_per_year, 3);
        assert_eq!(config.notice().max_days, 90);
    }

    #[test]
    fn test_validate_rejects_max_below_base() {
        let mut config = StatutoryConfig::default();
        config.parameters.notice.max_days = 20;

        match config.validate() {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("notice.max_days"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut config = StatutoryConfig::default();
        config.parameters.fgts.full_multa_rate = Decimal::new(-40, 2);

        match config.validate() {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("fgts.full_multa_rate"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_bonus_divisor() {
        let mut config = StatutoryConfig::default();
        config.parameters.accruals.vacation_bonus_divisor = 0;
        assert!(config.validate().is_err());
    }
}
