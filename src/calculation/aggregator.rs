//! Settlement totals.

use rust_decimal::Decimal;

use crate::models::{AuditStep, LineItemKind, SettlementLineItem};

/// Earnings, deductions and net total of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementTotals {
    /// Sum of earning items.
    pub total_earnings: Decimal,
    /// Sum of deduction items.
    pub total_deductions: Decimal,
    /// Earnings minus deductions.
    pub net_total: Decimal,
}

/// The totals together with the audit step recording them.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// The statement totals.
    pub totals: SettlementTotals,
    /// The audit step recording the totals.
    pub audit_step: AuditStep,
}

/// Sums the already-rounded line items.
///
/// Totals are exact sums of the item values, so they always reconcile with
/// the statement to the cent.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::sum_line_items;
/// use settlement_engine::models::{LineItemCategory, LineItemKind, SettlementLineItem};
/// use rust_decimal::Decimal;
///
/// let item = |value: i64, kind| SettlementLineItem {
///     code: "x".to_string(),
///     description: "x".to_string(),
///     reference: "1".to_string(),
///     value: Decimal::new(value, 2),
///     basis: None,
///     kind,
///     category: LineItemCategory::Termination,
///     legal_basis: "Art. 477".to_string(),
/// };
///
/// let totals = sum_line_items(&[
///     item(360000, LineItemKind::Earning),
///     item(300000, LineItemKind::Deduction),
/// ]);
/// assert_eq!(totals.net_total, Decimal::new(60000, 2));
/// ```
pub fn sum_line_items(line_items: &[SettlementLineItem]) -> SettlementTotals {
    let zero = Decimal::new(0, 2);
    let (total_earnings, total_deductions) =
        line_items
            .iter()
            .fold((zero, zero), |(earnings, deductions), item| match item.kind {
                LineItemKind::Earning => (earnings + item.value, deductions),
                LineItemKind::Deduction => (earnings, deductions + item.value),
            });

    SettlementTotals {
        total_earnings,
        total_deductions,
        net_total: total_earnings - total_deductions,
    }
}

/// Sums the line items and records the audit step.
pub fn aggregate_line_items(line_items: &[SettlementLineItem], step_number: u32) -> AggregationResult {
    let totals = sum_line_items(line_items);
    let earning_count = line_items.iter().filter(|item| item.is_earning()).count();

    let audit_step = AuditStep {
        step_number,
        rule_id: "settlement_totals".to_string(),
        rule_name: "Settlement Totals".to_string(),
        clause_ref: "Art. 477 §2".to_string(),
        input: serde_json::json!({
            "earning_items": earning_count,
            "deduction_items": line_items.len() - earning_count
        }),
        output: serde_json::json!({
            "total_earnings": totals.total_earnings.to_string(),
            "total_deductions": totals.total_deductions.to_string(),
            "net_total": totals.net_total.to_string()
        }),
        reasoning: format!(
            "R$ {} earnings - R$ {} deductions = R$ {} net",
            totals.total_earnings, totals.total_deductions, totals.net_total
        ),
    };

    AggregationResult { totals, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItemCategory;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(value: Decimal, kind: LineItemKind) -> SettlementLineItem {
        SettlementLineItem {
            code: "item".to_string(),
            description: "Item".to_string(),
            reference: "1/12".to_string(),
            value,
            basis: None,
            kind,
            category: LineItemCategory::Other,
            legal_basis: "Art. 477".to_string(),
        }
    }

    #[test]
    fn test_empty_statement_totals_zero() {
        let totals = sum_line_items(&[]);
        assert_eq!(totals.total_earnings.to_string(), "0.00");
        assert_eq!(totals.net_total.to_string(), "0.00");
    }

    #[test]
    fn test_deductions_reduce_net() {
        let totals = sum_line_items(&[
            item(dec("100.00"), LineItemKind::Earning),
            item(dec("1750.00"), LineItemKind::Earning),
            item(dec("3000.00"), LineItemKind::Deduction),
        ]);

        assert_eq!(totals.total_earnings, dec("1850.00"));
        assert_eq!(totals.total_deductions, dec("3000.00"));
        assert_eq!(totals.net_total, dec("-1150.00"));
    }

    #[test]
    fn test_audit_step_counts_items() {
        let items = vec![
            item(dec("10.00"), LineItemKind::Earning),
            item(dec("5.00"), LineItemKind::Deduction),
        ];
        let result = aggregate_line_items(&items, 14);

        assert_eq!(result.audit_step.step_number, 14);
        assert_eq!(result.audit_step.input["earning_items"], 1);
        assert_eq!(result.audit_step.input["deduction_items"], 1);
        assert_eq!(result.audit_step.output["net_total"], "5.00");
    }

    proptest! {
        #[test]
        fn prop_net_equals_earnings_minus_deductions(
            values in prop::collection::vec((0i64..10_000_000, any::<bool>()), 0..20)
        ) {
            let items: Vec<SettlementLineItem> = values
                .iter()
                .map(|&(cents, earning)| {
                    let kind = if earning { LineItemKind::Earning } else { LineItemKind::Deduction };
                    item(Decimal::new(cents, 2), kind)
                })
                .collect();

            let totals = sum_line_items(&items);
            prop_assert_eq!(totals.net_total, totals.total_earnings - totals.total_deductions);

            let earned: Decimal = items.iter().filter(|i| i.is_earning()).map(|i| i.value).sum();
            prop_assert_eq!(totals.total_earnings, earned);
            prop_assert_eq!(totals.total_earnings.scale(), 2);
        }
    }
}
