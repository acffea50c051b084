//! 401(k) 退休储蓄测算
//!
//! 固定 7% 年化收益，一次性按复利公式计算，无状态、无副作用

use super::round2;
use crate::error::AppError;
use crate::models::{RetirementInputs, RetirementProjection};

/// 年化收益率
pub const ANNUAL_RETURN_RATE: f64 = 0.07;

/// 计算退休时的缴存总额与增长后余额
///
/// `current_age >= retirement_age` 时返回 `AppError::Validation`
pub fn project(inputs: &RetirementInputs) -> Result<RetirementProjection, AppError> {
    if inputs.current_age >= inputs.retirement_age {
        return Err(AppError::Validation(
            "Current age must be less than retirement age".to_string(),
        ));
    }

    let years = inputs
        .retirement_age
        .checked_sub(inputs.current_age)
        .ok_or_else(|| AppError::Validation("years to retirement is out of range".to_string()))?;
    let years_f = years as f64;

    let annual_contribution = inputs.annual_salary * inputs.contribution_pct;
    let total_employee_contributions = annual_contribution * years_f;

    let annual_employer_match = annual_employer_match(inputs);
    let total_employer_match = annual_employer_match * years_f;

    let total_contributions = total_employee_contributions + total_employer_match;
    let years_exp = i32::try_from(years)
        .map_err(|_| AppError::Validation("years to retirement is out of range".to_string()))?;
    let projected_growth = total_contributions * (1.0 + ANNUAL_RETURN_RATE).powi(years_exp);

    Ok(RetirementProjection {
        total_employee_contributions: round2(total_employee_contributions),
        total_employer_match: round2(total_employer_match),
        total_contributions: round2(total_contributions),
        projected_growth: round2(projected_growth),
    })
}

/// 雇主年度匹配额，不超过工资乘以匹配上限比例
pub fn annual_employer_match(inputs: &RetirementInputs) -> f64 {
    let annual_contribution = inputs.annual_salary * inputs.contribution_pct;
    let matched = annual_contribution * inputs.employer_match_pct;
    let cap = inputs.annual_salary * inputs.employer_match_limit_pct;
    matched.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::round2;
    use proptest::prelude::*;

    #[test]
    fn test_default_example() {
        let inputs = RetirementInputs::default();
        let result = project(&inputs).unwrap();

        assert_eq!(annual_employer_match(&inputs), 1500.0);
        assert_eq!(result.total_employee_contributions, 105000.0);
        assert_eq!(result.total_employer_match, 52500.0);
        assert_eq!(result.total_contributions, 157500.0);
        assert_eq!(result.projected_growth, round2(157500.0 * 1.07f64.powi(35)));
        assert!(result.projected_growth > 1_600_000.0 && result.projected_growth < 1_700_000.0);
    }

    #[test]
    fn test_age_order_validated() {
        for (current, retire) in [(65, 65), (70, 65)] {
            let inputs = RetirementInputs {
                current_age: current,
                retirement_age: retire,
                ..RetirementInputs::default()
            };
            assert!(matches!(project(&inputs), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_single_year() {
        let inputs = RetirementInputs {
            current_age: 64,
            ..RetirementInputs::default()
        };
        let result = project(&inputs).unwrap();
        assert_eq!(result.total_contributions, 4500.0);
        assert_eq!(result.projected_growth, 4815.0);
    }

    #[test]
    fn test_match_capped_by_limit() {
        // 10% 缴存，100% 匹配，上限 6%：匹配额 6000 被压到 3600
        let inputs = RetirementInputs {
            contribution_pct: 0.10,
            employer_match_pct: 1.0,
            employer_match_limit_pct: 0.06,
            ..RetirementInputs::default()
        };
        assert_eq!(annual_employer_match(&inputs), 3600.0);

        let result = project(&inputs).unwrap();
        assert_eq!(result.total_employer_match, 3600.0 * 35.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(1234.5), 1234.5);
    }

    #[test]
    fn test_idempotent() {
        let inputs = RetirementInputs {
            current_age: 27,
            retirement_age: 62,
            annual_salary: 73125.33,
            contribution_pct: 0.08,
            employer_match_pct: 0.75,
            employer_match_limit_pct: 0.05,
        };
        let first = serde_json::to_string(&project(&inputs).unwrap()).unwrap();
        let second = serde_json::to_string(&project(&inputs).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    fn valid_inputs() -> impl Strategy<Value = RetirementInputs> {
        (
            18i64..70,
            1i64..50,
            0.0f64..500_000.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
        )
            .prop_map(|(current, span, salary, contrib, matched, limit)| RetirementInputs {
                current_age: current,
                retirement_age: current + span,
                annual_salary: salary,
                contribution_pct: contrib,
                employer_match_pct: matched,
                employer_match_limit_pct: limit,
            })
    }

    proptest! {
        #[test]
        fn prop_totals_add_up(inputs in valid_inputs()) {
            let result = project(&inputs).unwrap();
            let sum = result.total_employee_contributions + result.total_employer_match;
            prop_assert!((result.total_contributions - sum).abs() <= 0.011);
            prop_assert!(result.projected_growth >= result.total_contributions);
            prop_assert!(result.total_contributions >= 0.0);
        }

        #[test]
        fn prop_match_never_exceeds_cap(inputs in valid_inputs()) {
            let cap = inputs.annual_salary * inputs.employer_match_limit_pct;
            prop_assert!(annual_employer_match(&inputs) <= cap);
        }

        #[test]
        fn prop_non_increasing_ages_rejected(current in 0i64..120, back in 0i64..60) {
            let inputs = RetirementInputs {
                current_age: current,
                retirement_age: current - back,
                ..RetirementInputs::default()
            };
            prop_assert!(matches!(project(&inputs), Err(AppError::Validation(_))));
        }
    }
}
