//! 401(k) 计算器数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// 参数缺省值
pub const DEFAULT_CURRENT_AGE: i64 = 30;
pub const DEFAULT_RETIREMENT_AGE: i64 = 65;
pub const DEFAULT_ANNUAL_SALARY: f64 = 60000.0;
/// 以下三项为百分数
pub const DEFAULT_CONTRIBUTION_PERCENTAGE: f64 = 5.0;
pub const DEFAULT_EMPLOYER_MATCH: f64 = 50.0;
pub const DEFAULT_EMPLOYER_MATCH_LIMIT: f64 = 6.0;

/// 计算器输入，比例字段为 [0, 1] 区间的小数
#[derive(Debug, Clone, PartialEq)]
pub struct RetirementInputs {
    pub current_age: i64,
    pub retirement_age: i64,
    pub annual_salary: f64,
    pub contribution_pct: f64,
    pub employer_match_pct: f64,
    pub employer_match_limit_pct: f64,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        Self {
            current_age: DEFAULT_CURRENT_AGE,
            retirement_age: DEFAULT_RETIREMENT_AGE,
            annual_salary: DEFAULT_ANNUAL_SALARY,
            contribution_pct: DEFAULT_CONTRIBUTION_PERCENTAGE / 100.0,
            employer_match_pct: DEFAULT_EMPLOYER_MATCH / 100.0,
            employer_match_limit_pct: DEFAULT_EMPLOYER_MATCH_LIMIT / 100.0,
        }
    }
}

impl RetirementInputs {
    /// 从查询参数或 JSON 对象解析输入，缺失字段使用缺省值
    ///
    /// 百分比字段按百分数传入（如 `5` 表示 5%）
    pub fn from_params(params: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            current_age: int_param(params, "current_age", DEFAULT_CURRENT_AGE)?,
            retirement_age: int_param(params, "retirement_age", DEFAULT_RETIREMENT_AGE)?,
            annual_salary: float_param(params, "annual_salary", DEFAULT_ANNUAL_SALARY)?,
            contribution_pct: float_param(
                params,
                "contribution_percentage",
                DEFAULT_CONTRIBUTION_PERCENTAGE,
            )? / 100.0,
            employer_match_pct: float_param(params, "employer_match", DEFAULT_EMPLOYER_MATCH)?
                / 100.0,
            employer_match_limit_pct: float_param(
                params,
                "employer_match_limit",
                DEFAULT_EMPLOYER_MATCH_LIMIT,
            )? / 100.0,
        })
    }
}

fn int_param(params: &Map<String, Value>, key: &str, default: i64) -> Result<i64, AppError> {
    let invalid = || AppError::Validation(format!("{} must be an integer", key));
    match params.get(key) {
        None => Ok(default),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                // 整数值的浮点数（如 30.0）按截断处理
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
                    .ok_or_else(invalid)
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

fn float_param(params: &Map<String, Value>, key: &str, default: f64) -> Result<f64, AppError> {
    let invalid = || AppError::Validation(format!("{} must be a number", key));
    let value = match params.get(key) {
        None => return Ok(default),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid)?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// 计算结果，均保留两位小数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetirementProjection {
    pub total_employee_contributions: f64,
    pub total_employer_match: f64,
    pub total_contributions: f64,
    pub projected_growth: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_params_use_defaults() {
        let inputs = RetirementInputs::from_params(&Map::new()).unwrap();
        assert_eq!(inputs, RetirementInputs::default());
        assert_eq!(inputs.contribution_pct, 0.05);
        assert_eq!(inputs.employer_match_pct, 0.5);
        assert_eq!(inputs.employer_match_limit_pct, 0.06);
    }

    #[test]
    fn test_string_params_are_coerced() {
        let inputs = RetirementInputs::from_params(&params(json!({
            "current_age": "40",
            "retirement_age": "67",
            "annual_salary": "85000.5",
            "contribution_percentage": "10",
        })))
        .unwrap();
        assert_eq!(inputs.current_age, 40);
        assert_eq!(inputs.retirement_age, 67);
        assert_eq!(inputs.annual_salary, 85000.5);
        assert_eq!(inputs.contribution_pct, 0.1);
        assert_eq!(inputs.employer_match_pct, 0.5);
    }

    #[test]
    fn test_integral_float_age_accepted() {
        let inputs = RetirementInputs::from_params(&params(json!({"current_age": 35.0}))).unwrap();
        assert_eq!(inputs.current_age, 35);
    }

    #[test]
    fn test_invalid_params_rejected() {
        for bad in [
            json!({"current_age": "30.5"}),
            json!({"current_age": 30.5}),
            json!({"retirement_age": null}),
            json!({"annual_salary": "lots"}),
            json!({"annual_salary": "inf"}),
            json!({"employer_match": [50]}),
        ] {
            let result = RetirementInputs::from_params(&params(bad.clone()));
            assert!(
                matches!(result, Err(AppError::Validation(_))),
                "expected validation error for {}",
                bad
            );
        }
    }
}
