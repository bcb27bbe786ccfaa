use std::{fmt, str::FromStr};

use crate::{Act, Group, Monoid, QueryError, Result};

/// 実行時に選ぶ`i64`上の演算
///
/// 文字列からの変換は構築時に一度だけ行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Sum,
    Min,
    Max,
    Xor,
    Product,
    /// 頻度の差分。演算は`Sum`と同じ。
    FrequencyDiff,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Sum,
        Mode::Min,
        Mode::Max,
        Mode::Xor,
        Mode::Product,
        Mode::FrequencyDiff,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Sum => "sum",
            Mode::Min => "min",
            Mode::Max => "max",
            Mode::Xor => "xor",
            Mode::Product => "product",
            Mode::FrequencyDiff => "frequency-diff",
        }
    }

    /// 区間の差を取れるか
    pub const fn is_invertible(self) -> bool {
        !matches!(self, Mode::Min | Mode::Max)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Mode::Sum),
            "min" => Ok(Mode::Min),
            "max" => Ok(Mode::Max),
            "xor" => Ok(Mode::Xor),
            "prod" | "product" => Ok(Mode::Product),
            "freq" | "diff" | "frequency-diff" => Ok(Mode::FrequencyDiff),
            _ => Err(QueryError::InvalidMode(s.to_owned())),
        }
    }
}

impl Monoid for Mode {
    type Element = i64;

    fn identity(&self) -> i64 {
        match self {
            Mode::Sum | Mode::FrequencyDiff | Mode::Xor => 0,
            Mode::Product => 1,
            Mode::Min => i64::MAX,
            Mode::Max => i64::MIN,
        }
    }

    fn op(&self, a: &i64, b: &i64) -> i64 {
        match self {
            Mode::Sum | Mode::FrequencyDiff => a.wrapping_add(*b),
            Mode::Xor => a ^ b,
            Mode::Product => a.wrapping_mul(*b),
            Mode::Min => *a.min(b),
            Mode::Max => *a.max(b),
        }
    }
}

impl Group for Mode {
    fn op_inv(&self, total: &i64, part: &i64) -> Result<i64> {
        match self {
            Mode::Sum | Mode::FrequencyDiff => Ok(total.wrapping_sub(*part)),
            Mode::Xor => Ok(total ^ part),
            Mode::Product => {
                if *part == 0 {
                    return Err(QueryError::ArithmeticInvalid(format!(
                        "division of {total} by a zero prefix product"
                    )));
                }
                // 途中でオーバーフローしていると割り切れないことがある
                if total.wrapping_rem(*part) != 0 {
                    return Err(QueryError::ArithmeticInvalid(format!(
                        "{total} is not divisible by {part}"
                    )));
                }
                Ok(total.wrapping_div(*part))
            }
            Mode::Min | Mode::Max => Err(QueryError::UnsupportedOperation {
                mode: self.name(),
                operation: "range removal",
            }),
        }
    }
}

impl Act for Mode {
    type Action = i64;

    fn identity_action(&self) -> i64 {
        match self {
            Mode::Product => 1,
            _ => 0,
        }
    }

    fn apply(&self, value: &mut i64, f: &i64, len: usize) {
        match self {
            Mode::Sum | Mode::FrequencyDiff => {
                *value = value.wrapping_add(f.wrapping_mul(len as i64));
            }
            Mode::Min | Mode::Max => *value = value.wrapping_add(*f),
            Mode::Xor => {
                if len & 1 == 1 {
                    *value ^= f;
                }
            }
            Mode::Product => {
                *value = value.wrapping_mul(f.wrapping_pow(len as u32));
            }
        }
    }

    fn compose(&self, pending: &mut i64, f: &i64) {
        match self {
            Mode::Xor => *pending ^= f,
            Mode::Product => *pending = pending.wrapping_mul(*f),
            _ => *pending = pending.wrapping_add(*f),
        }
    }
}
