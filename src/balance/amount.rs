use std::fmt;

use crate::proto::accounting::Decimal;

/// Largest precision of any NEP-17 token; anything above is not a balance.
pub const MAX_PRECISION: u32 = 18;

/// Fixed point balance: `value / 10^precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    pub value: i64,
    pub precision: u32,
}

impl Amount {
    pub fn as_f64(&self) -> f64 {
        self.value as f64 / 10f64.powf(f64::from(self.precision))
    }

    pub fn is_valid(&self) -> bool {
        self.precision <= MAX_PRECISION
    }
}

impl From<Decimal> for Amount {
    fn from(decimal: Decimal) -> Self {
        Amount {
            value: decimal.value,
            precision: decimal.precision,
        }
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        Decimal {
            value: amount.value,
            precision: amount.precision,
        }
    }
}

/// Exact decimal rendering, without going through floating point.
///
/// Precisions above [`MAX_PRECISION`] are shown in exponent form.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "{}e-{}", self.value, self.precision);
        }
        let sign = if self.value < 0 { "-" } else { "" };
        let digits = self.value.unsigned_abs().to_string();
        let precision = self.precision as usize;
        if precision == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        let digits = format!("{:0>width$}", digits, width = precision + 1);
        let (integer, fraction) = digits.split_at(digits.len() - precision);
        write!(f, "{}{}.{}", sign, integer, fraction)
    }
}
