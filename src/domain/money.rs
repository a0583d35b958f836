use crate::error::GatewayError;
use rust_decimal::Decimal;
use std::fmt;

/// Number of minor units in one major unit for every currency the processor accepts.
const MINOR_UNIT_SCALE: u32 = 2;

/// A positive monetary amount expressed in minor currency units (e.g. øre, cents).
///
/// The processor only ever receives integer minor-unit counts, so this type never
/// carries a fractional value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(u64);

impl Amount {
    pub fn new(minor_units: u64) -> Result<Self, GatewayError> {
        if minor_units > 0 {
            Ok(Self(minor_units))
        } else {
            Err(GatewayError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    /// Converts a major-unit value such as `100.50` into minor units.
    pub fn from_major(value: Decimal) -> Result<Self, GatewayError> {
        if value <= Decimal::ZERO {
            return Err(GatewayError::Validation(
                "Amount must be positive".to_string(),
            ));
        }
        let minor = value
            .checked_mul(Decimal::from(10u64.pow(MINOR_UNIT_SCALE)))
            .ok_or_else(|| out_of_range(value))?;
        if !minor.fract().is_zero() {
            return Err(GatewayError::Validation(format!(
                "Amount {value} has more than {MINOR_UNIT_SCALE} decimal places"
            )));
        }
        let minor = u64::try_from(minor.trunc())
            .map_err(|_| out_of_range(value))?;
        Self::new(minor)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

fn out_of_range(value: Decimal) -> GatewayError {
    GatewayError::Validation(format!("Amount {value} is out of range"))
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_major(value)
    }
}

impl TryFrom<u64> for Amount {
    type Error = GatewayError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
