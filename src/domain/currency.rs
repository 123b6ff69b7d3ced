use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of supported currencies. Extensible: adding a variant here is the
/// only change needed to support a new currency across validation, limits and
/// rate lookups, since every collaborator derives its behavior from `Currency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Rub,
}

impl Currency {
    /// Per-currency maximum transaction amount.
    pub fn max_amount(self) -> Decimal {
        match self {
            Currency::Usd => dec!(10000),
            Currency::Eur => dec!(8000),
            Currency::Rub => dec!(500000),
        }
    }

    /// Account-format predicate for this currency's default pattern:
    /// USD `^[0-9]{10}$`, EUR `^[A-Z]{2}[0-9]{2}[A-Z0-9]{11,32}$`,
    /// RUB `^[0-9]{20}$`.
    pub fn account_format_valid(self, account: &str) -> bool {
        match self {
            Currency::Usd => account.len() == 10 && account.bytes().all(|b| b.is_ascii_digit()),
            Currency::Eur => {
                let bytes = account.as_bytes();
                if bytes.len() < 15 || bytes.len() > 36 {
                    return false;
                }
                let country_ok = bytes[0..2].iter().all(|b| b.is_ascii_uppercase());
                let check_digits_ok = bytes[2..4].iter().all(|b| b.is_ascii_digit());
                let bban_ok = bytes[4..]
                    .iter()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
                country_ok && check_digits_ok && bban_ok
            }
            Currency::Rub => account.len() == 20 && account.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Rub => "RUB",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "RUB" => Ok(Currency::Rub),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}
