//! Rupee amounts arrive as decimals on the wire and live as paise (`i64`) in the store.

use thiserror::Error;

/// Largest rupee amount accepted from a client, well inside `i64` paise.
pub const MAX_RUPEES: f64 = 1_000_000_000.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurrencyError {
    #[error("Amount must be a finite number")]
    NotFinite,

    #[error("Amount cannot be negative")]
    Negative,

    #[error("Amount exceeds ₹{}", MAX_RUPEES)]
    TooLarge,
}

/// Rounds to the nearest paisa.
pub fn rupees_to_paise(rupees: f64) -> Result<i64, CurrencyError> {
    if !rupees.is_finite() {
        return Err(CurrencyError::NotFinite);
    }
    if rupees < 0.0 {
        return Err(CurrencyError::Negative);
    }
    if rupees > MAX_RUPEES {
        return Err(CurrencyError::TooLarge);
    }
    Ok((rupees * 100.0).round() as i64)
}

/// `47500` -> `₹475.00`
pub fn format_paise_as_rupees(paise: i64) -> String {
    let sign = if paise < 0 { "-" } else { "" };
    let abs = paise.unsigned_abs();
    format!("{}₹{}.{:02}", sign, abs / 100, abs % 100)
}

/// 5.0 (%) -> 500 bps
pub fn percent_to_bps(percent: f64) -> i64 {
    (percent * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupees_to_paise() {
        assert_eq!(rupees_to_paise(100.0), Ok(10_000));
        assert_eq!(rupees_to_paise(0.50), Ok(50));
        assert_eq!(rupees_to_paise(123.45), Ok(12_345));
        assert_eq!(rupees_to_paise(0.0), Ok(0));
    }

    #[test]
    fn test_rupees_to_paise_rejects_bad_input() {
        assert_eq!(rupees_to_paise(-1.0), Err(CurrencyError::Negative));
        assert_eq!(rupees_to_paise(f64::NAN), Err(CurrencyError::NotFinite));
        assert_eq!(rupees_to_paise(f64::INFINITY), Err(CurrencyError::NotFinite));
        assert_eq!(rupees_to_paise(MAX_RUPEES * 2.0), Err(CurrencyError::TooLarge));
    }

    #[test]
    fn test_format_paise_as_rupees() {
        assert_eq!(format_paise_as_rupees(47_500), "₹475.00");
        assert_eq!(format_paise_as_rupees(50), "₹0.50");
        assert_eq!(format_paise_as_rupees(-2_505), "-₹25.05");
    }

    #[test]
    fn test_percent_to_bps() {
        assert_eq!(percent_to_bps(5.0), 500);
        assert_eq!(percent_to_bps(1.5), 150);
        assert_eq!(percent_to_bps(10.0), 1000);
    }
}
