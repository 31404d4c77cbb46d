//! Split of a product's commission pool between the platform and the referrer.

use serde::{Deserialize, Serialize};

const BPS_DENOMINATOR: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionSplit {
    pub admin_share: i64,
    pub customer_share: i64,
}

/// `admin_share = pool * rate` rounded half-up to the paisa, the referrer
/// keeps the remainder so both shares always add up to the pool.
pub fn split_commission(pool: i64, rate_bps: i64) -> CommissionSplit {
    let pool = pool.max(0);
    let rate_bps = rate_bps.clamp(0, BPS_DENOMINATOR);

    let admin_share = ((pool as i128 * rate_bps as i128 + (BPS_DENOMINATOR as i128 / 2))
        / BPS_DENOMINATOR as i128) as i64;

    CommissionSplit {
        admin_share,
        customer_share: pool - admin_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_percent_of_five_hundred_rupees() {
        let split = split_commission(50_000, 500);
        assert_eq!(split.admin_share, 2_500);
        assert_eq!(split.customer_share, 47_500);
    }

    #[test]
    fn shares_always_add_up_to_pool() {
        for pool in [0, 1, 99, 12_345, 50_000, 1_999_999] {
            for rate in [100, 150, 200, 333, 500, 1_000] {
                let split = split_commission(pool, rate);
                assert_eq!(split.admin_share + split.customer_share, pool);
                assert!(split.admin_share >= 0 && split.customer_share >= 0);
            }
        }
    }

    #[test]
    fn rounds_half_up_to_the_paisa() {
        // 1.5% of 1.00 = 1.5 paise
        assert_eq!(split_commission(100, 150).admin_share, 2);
        // 1% of 0.49 = 0.49 paise
        assert_eq!(split_commission(49, 100).admin_share, 0);
    }

    #[test]
    fn zero_pool_splits_to_nothing() {
        assert_eq!(
            split_commission(0, 500),
            CommissionSplit {
                admin_share: 0,
                customer_share: 0
            }
        );
    }
}
