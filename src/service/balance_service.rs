// service/balance_service.rs
use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::db::{DBClient, Store},
    models::{
        referralmodel::{CustomerEarnings, ReferralSale, SaleStatus},
        shopmodel::Shop,
        supportmodel::NoticeStatus,
        walletmodels::{
            CustomerBalance, PayoutKind, PayoutRequest, ShopAdminBalance, TransactionStatus,
        },
    },
};

fn completed(sales: &[ReferralSale]) -> impl Iterator<Item = &ReferralSale> {
    sales.iter().filter(|s| s.status == SaleStatus::Completed)
}

fn sum_payouts<'a>(
    payouts: impl Iterator<Item = &'a PayoutRequest>,
    status: TransactionStatus,
) -> i64 {
    payouts.filter(|p| p.status == status).map(|p| p.amount).sum()
}

/// Everything a customer has earned against every withdrawal they asked for.
pub fn customer_balance(
    customer_id: Uuid,
    sales: &[ReferralSale],
    payouts: &[PayoutRequest],
) -> CustomerBalance {
    let earned = completed(sales)
        .filter(|s| s.referrer_id == customer_id)
        .map(|s| s.customer_commission_earned)
        .sum::<i64>();

    let own = || {
        payouts
            .iter()
            .filter(move |p| p.kind == PayoutKind::CustomerPayout && p.user_id == customer_id)
    };
    let paid = sum_payouts(own(), TransactionStatus::Paid);
    let pending = sum_payouts(own(), TransactionStatus::Pending);

    CustomerBalance {
        earned,
        paid,
        pending,
        settled: earned - paid,
        withdrawable: earned - paid - pending,
    }
}

/// What a shop owes the platform out of its sales.
pub fn shop_admin_balance(
    shop_id: Uuid,
    sales: &[ReferralSale],
    payouts: &[PayoutRequest],
) -> ShopAdminBalance {
    let accrued = completed(sales)
        .filter(|s| s.shop_id == shop_id)
        .map(|s| s.admin_commission_earned)
        .sum::<i64>();

    let own = || {
        payouts
            .iter()
            .filter(move |p| p.kind == PayoutKind::ShopToAdminPayout && p.shop_id == shop_id)
    };
    let paid = sum_payouts(own(), TransactionStatus::Paid);
    let pending = sum_payouts(own(), TransactionStatus::Pending);

    ShopAdminBalance {
        accrued,
        paid,
        pending,
        outstanding: accrued - paid - pending,
    }
}

/// Per-referrer totals of a shop, highest earner first.
pub fn customer_earnings(shop_id: Uuid, sales: &[ReferralSale]) -> Vec<CustomerEarnings> {
    let mut totals: HashMap<Uuid, (usize, i64)> = HashMap::new();
    for sale in completed(sales).filter(|s| s.shop_id == shop_id) {
        let entry = totals.entry(sale.referrer_id).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += sale.customer_commission_earned;
    }

    let mut earnings: Vec<CustomerEarnings> = totals
        .into_iter()
        .map(|(customer_id, (sales, earned))| CustomerEarnings {
            customer_id,
            sales,
            earned,
        })
        .collect();
    earnings.sort_by(|a, b| b.earned.cmp(&a.earned).then(a.customer_id.cmp(&b.customer_id)));
    earnings
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AdminStats {
    pub total_shops: usize,
    pub active_shops: usize,
    pub total_revenue: i64,
    pub total_admin_commission: i64,
    pub pending_admin_payouts: usize,
}

#[derive(Debug, Serialize)]
pub struct ShopStats {
    pub total_sales: usize,
    pub total_volume: i64,
    pub total_commission_owed: i64,
    pub admin_balance: ShopAdminBalance,
    pub unread_notices: usize,
    pub customer_earnings: Vec<CustomerEarnings>,
}

pub fn admin_stats(store: &Store) -> AdminStats {
    AdminStats {
        total_shops: store.shops.len(),
        active_shops: store.shops.iter().filter(|s| s.is_approved).count(),
        total_revenue: completed(&store.sales).map(|s| s.sale_amount).sum(),
        total_admin_commission: completed(&store.sales)
            .map(|s| s.admin_commission_earned)
            .sum(),
        pending_admin_payouts: store
            .payouts
            .iter()
            .filter(|p| {
                p.kind == PayoutKind::ShopToAdminPayout && p.status == TransactionStatus::Pending
            })
            .count(),
    }
}

pub fn shop_stats(shop: &Shop, store: &Store) -> ShopStats {
    let shop_sales = || completed(&store.sales).filter(|s| s.shop_id == shop.id);

    ShopStats {
        total_sales: shop_sales().count(),
        total_volume: shop_sales().map(|s| s.sale_amount).sum(),
        total_commission_owed: shop_sales().map(|s| s.customer_commission_earned).sum(),
        admin_balance: shop_admin_balance(shop.id, &store.sales, &store.payouts),
        unread_notices: store
            .notices
            .iter()
            .filter(|n| n.shop_id == shop.id && n.status == NoticeStatus::Unread)
            .count(),
        customer_earnings: customer_earnings(shop.id, &store.sales),
    }
}

#[derive(Debug, Clone)]
pub struct BalanceService {
    db_client: Arc<DBClient>,
}

impl BalanceService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn customer_balance(&self, customer_id: Uuid) -> CustomerBalance {
        self.db_client
            .read(|store| customer_balance(customer_id, &store.sales, &store.payouts))
            .await
    }

    pub async fn shop_stats(&self, shop: &Shop) -> ShopStats {
        self.db_client.read(|store| shop_stats(shop, store)).await
    }

    pub async fn admin_stats(&self) -> AdminStats {
        self.db_client.read(admin_stats).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sale(shop_id: Uuid, referrer_id: Uuid, customer: i64, admin: i64) -> ReferralSale {
        ReferralSale {
            id: Uuid::new_v4(),
            shop_id,
            product_id: Uuid::new_v4(),
            referrer_id,
            buyer_name: "Walk-in Buyer".to_string(),
            sale_amount: 1_000_000,
            customer_commission_earned: customer,
            admin_commission_earned: admin,
            lead_id: None,
            status: SaleStatus::Completed,
            created_at: Utc::now(),
        }
    }

    fn payout(
        kind: PayoutKind,
        user_id: Uuid,
        shop_id: Uuid,
        amount: i64,
        status: TransactionStatus,
    ) -> PayoutRequest {
        PayoutRequest {
            id: Uuid::new_v4(),
            kind,
            user_id,
            shop_id,
            amount,
            upi_id: "x@upi".to_string(),
            status,
            screenshot: None,
            transaction_id: None,
            created_at: Utc::now(),
            settled_at: None,
        }
    }

    #[test]
    fn customer_balance_subtracts_paid_and_pending() {
        let shop = Uuid::new_v4();
        let customer = Uuid::new_v4();
        let sales = vec![sale(shop, customer, 47_500, 2_500), sale(shop, customer, 20_000, 1_000)];
        let payouts = vec![
            payout(PayoutKind::CustomerPayout, customer, shop, 30_000, TransactionStatus::Paid),
            payout(PayoutKind::CustomerPayout, customer, shop, 20_000, TransactionStatus::Pending),
            payout(PayoutKind::CustomerPayout, customer, shop, 99_999, TransactionStatus::Rejected),
        ];

        let balance = customer_balance(customer, &sales, &payouts);
        assert_eq!(balance.earned, 67_500);
        assert_eq!(balance.paid, 30_000);
        assert_eq!(balance.pending, 20_000);
        assert_eq!(balance.settled, 37_500);
        assert_eq!(balance.withdrawable, 17_500);
    }

    #[test]
    fn settled_figure_can_overstate_what_is_left() {
        // Two pending requests for the full balance: only the withdrawable
        // figure reflects that nothing is left.
        let shop = Uuid::new_v4();
        let customer = Uuid::new_v4();
        let sales = vec![sale(shop, customer, 47_500, 2_500)];
        let payouts = vec![
            payout(PayoutKind::CustomerPayout, customer, shop, 47_500, TransactionStatus::Pending),
            payout(PayoutKind::CustomerPayout, customer, shop, 47_500, TransactionStatus::Pending),
        ];

        let balance = customer_balance(customer, &sales, &payouts);
        assert_eq!(balance.settled, 47_500);
        assert_eq!(balance.withdrawable, -47_500);

        // Once both are paid, the settled figure goes negative too.
        let paid: Vec<_> = payouts
            .into_iter()
            .map(|mut p| {
                p.status = TransactionStatus::Paid;
                p
            })
            .collect();
        assert_eq!(customer_balance(customer, &sales, &paid).settled, -47_500);
    }

    #[test]
    fn balances_ignore_other_customers_and_shop_payouts() {
        let shop = Uuid::new_v4();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let sales = vec![sale(shop, me, 10_000, 500), sale(shop, other, 90_000, 4_500)];
        let payouts = vec![
            payout(PayoutKind::CustomerPayout, other, shop, 90_000, TransactionStatus::Paid),
            payout(PayoutKind::ShopToAdminPayout, me, shop, 5_000, TransactionStatus::Paid),
        ];

        assert_eq!(customer_balance(me, &sales, &payouts).withdrawable, 10_000);
    }

    #[test]
    fn shop_admin_balance_tracks_outstanding() {
        let shop = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let sales = vec![
            sale(shop, Uuid::new_v4(), 47_500, 2_500),
            sale(shop, Uuid::new_v4(), 47_500, 2_500),
            sale(Uuid::new_v4(), Uuid::new_v4(), 47_500, 2_500),
        ];
        let payouts = vec![payout(
            PayoutKind::ShopToAdminPayout,
            admin,
            shop,
            2_500,
            TransactionStatus::Paid,
        )];

        let balance = shop_admin_balance(shop, &sales, &payouts);
        assert_eq!(balance.accrued, 5_000);
        assert_eq!(balance.paid, 2_500);
        assert_eq!(balance.outstanding, 2_500);
    }

    #[test]
    fn imported_cancelled_sales_are_ignored() {
        let shop = Uuid::new_v4();
        let customer = Uuid::new_v4();
        let mut cancelled = sale(shop, customer, 47_500, 2_500);
        cancelled.status = SaleStatus::Cancelled;

        let balance = customer_balance(customer, &[cancelled], &[]);
        assert_eq!(balance.earned, 0);
    }

    #[test]
    fn earnings_are_sorted_by_amount() {
        let shop = Uuid::new_v4();
        let low = Uuid::new_v4();
        let high = Uuid::new_v4();
        let sales = vec![
            sale(shop, low, 1_000, 0),
            sale(shop, high, 5_000, 0),
            sale(shop, high, 5_000, 0),
        ];

        let earnings = customer_earnings(shop, &sales);
        assert_eq!(earnings.len(), 2);
        assert_eq!(earnings[0].customer_id, high);
        assert_eq!(earnings[0].sales, 2);
        assert_eq!(earnings[0].earned, 10_000);
        assert_eq!(earnings[1].customer_id, low);
    }
}
