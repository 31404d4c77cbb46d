// service/payout_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{
    balance_service::{customer_balance, shop_admin_balance},
    error::ServiceError,
};
use crate::{
    db::{
        db::{Collection, DBClient},
        payoutdb::PayoutExt,
    },
    dtos::commissiondtos::PaymentProofDto,
    models::{
        usermodel::{User, UserRole},
        walletmodels::{PayoutKind, PayoutRequest, TransactionStatus},
    },
    utils::currency::{format_paise_as_rupees, rupees_to_paise},
};

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct PayoutService {
    db_client: Arc<DBClient>,
    min_withdrawal: i64,
    admin_upi_id: String,
}

impl PayoutService {
    pub fn new(db_client: Arc<DBClient>, min_withdrawal: i64, admin_upi_id: String) -> Self {
        Self {
            db_client,
            min_withdrawal,
            admin_upi_id,
        }
    }

    /// Queues a withdrawal of `amount_rupees`, or of the whole withdrawable
    /// balance when no amount is given.
    pub async fn request_customer_payout(
        &self,
        customer: &User,
        upi_id: String,
        amount_rupees: Option<f64>,
    ) -> Result<PayoutRequest, ServiceError> {
        let shop_id = customer
            .shop_id
            .ok_or(ServiceError::NoShopForUser(customer.id))?;
        let customer_id = customer.id;
        let minimum = self.min_withdrawal;

        let payout = self
            .db_client
            .transaction(&[Collection::Payouts], |store| {
                let available =
                    customer_balance(customer_id, &store.sales, &store.payouts).withdrawable;
                let amount = amount_rupees
                    .map(rupees_to_paise)
                    .transpose()?
                    .unwrap_or(available);

                if amount < minimum {
                    return Err(ServiceError::BelowMinimumWithdrawal { amount, minimum });
                }
                if amount > available {
                    return Err(ServiceError::InsufficientBalance {
                        requested: amount,
                        available,
                    });
                }

                let payout = PayoutRequest {
                    id: Uuid::new_v4(),
                    kind: PayoutKind::CustomerPayout,
                    user_id: customer_id,
                    shop_id,
                    amount,
                    upi_id: upi_id.trim().to_string(),
                    status: TransactionStatus::Pending,
                    screenshot: None,
                    transaction_id: None,
                    created_at: Utc::now(),
                    settled_at: None,
                };
                store.payouts.push(payout.clone());
                Ok(payout)
            })
            .await?;

        tracing::info!(
            "Customer {} requested a payout of {}",
            customer_id,
            format_paise_as_rupees(payout.amount)
        );
        Ok(payout)
    }

    /// Queues the shop's whole outstanding platform commission.
    pub async fn request_admin_payout(
        &self,
        shop_id: Uuid,
        proof: PaymentProofDto,
    ) -> Result<PayoutRequest, ServiceError> {
        let admin_upi_id = self.admin_upi_id.clone();

        let payout = self
            .db_client
            .transaction(&[Collection::Payouts], |store| {
                let admin_id = store
                    .users
                    .iter()
                    .find(|u| u.role == UserRole::Admin)
                    .map(|u| u.id)
                    .ok_or_else(|| ServiceError::Other("No admin account".to_string()))?;

                let outstanding =
                    shop_admin_balance(shop_id, &store.sales, &store.payouts).outstanding;
                if outstanding <= 0 {
                    return Err(ServiceError::NothingOwed);
                }

                let payout = PayoutRequest {
                    id: Uuid::new_v4(),
                    kind: PayoutKind::ShopToAdminPayout,
                    user_id: admin_id,
                    shop_id,
                    amount: outstanding,
                    upi_id: admin_upi_id,
                    status: TransactionStatus::Pending,
                    screenshot: non_empty(proof.screenshot),
                    transaction_id: non_empty(proof.transaction_id),
                    created_at: Utc::now(),
                    settled_at: None,
                };
                store.payouts.push(payout.clone());
                Ok(payout)
            })
            .await?;

        tracing::info!(
            "Shop {} sent {} to the admin for confirmation",
            shop_id,
            format_paise_as_rupees(payout.amount)
        );
        Ok(payout)
    }

    /// Settles a pending payout. Shop owners settle their customers'
    /// withdrawals, the admin confirms shop transfers. The settled record
    /// must carry a screenshot or a transaction id.
    pub async fn mark_paid(
        &self,
        actor: &User,
        actor_shop: Option<Uuid>,
        payout_id: Uuid,
        proof: PaymentProofDto,
    ) -> Result<PayoutRequest, ServiceError> {
        self.settle(actor, actor_shop, payout_id, TransactionStatus::Paid, proof)
            .await
    }

    pub async fn reject(
        &self,
        actor: &User,
        actor_shop: Option<Uuid>,
        payout_id: Uuid,
    ) -> Result<PayoutRequest, ServiceError> {
        self.settle(
            actor,
            actor_shop,
            payout_id,
            TransactionStatus::Rejected,
            PaymentProofDto::default(),
        )
        .await
    }

    async fn settle(
        &self,
        actor: &User,
        actor_shop: Option<Uuid>,
        payout_id: Uuid,
        outcome: TransactionStatus,
        proof: PaymentProofDto,
    ) -> Result<PayoutRequest, ServiceError> {
        let actor_id = actor.id;
        let actor_role = actor.role;

        let payout = self
            .db_client
            .transaction(&[Collection::Payouts], |store| {
                let payout = store
                    .payouts
                    .iter_mut()
                    .find(|p| p.id == payout_id)
                    .ok_or(ServiceError::PayoutNotFound(payout_id))?;

                let allowed = match (payout.kind, actor_role) {
                    (PayoutKind::CustomerPayout, UserRole::ShopOwner) => {
                        actor_shop == Some(payout.shop_id)
                    }
                    (PayoutKind::ShopToAdminPayout, UserRole::Admin) => true,
                    _ => false,
                };
                if !allowed {
                    return Err(ServiceError::UnauthorizedShopAccess(actor_id, payout.shop_id));
                }

                if payout.status != TransactionStatus::Pending {
                    return Err(ServiceError::InvalidPayoutStatus(payout_id, payout.status));
                }

                if outcome == TransactionStatus::Paid {
                    if let Some(screenshot) = non_empty(proof.screenshot) {
                        payout.screenshot = Some(screenshot);
                    }
                    if let Some(transaction_id) = non_empty(proof.transaction_id) {
                        payout.transaction_id = Some(transaction_id);
                    }
                    if !payout.has_proof() {
                        return Err(ServiceError::MissingPaymentProof);
                    }
                }

                payout.status = outcome;
                payout.settled_at = Some(Utc::now());
                Ok(payout.clone())
            })
            .await?;

        tracing::info!(
            "Payout {} marked {:?} by {}",
            payout.id,
            payout.status,
            actor_id
        );
        Ok(payout)
    }

    pub async fn shop_customer_payouts(&self, shop_id: Uuid) -> Vec<PayoutRequest> {
        let mut payouts: Vec<_> = self
            .db_client
            .get_shop_payouts(shop_id)
            .await
            .into_iter()
            .filter(|p| p.kind == PayoutKind::CustomerPayout)
            .collect();
        payouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        payouts
    }

    pub async fn shop_admin_payouts(&self, shop_id: Uuid) -> Vec<PayoutRequest> {
        let mut payouts: Vec<_> = self
            .db_client
            .get_shop_payouts(shop_id)
            .await
            .into_iter()
            .filter(|p| p.kind == PayoutKind::ShopToAdminPayout)
            .collect();
        payouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        payouts
    }

    pub async fn customer_payouts(&self, customer_id: Uuid) -> Vec<PayoutRequest> {
        let mut payouts = self
            .db_client
            .get_user_payouts(customer_id, PayoutKind::CustomerPayout)
            .await;
        payouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        payouts
    }

    pub async fn admin_payouts(&self) -> Vec<PayoutRequest> {
        let mut payouts = self
            .db_client
            .get_payouts_by_kind(PayoutKind::ShopToAdminPayout)
            .await;
        payouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        payouts
    }
}
