// service/sale_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{commission::split_commission, error::ServiceError};
use crate::{
    db::{
        db::{Collection, DBClient, Store},
        referraldb::ReferralExt,
    },
    dtos::{commissiondtos::SubmitLeadDto, shopdtos::RecordSaleDto},
    models::{
        referralmodel::{Lead, LeadStatus, ReferralSale, SaleStatus, WALK_IN_BUYER},
        usermodel::{User, UserRole},
    },
};

/// Prices a sale against the shop's current rate. Fails unless the product
/// and the referring customer both belong to `shop_id`.
fn build_sale(
    store: &Store,
    shop_id: Uuid,
    product_id: Uuid,
    referrer_id: Uuid,
    buyer_name: String,
    lead_id: Option<Uuid>,
) -> Result<ReferralSale, ServiceError> {
    let shop = store
        .shops
        .iter()
        .find(|s| s.id == shop_id)
        .ok_or(ServiceError::ShopNotFound(shop_id))?;

    let product = store
        .products
        .iter()
        .find(|p| p.id == product_id && p.shop_id == shop_id)
        .ok_or(ServiceError::ProductNotFound(product_id))?;

    let referrer = store
        .users
        .iter()
        .find(|u| u.id == referrer_id && u.role == UserRole::Customer)
        .ok_or(ServiceError::UserNotFound(referrer_id))?;
    if referrer.shop_id != Some(shop_id) {
        return Err(ServiceError::UnauthorizedShopAccess(referrer_id, shop_id));
    }

    let split = split_commission(product.customer_commission, shop.commission_rate_bps);

    Ok(ReferralSale {
        id: Uuid::new_v4(),
        shop_id,
        product_id,
        referrer_id,
        buyer_name,
        sale_amount: product.price,
        customer_commission_earned: split.customer_share,
        admin_commission_earned: split.admin_share,
        lead_id,
        status: SaleStatus::Completed,
        created_at: Utc::now(),
    })
}

#[derive(Debug, Clone)]
pub struct SaleService {
    db_client: Arc<DBClient>,
}

impl SaleService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn record_manual_sale(
        &self,
        shop_id: Uuid,
        body: RecordSaleDto,
    ) -> Result<ReferralSale, ServiceError> {
        let buyer_name = body
            .buyer_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| WALK_IN_BUYER.to_string());

        let sale = self
            .db_client
            .transaction(&[Collection::Sales], |store| {
                let sale = build_sale(
                    store,
                    shop_id,
                    body.product_id,
                    body.referrer_id,
                    buyer_name,
                    None,
                )?;
                store.sales.push(sale.clone());
                Ok::<_, ServiceError>(sale)
            })
            .await?;

        tracing::info!(
            "Sale {} recorded for shop {}: customer {} / admin {}",
            sale.id,
            shop_id,
            sale.customer_commission_earned,
            sale.admin_commission_earned
        );
        Ok(sale)
    }

    pub async fn submit_lead(
        &self,
        customer: &User,
        body: SubmitLeadDto,
    ) -> Result<Lead, ServiceError> {
        let shop_id = customer
            .shop_id
            .ok_or(ServiceError::NoShopForUser(customer.id))?;
        let customer_id = customer.id;

        let lead = self
            .db_client
            .transaction(&[Collection::Leads], |store| {
                if !store
                    .products
                    .iter()
                    .any(|p| p.id == body.product_id && p.shop_id == shop_id)
                {
                    return Err(ServiceError::ProductNotFound(body.product_id));
                }

                let lead = Lead {
                    id: Uuid::new_v4(),
                    customer_id,
                    shop_id,
                    product_id: body.product_id,
                    referral_name: body.referral_name.trim().to_string(),
                    referral_mobile: body.referral_mobile,
                    status: LeadStatus::Pending,
                    sale_id: None,
                    created_at: Utc::now(),
                    updated_at: None,
                };
                store.leads.push(lead.clone());
                Ok(lead)
            })
            .await?;

        tracing::info!("Lead {} submitted by customer {}", lead.id, customer_id);
        Ok(lead)
    }

    /// Turns a pending lead into exactly one sale; both writes land together.
    pub async fn convert_lead(
        &self,
        shop_id: Uuid,
        lead_id: Uuid,
    ) -> Result<(Lead, ReferralSale), ServiceError> {
        let (lead, sale) = self
            .db_client
            .transaction(&[Collection::Leads, Collection::Sales], |store| {
                let lead = store
                    .leads
                    .iter()
                    .find(|l| l.id == lead_id && l.shop_id == shop_id)
                    .ok_or(ServiceError::LeadNotFound(lead_id))?;
                if lead.status != LeadStatus::Pending {
                    return Err(ServiceError::InvalidLeadStatus(lead_id, lead.status));
                }

                let sale = build_sale(
                    store,
                    shop_id,
                    lead.product_id,
                    lead.customer_id,
                    lead.referral_name.clone(),
                    Some(lead_id),
                )?;
                store.sales.push(sale.clone());

                let lead = store
                    .leads
                    .iter_mut()
                    .find(|l| l.id == lead_id)
                    .ok_or(ServiceError::LeadNotFound(lead_id))?;
                lead.status = LeadStatus::Converted;
                lead.sale_id = Some(sale.id);
                lead.updated_at = Some(Utc::now());

                Ok((lead.clone(), sale))
            })
            .await?;

        tracing::info!("Lead {} converted into sale {}", lead.id, sale.id);
        Ok((lead, sale))
    }

    pub async fn reject_lead(&self, shop_id: Uuid, lead_id: Uuid) -> Result<Lead, ServiceError> {
        let lead = self
            .db_client
            .transaction(&[Collection::Leads], |store| {
                let lead = store
                    .leads
                    .iter_mut()
                    .find(|l| l.id == lead_id && l.shop_id == shop_id)
                    .ok_or(ServiceError::LeadNotFound(lead_id))?;
                if lead.status != LeadStatus::Pending {
                    return Err(ServiceError::InvalidLeadStatus(lead_id, lead.status));
                }

                lead.status = LeadStatus::Rejected;
                lead.updated_at = Some(Utc::now());
                Ok(lead.clone())
            })
            .await?;

        tracing::info!("Lead {} rejected", lead.id);
        Ok(lead)
    }

    pub async fn shop_sales(&self, shop_id: Uuid) -> Vec<ReferralSale> {
        let mut sales = self.db_client.get_shop_sales(shop_id).await;
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sales
    }

    pub async fn customer_sales(&self, customer_id: Uuid) -> Vec<ReferralSale> {
        let mut sales = self.db_client.get_referrer_sales(customer_id).await;
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sales
    }

    pub async fn shop_leads(&self, shop_id: Uuid) -> Vec<Lead> {
        let mut leads = self.db_client.get_shop_leads(shop_id).await;
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leads
    }

    pub async fn customer_leads(&self, customer_id: Uuid) -> Vec<Lead> {
        let mut leads = self.db_client.get_customer_leads(customer_id).await;
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leads
    }
}
