// db/supportdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::{Collection, DBClient, StoreError};
use crate::models::supportmodel::{AdminNotice, Complaint, NoticeStatus};

#[async_trait]
pub trait SupportExt {
    async fn get_complaints(&self) -> Vec<Complaint>;

    async fn get_customer_complaints(&self, customer_id: Uuid) -> Vec<Complaint>;

    async fn save_complaint(&self, complaint: Complaint) -> Result<Complaint, StoreError>;

    async fn get_notices(&self) -> Vec<AdminNotice>;

    async fn get_shop_notices(&self, shop_id: Uuid) -> Vec<AdminNotice>;

    async fn mark_notice_read(
        &self,
        shop_id: Uuid,
        notice_id: Uuid,
    ) -> Result<Option<AdminNotice>, StoreError>;
}

#[async_trait]
impl SupportExt for DBClient {
    async fn get_complaints(&self) -> Vec<Complaint> {
        self.read(|store| store.complaints.clone()).await
    }

    async fn get_customer_complaints(&self, customer_id: Uuid) -> Vec<Complaint> {
        self.read(|store| {
            store
                .complaints
                .iter()
                .filter(|c| c.customer_id == customer_id)
                .cloned()
                .collect()
        })
        .await
    }

    async fn save_complaint(&self, complaint: Complaint) -> Result<Complaint, StoreError> {
        self.transaction(&[Collection::Complaints], |store| {
            store.complaints.push(complaint.clone());
            Ok(complaint)
        })
        .await
    }

    async fn get_notices(&self) -> Vec<AdminNotice> {
        self.read(|store| store.notices.clone()).await
    }

    async fn get_shop_notices(&self, shop_id: Uuid) -> Vec<AdminNotice> {
        self.read(|store| {
            store
                .notices
                .iter()
                .filter(|n| n.shop_id == shop_id)
                .cloned()
                .collect()
        })
        .await
    }

    async fn mark_notice_read(
        &self,
        shop_id: Uuid,
        notice_id: Uuid,
    ) -> Result<Option<AdminNotice>, StoreError> {
        self.transaction(&[Collection::Notices], |store| {
            Ok(store
                .notices
                .iter_mut()
                .find(|n| n.id == notice_id && n.shop_id == shop_id)
                .map(|notice| {
                    notice.status = NoticeStatus::Read;
                    notice.clone()
                }))
        })
        .await
    }
}
