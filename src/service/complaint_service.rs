// service/complaint_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::error::ServiceError;
use crate::{
    db::{
        db::{Collection, DBClient},
        supportdb::SupportExt,
    },
    dtos::{shopdtos::CreateNoticeDto, supportdtos::CreateComplaintDto},
    models::{
        supportmodel::{AdminNotice, Complaint, ComplaintStatus, NoticeStatus},
        usermodel::User,
    },
};

#[derive(Debug, Clone)]
pub struct ComplaintService {
    db_client: Arc<DBClient>,
}

impl ComplaintService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn file_complaint(
        &self,
        customer: &User,
        body: CreateComplaintDto,
    ) -> Result<Complaint, ServiceError> {
        let shop_id = customer
            .shop_id
            .ok_or(ServiceError::NoShopForUser(customer.id))?;

        let complaint = Complaint {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            shop_id,
            subject: body.subject.trim().to_string(),
            message: body.message,
            status: ComplaintStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        };

        let complaint = self.db_client.save_complaint(complaint).await?;
        tracing::info!(
            "Complaint {} filed by customer {} against shop {}",
            complaint.id,
            customer.id,
            shop_id
        );
        Ok(complaint)
    }

    /// Closes a pending complaint as resolved or dismissed.
    pub async fn update_status(
        &self,
        complaint_id: Uuid,
        status: ComplaintStatus,
    ) -> Result<Complaint, ServiceError> {
        if status == ComplaintStatus::Pending {
            return Err(ServiceError::Validation(
                "A complaint can only be resolved or dismissed".to_string(),
            ));
        }

        let complaint = self
            .db_client
            .transaction(&[Collection::Complaints], |store| {
                let complaint = store
                    .complaints
                    .iter_mut()
                    .find(|c| c.id == complaint_id)
                    .ok_or(ServiceError::ComplaintNotFound(complaint_id))?;
                if complaint.status != ComplaintStatus::Pending {
                    return Err(ServiceError::InvalidComplaintStatus(
                        complaint_id,
                        complaint.status,
                    ));
                }

                complaint.status = status;
                complaint.updated_at = Some(Utc::now());
                Ok(complaint.clone())
            })
            .await?;

        tracing::info!("Complaint {} marked {:?}", complaint.id, complaint.status);
        Ok(complaint)
    }

    pub async fn all_complaints(&self) -> Vec<Complaint> {
        let mut complaints = self.db_client.get_complaints().await;
        complaints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        complaints
    }

    pub async fn customer_complaints(&self, customer_id: Uuid) -> Vec<Complaint> {
        let mut complaints = self.db_client.get_customer_complaints(customer_id).await;
        complaints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        complaints
    }

    pub async fn send_notice(&self, body: CreateNoticeDto) -> Result<AdminNotice, ServiceError> {
        let notice = self
            .db_client
            .transaction(&[Collection::Notices], |store| {
                if !store.shops.iter().any(|s| s.id == body.shop_id) {
                    return Err(ServiceError::ShopNotFound(body.shop_id));
                }

                let notice = AdminNotice {
                    id: Uuid::new_v4(),
                    shop_id: body.shop_id,
                    title: body.title.trim().to_string(),
                    message: body.message,
                    status: NoticeStatus::Unread,
                    created_at: Utc::now(),
                };
                store.notices.push(notice.clone());
                Ok(notice)
            })
            .await?;

        tracing::info!("Notice {} sent to shop {}", notice.id, notice.shop_id);
        Ok(notice)
    }

    pub async fn mark_notice_read(
        &self,
        shop_id: Uuid,
        notice_id: Uuid,
    ) -> Result<AdminNotice, ServiceError> {
        self.db_client
            .mark_notice_read(shop_id, notice_id)
            .await?
            .ok_or(ServiceError::NoticeNotFound(notice_id))
    }

    pub async fn all_notices(&self) -> Vec<AdminNotice> {
        let mut notices = self.db_client.get_notices().await;
        notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notices
    }

    pub async fn shop_notices(&self, shop_id: Uuid) -> Vec<AdminNotice> {
        let mut notices = self.db_client.get_shop_notices(shop_id).await;
        notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::sale_service::tests::fixture;

    fn complaint_body() -> CreateComplaintDto {
        CreateComplaintDto {
            subject: "Commission missing".to_string(),
            message: "My friend bought a phone last week".to_string(),
        }
    }

    #[tokio::test]
    async fn complaint_closes_only_once() {
        let f = fixture().await;
        let service = ComplaintService::new(f.db.clone());

        let complaint = service
            .file_complaint(&f.customer, complaint_body())
            .await
            .unwrap();
        assert_eq!(complaint.shop_id, f.shop.id);
        assert_eq!(complaint.status, ComplaintStatus::Pending);

        let resolved = service
            .update_status(complaint.id, ComplaintStatus::Resolved)
            .await
            .unwrap();
        assert_eq!(resolved.status, ComplaintStatus::Resolved);
        assert!(resolved.updated_at.is_some());

        assert!(matches!(
            service
                .update_status(complaint.id, ComplaintStatus::Dismissed)
                .await,
            Err(ServiceError::InvalidComplaintStatus(_, ComplaintStatus::Resolved))
        ));
    }

    #[tokio::test]
    async fn complaint_cannot_be_reopened() {
        let f = fixture().await;
        let service = ComplaintService::new(f.db.clone());
        let complaint = service
            .file_complaint(&f.customer, complaint_body())
            .await
            .unwrap();

        assert!(matches!(
            service
                .update_status(complaint.id, ComplaintStatus::Pending)
                .await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn notices_are_read_by_their_shop_only() {
        let f = fixture().await;
        let service = ComplaintService::new(f.db.clone());

        let notice = service
            .send_notice(CreateNoticeDto {
                shop_id: f.shop.id,
                title: "Pending dues".to_string(),
                message: "Please settle last month's commission".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(notice.status, NoticeStatus::Unread);

        assert!(matches!(
            service.mark_notice_read(Uuid::new_v4(), notice.id).await,
            Err(ServiceError::NoticeNotFound(_))
        ));
        let read = service.mark_notice_read(f.shop.id, notice.id).await.unwrap();
        assert_eq!(read.status, NoticeStatus::Read);
    }

    #[tokio::test]
    async fn notice_to_unknown_shop_is_refused() {
        let f = fixture().await;
        let service = ComplaintService::new(f.db.clone());

        assert!(matches!(
            service
                .send_notice(CreateNoticeDto {
                    shop_id: Uuid::new_v4(),
                    title: "Hello".to_string(),
                    message: "World".to_string(),
                })
                .await,
            Err(ServiceError::ShopNotFound(_))
        ));
    }
}
