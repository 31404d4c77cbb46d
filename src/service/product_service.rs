// service/product_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::error::ServiceError;
use crate::{
    db::{db::DBClient, productdb::ProductExt},
    dtos::shopdtos::CreateProductDto,
    models::productmodel::Product,
    utils::currency::rupees_to_paise,
};

#[derive(Debug, Clone)]
pub struct ProductService {
    db_client: Arc<DBClient>,
}

impl ProductService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn add_product(
        &self,
        shop_id: Uuid,
        body: CreateProductDto,
    ) -> Result<Product, ServiceError> {
        let price = rupees_to_paise(body.price)?;
        let customer_commission = rupees_to_paise(body.commission)?;
        let down_payment = body.down_payment.map(rupees_to_paise).transpose()?;
        let emi_amount = body.emi_amount.map(rupees_to_paise).transpose()?;

        if customer_commission > price {
            return Err(ServiceError::Validation(
                "Commission cannot exceed the product price".to_string(),
            ));
        }

        let product = Product {
            id: Uuid::new_v4(),
            shop_id,
            name: body.name.trim().to_string(),
            brand: body.brand,
            price,
            customer_commission,
            down_payment,
            emi_amount,
            emi_months: body.emi_months,
            front_image: body.front_image,
            back_image: body.back_image,
            created_at: Utc::now(),
        };

        let product = self.db_client.save_product(product).await?;
        tracing::info!("Product {} added to shop {}", product.id, shop_id);
        Ok(product)
    }

    pub async fn remove_product(&self, shop_id: Uuid, product_id: Uuid) -> Result<(), ServiceError> {
        if !self.db_client.delete_product(shop_id, product_id).await? {
            return Err(ServiceError::ProductNotFound(product_id));
        }

        tracing::info!("Product {} removed from shop {}", product_id, shop_id);
        Ok(())
    }

    pub async fn list_products(&self, shop_id: Uuid) -> Vec<Product> {
        let mut products = self.db_client.get_shop_products(shop_id).await;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::currency::CurrencyError;

    fn body(price: f64, commission: f64) -> CreateProductDto {
        CreateProductDto {
            name: " iPhone 15 ".to_string(),
            brand: "Apple".to_string(),
            price,
            commission,
            down_payment: Some(5_000.0),
            emi_amount: None,
            emi_months: None,
            front_image: None,
            back_image: None,
        }
    }

    #[tokio::test]
    async fn amounts_are_stored_in_paise() {
        let service = ProductService::new(Arc::new(DBClient::in_memory()));
        let shop_id = Uuid::new_v4();

        let product = service.add_product(shop_id, body(79_999.0, 500.0)).await.unwrap();
        assert_eq!(product.name, "iPhone 15");
        assert_eq!(product.price, 7_999_900);
        assert_eq!(product.customer_commission, 50_000);
        assert_eq!(product.down_payment, Some(500_000));
        assert_eq!(service.list_products(shop_id).await.len(), 1);
    }

    #[tokio::test]
    async fn negative_down_payment_is_rejected() {
        let service = ProductService::new(Arc::new(DBClient::in_memory()));
        let shop_id = Uuid::new_v4();
        let mut body = body(100.0, 10.0);
        body.down_payment = Some(-5.0);

        let err = service.add_product(shop_id, body).await.unwrap_err();
        assert!(matches!(err, ServiceError::Amount(CurrencyError::Negative)));
        assert!(service.list_products(shop_id).await.is_empty());
    }

    #[tokio::test]
    async fn pool_larger_than_price_is_rejected() {
        let service = ProductService::new(Arc::new(DBClient::in_memory()));

        let err = service
            .add_product(Uuid::new_v4(), body(100.0, 150.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn removing_another_shops_product_is_not_found() {
        let service = ProductService::new(Arc::new(DBClient::in_memory()));
        let shop_id = Uuid::new_v4();
        let product = service.add_product(shop_id, body(100.0, 10.0)).await.unwrap();

        assert!(matches!(
            service.remove_product(Uuid::new_v4(), product.id).await,
            Err(ServiceError::ProductNotFound(_))
        ));
        service.remove_product(shop_id, product.id).await.unwrap();
        assert!(service.list_products(shop_id).await.is_empty());
    }
}
