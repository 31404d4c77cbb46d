// db/productdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::{Collection, DBClient, StoreError};
use crate::models::productmodel::Product;

#[async_trait]
pub trait ProductExt {
    async fn get_shop_products(&self, shop_id: Uuid) -> Vec<Product>;

    async fn save_product(&self, product: Product) -> Result<Product, StoreError>;

    /// Returns whether a product of `shop_id` was removed.
    async fn delete_product(&self, shop_id: Uuid, product_id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
impl ProductExt for DBClient {
    async fn get_shop_products(&self, shop_id: Uuid) -> Vec<Product> {
        self.read(|store| {
            store
                .products
                .iter()
                .filter(|p| p.shop_id == shop_id)
                .cloned()
                .collect()
        })
        .await
    }

    async fn save_product(&self, product: Product) -> Result<Product, StoreError> {
        self.transaction(&[Collection::Products], |store| {
            store.products.push(product.clone());
            Ok(product)
        })
        .await
    }

    async fn delete_product(&self, shop_id: Uuid, product_id: Uuid) -> Result<bool, StoreError> {
        self.transaction(&[Collection::Products], |store| {
            let before = store.products.len();
            store
                .products
                .retain(|p| !(p.id == product_id && p.shop_id == shop_id));
            Ok(store.products.len() != before)
        })
        .await
    }
}
