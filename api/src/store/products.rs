use payloads::ProductId;
use payloads::requests::ProductDetails;
use payloads::responses::Product;

use super::{Store, StoreError, new_id, newest_first};

fn image_url(
    product_id: &ProductId,
    details: &ProductDetails,
) -> Option<String> {
    let image = details.image.as_ref()?;
    Some(format!("/uploads/products/{product_id}-{}", image.file_name))
}

fn apply(product: &mut Product, details: &ProductDetails) {
    product.category_name = details.category_name.clone();
    product.is_daily_claim = details.is_daily_claim;
    product.product_name = details.product_name.clone();
    product.price = details.price;
    product.cycle_type = details.cycle_type;
    product.cycle_value = details.cycle_value;
    product.daily = details.daily;
    product.hour = details.hour;
    product.badge = details.badge;
    product.purchase_type = details.purchase_type.clone();
    product.product_explanation = details.product_explanation.clone();
}

impl Store {
    /// Products, newest first. A `limit` of zero means all of them.
    pub fn list_products(&self, limit: usize) -> Vec<Product> {
        let products = newest_first(&self.lock().products);
        match limit {
            0 => products,
            limit => products.into_iter().take(limit).collect(),
        }
    }

    pub fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Product, StoreError> {
        self.lock()
            .products
            .iter()
            .find(|p| &p.id == product_id)
            .cloned()
            .ok_or(StoreError::ProductNotFound)
    }

    pub fn create_product(
        &self,
        details: &ProductDetails,
    ) -> Result<Product, StoreError> {
        let id = ProductId(new_id());
        let mut product = Product {
            image_url: image_url(&id, details),
            id,
            category_name: String::new(),
            is_daily_claim: false,
            product_name: String::new(),
            price: Default::default(),
            cycle_type: Default::default(),
            cycle_value: 0,
            daily: Default::default(),
            hour: Default::default(),
            badge: Default::default(),
            purchase_type: String::new(),
            product_explanation: Vec::new(),
        };
        apply(&mut product, details);
        self.lock().products.push(product.clone());
        Ok(product)
    }

    /// Replace a product's fields. The stored image is kept unless a new
    /// one is uploaded.
    pub fn update_product(
        &self,
        product_id: &ProductId,
        details: &ProductDetails,
    ) -> Result<Product, StoreError> {
        let mut data = self.lock();
        let product = data
            .products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or(StoreError::ProductNotFound)?;
        apply(product, details);
        if let Some(url) = image_url(product_id, details) {
            product.image_url = Some(url);
        }
        Ok(product.clone())
    }

    pub fn delete_product(
        &self,
        product_id: &ProductId,
    ) -> Result<(), StoreError> {
        let mut data = self.lock();
        let before = data.products.len();
        data.products.retain(|p| &p.id != product_id);
        if data.products.len() == before {
            return Err(StoreError::ProductNotFound);
        }
        Ok(())
    }
}
