use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Recorded requests kept; older ones are dropped first
pub const REQUEST_LOG_CAPACITY: usize = 256;

/// Product as the backend stores and serializes it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredProduct {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
}

/// Validated create/update fields
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
}

/// One request as the mock saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, as sent
    pub uri: String,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug)]
pub enum BuyError {
    NotFound,
    SoldOut,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    products: BTreeMap<u64, StoredProduct>,
    requests: VecDeque<RecordedRequest>,
}

/// Shared mock state
#[derive(Debug)]
pub struct MockState {
    api_key: String,
    inner: Mutex<Inner>,
}

impl MockState {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Insert a product directly, bypassing HTTP
    pub fn seed(
        &self,
        name: &str,
        category: &str,
        price: f64,
        stock: i64,
        description: &str,
    ) -> StoredProduct {
        self.insert(ProductFields {
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock,
            description: description.to_string(),
        })
    }

    pub fn insert(&self, fields: ProductFields) -> StoredProduct {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let product = StoredProduct {
            id,
            name: fields.name,
            category: fields.category,
            price: fields.price,
            stock: fields.stock,
            description: fields.description,
        };
        inner.products.insert(id, product.clone());
        product
    }

    pub fn get(&self, id: u64) -> Option<StoredProduct> {
        self.lock().products.get(&id).cloned()
    }

    pub fn update(&self, id: u64, fields: ProductFields) -> Option<StoredProduct> {
        let mut inner = self.lock();
        let product = inner.products.get_mut(&id)?;
        product.name = fields.name;
        product.category = fields.category;
        product.price = fields.price;
        product.stock = fields.stock;
        product.description = fields.description;
        Some(product.clone())
    }

    pub fn remove(&self, id: u64) -> Option<StoredProduct> {
        self.lock().products.remove(&id)
    }

    pub fn buy(&self, id: u64) -> Result<StoredProduct, BuyError> {
        let mut inner = self.lock();
        let product = inner.products.get_mut(&id).ok_or(BuyError::NotFound)?;
        if product.stock <= 0 {
            return Err(BuyError::SoldOut);
        }
        product.stock -= 1;
        Ok(product.clone())
    }

    /// All products matching `predicate`, in id order
    pub fn filter(&self, predicate: impl Fn(&StoredProduct) -> bool) -> Vec<StoredProduct> {
        self.lock()
            .products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }

    pub fn record(&self, request: RecordedRequest) {
        let mut inner = self.lock();
        if inner.requests.len() == REQUEST_LOG_CAPACITY {
            inner.requests.pop_front();
        }
        inner.requests.push_back(request);
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.iter().cloned().collect()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.back().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: String) -> RecordedRequest {
        RecordedRequest {
            method: "GET".into(),
            uri,
            api_key: None,
            content_type: None,
            body: String::new(),
        }
    }

    #[test]
    fn test_request_log_drops_oldest() {
        let state = MockState::new("k");
        for i in 0..REQUEST_LOG_CAPACITY + 2 {
            state.record(request(format!("/products/{}", i)));
        }

        let requests = state.requests();
        assert_eq!(requests.len(), REQUEST_LOG_CAPACITY);
        assert_eq!(requests[0].uri, "/products/2");
        assert_eq!(
            state.last_request().unwrap().uri,
            format!("/products/{}", REQUEST_LOG_CAPACITY + 1)
        );
    }
}
