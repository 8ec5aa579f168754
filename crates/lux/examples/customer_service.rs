//! CRUD operations on an in-memory customer store.
//!
//! cargo run --example customer_service

use http::{Method, StatusCode};
use lux::extract::{Json, Query};
use lux::{handler_fn, HandlerError, Request, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: String,
    first_name: String,
    last_name: String,
    dob: String,
}

#[derive(Deserialize)]
pub struct ById {
    id: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("customer '{0}' not found")]
    NotFound(String),
    #[error("customer '{0}' already exists")]
    Duplicate(String),
}

impl StoreError {
    fn into_handler_error(self) -> HandlerError {
        let status = match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Duplicate(_) => StatusCode::CONFLICT,
        };
        HandlerError::new(status, self)
    }
}

#[derive(Default)]
pub struct CustomerStore {
    customers: Mutex<HashMap<String, Customer>>,
}

impl CustomerStore {
    fn with_customers<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Customer>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut customers = self.customers.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut customers)
    }

    pub fn get(&self, id: &str) -> Result<Customer, StoreError> {
        self.with_customers(|customers| customers.get(id).cloned().ok_or_else(|| StoreError::NotFound(id.to_string())))
    }

    pub fn insert(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.with_customers(|customers| {
            if customers.contains_key(&customer.id) {
                return Err(StoreError::Duplicate(customer.id));
            }
            customers.insert(customer.id.clone(), customer.clone());
            Ok(customer)
        })
    }

    pub fn update(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.with_customers(|customers| match customers.get_mut(&customer.id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(customer)
            }
            None => Err(StoreError::NotFound(customer.id)),
        })
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.with_customers(|customers| customers.remove(id).map(|_| ()).ok_or_else(|| StoreError::NotFound(id.to_string())))
    }
}

fn router(store: Arc<CustomerStore>) -> Router {
    let mut router = Router::new();

    let insert = Arc::clone(&store);
    router
        .post(handler_fn(move |Json(customer): Json<Customer>| -> Result<_, HandlerError> {
            Ok((StatusCode::CREATED, Json(insert.insert(customer).map_err(StoreError::into_handler_error)?)))
        }))
        .header("content-type", mime::APPLICATION_JSON.as_ref())
        .expect("valid header constraint");

    let delete = Arc::clone(&store);
    router.delete(handler_fn(move |Query(by_id): Query<ById>| -> Result<_, HandlerError> {
        delete.delete(&by_id.id).map_err(StoreError::into_handler_error)
    }));

    let get = Arc::clone(&store);
    router.get(handler_fn(move |Query(by_id): Query<ById>| -> Result<_, HandlerError> {
        get.get(&by_id.id).map(Json).map_err(StoreError::into_handler_error)
    }));

    let update = store;
    router
        .put(handler_fn(move |Json(customer): Json<Customer>| -> Result<_, HandlerError> {
            update.update(customer).map(Json).map_err(StoreError::into_handler_error)
        }))
        .header("content-type", mime::APPLICATION_JSON.as_ref())
        .expect("valid header constraint");

    router
}

fn main() {
    let router = router(Arc::new(CustomerStore::default()));

    let customer = r#"{"id":"c-1","firstName":"Ada","lastName":"Lovelace","dob":"1815-12-10"}"#;
    let requests = [
        Request::builder().method(Method::POST).header("Content-Type", "application/json").body(customer),
        Request::builder().method(Method::POST).header("Content-Type", "text/plain").body(customer),
        Request::builder().method(Method::GET).query("id", "c-1"),
        Request::builder().method(Method::GET),
        Request::builder().method(Method::DELETE).query("id", "c-1"),
        Request::builder().method(Method::GET).query("id", "c-1"),
        Request::builder().method(Method::PATCH),
    ];

    for builder in requests {
        let request = builder.build().expect("valid request");
        let response = router.handle_request(&request);
        println!("{} {:?} -> {} {}", request.method(), request.query_parameters(), response.status(), response.body());
    }
}
