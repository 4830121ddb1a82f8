use crate::state::{BuyError, MockState, ProductFields, RecordedRequest, StoredProduct};
use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Largest request body the mock accepts
pub const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<T, ApiError>;

/// Error with only a `message`, as the auth and not-found paths send it
fn message_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "message": message.into() })))
}

/// Validation error with the full body
fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status_code": 400,
            "error": "Bad Request",
            "message": message.into(),
        })),
    )
}

fn require_api_key(state: &MockState, headers: &HeaderMap) -> ApiResult<()> {
    let key = headers.get(API_KEY_HEADER).and_then(|h| h.to_str().ok());
    match key {
        Some(key) if key == state.api_key() => Ok(()),
        _ => Err(message_error(
            StatusCode::UNAUTHORIZED,
            "Invalid or missing token",
        )),
    }
}

fn require_json(headers: &HeaderMap) -> ApiResult<()> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    if content_type == "application/json" {
        return Ok(());
    }
    tracing::error!("Invalid Content-Type: {}", content_type);
    Err(message_error(
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        "Content-Type must be application/json",
    ))
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.parse().ok()
}

fn parse_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_stock(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Validate a create/update body the way the backend does
fn parse_fields(body: &[u8]) -> ApiResult<ProductFields> {
    let data: Value = serde_json::from_slice(body).map_err(|_| {
        bad_request("Invalid product: body of request contained bad or no data")
    })?;
    let Some(object) = data.as_object() else {
        return Err(bad_request(
            "Invalid product: body of request contained bad or no data",
        ));
    };

    let field = |key: &str| {
        object
            .get(key)
            .ok_or_else(|| bad_request(format!("Invalid product: missing {}", key)))
    };
    let name = field("name")?;
    let stock = field("stock")?;
    let price = field("price")?;
    let description = field("description")?;
    let category = field("category")?;

    if name.as_str() == Some("") || category.as_str() == Some("") {
        return Err(bad_request("Field cannot be empty string"));
    }

    Ok(ProductFields {
        name: text(name),
        category: text(category),
        price: parse_price(price)
            .ok_or_else(|| bad_request("Invalid product: price must be a number"))?,
        stock: parse_stock(stock)
            .ok_or_else(|| bad_request("Invalid product: stock must be an integer"))?,
        description: text(description),
    })
}

async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": 200, "message": "Healthy" }))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    name: Option<String>,
    category: Option<String>,
    price: Option<String>,
}

/// Category wins over name, name over price band; no filter lists all
async fn list_products(
    State(state): State<Arc<MockState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<StoredProduct>>> {
    tracing::info!("Request for product list");
    let present = |v: Option<String>| v.filter(|s| !s.is_empty());

    let products = if let Some(category) = present(params.category) {
        state.filter(|p| p.category == category)
    } else if let Some(name) = present(params.name) {
        state.filter(|p| p.name == name)
    } else if let Some(price) = present(params.price) {
        let band: i64 = price
            .parse()
            .map_err(|_| bad_request("Input payload validation failed"))?;
        match band {
            1 => state.filter(|p| p.price > 0.0 && p.price <= 25.0),
            2 => state.filter(|p| p.price > 25.0 && p.price <= 50.0),
            3 => state.filter(|p| p.price > 50.0 && p.price <= 75.0),
            _ => state.filter(|_| true),
        }
    } else {
        state.filter(|_| true)
    };

    Ok(Json(products))
}

async fn create_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    require_api_key(&state, &headers)?;
    tracing::info!("Request to create a product");
    require_json(&headers)?;

    let product = state.insert(parse_fields(&body)?);
    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    )
        .into_response())
}

async fn get_product(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StoredProduct>> {
    tracing::info!("Request for product with id: {}", id);
    parse_id(&id)
        .and_then(|pid| state.get(pid))
        .map(Json)
        .ok_or_else(|| {
            message_error(
                StatusCode::NOT_FOUND,
                format!("Product with id '{}' was not found.", id),
            )
        })
}

async fn update_product(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<StoredProduct>> {
    require_api_key(&state, &headers)?;
    tracing::info!("Request to update product with id: {}", id);
    require_json(&headers)?;

    let not_found = || {
        message_error(
            StatusCode::NOT_FOUND,
            format!("Product with id {} was not found.", id),
        )
    };
    let pid = parse_id(&id)
        .filter(|pid| state.get(*pid).is_some())
        .ok_or_else(not_found)?;
    let fields = parse_fields(&body)?;
    state.update(pid, fields).map(Json).ok_or_else(not_found)
}

async fn delete_product(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    require_api_key(&state, &headers)?;
    tracing::info!("Request to delete product with the id [{}] provided", id);
    if let Some(pid) = parse_id(&id) {
        state.remove(pid);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn buy_product(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StoredProduct>> {
    tracing::info!("Request for buy a product");
    let pid = parse_id(&id).ok_or(BuyError::NotFound);
    match pid.and_then(|pid| state.buy(pid)) {
        Ok(product) => {
            tracing::info!("Product with id [{}] has been bought!", product.id);
            Ok(Json(product))
        }
        Err(BuyError::NotFound) => Err(message_error(
            StatusCode::NOT_FOUND,
            format!("Product with id '{}' was not found.", id),
        )),
        Err(BuyError::SoldOut) => Err(message_error(
            StatusCode::CONFLICT,
            format!("Product with id '{}' has been sold out!", id),
        )),
    }
}

/// Record method, URI, key and body of every request before routing it
async fn record_request(
    State(state): State<Arc<MockState>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Rejected {} {}: {}", parts.method, parts.uri, e);
            return message_error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
                .into_response();
        }
    };

    let header_value = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
    };
    state.record(RecordedRequest {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        api_key: header_value(API_KEY_HEADER),
        content_type: header_value(header::CONTENT_TYPE.as_str()),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/buy", put(buy_product))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields_coerces_text_numbers() {
        let fields = parse_fields(
            br#"{"name":"Lamp","category":"electronic","price":"12.5","stock":"3","description":""}"#,
        )
        .unwrap();
        assert_eq!(fields.price, 12.5);
        assert_eq!(fields.stock, 3);
    }

    #[test]
    fn test_parse_fields_rejects_empty_name() {
        let (status, Json(body)) = parse_fields(
            br#"{"name":"","category":"pet","price":"1","stock":"1","description":""}"#,
        )
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Field cannot be empty string");
    }

    #[test]
    fn test_parse_fields_reports_missing_key() {
        let (_, Json(body)) =
            parse_fields(br#"{"name":"Lamp","category":"pet"}"#).unwrap_err();
        assert_eq!(body["message"], "Invalid product: missing stock");
    }

    #[test]
    fn test_parse_fields_rejects_bad_price() {
        let (_, Json(body)) = parse_fields(
            br#"{"name":"Lamp","category":"pet","price":"cheap","stock":"1","description":""}"#,
        )
        .unwrap_err();
        assert_eq!(body["message"], "Invalid product: price must be a number");
    }
}
