//! Product Model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Product record as returned by the backend
///
/// The backend types `id`, `price` and `stock` as numbers; the client only
/// ever displays them, so every field decodes to its display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "scalar_text")]
    pub id: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub category: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub price: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub stock: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub description: String,
}

/// Create / update payload
///
/// Field values are sent exactly as typed (`"price": "12.50"`), the id never
/// travels in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub description: String,
}

impl From<&Product> for ProductPayload {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.clone(),
            stock: product.stock.clone(),
            description: product.description.clone(),
        }
    }
}

/// Decode any JSON scalar into the text a form input would show.
///
/// `null` becomes empty. Integral floats drop their fraction (`10.0` shows
/// as `10`), like a browser rendering a JSON number.
pub fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

/// Display text for a JSON value
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
