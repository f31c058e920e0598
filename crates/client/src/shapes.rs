//! Normalization of the backend's ambiguous response shapes.
//!
//! Two contracts come back in several historical shapes: the owned-business
//! list (paged `content`, bare array, or `items` wrapper) and the created
//! business id (`id`, `businessId`, or `business.id`). Each has ONE total
//! normalization here; anything else is a typed error, never a silent empty
//! value.

use merchantdesk_core::BusinessId;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A response body matched none of the known shapes for a contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {contract} response shape")]
pub struct UnrecognizedResponseShape {
    contract: &'static str,
}

impl UnrecognizedResponseShape {
    pub fn new(contract: &'static str) -> Self {
        Self { contract }
    }

    pub fn contract(&self) -> &'static str {
        self.contract
    }
}

/// Normalize a list-bearing response: bare `[...]`, paged `{"content": [...]}`,
/// or wrapped `{"items": [...]}`.
pub fn normalize_list<T: DeserializeOwned>(
    body: &Value,
    contract: &'static str,
) -> Result<Vec<T>, UnrecognizedResponseShape> {
    let items = if body.is_array() {
        body
    } else if let Some(content) = body.get("content").filter(|v| v.is_array()) {
        content
    } else if let Some(items) = body.get("items").filter(|v| v.is_array()) {
        items
    } else {
        return Err(UnrecognizedResponseShape::new(contract));
    };

    serde_json::from_value(items.clone()).map_err(|err| {
        tracing::warn!("{contract} list element failed to deserialize: {err}");
        UnrecognizedResponseShape::new(contract)
    })
}

/// Extract a created business id from `id`, `businessId`, or `business.id`.
pub fn created_business_id(body: &Value) -> Result<BusinessId, UnrecognizedResponseShape> {
    const CONTRACT: &str = "created business id";

    let candidates = [
        body.get("id"),
        body.get("businessId"),
        body.get("business").and_then(|b| b.get("id")),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Some(id) = candidate.as_i64() {
            return Ok(BusinessId::new(id));
        }
        if let Some(id) = candidate.as_str().and_then(|s| s.parse::<BusinessId>().ok()) {
            return Ok(id);
        }
    }

    Err(UnrecognizedResponseShape::new(CONTRACT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_normalizes() {
        let body = json!([{"v": 1}, {"v": 2}]);
        let items: Vec<Value> = normalize_list(&body, "test list").unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn paged_content_normalizes() {
        let body = json!({"content": [{"v": 1}], "totalPages": 3});
        let items: Vec<Value> = normalize_list(&body, "test list").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn items_wrapper_normalizes() {
        let body = json!({"items": []});
        let items: Vec<Value> = normalize_list(&body, "test list").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn unknown_list_shape_is_a_typed_error() {
        let body = json!({"businesses": []});
        let err = normalize_list::<Value>(&body, "owned business list").unwrap_err();
        assert_eq!(err.contract(), "owned business list");
    }

    #[test]
    fn created_id_under_all_three_keys() {
        for body in [
            json!({"id": 77}),
            json!({"businessId": 77}),
            json!({"business": {"id": 77}}),
            json!({"id": "77"}),
        ] {
            assert_eq!(created_business_id(&body).unwrap(), BusinessId::new(77));
        }
    }

    #[test]
    fn created_id_prefers_the_first_matching_key() {
        let body = json!({"id": 1, "businessId": 2});
        assert_eq!(created_business_id(&body).unwrap(), BusinessId::new(1));
    }

    #[test]
    fn missing_id_is_a_typed_error() {
        let err = created_business_id(&json!({"status": "created"})).unwrap_err();
        assert_eq!(err.contract(), "created business id");
    }
}
