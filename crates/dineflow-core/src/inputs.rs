//! Canonical payloads accepted by the HTTP routes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use dineflow_shared::constants::MAX_TAG_LENGTH;

use crate::validation::{FieldKind, FieldSpec, RequestSchema, Rule, Schema};

fn default_true() -> bool {
    true
}

/// `POST /sessions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionInput {
    pub tenant_id: Uuid,

    #[validate(length(min = 2, max = 35, message = "must be between 2 and 35 characters"))]
    pub locale: Option<String>,
}

impl RequestSchema for CreateSessionInput {
    const SCHEMA: Schema = Schema {
        fields: &[
            FieldSpec::required("tenantId", FieldKind::TenantId),
            FieldSpec::optional("locale", FieldKind::Text),
        ],
        rules: &[],
    };
}

/// `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatInput {
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 256, message = "must be between 1 and 256 characters"))]
    pub session_token: String,

    #[validate(length(min = 1, max = 500, message = "must be between 1 and 500 characters"))]
    pub message: String,
}

impl RequestSchema for ChatInput {
    const SCHEMA: Schema = Schema {
        fields: &[
            FieldSpec::required("tenantId", FieldKind::TenantId),
            FieldSpec::required("sessionToken", FieldKind::Text),
            FieldSpec::required("message", FieldKind::Text),
        ],
        rules: &[],
    };
}

/// `GET /menu` query string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub menu: Option<String>,
}

impl RequestSchema for MenuQuery {
    const SCHEMA: Schema = Schema {
        fields: &[
            FieldSpec::required("tenantId", FieldKind::TenantId),
            FieldSpec::optional("menu", FieldKind::Text),
        ],
        rules: &[],
    };
}

/// `POST /menu/items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemInput {
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 120, message = "must be between 1 and 120 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 10_000_000, message = "must be between 0 and 10000000 minor units"))]
    pub price_cents: i64,

    pub currency: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "must contain at most 20 tags"))]
    pub tags: Vec<String>,

    #[serde(default = "default_true")]
    pub is_available: bool,

    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub menu: Option<String>,

    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub section: Option<String>,
}

impl RequestSchema for CreateMenuItemInput {
    const SCHEMA: Schema = Schema {
        fields: &[
            FieldSpec::required("tenantId", FieldKind::TenantId),
            FieldSpec::required("name", FieldKind::Text),
            FieldSpec::optional("description", FieldKind::Text),
            FieldSpec::required("priceCents", FieldKind::Money),
            FieldSpec::required("currency", FieldKind::Currency),
            FieldSpec::optional("tags", FieldKind::Tags { max_item_len: MAX_TAG_LENGTH }),
            FieldSpec::optional("isAvailable", FieldKind::Boolean { default: Some(true) }),
            FieldSpec::optional("menu", FieldKind::Text),
            FieldSpec::optional("section", FieldKind::Text),
        ],
        rules: &[],
    };
}

/// `PATCH /menu/items/{itemId}`; `version` is the value the client last read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemInput {
    pub tenant_id: Uuid,

    #[validate(range(min = 1, message = "must be a positive version"))]
    pub version: i32,

    #[validate(length(min = 1, max = 120, message = "must be between 1 and 120 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 10_000_000, message = "must be between 0 and 10000000 minor units"))]
    pub price_cents: Option<i64>,

    pub currency: Option<String>,

    #[validate(length(max = 20, message = "must contain at most 20 tags"))]
    pub tags: Option<Vec<String>>,

    pub is_available: Option<bool>,
}

impl RequestSchema for UpdateMenuItemInput {
    const SCHEMA: Schema = Schema {
        fields: &[
            FieldSpec::required("tenantId", FieldKind::TenantId),
            FieldSpec::required(
                "version",
                FieldKind::Integer { min: i32::MIN as i64, max: i32::MAX as i64 },
            ),
            FieldSpec::optional("name", FieldKind::Text),
            FieldSpec::optional("description", FieldKind::Text),
            FieldSpec::optional("priceCents", FieldKind::Money),
            FieldSpec::optional("currency", FieldKind::Currency),
            FieldSpec::optional("tags", FieldKind::Tags { max_item_len: MAX_TAG_LENGTH }),
            FieldSpec::optional("isAvailable", FieldKind::Boolean { default: None }),
        ],
        rules: &[Rule::AtLeastOneOf(&[
            "name",
            "description",
            "priceCents",
            "currency",
            "tags",
            "isAvailable",
        ])],
    };
}
