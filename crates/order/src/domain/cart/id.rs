use shared::errors::ServiceError;
use std::fmt;

pub const DEFAULT_CART_ID: &str = "default_user";
pub const CART_ID_HEADER: &str = "x-cart-id";

const MAX_CART_ID_LEN: usize = 128;

/// Identity of one cart. Carts are not tied to a login; callers pick one
/// explicitly or fall back to the shared default cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartId(String);

impl CartId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ServiceError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ServiceError::Validation(vec![
                "X-Cart-Id must not be blank".into(),
            ]));
        }

        if trimmed.chars().count() > MAX_CART_ID_LEN {
            return Err(ServiceError::Validation(vec![format!(
                "X-Cart-Id must be at most {MAX_CART_ID_LEN} characters"
            )]));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn redis_key(&self) -> String {
        format!("cart:{}", self.0)
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self(DEFAULT_CART_ID.to_string())
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
