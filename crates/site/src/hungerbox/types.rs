//! Wire types for the food service API.
//!
//! The service is loose about its JSON: order fields are all strings on the
//! way out, numbers sometimes come back as strings, and a few endpoints
//! answer with a plain-text body. Everything crossing the boundary is
//! deserialized into the structs below and converted to domain types in
//! [`super::conversions`]; nothing downstream touches raw JSON.

use serde::{Deserialize, Serialize};

/// A menu item as served by the `counterNfood` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemWire {
    pub fid: String,
    pub fname: String,
    pub price: f64,
}

/// Login request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub password: String,
    pub contactnumber: String,
}

/// Signup request body.
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub contactnumber: String,
}

/// Username update request body.
#[derive(Debug, Serialize)]
pub struct UpdateUsernameRequest {
    pub username: String,
    pub contactnumber: String,
}

/// Password update request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub contactnumber: String,
    pub old_password: String,
    pub new_password: String,
}

/// Order submission body. The service expects every field as a string.
#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub userid: String,
    pub username: String,
    pub fooditems: String,
    pub price: String,
    pub billid: String,
    pub date: String,
    pub time: String,
}

/// A value that may arrive as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    /// Best-effort numeric reading; `None` if the string does not parse.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse().ok(),
        }
    }

    /// Best-effort integer reading.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) => {
                let rounded = n.round();
                (rounded.abs() < f64::from(i32::MAX)).then_some(rounded as i32)
            }
            Self::String(s) => s.trim().parse().ok(),
        }
    }
}

/// A stored order as returned by `orderDetails`.
///
/// Every field is optional: the service keeps whatever it was sent, and
/// historical rows are not always complete.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecordWire {
    #[serde(default)]
    pub billid: Option<String>,
    #[serde(default)]
    pub userid: Option<NumberOrString>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub fooditems: Option<String>,
    #[serde(default)]
    pub price: Option<NumberOrString>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

/// Response of `getUserDetailsForOrder`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetailsWire {
    #[serde(default, rename = "userId")]
    pub user_id: Option<NumberOrString>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Response of `getUser`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountWire {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "contactNumber")]
    pub contactnumber: Option<String>,
}
