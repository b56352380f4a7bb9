use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account row owned by external identity management; read-only here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
}
