use serde::{Deserialize, Serialize};

use crate::database::row::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub active: i64,
}

impl ApiKey {
    pub fn is_active(&self) -> bool {
        self.active == 1
    }
}
