use super::BowlSnapshot;
use crate::types::{AccountId, BowlId, IdentityToken};
use serde::{Deserialize, Serialize};

/// Who a validated session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub account_id: AccountId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// One request to mix a bowl into a creation.
#[derive(Debug, Clone)]
pub struct MixRequest {
    pub identity_token: IdentityToken,
    pub bowl_id: BowlId,
    pub bowl: BowlSnapshot,
}

impl MixRequest {
    pub fn new(identity_token: IdentityToken, bowl: BowlSnapshot) -> Self {
        Self {
            identity_token,
            bowl_id: bowl.id.clone(),
            bowl,
        }
    }
}
