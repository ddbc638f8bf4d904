use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storedesk_core::{Entity, ServiceError, ServiceResult, StoreId, UserId};

use crate::input::{required, supplied};

/// Store status lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    #[default]
    Active,
    Inactive,
}

impl FromStr for StoreStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ServiceError::validation("status must be one of: active, inactive")),
        }
    }
}

/// A store owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub owner_id: UserId,
    pub status: StoreStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Store {
    type Id = StoreId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Create request for a store, as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Only honoured for admins; store owners always own what they create.
    pub owner_id: Option<String>,
}

/// A store draft whose required fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidStoreDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Raw `ownerId` as sent; only admins' requests are parsed.
    pub requested_owner: Option<String>,
}

impl StoreDraft {
    pub fn validate(&self) -> ServiceResult<ValidStoreDraft> {
        let requested_owner = supplied(&self.owner_id).map(str::to_string);
        Ok(ValidStoreDraft {
            name: required(&self.name, "name")?.to_string(),
            description: required(&self.description, "description")?.to_string(),
            category: required(&self.category, "category")?.to_string(),
            requested_owner,
        })
    }
}

impl Store {
    /// Build a new active store. `owner_id` must already be resolved by the policy.
    pub fn create(draft: ValidStoreDraft, owner_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: StoreId::new(),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            owner_id,
            status: StoreStatus::Active,
            created_at: now,
            updated_at: None,
        }
    }

    /// Merge supplied fields and stamp `updated_at`.
    ///
    /// Validation runs before any field is touched, so a rejected patch leaves
    /// the store unchanged.
    pub fn apply_patch(&mut self, patch: &StorePatch, now: DateTime<Utc>) -> ServiceResult<()> {
        let status = supplied(&patch.status).map(str::parse::<StoreStatus>).transpose()?;

        if let Some(name) = supplied(&patch.name) {
            self.name = name.to_string();
        }
        if let Some(description) = supplied(&patch.description) {
            self.description = description.to_string();
        }
        if let Some(category) = supplied(&patch.category) {
            self.category = category.to_string();
        }
        if let Some(status) = status {
            self.status = status;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}

/// Partial update for a store. Absent or blank fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn draft() -> StoreDraft {
        StoreDraft {
            name: Some("Tech Paradise".into()),
            description: Some("Gadgets".into()),
            category: Some("Electronics".into()),
            owner_id: None,
        }
    }

    #[test]
    fn missing_required_field_fails() {
        let mut d = draft();
        d.category = Some(" ".into());
        assert!(matches!(d.validate(), Err(ServiceError::ValidationFailed(_))));
    }

    #[test]
    fn owner_id_is_kept_raw_until_resolved() {
        let mut d = draft();
        d.owner_id = Some(" nope ".into());
        assert_eq!(d.validate().unwrap().requested_owner.as_deref(), Some("nope"));

        d.owner_id = Some("  ".into());
        assert_eq!(d.validate().unwrap().requested_owner, None);
    }

    #[test]
    fn new_store_is_active_without_updated_at() {
        let owner = UserId::new();
        let store = Store::create(draft().validate().unwrap(), owner, t0());
        assert_eq!(store.status, StoreStatus::Active);
        assert_eq!(store.owner_id, owner);
        assert_eq!(store.updated_at, None);
    }

    #[test]
    fn patch_merges_only_supplied_fields() {
        let mut store = Store::create(draft().validate().unwrap(), UserId::new(), t0());
        let patch = StorePatch {
            status: Some("inactive".into()),
            name: Some("".into()),
            ..Default::default()
        };
        store.apply_patch(&patch, t0() + Duration::minutes(5)).unwrap();

        assert_eq!(store.name, "Tech Paradise");
        assert_eq!(store.status, StoreStatus::Inactive);
        assert_eq!(store.created_at, t0());
        assert_eq!(store.updated_at, Some(t0() + Duration::minutes(5)));
    }

    #[test]
    fn bad_status_leaves_store_untouched() {
        let mut store = Store::create(draft().validate().unwrap(), UserId::new(), t0());
        let before = store.clone();
        let patch = StorePatch {
            name: Some("Renamed".into()),
            status: Some("closed".into()),
            ..Default::default()
        };
        assert!(store.apply_patch(&patch, t0()).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn wire_format_is_camel_case() {
        let store = Store::create(draft().validate().unwrap(), UserId::new(), t0());
        let json = serde_json::to_value(&store).unwrap();
        assert!(json.get("ownerId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_none());
        assert_eq!(json["status"], "active");
    }
}
