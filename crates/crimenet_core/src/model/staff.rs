//! Staff profile record and its patch type.

use super::{non_empty_or, Record, RecordKind, ValidationError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STAFF_NAME: &str = "Unnamed";
pub const DEFAULT_STAFF_ROLE: &str = "Contributor";
pub const DEFAULT_STAFF_AVATAR: &str = "https://i.pravatar.cc/150?img=50";
pub const DEFAULT_STAFF_BANNER: &str = "https://picsum.photos/seed/staff/1200/300";

/// Public profile of a newsroom member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: String,
    pub name: String,
    pub role: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Banner image URL.
    pub banner: String,
    pub bio: String,
    pub contact: String,
}

/// Field-wise partial update for a [`StaffProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl StaffPatch {
    /// Patch that only sets the display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.avatar.is_none()
            && self.banner.is_none()
            && self.bio.is_none()
            && self.contact.is_none()
    }
}

impl StaffProfile {
    /// Builds a new profile from creation input, filling placeholder media.
    pub fn from_patch(id: String, patch: StaffPatch) -> Self {
        Self {
            id,
            name: non_empty_or(patch.name, DEFAULT_STAFF_NAME),
            role: non_empty_or(patch.role, DEFAULT_STAFF_ROLE),
            avatar: non_empty_or(patch.avatar, DEFAULT_STAFF_AVATAR),
            banner: non_empty_or(patch.banner, DEFAULT_STAFF_BANNER),
            bio: patch.bio.unwrap_or_default(),
            contact: patch.contact.unwrap_or_default(),
        }
    }
}

impl Record for StaffProfile {
    type Patch = StaffPatch;

    const KIND: RecordKind = RecordKind::Staff;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: StaffPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(banner) = patch.banner {
            self.banner = banner;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId {
                kind: RecordKind::Staff,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{StaffPatch, StaffProfile, DEFAULT_STAFF_AVATAR, DEFAULT_STAFF_ROLE};
    use crate::model::Record;

    #[test]
    fn from_patch_uses_placeholder_media() {
        let profile = StaffProfile::from_patch("staff-9".to_string(), StaffPatch::named("Ada"));
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.role, DEFAULT_STAFF_ROLE);
        assert_eq!(profile.avatar, DEFAULT_STAFF_AVATAR);
        assert!(profile.bio.is_empty());
    }

    #[test]
    fn apply_patch_keeps_id_and_untouched_fields() {
        let mut profile = StaffProfile::from_patch("staff-9".to_string(), StaffPatch::named("Ada"));
        profile.apply_patch(StaffPatch {
            bio: Some("Covers ransomware.".to_string()),
            ..StaffPatch::default()
        });

        assert_eq!(profile.id, "staff-9");
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.bio, "Covers ransomware.");
    }
}
