//! Role classification and capability filters
//!
//! A [`RoleSnapshot`] is derived once per inbound message and lives only
//! for that message's handling. Router groups are gated by
//! [`CapabilityFilter`] implementations evaluated against the snapshot,
//! so group access rules are plain values instead of framework magic.

use teloxide::types::User;

/// Fallback locale when the sender declares none.
pub const DEFAULT_LOCALE: &str = "en";

/// Per-message classification of the sender. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSnapshot {
    pub is_admin: bool,
    pub is_premium: bool,
    pub is_bot: bool,
    pub locale: String,
}

impl RoleSnapshot {
    /// Snapshot for a message with no identifiable sender.
    pub fn anonymous() -> Self {
        Self {
            is_admin: false,
            is_premium: false,
            is_bot: false,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Derives the role snapshot for a message sender.
///
/// Pure and infallible: absent fields default instead of erroring.
pub fn classify(sender: Option<&User>, admin_id: i64) -> RoleSnapshot {
    let Some(user) = sender else {
        return RoleSnapshot::anonymous();
    };

    let sender_id = i64::try_from(user.id.0).ok();
    let locale = user
        .language_code
        .as_deref()
        .filter(|code| !code.is_empty())
        .unwrap_or(DEFAULT_LOCALE)
        .to_string();

    RoleSnapshot {
        is_admin: sender_id == Some(admin_id),
        is_premium: user.is_premium,
        is_bot: user.is_bot,
        locale,
    }
}

/// Boolean gate deciding whether a router group may see a message.
pub trait CapabilityFilter: Send + Sync {
    fn allows(&self, role: &RoleSnapshot) -> bool;
}

/// Gate of the root group: accepts everyone.
pub struct AlwaysAllow;

/// Gate of the admin group: sender must be the configured admin.
pub struct IsAdmin;

/// Gate of the premium group: sender must carry the premium flag.
pub struct IsPremium;

impl CapabilityFilter for AlwaysAllow {
    fn allows(&self, _role: &RoleSnapshot) -> bool {
        true
    }
}

impl CapabilityFilter for IsAdmin {
    fn allows(&self, role: &RoleSnapshot) -> bool {
        role.is_admin
    }
}

impl CapabilityFilter for IsPremium {
    fn allows(&self, role: &RoleSnapshot) -> bool {
        role.is_premium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UserId;

    fn user(id: u64, premium: bool, lang: Option<&str>) -> User {
        User {
            id: UserId(id),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: None,
            username: Some("testuser".to_string()),
            language_code: lang.map(str::to_owned),
            is_premium: premium,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn classifies_admin_by_exact_id() {
        let u = user(42, false, Some("ru"));
        let role = classify(Some(&u), 42);
        assert!(role.is_admin);
        assert!(!role.is_premium);
        assert_eq!(role.locale, "ru");

        let role = classify(Some(&u), 43);
        assert!(!role.is_admin);
    }

    #[test]
    fn missing_sender_defaults_everything() {
        let role = classify(None, 42);
        assert_eq!(role, RoleSnapshot::anonymous());
    }

    #[test]
    fn empty_language_code_falls_back_to_en() {
        let u = user(7, true, Some(""));
        let role = classify(Some(&u), 42);
        assert_eq!(role.locale, "en");
        assert!(role.is_premium);

        let u = user(7, false, None);
        assert_eq!(classify(Some(&u), 42).locale, "en");
    }

    #[test]
    fn filters_gate_on_role_flags() {
        let admin = RoleSnapshot {
            is_admin: true,
            ..RoleSnapshot::anonymous()
        };
        let premium = RoleSnapshot {
            is_premium: true,
            ..RoleSnapshot::anonymous()
        };
        let plain = RoleSnapshot::anonymous();

        assert!(AlwaysAllow.allows(&plain));
        assert!(AlwaysAllow.allows(&admin));

        assert!(IsAdmin.allows(&admin));
        assert!(!IsAdmin.allows(&premium));
        assert!(!IsAdmin.allows(&plain));

        assert!(IsPremium.allows(&premium));
        assert!(!IsPremium.allows(&admin));
    }
}
