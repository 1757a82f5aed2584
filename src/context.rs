//! Application context — the logged-in user record and its change feed.
//!
//! Replaces the old pattern of reading the user from durable browser storage
//! and broadcasting ad hoc global refresh events: the user record lives in an
//! explicit store, and interested components subscribe to a watch channel.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// KYC verification status attached to a user account.
///
/// Read-only input to this core; the backend owns transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// The logged-in user, as persisted by the outer application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub kyc_status: KycStatus,
}

/// Holds the current user and notifies subscribers on change.
pub struct UserStore {
    tx: watch::Sender<Option<CurrentUser>>,
}

impl UserStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the current user record (None on logout).
    pub fn set(&self, user: Option<CurrentUser>) {
        // send_replace never fails even with zero receivers.
        self.tx.send_replace(user);
    }

    /// Snapshot of the current user.
    pub fn current(&self) -> Option<CurrentUser> {
        self.tx.borrow().clone()
    }

    /// Subscribe to user changes. The receiver yields the latest value on
    /// `changed().await`.
    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.tx.subscribe()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> CurrentUser {
        CurrentUser {
            id: "u-1".into(),
            email: "asha@example.in".into(),
            full_name: "Asha Verma".into(),
            kyc_status: KycStatus::Approved,
        }
    }

    #[test]
    fn starts_logged_out() {
        let store = UserStore::new();
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn set_notifies_subscribers() {
        let store = UserStore::new();
        let mut rx = store.subscribe();

        store.set(Some(sample_user()));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|u| u.email.clone()),
            Some("asha@example.in".to_string())
        );

        store.set(None);
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn user_serde_roundtrip() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"kyc_status\":\"approved\""));
        let parsed: CurrentUser = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
