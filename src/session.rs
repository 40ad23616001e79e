use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub setor_id: String,
    #[serde(default)]
    pub role: Role,
}

/// Organizational sector: the scoping unit for tables, products and users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setor {
    pub id: String,
    pub nome: String,
    pub descricao: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Per-sector counts shown on the settings screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetorStats {
    pub tables: u64,
    pub products: u64,
    pub users: u64,
}

/// Read-only session context carried explicitly to the code that needs it.
/// Populated when sign-in succeeds, cleared at sign-out; no ambient lookup.
#[derive(Debug, Clone, Default)]
pub struct Session {
    profile: Option<UserProfile>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, profile: UserProfile) {
        tracing::info!(user = %profile.email, setor = %profile.setor_id, "session opened");
        self.profile = Some(profile);
    }

    pub fn sign_out(&mut self) {
        if let Some(profile) = self.profile.take() {
            tracing::info!(user = %profile.email, "session closed");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn setor_id(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.setor_id.as_str())
    }
}
