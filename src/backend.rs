use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::session::{Role, Setor, SetorStats, UserProfile};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BackendError {
    /// Failure reported by the remote service; the message is surfaced to
    /// the user verbatim.
    #[error("{0}")]
    Message(String),
}

impl BackendError {
    pub fn msg(text: impl Into<String>) -> Self {
        BackendError::Message(text.into())
    }
}

/// Entities the backend can count per setor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountEntity {
    CustomTables,
    TableProducts,
    Profiles,
}

/// The persistence/auth collaborator. Everything remote sits behind this
/// seam; the engine itself never performs I/O. Calls are fire-and-forget
/// from the core's perspective: one call, no retry, errors surfaced as-is.
pub trait Backend {
    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserProfile, BackendError>;

    fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        setor_id: &str,
    ) -> Result<UserProfile, BackendError>;

    fn sign_in_with_provider(&mut self) -> Result<UserProfile, BackendError>;

    /// All setores, ordered by name.
    fn fetch_setores(&self) -> Result<Vec<Setor>, BackendError>;

    fn fetch_setor(&self, id: &str) -> Result<Setor, BackendError>;

    fn update_setor(&mut self, id: &str, nome: &str, descricao: &str) -> Result<(), BackendError>;

    fn count_rows(&self, entity: CountEntity, setor_id: &str) -> Result<u64, BackendError>;

    /// Convenience over the three per-entity counts.
    fn setor_stats(&self, setor_id: &str) -> Result<SetorStats, BackendError> {
        Ok(SetorStats {
            tables: self.count_rows(CountEntity::CustomTables, setor_id)?,
            products: self.count_rows(CountEntity::TableProducts, setor_id)?,
            users: self.count_rows(CountEntity::Profiles, setor_id)?,
        })
    }
}

/// In-memory backend for tests and demos. Accounts and counts are plain
/// maps; no durability.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    setores: Vec<Setor>,
    accounts: HashMap<String, (String, UserProfile)>,
    provider_profile: Option<UserProfile>,
    counts: HashMap<(CountEntity, String), u64>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_setor(mut self, id: &str, nome: &str, descricao: &str) -> Self {
        self.setores.push(Setor {
            id: id.to_string(),
            nome: nome.to_string(),
            descricao: descricao.to_string(),
            updated_at: None,
        });
        self
    }

    pub fn with_account(mut self, email: &str, password: &str, name: &str, setor_id: &str) -> Self {
        let profile = UserProfile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            setor_id: setor_id.to_string(),
            role: Role::User,
        };
        self.accounts
            .insert(email.to_string(), (password.to_string(), profile));
        self
    }

    pub fn with_provider_profile(mut self, profile: UserProfile) -> Self {
        self.provider_profile = Some(profile);
        self
    }

    pub fn set_count(&mut self, entity: CountEntity, setor_id: &str, count: u64) {
        self.counts.insert((entity, setor_id.to_string()), count);
    }
}

impl Backend for MemoryBackend {
    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserProfile, BackendError> {
        match self.accounts.get(email) {
            Some((stored, profile)) if stored == password => Ok(profile.clone()),
            _ => Err(BackendError::msg("Credenciais inválidas")),
        }
    }

    fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        setor_id: &str,
    ) -> Result<UserProfile, BackendError> {
        if self.accounts.contains_key(email) {
            return Err(BackendError::msg("Email já cadastrado"));
        }
        if !self.setores.iter().any(|s| s.id == setor_id) {
            return Err(BackendError::msg("Setor não encontrado"));
        }
        let profile = UserProfile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            setor_id: setor_id.to_string(),
            role: Role::User,
        };
        self.accounts
            .insert(email.to_string(), (password.to_string(), profile.clone()));
        Ok(profile)
    }

    fn sign_in_with_provider(&mut self) -> Result<UserProfile, BackendError> {
        self.provider_profile
            .clone()
            .ok_or_else(|| BackendError::msg("Provedor de login indisponível"))
    }

    fn fetch_setores(&self) -> Result<Vec<Setor>, BackendError> {
        let mut setores = self.setores.clone();
        setores.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(setores)
    }

    fn fetch_setor(&self, id: &str) -> Result<Setor, BackendError> {
        self.setores
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| BackendError::msg("Setor não encontrado"))
    }

    fn update_setor(&mut self, id: &str, nome: &str, descricao: &str) -> Result<(), BackendError> {
        let setor = self
            .setores
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| BackendError::msg("Setor não encontrado"))?;
        setor.nome = nome.to_string();
        setor.descricao = descricao.to_string();
        setor.updated_at = Some(Utc::now());
        Ok(())
    }

    fn count_rows(&self, entity: CountEntity, setor_id: &str) -> Result<u64, BackendError> {
        Ok(self
            .counts
            .get(&(entity, setor_id.to_string()))
            .copied()
            .unwrap_or(0))
    }
}
