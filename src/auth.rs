//! Sign-in/sign-up flows and setor settings over the backend seam. Every
//! mutating call resolves to exactly one notification; backend failures are
//! surfaced verbatim, never retried.

use crate::backend::Backend;
use crate::notify::Notification;
use crate::session::{Session, Setor, SetorStats};

pub fn sign_in<B: Backend>(
    backend: &mut B,
    session: &mut Session,
    email: &str,
    password: &str,
) -> Notification {
    match backend.sign_in(email, password) {
        Ok(profile) => {
            session.sign_in(profile);
            Notification::success(
                "Login realizado com sucesso!",
                "Bem-vindo ao sistema de estoque CCB",
            )
        }
        Err(e) => Notification::error("Erro no login", e.to_string()),
    }
}

/// Registration requires a setor; the account awaits email confirmation, so
/// the session stays signed out on success.
pub fn sign_up<B: Backend>(
    backend: &mut B,
    email: &str,
    password: &str,
    name: &str,
    setor_id: &str,
) -> Notification {
    if setor_id.is_empty() {
        return Notification::error("Erro", "Por favor, selecione um setor");
    }
    match backend.sign_up(email, password, name, setor_id) {
        Ok(_) => Notification::success(
            "Cadastro realizado!",
            "Verifique seu email para confirmar a conta",
        ),
        Err(e) => Notification::error("Erro no cadastro", e.to_string()),
    }
}

pub fn sign_in_with_provider<B: Backend>(
    backend: &mut B,
    session: &mut Session,
) -> Notification {
    match backend.sign_in_with_provider() {
        Ok(profile) => {
            session.sign_in(profile);
            Notification::success(
                "Login realizado com sucesso!",
                "Bem-vindo ao sistema de estoque CCB",
            )
        }
        Err(e) => Notification::error("Erro no login com Google", e.to_string()),
    }
}

/// Setores offered on the registration screen. A fetch failure degrades to
/// an empty list rather than blocking the form.
pub fn available_setores<B: Backend>(backend: &B) -> Vec<Setor> {
    match backend.fetch_setores() {
        Ok(setores) => setores,
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch setores");
            Vec::new()
        }
    }
}

pub fn current_setor<B: Backend>(backend: &B, session: &Session) -> Option<Setor> {
    let setor_id = session.setor_id()?;
    match backend.fetch_setor(setor_id) {
        Ok(setor) => Some(setor),
        Err(e) => {
            tracing::warn!(error = %e, setor_id, "failed to fetch setor");
            None
        }
    }
}

/// Save the setor's name/description. Both fields are trimmed; the name must
/// not end up blank.
pub fn update_setor<B: Backend>(
    backend: &mut B,
    session: &Session,
    nome: &str,
    descricao: &str,
) -> Notification {
    let nome = nome.trim();
    if nome.is_empty() {
        return Notification::error("Erro", "O nome do setor é obrigatório");
    }
    let Some(setor_id) = session.setor_id() else {
        return Notification::error("Erro ao atualizar", "Setor não encontrado");
    };
    match backend.update_setor(setor_id, nome, descricao.trim()) {
        Ok(()) => Notification::success(
            "Setor atualizado!",
            "As configurações do setor foram salvas com sucesso.",
        ),
        Err(e) => Notification::error("Erro ao atualizar", e.to_string()),
    }
}

/// Counts for the settings screen. A failing backend degrades to zeros.
pub fn setor_stats<B: Backend>(backend: &B, session: &Session) -> SetorStats {
    let Some(setor_id) = session.setor_id() else {
        return SetorStats::default();
    };
    match backend.setor_stats(setor_id) {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!(error = %e, setor_id, "failed to fetch setor stats");
            SetorStats::default()
        }
    }
}
