//! A Google OAuth session (access + refresh token) persisted per account.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app_config::{AppConfig, base_dir};

pub struct Session {
    account_email: String,
    data: SessionData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl From<&AccessToken> for SessionData {
    fn from(tokens: &AccessToken) -> Self {
        SessionData {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: Utc::now() + Duration::seconds(tokens.expires_in),
        }
    }
}

impl Session {
    fn path_for_account_email(account_email: &str) -> Result<PathBuf> {
        let email_slug = account_email.replace(['/', '\\', ':'], "_");

        Ok(base_dir()?
            .join("session")
            .join(format!("{}.toml", email_slug)))
    }

    pub fn new(account_email: &str, data: SessionData) -> Self {
        Session {
            account_email: account_email.to_string(),
            data,
        }
    }

    pub fn client(&self) -> Result<Client> {
        let app_config = AppConfig::load()?;

        Ok(Client::new(
            app_config.client_id,
            app_config.client_secret,
            String::new(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        ))
    }

    /// Load the stored session, refreshing the access token if it expired.
    pub async fn load_valid(account_email: &str) -> Result<Self> {
        let mut session = Self::load(account_email)?;

        if session.is_expired() {
            debug!(account = account_email, "access token expired, refreshing");
            session.refresh().await?;
        }

        Ok(session)
    }

    fn load(account_email: &str) -> Result<Self> {
        let path = Self::path_for_account_email(account_email)?;

        if !path.exists() {
            anyhow::bail!(
                "Google OAuth session for {} not found. Run `matchday auth` first.",
                account_email
            );
        }

        let data = read_session_data(&path)?;

        Ok(Session {
            account_email: account_email.to_string(),
            data,
        })
    }

    pub fn save(&self) -> Result<()> {
        write_session_data(&Self::path_for_account_email(&self.account_email)?, &self.data)
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.data.expires_at
    }

    async fn refresh(&mut self) -> Result<()> {
        let mut tokens = self
            .client()?
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google typically doesn't return a new refresh_token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.data.refresh_token.clone();
        }

        self.data = (&tokens).into();
        self.save()?;

        Ok(())
    }
}

fn read_session_data(path: &Path) -> Result<SessionData> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read Google OAuth session from {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse Google OAuth session from {}", path.display()))
}

fn write_session_data(path: &Path, data: &SessionData) -> Result<()> {
    let contents = toml::to_string_pretty(data).context("Failed to serialize session")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write session to {}", path.display()))?;

    // Owner-only (0600): the file contains OAuth tokens
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(expires_at: DateTime<Utc>) -> SessionData {
        SessionData {
            access_token: "ya29.access".into(),
            refresh_token: "1//refresh".into(),
            expires_at,
        }
    }

    #[test]
    fn session_data_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session").join("me@example.com.toml");
        let original = data(Utc::now());

        write_session_data(&path, &original).unwrap();
        let loaded = read_session_data(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.toml");
        write_session_data(&path, &data(Utc::now())).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn expiry() {
        let expired = Session::new("me@example.com", data(Utc::now() - Duration::minutes(1)));
        let fresh = Session::new("me@example.com", data(Utc::now() + Duration::hours(1)));

        assert!(expired.is_expired());
        assert!(!fresh.is_expired());
    }

    #[test]
    fn account_path_is_sanitized() {
        let path = Session::path_for_account_email("a/b:c@example.com").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "a_b_c@example.com.toml"
        );
    }
}
