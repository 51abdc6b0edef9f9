// src/services/mailer.rs

//! SMTP notification sink.
//!
//! Composes a plain-text summary of newly listed fixtures and delivers it
//! to the configured recipients in a single attempt. There is no retry; a
//! failed delivery aborts the run before state is saved, so the same
//! fixtures are reported again on the next run.

use std::time::Duration;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::{AppError, Result};
use crate::models::{Fixture, MailDeliveryConfig};

/// SMTP connection settings sourced from the environment.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server host (`SMTP_HOST`)
    pub host: String,

    /// SMTP server port (`SMTP_PORT`)
    pub port: u16,

    /// Login username (`SMTP_USER`)
    pub username: String,

    /// Login password (`SMTP_PASS`)
    pub password: String,

    /// From address (`EMAIL_FROM`)
    pub from: String,

    /// Comma-separated recipient list (`EMAIL_TO`)
    pub to: String,

    /// Upgrade the session with STARTTLS before authenticating (`SMTP_STARTTLS`)
    pub use_starttls: bool,
}

impl MailConfig {
    /// Read mail settings from the environment.
    ///
    /// Host, port and the STARTTLS toggle have defaults. Credentials and
    /// addresses default to empty and are checked as a group by
    /// [`MailConfig::validate`] before any delivery attempt, so a run that
    /// finds nothing new never needs them.
    pub fn from_env() -> Self {
        let host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);
        let username = std::env::var("SMTP_USER").unwrap_or_default();
        let password = std::env::var("SMTP_PASS").unwrap_or_default();
        let from = std::env::var("EMAIL_FROM").unwrap_or_default();
        let to = std::env::var("EMAIL_TO").unwrap_or_default();
        let use_starttls = std::env::var("SMTP_STARTTLS")
            .map(|v| v == "1")
            .unwrap_or(true);

        Self {
            host,
            port,
            username,
            password,
            from,
            to,
            use_starttls,
        }
    }

    /// Check that every field required for delivery is present.
    ///
    /// Partial configuration is a fatal precondition, not a silent no-op.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("SMTP_HOST", self.host.as_str()),
            ("SMTP_USER", self.username.as_str()),
            ("SMTP_PASS", self.password.as_str()),
            ("EMAIL_FROM", self.from.as_str()),
            ("EMAIL_TO", self.to.as_str()),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::config(format!(
                "Incomplete SMTP configuration, missing: {}",
                missing.join(", ")
            )))
        }
    }

    /// Recipient addresses split out of the comma-separated list.
    pub fn recipients(&self) -> Vec<String> {
        self.to
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Mail delivery service.
pub struct Mailer {
    config: MailConfig,
    timeout: Duration,
}

impl Mailer {
    /// Create a mailer from connection settings and delivery behavior.
    pub fn new(config: MailConfig, delivery: &MailDeliveryConfig) -> Self {
        Self {
            config,
            timeout: Duration::from_secs(delivery.timeout_secs),
        }
    }

    /// Compose the notification body: one summary line per fixture plus a
    /// trailing line citing the source page.
    pub fn compose(fixtures: &[Fixture], source_url: &str) -> String {
        let mut lines: Vec<String> = fixtures
            .iter()
            .map(|fixture| format!("- {}", fixture.summary()))
            .collect();
        lines.push(String::new());
        lines.push(format!("Fonte: {source_url}"));
        lines.join("\n")
    }

    /// Deliver a summary of newly listed fixtures.
    pub async fn send(&self, fixtures: &[Fixture], source_url: &str) -> Result<()> {
        self.config.validate()?;

        let subject = format!("[Sporting] Novo(s) jogo(s) à venda: {}", fixtures.len());

        let mut builder = Message::builder()
            .from(self.config.from.parse::<Mailbox>()?)
            .subject(subject);
        for recipient in self.config.recipients() {
            builder = builder.to(recipient.parse::<Mailbox>()?);
        }
        let message = builder.body(Self::compose(fixtures, source_url))?;

        let transport = self.transport()?;
        transport.send(message).await?;

        log::info!("Notification delivered to {}", self.config.to);
        Ok(())
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let builder = if self.config.use_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.host)
        };

        Ok(builder
            .port(self.config.port)
            .credentials(credentials)
            .timeout(Some(self.timeout))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> MailConfig {
        MailConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "watcher".to_string(),
            password: "secret".to_string(),
            from: "watcher@example.com".to_string(),
            to: "a@example.com, b@example.com".to_string(),
            use_starttls: true,
        }
    }

    fn sample_fixture() -> Fixture {
        Fixture {
            id: "Liga Portugal|SPORTING vs BENFICA|12 Jan 20:00".to_string(),
            competition: "Liga Portugal".to_string(),
            teams: vec!["SPORTING".to_string(), "BENFICA".to_string()],
            date: "12 Jan 20:00".to_string(),
            raw: "Liga Portugal | SPORTING | BENFICA | 12 Jan 20:00".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(complete_config().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let mut config = complete_config();
        config.password = "".to_string();
        config.to = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("SMTP_PASS"));
        assert!(err.contains("EMAIL_TO"));
        assert!(!err.contains("SMTP_USER"));
    }

    #[test]
    fn test_recipients_split_and_trimmed() {
        let mut config = complete_config();
        config.to = " a@example.com ,b@example.com,, ".to_string();
        assert_eq!(
            config.recipients(),
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );
    }

    #[test]
    fn test_compose_lists_fixtures_and_source() {
        let mut other = sample_fixture();
        other.teams.clear();
        other.id = "other".to_string();

        let body = Mailer::compose(
            &[sample_fixture(), other],
            "https://www.sporting.pt/pt/bilhetes-e-gamebox/bilhetes",
        );

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(
            lines[0],
            "- SPORTING vs BENFICA | Liga Portugal | 12 Jan 20:00"
        );
        assert_eq!(
            lines[1],
            "- (equipas não detectadas) | Liga Portugal | 12 Jan 20:00"
        );
        assert_eq!(lines[2], "");
        assert_eq!(
            lines[3],
            "Fonte: https://www.sporting.pt/pt/bilhetes-e-gamebox/bilhetes"
        );
    }

    #[tokio::test]
    async fn test_send_fails_fast_on_incomplete_config() {
        let mut config = complete_config();
        config.username = "".to_string();
        let mailer = Mailer::new(config, &MailDeliveryConfig::default());

        let result = mailer.send(&[sample_fixture()], "https://example.com").await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
