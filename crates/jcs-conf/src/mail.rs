//! Typed mail settings over any [`PropertySource`].

use std::collections::BTreeSet;

use jcs_props::PropertySource;
use serde::Serialize;

use crate::error::{ConfError, ConfResult};
use crate::keys;

/// Typed getters for the SMTP and notification-mail settings.
///
/// Blanket-implemented for every [`PropertySource`], so an
/// [`OrderedConfigStore`](jcs_props::OrderedConfigStore), a
/// [`JcsConf`](crate::JcsConf) or a test double all expose the same getters.
pub trait MailSettings: PropertySource {
    fn smtp_host(&self) -> Option<String> {
        self.get_property(keys::SMTP_HOST)
    }

    fn smtp_user(&self) -> Option<String> {
        self.get_property(keys::SMTP_USER)
    }

    fn smtp_password(&self) -> Option<String> {
        self.get_property(keys::SMTP_PASSWORD)
    }

    /// The configured SMTP port, or [`keys::DEFAULT_SMTP_PORT`] when unset.
    fn smtp_port(&self) -> ConfResult<u16> {
        match self.get_property(keys::SMTP_PORT) {
            None => Ok(keys::DEFAULT_SMTP_PORT),
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfError::InvalidValue {
                    key: keys::SMTP_PORT.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            }),
        }
    }

    fn is_smtp_auth(&self) -> bool {
        is_enabled(self, keys::SMTP_AUTH)
    }

    fn use_starttls(&self) -> bool {
        is_enabled(self, keys::SMTP_USE_STARTTLS)
    }

    fn use_ssl(&self) -> bool {
        is_enabled(self, keys::SMTP_USE_SSL)
    }

    fn mail_subject(&self) -> Option<String> {
        self.get_property(keys::MAIL_SUBJECT)
    }

    fn recipients_to(&self) -> BTreeSet<String> {
        recipients(self, keys::MAIL_RECIPIENTS_TO)
    }

    fn recipients_cc(&self) -> BTreeSet<String> {
        recipients(self, keys::MAIL_RECIPIENTS_CC)
    }

    fn recipients_bcc(&self) -> BTreeSet<String> {
        recipients(self, keys::MAIL_RECIPIENTS_BCC)
    }

    /// All mail settings at once.
    fn mail_config(&self) -> ConfResult<MailConfig> {
        Ok(MailConfig {
            smtp_host: self.smtp_host(),
            smtp_port: self.smtp_port()?,
            smtp_user: self.smtp_user(),
            smtp_password: self.smtp_password(),
            smtp_auth: self.is_smtp_auth(),
            starttls: self.use_starttls(),
            ssl: self.use_ssl(),
            subject: self.mail_subject(),
            to: self.recipients_to(),
            cc: self.recipients_cc(),
            bcc: self.recipients_bcc(),
        })
    }
}

impl<T: PropertySource + ?Sized> MailSettings for T {}

/// Snapshot of the mail settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MailConfig {
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    #[serde(skip_serializing)]
    pub smtp_password: Option<String>,
    pub smtp_auth: bool,
    pub starttls: bool,
    pub ssl: bool,
    pub subject: Option<String>,
    pub to: BTreeSet<String>,
    pub cc: BTreeSet<String>,
    pub bcc: BTreeSet<String>,
}

/// Flags are on only for `true`, ignoring surrounding whitespace.
fn is_enabled<S: PropertySource + ?Sized>(source: &S, key: &str) -> bool {
    source
        .get_property(key)
        .is_some_and(|v| v.trim() == "true")
}

fn recipients<S: PropertySource + ?Sized>(source: &S, key: &str) -> BTreeSet<String> {
    source
        .get_property(key)
        .map(|raw| parse_recipients(&raw))
        .unwrap_or_default()
}

/// Split a comma-separated address list, trimming each address and dropping
/// empty ones.
pub fn parse_recipients(raw: &str) -> BTreeSet<String> {
    raw.split(keys::RECIPIENTS_SEPARATOR)
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jcs_props::OrderedConfigStore;

    fn store(text: &str) -> OrderedConfigStore {
        let store = OrderedConfigStore::new();
        store.load(text.as_bytes()).unwrap();
        store
    }

    const FULL: &str = "\
# SMTP
mail.smtp.host = smtp.example.org
mail.smtp.port = 587
mail.smtp.user = cam
mail.smtp.password = s3cret
mail.smtp.auth = true
mail.smtp.starttls.enable = true
mail.smtp.ssl.enable = false

# Notification
mail.subject = Motion detected
mail.recipients.to = alice@example.org, bob@example.org
mail.recipients.cc =
mail.recipients.bcc = ops@example.org
";

    #[test]
    fn reads_every_setting() {
        let conf = store(FULL);
        assert_eq!(conf.smtp_host().as_deref(), Some("smtp.example.org"));
        assert_eq!(conf.smtp_port().unwrap(), 587);
        assert_eq!(conf.smtp_user().as_deref(), Some("cam"));
        assert_eq!(conf.smtp_password().as_deref(), Some("s3cret"));
        assert!(conf.is_smtp_auth());
        assert!(conf.use_starttls());
        assert!(!conf.use_ssl());
        assert_eq!(conf.mail_subject().as_deref(), Some("Motion detected"));
        assert_eq!(
            conf.recipients_to().into_iter().collect::<Vec<_>>(),
            vec!["alice@example.org", "bob@example.org"]
        );
        assert!(conf.recipients_cc().is_empty());
        assert_eq!(conf.recipients_bcc().len(), 1);
    }

    #[test]
    fn defaults_when_unset() {
        let conf = store("# nothing here\n");
        assert_eq!(conf.smtp_host(), None);
        assert_eq!(conf.smtp_port().unwrap(), keys::DEFAULT_SMTP_PORT);
        assert!(!conf.is_smtp_auth());
        assert!(!conf.use_starttls());
        assert!(!conf.use_ssl());
        assert!(conf.recipients_to().is_empty());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let conf = store("mail.smtp.port = twenty-five\n");
        match conf.smtp_port().unwrap_err() {
            ConfError::InvalidValue { key, value, .. } => {
                assert_eq!(key, keys::SMTP_PORT);
                assert_eq!(value, "twenty-five");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(conf.mail_config().is_err());
    }

    #[test]
    fn port_tolerates_surrounding_whitespace() {
        let conf = store("mail.smtp.port = 2525  \n");
        assert_eq!(conf.smtp_port().unwrap(), 2525);
    }

    #[test]
    fn flags_only_accept_literal_true() {
        let conf = store("mail.smtp.auth = yes\nmail.smtp.ssl.enable = TRUE\n");
        assert!(!conf.is_smtp_auth());
        assert!(!conf.use_ssl());
    }

    #[test]
    fn flags_ignore_surrounding_whitespace() {
        let conf = store("mail.smtp.auth = true   \nmail.smtp.starttls.enable =\ttrue\t\n");
        assert!(conf.is_smtp_auth());
        assert!(conf.use_starttls());
        assert_eq!(conf.get_property(keys::SMTP_AUTH).as_deref(), Some("true   "));
    }

    #[test]
    fn recipient_parsing() {
        let set = parse_recipients(" a@x.org ,b@x.org,, a@x.org ,");
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["a@x.org", "b@x.org"]);
        assert!(parse_recipients("").is_empty());
        assert!(parse_recipients(" , ").is_empty());
    }

    #[test]
    fn mail_config_snapshot() {
        let config = store(FULL).mail_config().unwrap();
        assert_eq!(config.smtp_port, 587);
        assert!(config.smtp_auth);
        assert_eq!(config.to.len(), 2);
        assert_eq!(config.smtp_password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn settings_follow_store_updates() {
        let conf = store(FULL);
        conf.put("mail.smtp.port", "465");
        conf.put_after("mail.recipients.cc", "eve@example.org", "mail.recipients.to");
        assert_eq!(conf.smtp_port().unwrap(), 465);
        assert_eq!(conf.recipients_cc().len(), 1);
    }
}
