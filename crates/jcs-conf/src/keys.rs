//! Property keys read by the mail notifier, and their defaults.

pub const SMTP_HOST: &str = "mail.smtp.host";
pub const SMTP_USER: &str = "mail.smtp.user";
pub const SMTP_PASSWORD: &str = "mail.smtp.password";
pub const SMTP_PORT: &str = "mail.smtp.port";
pub const SMTP_AUTH: &str = "mail.smtp.auth";
pub const SMTP_USE_STARTTLS: &str = "mail.smtp.starttls.enable";
pub const SMTP_USE_SSL: &str = "mail.smtp.ssl.enable";
pub const MAIL_SUBJECT: &str = "mail.subject";
pub const MAIL_RECIPIENTS_TO: &str = "mail.recipients.to";
pub const MAIL_RECIPIENTS_CC: &str = "mail.recipients.cc";
pub const MAIL_RECIPIENTS_BCC: &str = "mail.recipients.bcc";

/// Port used when `mail.smtp.port` is not set.
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Separator between addresses in the recipient lists.
pub const RECIPIENTS_SEPARATOR: char = ',';
