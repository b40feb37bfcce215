//! File-backed application configuration.

use std::path::{Path, PathBuf};

use jcs_props::{OrderedConfigStore, PropertySource, StoreConfig};
use tracing::info;

use crate::error::ConfResult;

/// The application's configuration file and its parsed content.
///
/// Owned by the caller and passed by reference to whatever needs settings;
/// typed getters come from [`MailSettings`](crate::MailSettings).
#[derive(Debug, Clone)]
pub struct JcsConf {
    path: PathBuf,
    store: OrderedConfigStore,
}

impl JcsConf {
    /// Load the configuration file at `path`.
    pub fn open(path: impl AsRef<Path>) -> ConfResult<Self> {
        Self::open_with(path, StoreConfig::default())
    }

    /// Load the configuration file at `path` with a custom store configuration.
    pub fn open_with(path: impl AsRef<Path>, config: StoreConfig) -> ConfResult<Self> {
        let path = path.as_ref().to_path_buf();
        let store = OrderedConfigStore::with_config(config);
        store.load_path(&path)?;
        info!(path = %path.display(), entries = store.len(), "configuration loaded");
        Ok(Self { path, store })
    }

    /// Switch to another configuration file and load it.
    ///
    /// If the new file cannot be loaded the current file and values stay in
    /// place.
    pub fn set_config_file(&mut self, path: impl AsRef<Path>) -> ConfResult<()> {
        let path = path.as_ref().to_path_buf();
        let store = OrderedConfigStore::with_config(self.store.config().clone());
        store.load_path(&path)?;
        info!(
            from = %self.path.display(),
            to = %path.display(),
            entries = store.len(),
            "configuration file switched"
        );
        self.path = path;
        self.store = store;
        Ok(())
    }

    /// Re-read the current file, discarding in-memory changes.
    pub fn reload(&self) -> ConfResult<()> {
        self.store.load_path(&self.path)?;
        info!(path = %self.path.display(), entries = self.store.len(), "configuration reloaded");
        Ok(())
    }

    /// Write the current values back to the file, keeping its layout.
    pub fn save(&self) -> ConfResult<()> {
        self.store.store_path(&self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying store, for edits.
    pub fn store(&self) -> &OrderedConfigStore {
        &self.store
    }
}

impl PropertySource for JcsConf {
    fn get_property(&self, key: &str) -> Option<String> {
        self.store.get_property(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfError;
    use crate::MailSettings;
    use jcs_props::PropsError;
    use std::fs;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn open_reads_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "jcs.properties", "mail.smtp.host = mx.example.org\n");
        let conf = JcsConf::open(&path).unwrap();
        assert_eq!(conf.smtp_host().as_deref(), Some("mx.example.org"));
        assert_eq!(conf.path(), path.as_path());
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = JcsConf::open(dir.path().join("absent.properties")).unwrap_err();
        assert!(matches!(err, ConfError::Props(PropsError::File { .. })));
    }

    #[test]
    fn set_config_file_switches_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let first = write(&dir, "a.properties", "mail.subject = first\n");
        let second = write(&dir, "b.properties", "mail.subject = second\n");

        let mut conf = JcsConf::open(&first).unwrap();
        conf.set_config_file(&second).unwrap();
        assert_eq!(conf.mail_subject().as_deref(), Some("second"));
        assert_eq!(conf.path(), second.as_path());
    }

    #[test]
    fn failed_switch_keeps_current_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = write(&dir, "a.properties", "mail.subject = first\n");

        let mut conf = JcsConf::open(&first).unwrap();
        assert!(conf.set_config_file(dir.path().join("nope")).is_err());
        assert_eq!(conf.mail_subject().as_deref(), Some("first"));
        assert_eq!(conf.path(), first.as_path());
    }

    #[test]
    fn reload_picks_up_external_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "jcs.properties", "mail.smtp.port = 25\n");
        let conf = JcsConf::open(&path).unwrap();

        fs::write(&path, "mail.smtp.port = 2525\n").unwrap();
        assert_eq!(conf.smtp_port().unwrap(), 25);
        conf.reload().unwrap();
        assert_eq!(conf.smtp_port().unwrap(), 2525);
    }

    #[test]
    fn save_keeps_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "jcs.properties",
            "# mail\nmail.smtp.host = a\n\n# end\n",
        );
        let conf = JcsConf::open_with(
            &path,
            StoreConfig::default().with_line_separator(jcs_props::LineSeparator::Lf),
        )
        .unwrap();
        conf.store().put_after("mail.smtp.port", "587", "mail.smtp.host");
        conf.save().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# mail\nmail.smtp.host = a\nmail.smtp.port = 587\n\n# end\n"
        );
    }
}
