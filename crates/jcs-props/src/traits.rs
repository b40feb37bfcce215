//! The [`PropertySource`] trait: read-only access to configuration values.
//!
//! Consumers that only need to look values up (mail, upload and capture
//! settings) depend on this trait rather than on the concrete store.

/// A source of string-valued configuration properties.
pub trait PropertySource: Send + Sync {
    /// Value of `key`, or `None` if it is not set.
    fn get_property(&self, key: &str) -> Option<String>;

    /// Value of `key`, or `default` if it is not set.
    fn get_property_or(&self, key: &str, default: &str) -> String {
        self.get_property(key).unwrap_or_else(|| default.to_string())
    }
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn get_property(&self, key: &str) -> Option<String> {
        (**self).get_property(key)
    }
}

impl<T: PropertySource + ?Sized> PropertySource for std::sync::Arc<T> {
    fn get_property(&self, key: &str) -> Option<String> {
        (**self).get_property(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct Fixed(HashMap<&'static str, &'static str>);

    impl PropertySource for Fixed {
        fn get_property(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn fixed() -> Fixed {
        Fixed(HashMap::from([("mail.subject", "Intrusion")]))
    }

    #[test]
    fn default_applies_only_when_missing() {
        let source = fixed();
        assert_eq!(source.get_property_or("mail.subject", "x"), "Intrusion");
        assert_eq!(source.get_property_or("mail.smtp.host", "localhost"), "localhost");
    }

    fn subject<S: PropertySource>(source: S) -> Option<String> {
        source.get_property("mail.subject")
    }

    #[test]
    fn references_and_arcs_delegate() {
        let source = fixed();
        assert_eq!(subject(&source).as_deref(), Some("Intrusion"));

        let shared: Arc<dyn PropertySource> = Arc::new(fixed());
        assert_eq!(subject(Arc::clone(&shared)).as_deref(), Some("Intrusion"));
        assert_eq!(shared.get_property_or("missing", "d"), "d");
    }
}
