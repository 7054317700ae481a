use std::fmt;

use crate::shape::RequestShape;

/// One configured completion provider.
#[derive(Clone)]
pub struct ProviderDescriptor {
    pub name: String,
    pub url: String,
    pub model: String,
    /// Absent or blank means the provider is skipped, never attempted.
    pub api_key: Option<String>,
    pub shape: RequestShape,
}

impl ProviderDescriptor {
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("model", &self.model)
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("shape", &self.shape)
            .finish()
    }
}

/// Fixed, ordered provider sequence. Order is the fallback priority and is
/// preserved exactly as configured.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new(providers: Vec<ProviderDescriptor>) -> Self {
        Self { providers }
    }

    /// Providers with a present credential, in configured order.
    pub fn available(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter().filter(|p| p.has_credential())
    }

    /// All configured provider names, credentialed or not.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, key: Option<&str>) -> ProviderDescriptor {
        ProviderDescriptor {
            name: name.into(),
            url: format!("https://api.{name}.test/v1/chat/completions"),
            model: "gpt-3.5-turbo".into(),
            api_key: key.map(Into::into),
            shape: RequestShape::OpenAi,
        }
    }

    #[test]
    fn available_filters_missing_credentials() {
        let registry = ProviderRegistry::new(vec![
            provider("alpha", Some("k1")),
            provider("beta", None),
            provider("gamma", Some("k3")),
        ]);
        let names: Vec<_> = registry.available().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "gamma"]);
    }

    #[test]
    fn available_filters_blank_credentials() {
        let registry =
            ProviderRegistry::new(vec![provider("alpha", Some("")), provider("beta", Some("  "))]);
        assert_eq!(registry.available().count(), 0);
    }

    #[test]
    fn available_preserves_configured_order() {
        let registry = ProviderRegistry::new(vec![
            provider("third", Some("k")),
            provider("first", Some("k")),
            provider("second", Some("k")),
        ]);
        let names: Vec<_> = registry.available().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn empty_registry() {
        let registry = ProviderRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.available().count(), 0);
    }

    #[test]
    fn debug_redacts_api_key() {
        let p = provider("alpha", Some("sk-secret"));
        let debug = format!("{p:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("alpha"));
    }

    #[test]
    fn names_include_uncredentialed_providers() {
        let registry =
            ProviderRegistry::new(vec![provider("alpha", Some("k")), provider("beta", None)]);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }
}
