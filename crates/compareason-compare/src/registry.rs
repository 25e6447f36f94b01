//! The fixed set of product sources, built once at start-up.

use std::sync::Arc;
use std::time::Duration;

use compareason_core::AppConfig;
use compareason_scraper::{
    builtin_profiles, load_profiles, HtmlDriver, PageDriver, ProductSource, SiteAdapter,
    SourceProfile,
};

use crate::CompareError;

/// Registered sources in registration order. Read-only once built; share it
/// behind an `Arc`.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn ProductSource>>,
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry the binaries use: a static-HTML driver configured
    /// from `config`, with profiles from `COMPAREASON_SOURCES_PATH` when set
    /// and the built-in profiles otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Scraper`] if the HTTP client cannot be built or
    /// the profile file is unreadable or invalid, and
    /// [`CompareError::DuplicateSource`] or
    /// [`CompareError::DuplicateDisplayName`] if two profiles share an id or
    /// a display name.
    pub fn from_config(config: &AppConfig) -> Result<Self, CompareError> {
        let timeout = Duration::from_millis(config.navigation_timeout_ms);
        let driver = HtmlDriver::new(
            timeout,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )?;
        let profiles = match &config.sources_path {
            Some(path) => load_profiles(path)?,
            None => builtin_profiles(),
        };
        Self::from_profiles(Arc::new(driver), profiles, timeout)
    }

    /// One [`SiteAdapter`] per profile, all sharing `driver`.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::DuplicateSource`] or
    /// [`CompareError::DuplicateDisplayName`] if two profiles share an id or
    /// a display name.
    pub fn from_profiles<D: PageDriver>(
        driver: Arc<D>,
        profiles: Vec<SourceProfile>,
        navigation_timeout: Duration,
    ) -> Result<Self, CompareError> {
        let mut registry = Self::new();
        for profile in profiles {
            let adapter = SiteAdapter::new(Arc::clone(&driver), profile, navigation_timeout);
            registry.register(Arc::new(adapter))?;
        }
        Ok(registry)
    }

    /// Appends `source`.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::DuplicateSource`] if a source with the same id
    /// is already registered, and [`CompareError::DuplicateDisplayName`] if
    /// one with the same display name is.
    pub fn register(&mut self, source: Arc<dyn ProductSource>) -> Result<(), CompareError> {
        if self.get(source.id()).is_some() {
            return Err(CompareError::DuplicateSource(source.id().to_owned()));
        }
        if self
            .sources
            .iter()
            .any(|s| s.display_name() == source.display_name())
        {
            return Err(CompareError::DuplicateDisplayName(
                source.display_name().to_owned(),
            ));
        }
        tracing::debug!(source = source.id(), "registered product source");
        self.sources.push(source);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn ProductSource>> {
        self.sources.iter().find(|s| s.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ProductSource>> {
        self.sources.iter()
    }
}
