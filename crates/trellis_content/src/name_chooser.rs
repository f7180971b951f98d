//! Choosing and checking child names.

use regex::Regex;
use trellis_foundation::{ContainerId, Error, ErrorKind, Result};
use trellis_storage::{Container, Content, Folder, Marker, Site};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for name generation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NameChooserConfig {
    /// Derive empty names from titles for content that asks for it.
    pub short_url_enabled: bool,
    /// Maximum number of words kept in a title-derived name (0 = no limit).
    pub limit_words: usize,
}

impl Default for NameChooserConfig {
    fn default() -> Self {
        Self {
            short_url_enabled: true,
            limit_words: 5,
        }
    }
}

impl NameChooserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables title-derived names.
    #[must_use]
    pub fn with_short_urls(mut self, enabled: bool) -> Self {
        self.short_url_enabled = enabled;
        self
    }

    /// Sets the word limit for title-derived names.
    #[must_use]
    pub fn with_limit_words(mut self, limit: usize) -> Self {
        self.limit_words = limit;
        self
    }
}

/// Picks free names for new children of one folder.
#[derive(Debug, Clone, Copy)]
pub struct NameChooser<'a> {
    folder: &'a Folder,
    config: &'a NameChooserConfig,
}

impl<'a> NameChooser<'a> {
    /// Creates a chooser for a folder.
    #[must_use]
    pub fn new(folder: &'a Folder, config: &'a NameChooserConfig) -> Self {
        Self { folder, config }
    }

    /// Creates a chooser for a folder of a site.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not name a live folder.
    pub fn for_container(
        site: &'a Site,
        container: ContainerId,
        config: &'a NameChooserConfig,
    ) -> Result<Self> {
        Ok(Self::new(site.folder(container)?, config))
    }

    /// Returns a free, valid name based on `name`.
    ///
    /// An empty name is derived from the title of content marked
    /// [`Marker::TitleBasedName`] when short urls are enabled, and otherwise
    /// falls back to the content type name. Leading `+` and `@` are dropped.
    /// Taken names get a `-2`, `-3`, ... suffix before any extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting name fails [`check_name`](Self::check_name).
    pub fn choose_name(&self, name: &str, content: &Content) -> Result<String> {
        let mut base = name.to_string();
        if base.is_empty()
            && self.config.short_url_enabled
            && content.has_marker(Marker::TitleBasedName)
        {
            base = title_slug(content.title(), self.config.limit_words)?;
        }
        if base.is_empty() {
            base = content.content_type().unwrap_or("content").to_string();
        }
        let base = base.trim_start_matches(['+', '@']);

        let (stem, suffix) = match base.rfind('.') {
            Some(dot) => base.split_at(dot),
            None => (base, ""),
        };

        let mut candidate = format!("{stem}{suffix}");
        let mut counter = 1;
        while self.folder.contains(&candidate) {
            counter += 1;
            candidate = format!("{stem}-{counter}{suffix}");
        }

        self.check_name(&candidate, content)?;
        Ok(candidate)
    }

    /// Checks that a name may be used for new content.
    ///
    /// # Errors
    ///
    /// Returns `NameReserved` for reserved names, `InvalidName` for empty
    /// names, names starting with `+` or `@`, or containing `/`, and
    /// `DuplicateName` if the name is taken.
    pub fn check_name(&self, name: &str, _content: &Content) -> Result<()> {
        if self.folder.is_reserved(name) {
            return Err(Error::new(ErrorKind::NameReserved(name.to_string())));
        }
        if name.is_empty() {
            return Err(Error::invalid_name(
                "an empty name was provided; names cannot be empty",
            ));
        }
        if name.starts_with(['+', '@']) || name.contains('/') {
            return Err(Error::invalid_name(
                "names cannot begin with '+' or '@' or contain '/'",
            ));
        }
        if self.folder.contains(name) {
            return Err(Error::new(ErrorKind::DuplicateName(name.to_string())));
        }
        Ok(())
    }
}

/// Turns a title into a lowercase, dash-separated name.
///
/// Non-word characters become dashes, single-character words are dropped,
/// runs of dashes collapse and at most `limit_words` words are kept
/// (0 keeps all).
///
/// # Errors
///
/// Returns an internal error if a pattern fails to compile.
pub fn title_slug(title: &str, limit_words: usize) -> Result<String> {
    let non_word = pattern("[^A-Za-z0-9_]")?;
    let single = pattern("^[A-Za-z0-9_]-|-[A-Za-z0-9_]-|-[A-Za-z0-9_]$")?;
    let dashes = pattern("-{2,}")?;

    let slug = non_word.replace_all(title.trim(), "-");
    let slug = single.replace_all(&slug, "-");
    let slug = dashes.replace_all(&slug, "-");
    let slug = slug.trim_matches('-').to_lowercase();

    if limit_words == 0 {
        return Ok(slug);
    }
    Ok(slug.split('-').take(limit_words).collect::<Vec<_>>().join("-"))
}

fn pattern(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| Error::internal(format!("bad name pattern {source}: {e}")))
}
