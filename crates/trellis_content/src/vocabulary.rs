//! Vocabularies of content types for pickers and forms.

use trellis_foundation::ContainerId;
use trellis_storage::Site;

use crate::content_type::PORTAL;
use crate::registry::ContentTypeRegistry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One choice in a vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    /// Display title.
    pub title: String,
    /// Content type name; also the submitted token.
    pub name: String,
}

impl Term {
    fn new(title: &str, name: &str) -> Self {
        Self {
            title: title.to_string(),
            name: name.to_string(),
        }
    }
}

/// Types that may be added to `container` right now, sorted by title and
/// then name. Empty if the container has no registered type.
#[must_use]
pub fn addable_content(
    registry: &ContentTypeRegistry,
    site: &Site,
    container: ContainerId,
) -> Vec<Term> {
    let Ok(container_type) = registry.folder_type(site, container) else {
        return Vec::new();
    };

    let mut terms: Vec<Term> = container_type
        .list_contained_types(site, true)
        .iter()
        .map(|ct| Term::new(ct.title(), ct.name()))
        .collect();
    terms.sort();
    terms
}

/// Every portal type, sorted by title and then name.
#[must_use]
pub fn portal_content(registry: &ContentTypeRegistry) -> Vec<Term> {
    let mut terms: Vec<Term> = registry
        .types_with_tag(PORTAL)
        .map(|ct| Term::new(&ct.title, &ct.name))
        .collect();
    terms.sort();
    terms
}
