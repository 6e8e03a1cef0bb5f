//! Revisions and references.

/// A requested revision after resolution. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// Full commit id
    pub id: String,
    /// Reference name if the user asked for one, otherwise the short id
    pub name: String,
}

/// A branch or tag as stored in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Full name, e.g. `refs/heads/main`
    pub refspec: String,
    /// Short name, e.g. `main`
    pub name: String,
    /// Commit the reference peels to
    pub id: String,
}

/// One row of the references page; also attached to log entries as a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefInfo {
    pub id: String,
    pub refspec: String,
    /// Tree URL, only set for references that were requested for rendering
    pub url: Option<String>,
}
