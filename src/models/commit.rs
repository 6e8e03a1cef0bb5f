use super::RefInfo;

/// One entry of a revision's log.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub id: String,
    pub short_id: String,
    /// First parent, or the commit's own id for a root commit
    pub parent_id: String,
    pub parent_short_id: String,
    pub author: String,
    pub timestamp: i64,
    pub when: String,
    pub summary: String,
    pub message: String,
    pub url: String,
    pub parent_url: String,
    /// References pointing exactly at this commit
    pub refs: Vec<RefInfo>,
}

impl CommitRecord {
    pub fn is_root(&self) -> bool {
        self.parent_id == self.id
    }
}
