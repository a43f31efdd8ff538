use uuid::Uuid;

use crate::tags;

/// A group of related cards sharing content.
///
/// The scheduler reads a fact's tags for filtering and uses its id as the
/// spacing key; everything else about facts lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub id: Uuid,
    /// Canonicalized space-separated tag string.
    pub tags: String,
    pub modified: i64,
}

impl Fact {
    pub fn new(id: Uuid, tags: &str, modified: i64) -> Fact {
        Fact {
            id,
            tags: tags::join_tags(&tags::canonify_tags(tags::parse_tags(tags))),
            modified,
        }
    }

    /// The fact's tags as a list.
    pub fn tag_list(&self) -> Vec<String> {
        tags::parse_tags(&self.tags)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        tags::has_tag(&self.tags, tag)
    }
}
