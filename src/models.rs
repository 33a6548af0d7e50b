//! raw data handed over by the service before it's turned into posts
use {
    crate::utils::{deserialize_count, deserialize_flag, deserialize_tags},
    hashbrown::HashMap,
    serde::{Deserialize, Serialize},
};

/// A raw field mapping describing one bookmark.
///
/// Both the long field names, the attribute names of `post` nodes (`href`,
/// `description`, `tag`, `extended`, `time`) and the short keys used by the
/// public json feeds (`u`, `d`, `t`, `n`, `dt`) are accepted. Nothing is validated here, that
/// happens when a post is built from the fields.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFields {
    /// The bookmarked url.
    #[serde(default, alias = "u", alias = "href")]
    pub url: Option<String>,
    /// The bookmark title (the service calls this the description).
    #[serde(default, alias = "d", alias = "description")]
    pub title: Option<String>,
    /// Tags attached to the bookmark.
    #[serde(default, alias = "t", alias = "tag", deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    /// Free form notes (the service calls these the extended description).
    #[serde(default, alias = "n", alias = "extended")]
    pub notes: Option<String>,
    /// Raw timestamp, checked when a full post is built.
    #[serde(default, alias = "dt", alias = "time")]
    pub date: Option<String>,
    /// Hash the service assigned to the url.
    #[serde(default)]
    pub hash: Option<String>,
    /// How many other users bookmarked the same url.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub others: Option<u64>,
    /// Whether the bookmark is public.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub shared: Option<bool>,
}

impl PostFields {
    /// make a new field mapping with a url and a title
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// set the raw date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// set the shared flag
    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = Some(shared);
        self
    }
}

/// An element-like node from a parsed service response.
///
/// Only nodes named [`PostNode::POST`] describe posts, everything else is
/// skipped when a list is built from nodes.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostNode {
    /// The element name.
    pub name: String,
    /// The element attributes.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl PostNode {
    /// the element name of nodes that describe posts
    pub const POST: &'static str = "post";

    /// make a new node without attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
        }
    }

    /// make a new `post` node
    pub fn post() -> Self {
        Self::new(Self::POST)
    }

    /// add an attribute
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// get an attribute, treating empty values as missing
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// whether this node describes a post
    pub fn is_post(&self) -> bool {
        self.name == Self::POST
    }
}

/// The already classified data a post list is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum PostSource {
    /// Parsed element nodes, each `post` node becomes a full post.
    Nodes(Vec<PostNode>),
    /// Raw field mappings, each one becomes a simple post.
    Fields(Vec<PostFields>),
}

impl From<Vec<PostNode>> for PostSource {
    fn from(value: Vec<PostNode>) -> Self {
        Self::Nodes(value)
    }
}

impl From<Vec<PostFields>> for PostSource {
    fn from(value: Vec<PostFields>) -> Self {
        Self::Fields(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_keys() {
        let fields: PostFields = serde_json::from_str(
            r#"{"u": "http://a.com", "d": "A", "t": ["x", "y"], "n": "notes", "dt": "2008-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(fields.url.as_deref(), Some("http://a.com"));
        assert_eq!(fields.title.as_deref(), Some("A"));
        assert_eq!(fields.tags, vec!["x", "y"]);
        assert_eq!(fields.notes.as_deref(), Some("notes"));
        assert_eq!(fields.date.as_deref(), Some("2008-01-01T00:00:00Z"));
    }

    #[test]
    fn test_node_attribute_keys() {
        let fields: PostFields = serde_json::from_str(
            r#"{"href": "http://a.com", "description": "A", "tag": "x y", "extended": "notes", "time": "2008-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(fields.url.as_deref(), Some("http://a.com"));
        assert_eq!(fields.title.as_deref(), Some("A"));
        assert_eq!(fields.tags, vec!["x", "y"]);
        assert_eq!(fields.notes.as_deref(), Some("notes"));
        assert_eq!(fields.date.as_deref(), Some("2008-01-01T00:00:00Z"));
    }

    #[test]
    fn test_long_keys() {
        let fields: PostFields = serde_json::from_str(
            r#"{"url": "http://a.com", "title": "A", "tags": "x y", "others": "3", "shared": "no"}"#,
        )
        .unwrap();

        assert_eq!(fields.tags, vec!["x", "y"]);
        assert_eq!(fields.others, Some(3));
        assert_eq!(fields.shared, Some(false));
        assert!(fields.hash.is_none());
    }

    #[test]
    fn test_missing_fields_stay_missing() {
        let fields: PostFields = serde_json::from_str(r#"{"d": "only a title"}"#).unwrap();
        assert!(fields.url.is_none());
        assert!(fields.tags.is_empty());
    }

    #[test]
    fn test_node_attrs() {
        let node = PostNode::post()
            .attr("href", "http://a.com")
            .attr("extended", "");

        assert!(node.is_post());
        assert_eq!(node.get("href"), Some("http://a.com"));
        assert_eq!(node.get("extended"), None);
        assert_eq!(node.get("missing"), None);
        assert!(!PostNode::new("tag").is_post());
    }

    #[test]
    fn test_source_from_vecs() {
        let source: PostSource = vec![PostFields::new("http://a.com", "A")].into();
        assert!(matches!(source, PostSource::Fields(ref f) if f.len() == 1));

        let source: PostSource = vec![PostNode::post()].into();
        assert!(matches!(source, PostSource::Nodes(ref n) if n.len() == 1));
    }
}
