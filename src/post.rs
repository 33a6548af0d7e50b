//! bookmark value objects
use {
    crate::{
        client::{Delicious, ServiceRequest},
        error::{DeliciousError, Result},
        models::{PostFields, PostNode},
        utils::parse_date,
    },
    chrono::{DateTime, Utc},
    hashbrown::HashSet,
    std::sync::Arc,
};

/// require a non-empty url and title
fn require_url_and_title(fields: &mut PostFields) -> Result<(String, String)> {
    match (fields.url.take(), fields.title.take()) {
        (Some(url), Some(title)) if !url.is_empty() && !title.is_empty() => Ok((url, title)),
        _ => Err(DeliciousError::validation(
            "'url' and 'title' are required to build a post",
        )),
    }
}

/// check that a tag can be sent to the service (tags are joined with spaces)
fn check_tag(tag: &str) -> Result<()> {
    if tag.is_empty() || tag.chars().any(char::is_whitespace) {
        return Err(DeliciousError::validation(format!(
            "tags must be non-empty and can't contain whitespace, got '{}'",
            tag
        )));
    }

    Ok(())
}

/// collapse duplicate tags, keeping the first occurrence
fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// check every tag and collapse duplicates
fn checked_tags(tags: Vec<String>) -> Result<Vec<String>> {
    for tag in &tags {
        check_tag(tag)?;
    }

    Ok(dedup_tags(tags))
}

/// The minimal bookmark: a url, a title, tags and notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePost {
    /// the bookmarked url
    url: String,
    /// the title
    title: String,
    /// tags, deduplicated, in first-seen order
    tags: Vec<String>,
    /// free form notes
    notes: Option<String>,
}

impl SimplePost {
    /// build a simple post from raw fields
    ///
    /// fails with a validation error when the url or title is missing or empty,
    /// or when a tag is empty or contains whitespace. service metadata in the
    /// fields is ignored
    pub fn new(mut fields: PostFields) -> Result<Self> {
        let (url, title) = require_url_and_title(&mut fields)?;

        Ok(Self {
            url,
            title,
            tags: checked_tags(fields.tags)?,
            notes: fields.notes,
        })
    }

    /// the bookmarked url
    pub fn url(&self) -> &str {
        &self.url
    }

    /// the title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// the tags in first-seen order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// the notes, if any
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// whether the post carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A bookmark fetched from a user's account, with the metadata the service
/// keeps about it.
///
/// The setters only change the local copy. Use [`Post::save_request`] to get
/// the request that would store the changes.
#[derive(Debug, Clone)]
pub struct Post {
    /// url, title, tags and notes
    post: SimplePost,
    /// when the post was saved
    date: Option<DateTime<Utc>>,
    /// hash the service assigned to the url
    hash: Option<String>,
    /// how many other users saved the url
    others: Option<u64>,
    /// whether the post is public
    shared: bool,
    /// the service the post came from
    service: Arc<Delicious>,
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.post == other.post
            && self.date == other.date
            && self.hash == other.hash
            && self.others == other.others
            && self.shared == other.shared
    }
}

impl Post {
    /// build a post from raw fields
    ///
    /// fails with a validation error when the url or title is missing, when a
    /// tag is empty or contains whitespace, or when a date is given that isn't a
    /// valid timestamp
    pub fn new(service: Arc<Delicious>, mut fields: PostFields) -> Result<Self> {
        let (url, title) = require_url_and_title(&mut fields)?;
        let date = match fields.date.as_deref() {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| {
                DeliciousError::validation(format!(
                    "'date' must be a valid timestamp, got '{}'",
                    raw
                ))
            })?),
            None => None,
        };

        Ok(Self {
            post: SimplePost {
                url,
                title,
                tags: checked_tags(fields.tags)?,
                notes: fields.notes,
            },
            date,
            hash: fields.hash,
            others: fields.others,
            shared: fields.shared.unwrap_or(true),
            service,
        })
    }

    /// build a post from a `post` node, using the service to read its attributes
    pub fn from_node(service: Arc<Delicious>, node: &PostNode) -> Result<Self> {
        let fields = service.fields_from_node(node);
        Self::new(service, fields)
    }

    /// the url, title, tags and notes of the post
    pub fn as_simple(&self) -> &SimplePost {
        &self.post
    }

    /// the bookmarked url
    pub fn url(&self) -> &str {
        self.post.url()
    }

    /// the title
    pub fn title(&self) -> &str {
        self.post.title()
    }

    /// the tags in first-seen order
    pub fn tags(&self) -> &[String] {
        self.post.tags()
    }

    /// the notes, if any
    pub fn notes(&self) -> Option<&str> {
        self.post.notes()
    }

    /// whether the post carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.post.has_tag(tag)
    }

    /// when the post was saved, if the service said so
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    /// the url hash, if known
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// how many other users saved the url, if known
    pub fn others(&self) -> Option<u64> {
        self.others
    }

    /// whether the post is public
    pub fn shared(&self) -> bool {
        self.shared
    }

    /// the service the post came from
    pub fn service(&self) -> &Arc<Delicious> {
        &self.service
    }

    /// set the title, which can't be empty
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<&mut Self> {
        let title = title.into();
        if title.is_empty() {
            return Err(DeliciousError::validation("'title' can't be empty"));
        }

        self.post.title = title;
        Ok(self)
    }

    /// set the notes
    pub fn set_notes(&mut self, notes: impl Into<String>) -> &mut Self {
        self.post.notes = Some(notes.into());
        self
    }

    /// replace every tag
    ///
    /// nothing changes if any of the tags is invalid
    pub fn set_tags<I, S>(&mut self, tags: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.post.tags = checked_tags(tags.into_iter().map(Into::into).collect())?;
        Ok(self)
    }

    /// add a tag, adding one that's already there does nothing
    pub fn add_tag(&mut self, tag: impl Into<String>) -> Result<&mut Self> {
        let tag = tag.into();
        check_tag(&tag)?;

        if !self.post.has_tag(&tag) {
            self.post.tags.push(tag);
        }

        Ok(self)
    }

    /// remove a tag, removing one that isn't there does nothing
    pub fn remove_tag(&mut self, tag: &str) -> &mut Self {
        self.post.tags.retain(|t| t != tag);
        self
    }

    /// set whether the post is public
    pub fn set_shared(&mut self, shared: bool) -> &mut Self {
        self.shared = shared;
        self
    }

    /// the request that would store this post (replacing the saved copy)
    pub fn save_request(&self) -> ServiceRequest {
        self.service.save_post_request(self)
    }

    /// the request that would delete this post
    pub fn delete_request(&self) -> ServiceRequest {
        self.service.delete_post_request(self.url())
    }
}

/// A post as stored in a [`PostList`](crate::post_list::PostList).
///
/// Lists built from raw field mappings hold simple posts, lists built from
/// service nodes hold full ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Bookmark {
    /// a post without service metadata
    Simple(SimplePost),
    /// a post with service metadata
    Full(Post),
}

impl Bookmark {
    /// the url, title, tags and notes
    pub fn as_simple(&self) -> &SimplePost {
        match self {
            Self::Simple(post) => post,
            Self::Full(post) => post.as_simple(),
        }
    }

    /// the full post, if this is one
    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Self::Simple(_) => None,
            Self::Full(post) => Some(post),
        }
    }

    /// the bookmarked url
    pub fn url(&self) -> &str {
        self.as_simple().url()
    }

    /// the title
    pub fn title(&self) -> &str {
        self.as_simple().title()
    }

    /// the tags in first-seen order
    pub fn tags(&self) -> &[String] {
        self.as_simple().tags()
    }

    /// the notes, if any
    pub fn notes(&self) -> Option<&str> {
        self.as_simple().notes()
    }

    /// whether the post carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.as_simple().has_tag(tag)
    }
}

impl From<SimplePost> for Bookmark {
    fn from(value: SimplePost) -> Self {
        Self::Simple(value)
    }
}

impl From<Post> for Bookmark {
    fn from(value: Post) -> Self {
        Self::Full(value)
    }
}
