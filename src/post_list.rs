//! read-only lists of posts returned by the service
use {
    crate::{
        client::Delicious,
        error::{DeliciousError, Result},
        models::{PostFields, PostNode, PostSource},
        post::{Bookmark, Post, SimplePost},
    },
    hashbrown::HashSet,
    regex::Regex,
    std::{slice, sync::Arc},
    tracing::debug,
};

/// An ordered, read-only list of posts.
///
/// Lists are built once from what the service returned. Filtering never
/// touches the list it's called on, it returns a new list bound to the same
/// service that shares the matching posts.
#[derive(Debug, Clone)]
pub struct PostList {
    /// the posts, in source order
    posts: Vec<Arc<Bookmark>>,
    /// the service the posts came from
    service: Arc<Delicious>,
}

impl PostList {
    /// build a list from an optional source
    ///
    /// node sources turn every `post` node into a full post and skip the rest,
    /// field sources turn every mapping into a simple post. the first post that
    /// fails to build fails the whole list.
    pub fn new(service: Arc<Delicious>, source: Option<PostSource>) -> Result<Self> {
        match source {
            Some(PostSource::Nodes(nodes)) => Self::from_nodes(service, &nodes),
            Some(PostSource::Fields(fields)) => Self::from_fields(service, fields),
            None => Ok(Self::empty(service)),
        }
    }

    /// make an empty list
    pub fn empty(service: Arc<Delicious>) -> Self {
        Self {
            posts: Vec::new(),
            service,
        }
    }

    /// build a list of full posts from service nodes
    pub fn from_nodes(service: Arc<Delicious>, nodes: &[PostNode]) -> Result<Self> {
        let mut list = Self::empty(service);

        for node in nodes {
            if !node.is_post() {
                debug!(name = %node.name, "skipping non-post node");
                continue;
            }

            let post = Post::from_node(Arc::clone(&list.service), node)?;
            list.push(post.into());
        }

        debug!(count = list.len(), "built post list from nodes");
        Ok(list)
    }

    /// build a list of simple posts from raw field mappings
    pub fn from_fields<I>(service: Arc<Delicious>, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = PostFields>,
    {
        let mut list = Self::empty(service);

        for f in fields {
            list.push(SimplePost::new(f)?.into());
        }

        debug!(count = list.len(), "built post list from fields");
        Ok(list)
    }

    /// append a post, only used while building
    fn push(&mut self, post: Bookmark) {
        self.posts.push(Arc::new(post));
    }

    /// a new list with the posts that pass a predicate
    fn retain_into<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Bookmark) -> bool,
    {
        Self {
            posts: self
                .posts
                .iter()
                .filter(|post| keep(post))
                .cloned()
                .collect(),
            service: Arc::clone(&self.service),
        }
    }

    /// posts tagged with every one of the given tags
    ///
    /// asking for no tags at all matches every post
    pub fn with_tags<I, S>(&self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: Vec<S> = tags.into_iter().collect();
        let filtered = self.retain_into(|post| {
            let have: HashSet<&str> = post.tags().iter().map(String::as_str).collect();
            wanted.iter().all(|tag| have.contains(tag.as_ref()))
        });

        debug!(
            tags = wanted.len(),
            matched = filtered.len(),
            "filtered posts by tags"
        );
        filtered
    }

    /// posts tagged with the given tag
    pub fn with_tag(&self, tag: &str) -> Self {
        self.with_tags([tag])
    }

    /// posts whose url matches a regular expression anywhere
    ///
    /// fails with a pattern error if the expression doesn't compile
    pub fn with_url(&self, pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern)?;
        Ok(self.with_url_regex(&re))
    }

    /// posts whose url matches a compiled regular expression anywhere
    pub fn with_url_regex(&self, re: &Regex) -> Self {
        let filtered = self.retain_into(|post| re.is_match(post.url()));

        debug!(pattern = %re, matched = filtered.len(), "filtered posts by url");
        filtered
    }

    /// the number of posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// whether there are no posts
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// the service the posts came from
    pub fn service(&self) -> &Arc<Delicious> {
        &self.service
    }

    /// whether a position holds a post
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.len()
    }

    /// the post at a position
    ///
    /// fails with an index error if `index >= len`
    pub fn get(&self, index: usize) -> Result<&Bookmark> {
        self.posts
            .get(index)
            .map(Arc::as_ref)
            .ok_or(DeliciousError::Index {
                index,
                len: self.len(),
            })
    }

    /// the shared handle to the post at a position
    pub fn get_shared(&self, index: usize) -> Result<Arc<Bookmark>> {
        self.posts
            .get(index)
            .cloned()
            .ok_or(DeliciousError::Index {
                index,
                len: self.len(),
            })
    }

    /// always fails, lists can't be written to
    pub fn set(&mut self, _index: usize, _post: Bookmark) -> Result<()> {
        Err(DeliciousError::ImmutableCollection)
    }

    /// always fails, lists can't be written to
    pub fn remove(&mut self, _index: usize) -> Result<Bookmark> {
        Err(DeliciousError::ImmutableCollection)
    }

    /// iterate over the posts in order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.posts.iter(),
        }
    }

    /// a cursor positioned on the first post
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor { list: self, key: 0 }
    }
}

impl<'a> IntoIterator for &'a PostList {
    type Item = &'a Bookmark;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the posts of a [`PostList`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// the underlying slice iterator
    inner: slice::Iter<'a, Arc<Bookmark>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Bookmark;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Arc::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Arc::as_ref)
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// A rewindable position in a [`PostList`].
///
/// The cursor is valid while `0 <= key < len`. Walking it with
/// [`Cursor::valid`] and [`Cursor::advance`] visits every post in order, and
/// [`Cursor::rewind`] starts over.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// the list being walked
    list: &'a PostList,
    /// the current position
    key: usize,
}

impl<'a> Cursor<'a> {
    /// whether the cursor points at a post
    pub fn valid(&self) -> bool {
        self.key < self.list.len()
    }

    /// the post under the cursor
    pub fn current(&self) -> Option<&'a Bookmark> {
        self.list.posts.get(self.key).map(Arc::as_ref)
    }

    /// the current position
    pub fn key(&self) -> usize {
        self.key
    }

    /// move to the next position
    pub fn advance(&mut self) {
        self.key = self.key.saturating_add(1);
    }

    /// move back to the first position
    pub fn rewind(&mut self) {
        self.key = 0;
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = &'a Bookmark;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current()?;
        self.advance();
        Some(current)
    }
}
