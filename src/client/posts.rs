//! service extensions for post operations
use {
    crate::{
        client::{Delicious, ServiceRequest},
        error::Result,
        models::{PostFields, PostSource},
        post::Post,
        post_list::PostList,
        utils::format_date,
    },
    std::sync::Arc,
    tracing::{debug, instrument},
};

/// api path for storing a post
pub const PATH_POSTS_ADD: &str = "/posts/add";
/// api path for deleting a post
pub const PATH_POSTS_DELETE: &str = "/posts/delete";

impl Delicious {
    /// build a post list from a json feed (an array of field mappings)
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn posts_from_json(self: &Arc<Self>, bytes: &[u8]) -> Result<PostList> {
        let fields: Vec<PostFields> = serde_json::from_slice(bytes)?;

        debug!(count = fields.len(), "decoded feed");
        self.post_list(Some(PostSource::Fields(fields)))
    }

    /// the public feed url for this account, optionally narrowed to one tag
    pub fn feed_url(&self, tag: Option<&str>) -> String {
        let mut url = format!(
            "{}/{}",
            self.feeds_url.trim_end_matches('/'),
            urlencoding::encode(&self.username)
        );

        if let Some(tag) = tag {
            url.push('/');
            url.push_str(&urlencoding::encode(tag));
        }

        url
    }

    /// the request that stores a post, replacing any saved copy of its url
    pub fn save_post_request(&self, post: &Post) -> ServiceRequest {
        let mut req = ServiceRequest::new(&self.base_url, PATH_POSTS_ADD)
            .param("url", post.url())
            .param("description", post.title())
            .param("extended", post.notes().unwrap_or_default())
            .param("tags", post.tags().join(" "));

        if let Some(date) = post.date() {
            req = req.param("dt", format_date(&date));
        }

        req.param("shared", if post.shared() { "yes" } else { "no" })
            .param("replace", "yes")
    }

    /// the request that deletes the post saved for a url
    pub fn delete_post_request(&self, url: &str) -> ServiceRequest {
        ServiceRequest::new(&self.base_url, PATH_POSTS_DELETE).param("url", url)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{config::options::DeliciousCfg, error::DeliciousError},
    };

    fn service() -> Arc<Delicious> {
        let mut service = Delicious::from_config(&DeliciousCfg::default());
        service.username = "zfTestUser".into();
        Arc::new(service)
    }

    #[test]
    fn test_posts_from_json() {
        let feed = br#"[
            {"u": "http://a.com", "d": "A", "t": ["x", "y"]},
            {"u": "http://b.org", "d": "B", "t": ["y"], "n": "notes"}
        ]"#;
        let list = service().posts_from_json(feed).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().notes(), Some("notes"));
        assert!(list.get(0).unwrap().as_post().is_none());
    }

    #[test]
    fn test_posts_from_bad_json() {
        let err = service().posts_from_json(b"{not json").unwrap_err();
        assert!(matches!(err, DeliciousError::Json(_)));
    }

    #[test]
    fn test_posts_from_json_missing_title() {
        let err = service()
            .posts_from_json(br#"[{"u": "http://a.com"}]"#)
            .unwrap_err();
        assert!(matches!(err, DeliciousError::Validation(_)));
    }

    #[test]
    fn test_feed_url() {
        let service = service();

        assert_eq!(
            service.feed_url(None),
            "https://feeds.delicious.com/v2/json/zfTestUser"
        );
        assert_eq!(
            service.feed_url(Some("c++")),
            "https://feeds.delicious.com/v2/json/zfTestUser/c%2B%2B"
        );
    }

    #[test]
    fn test_save_request() {
        let service = service();
        let fields = PostFields::new("http://a.com", "A")
            .with_tags(["x", "y"])
            .with_date("2005-11-28T05:26:09Z")
            .with_shared(false);
        let post = Post::new(Arc::clone(&service), fields).unwrap();
        let req = post.save_request();

        assert_eq!(req.path, PATH_POSTS_ADD);
        assert_eq!(req.get("url"), Some("http://a.com"));
        assert_eq!(req.get("description"), Some("A"));
        assert_eq!(req.get("extended"), Some(""));
        assert_eq!(req.get("tags"), Some("x y"));
        assert_eq!(req.get("dt"), Some("2005-11-28T05:26:09Z"));
        assert_eq!(req.get("shared"), Some("no"));
        assert_eq!(req.get("replace"), Some("yes"));
    }

    #[test]
    fn test_save_request_reflects_edits() {
        let service = service();
        let mut post = Post::new(service, PostFields::new("http://a.com", "A")).unwrap();
        post.set_title("B").unwrap().add_tag("z").unwrap();
        let req = post.save_request();

        assert_eq!(req.get("description"), Some("B"));
        assert_eq!(req.get("tags"), Some("z"));
        assert_eq!(req.get("dt"), None);
        assert_eq!(req.get("shared"), Some("yes"));
    }

    #[test]
    fn test_delete_request() {
        let post = Post::new(service(), PostFields::new("http://a.com", "A")).unwrap();
        let req = post.delete_request();

        assert_eq!(
            req.url(),
            "https://api.del.icio.us/v1/posts/delete?url=http%3A%2F%2Fa.com"
        );
    }
}
