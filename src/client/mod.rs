//! del.icio.us service stuff
use {
    crate::{
        config::options::{ApiCfg, DeliciousCfg},
        error::*,
        getopt,
        models::{PostFields, PostNode, PostSource},
        post_list::PostList,
        utils::{parse_flag, split_tags},
    },
    std::sync::Arc,
    tracing::debug,
};

pub mod posts;
pub mod request;

pub use request::ServiceRequest;

/// The service a bookmark list was fetched from.
///
/// It only holds the account and endpoint settings. Fetching and parsing
/// responses happens elsewhere; this type turns the parsed data into posts and
/// builds the requests that would write changes back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delicious {
    /// the account name
    pub username: String,
    /// the base url for api requests
    pub base_url: String,
    /// the base url for public json feeds
    pub feeds_url: String,
    /// the user agent requests should carry
    pub user_agent: String,
}

impl Delicious {
    /// make a new service handle using the endpoints from the global config
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();

        debug!(username, "initialized delicious service");

        Self {
            username,
            base_url: getopt!(api.base_url),
            feeds_url: getopt!(api.feeds_url),
            user_agent: getopt!(api.user_agent),
        }
    }

    /// make a new service handle from an explicit config
    pub fn from_config(cfg: &DeliciousCfg) -> Self {
        let defaults = ApiCfg::default();
        let api = cfg.api.clone().unwrap_or_default();

        Self {
            username: cfg
                .login
                .as_ref()
                .and_then(|login| login.username.clone())
                .unwrap_or_default(),
            base_url: api.base_url.or(defaults.base_url).unwrap_or_default(),
            feeds_url: api.feeds_url.or(defaults.feeds_url).unwrap_or_default(),
            user_agent: api.user_agent.or(defaults.user_agent).unwrap_or_default(),
        }
    }

    /// read the fields of a `post` node
    ///
    /// the service names its attributes `href`, `description`, `extended`,
    /// `tag`, `time`, `hash`, `others` and `shared`
    pub fn fields_from_node(&self, node: &PostNode) -> PostFields {
        PostFields {
            url: node.get("href").map(str::to_string),
            title: node.get("description").map(str::to_string),
            tags: node.get("tag").map(split_tags).unwrap_or_default(),
            notes: node.get("extended").map(str::to_string),
            date: node.get("time").map(str::to_string),
            hash: node.get("hash").map(str::to_string),
            // counts the service can't make sense of are treated as unknown
            others: node.get("others").and_then(|v| v.trim().parse().ok()),
            shared: node.get("shared").map(parse_flag),
        }
    }

    /// build a post list bound to this service
    pub fn post_list(self: &Arc<Self>, source: Option<PostSource>) -> Result<PostList> {
        PostList::new(Arc::clone(self), source)
    }
}
