use const_format::concatcp;
use leptos::prelude::{Memo, Read};
use leptos_router::params::ParamsMap;

pub const LOGIN_ROUTE: &str = "/login";
pub const VERIFY_IDENTITY_ROUTE: &str = "/verify-identity";
pub const ACCESS_DENIED_ROUTE: &str = "/access-denied";
pub const COMMUNITY_ID_QUERY_PARAM: &str = "community";
pub const COMMUNITY_ROUTE_PREFIX: &str = "/communities";
pub const COMMUNITY_ROUTE_PARAM_NAME: &str = "community_id";
pub const POST_ROUTE_PREFIX: &str = "/posts";
pub const POST_ROUTE_PARAM_NAME: &str = "post_id";
pub const PUBLISH_ROUTE: &str = "/publish";
pub const CREATE_POST_SUFFIX: &str = "/post";
pub const SETTINGS_ROUTE: &str = "/settings";
pub const NOTIFICATION_SETTINGS_SUFFIX: &str = "/notifications";
pub const NOTIFICATION_SETTINGS_ROUTE: &str = concatcp!(SETTINGS_ROUTE, NOTIFICATION_SETTINGS_SUFFIX);

/// # Returns the path to a community's feed given its id
///
/// ```
/// use neighborly_utils::routes::get_community_path;
///
/// assert_eq!(get_community_path("maple-street"), "/communities/maple-street");
/// ```
pub fn get_community_path(
    community_id: &str,
) -> String {
    format!("{COMMUNITY_ROUTE_PREFIX}/{community_id}")
}

/// # Returns the path to a post given its id and community
///
/// ```
/// use neighborly_utils::routes::get_post_path;
///
/// assert_eq!(get_post_path("maple-street", "post-1"), "/communities/maple-street/posts/post-1");
/// ```
pub fn get_post_path(
    community_id: &str,
    post_id: &str,
) -> String {
    format!("{COMMUNITY_ROUTE_PREFIX}/{community_id}{POST_ROUTE_PREFIX}/{post_id}")
}

/// # Returns the path to the post creation page of a community
///
/// ```
/// use neighborly_utils::routes::get_create_post_path;
///
/// assert_eq!(get_create_post_path("maple-street"), "/communities/maple-street/publish/post");
/// ```
pub fn get_create_post_path(
    community_id: &str,
) -> String {
    format!("{COMMUNITY_ROUTE_PREFIX}/{community_id}{PUBLISH_ROUTE}{CREATE_POST_SUFFIX}")
}

/// # Returns the path of the access denied page for the given community
///
/// ```
/// use neighborly_utils::routes::get_access_denied_path;
///
/// assert_eq!(get_access_denied_path("maple-street"), "/access-denied?community=maple-street");
/// assert_eq!(get_access_denied_path("elm & oak#1"), "/access-denied?community=elm+%26+oak%231");
/// ```
pub fn get_access_denied_path(
    community_id: &str,
) -> String {
    let community_id: String = url::form_urlencoded::byte_serialize(community_id.as_bytes()).collect();
    format!("{ACCESS_DENIED_ROUTE}?{COMMUNITY_ID_QUERY_PARAM}={community_id}")
}

/// # Extract the community id from the current path, if it exists
///
/// ```
/// use neighborly_utils::routes::get_community_from_path;
///
/// assert_eq!(get_community_from_path("/settings"), None);
/// assert_eq!(get_community_from_path("/communities/maple-street"), Some(String::from("maple-street")));
/// assert_eq!(get_community_from_path("/communities/maple-street/posts/1"), Some(String::from("maple-street")));
/// ```
pub fn get_community_from_path(path: &str) -> Option<String> {
    if path.starts_with(COMMUNITY_ROUTE_PREFIX) {
        path.split('/').nth(2).filter(|id| !id.is_empty()).map(String::from)
    } else {
        None
    }
}

/// Get a memo returning the last valid route parameter of the given name. Used to avoid triggering resources when leaving pages.
fn get_param_memo(params: Memo<ParamsMap>, param_name: &'static str) -> Memo<String> {
    Memo::new(move |current_value: Option<&String>| {
        if let Some(new_value) = params.read().get_str(param_name) {
            log::trace!("Current {param_name}: {current_value:?}, new {param_name}: {new_value}");
            new_value.to_string()
        } else {
            log::trace!("Could not find {param_name}, keep current value: {current_value:?}");
            current_value.cloned().unwrap_or_default()
        }
    })
}

pub fn get_community_id_memo(params: Memo<ParamsMap>) -> Memo<String> {
    get_param_memo(params, COMMUNITY_ROUTE_PARAM_NAME)
}

pub fn get_post_id_memo(params: Memo<ParamsMap>) -> Memo<String> {
    get_param_memo(params, POST_ROUTE_PARAM_NAME)
}
