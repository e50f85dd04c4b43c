use const_format::formatcp;
use url::Url;
use validator::ValidationError;
use crate::constants::{MAX_CATEGORY_LENGTH, MAX_LINK_LENGTH, MAX_MEDIA_URLS, MAX_SEARCH_QUERY_LENGTH, MAX_TITLE_LENGTH};
use crate::errors::AppError;

/// # Returns whether the given string `input` is shorter or equal than the given max length and, if not `is_empty_ok` than it's not empty
///
/// ```
/// use neighborly_utils::checks::check_string_length;
/// use neighborly_utils::errors::AppError;
///
/// assert!(check_string_length("hello", "input", 5, false).is_ok());
/// assert_eq!(check_string_length("hello", "input", 4, false), Err(AppError::invalid("input exceeds the maximum length: 4.")));
/// assert_eq!(check_string_length("", "input", 4, false), Err(AppError::invalid("input cannot be empty.")));
/// assert!(check_string_length("", "input", 4, true).is_ok());
/// ```
pub fn check_string_length(
    input: &str,
    input_name: &str,
    max_length: usize,
    is_empty_ok: bool,
) -> Result<(), AppError> {
    match (input.chars().count() > max_length, !is_empty_ok && input.is_empty()) {
        (true, _) => Err(AppError::invalid(format!("{input_name} exceeds the maximum length: {max_length}."))),
        (_, true) => Err(AppError::invalid(format!("{input_name} cannot be empty."))),
        (false, false) => Ok(()),
    }
}

/// # Returns whether a category tag is valid.
///
/// # Valid category tags contain only lowercase ascii letters, digits and '-' and have a maximum length of `MAX_CATEGORY_LENGTH`
///
/// ```
/// use neighborly_utils::checks::check_category_tag;
/// use neighborly_utils::constants::MAX_CATEGORY_LENGTH;
///
/// assert!(check_category_tag("lost-and-found").is_ok());
/// assert!(check_category_tag("emergency").is_ok());
/// assert!(check_category_tag("").is_err());
/// assert!(check_category_tag("Lost").is_err());
/// assert!(check_category_tag("lost found").is_err());
/// assert!(check_category_tag(&"a".repeat(MAX_CATEGORY_LENGTH)).is_ok());
/// assert!(check_category_tag(&"a".repeat(MAX_CATEGORY_LENGTH + 1)).is_err());
/// ```
pub fn check_category_tag(category: &str) -> Result<(), ValidationError> {
    if category.is_empty() {
        Err(ValidationError::new("Category cannot be empty."))
    } else if !category.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        Err(ValidationError::new("Category can only contain lowercase letters, digits and dashes."))
    } else if category.len() > MAX_CATEGORY_LENGTH {
        Err(ValidationError::new(formatcp!("Category cannot exceed {MAX_CATEGORY_LENGTH} characters.")))
    } else {
        Ok(())
    }
}

/// # Returns whether a post's title is valid.
///
/// ```
/// use neighborly_utils::checks::check_post_title;
/// use neighborly_utils::constants::MAX_TITLE_LENGTH;
///
/// assert!(check_post_title("Lost cat on Elm street").is_ok());
/// assert!(check_post_title("").is_err());
/// assert!(check_post_title("   ").is_err());
/// assert!(check_post_title("invalid\ntitle").is_err());
/// assert!(check_post_title(&"a".repeat(MAX_TITLE_LENGTH as usize)).is_ok());
/// assert!(check_post_title(&"a".repeat(MAX_TITLE_LENGTH as usize + 1)).is_err());
/// ```
pub fn check_post_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        Err(ValidationError::new("Title cannot be empty."))
    } else if title.contains(['\n', '\r']) {
        Err(ValidationError::new("Title cannot contain line breaks."))
    } else if title.chars().count() > MAX_TITLE_LENGTH as usize {
        Err(ValidationError::new(formatcp!("Title cannot exceed {MAX_TITLE_LENGTH} characters.")))
    } else {
        Ok(())
    }
}

/// # Returns whether a media url is a valid http(s) link.
///
/// ```
/// use neighborly_utils::checks::check_media_url;
///
/// assert!(check_media_url("https://example.com/cat.jpg").is_ok());
/// assert!(check_media_url("http://example.com/cat.jpg").is_ok());
/// assert!(check_media_url("ftp://example.com/cat.jpg").is_err());
/// assert!(check_media_url("not a url").is_err());
/// ```
pub fn check_media_url(media_url: &str) -> Result<(), ValidationError> {
    if media_url.len() > MAX_LINK_LENGTH {
        return Err(ValidationError::new(formatcp!("Media links cannot exceed {MAX_LINK_LENGTH} characters.")));
    }
    match Url::parse(media_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        Ok(_) => Err(ValidationError::new("Media links must use http or https.")),
        Err(_) => Err(ValidationError::new("Invalid media link.")),
    }
}

/// # Returns whether a list of media urls is valid.
///
/// ```
/// use neighborly_utils::checks::check_media_urls;
/// use neighborly_utils::constants::MAX_MEDIA_URLS;
///
/// assert!(check_media_urls(&[]).is_ok());
/// assert!(check_media_urls(&[String::from("https://example.com/a.png")]).is_ok());
/// assert!(check_media_urls(&[String::from("https://example.com/a.png"), String::from("invalid")]).is_err());
/// assert!(check_media_urls(&vec![String::from("https://example.com/a.png"); MAX_MEDIA_URLS as usize + 1]).is_err());
/// ```
pub fn check_media_urls(media_urls: &[String]) -> Result<(), ValidationError> {
    if media_urls.len() > MAX_MEDIA_URLS as usize {
        return Err(ValidationError::new(formatcp!("A post cannot have more than {MAX_MEDIA_URLS} media links.")));
    }
    media_urls.iter().try_for_each(|media_url| check_media_url(media_url))
}

/// # Returns whether a search query is valid, i.e. not longer than `MAX_SEARCH_QUERY_LENGTH`
///
/// ```
/// use neighborly_utils::checks::check_search_query;
/// use neighborly_utils::constants::MAX_SEARCH_QUERY_LENGTH;
///
/// assert!(check_search_query("").is_ok());
/// assert!(check_search_query("garage sale").is_ok());
/// assert!(check_search_query(&"a".repeat(MAX_SEARCH_QUERY_LENGTH + 1)).is_err());
/// ```
pub fn check_search_query(query: &str) -> Result<(), AppError> {
    check_string_length(query, "Search query", MAX_SEARCH_QUERY_LENGTH, true)
}
