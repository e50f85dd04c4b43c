pub const SECONDS_IN_MINUTE: i64 = 60;
pub const MINUTES_IN_HOUR: i64 = 60;
pub const HOURS_IN_DAY: i64 = 24;
pub const DAYS_IN_MONTH: i64 = 31;
pub const DAYS_IN_YEAR: i64 = 365;


pub const SECONDS_IN_HOUR: i64 = MINUTES_IN_HOUR*SECONDS_IN_MINUTE;
pub const SECONDS_IN_DAY: i64 = HOURS_IN_DAY*SECONDS_IN_HOUR;
pub const SECONDS_IN_MONTH: i64 = DAYS_IN_MONTH*SECONDS_IN_DAY;
pub const SECONDS_IN_YEAR: i64 = DAYS_IN_YEAR*SECONDS_IN_DAY;


pub const SITE_ROOT: &str = "/";
pub const LOGO_ICON_PATH: &str = "/svg/house.svg";


pub const EMERGENCY_CATEGORY: &str = "emergency";
pub const GENERAL_CATEGORY: &str = "general";


pub const MAX_TITLE_LENGTH: u64 = 250;
pub const MAX_CONTENT_LENGTH: u64 = 20000;
pub const MAX_COMMENT_LENGTH: u64 = 10000;
pub const MAX_CATEGORY_LENGTH: usize = 50;
pub const MAX_GEOGRAPHIC_TAG_LENGTH: u64 = 100;
pub const MAX_MEDIA_URLS: u64 = 10;
pub const MAX_LINK_LENGTH: usize = 500;
pub const MAX_SEARCH_QUERY_LENGTH: usize = 200;


pub const MAX_REPLY_DEPTH: usize = 3;
pub const SEARCH_DEBOUNCE_DELAY_MS: f64 = 300.0;
pub const MAX_SEARCH_SUGGESTIONS: usize = 5;
pub const PROGRESS_RESET_DELAY_MS: u64 = 1000;
