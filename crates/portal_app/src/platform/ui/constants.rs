pub const PROMPT: &str = "docportal> ";

pub const CMD_SEARCH: &[&str] = &["search", "s"];
pub const CMD_UPLOAD: &[&str] = &["upload", "index", "u"];
pub const CMD_HEALTH: &[&str] = &["health"];
pub const CMD_HELP: &[&str] = &["help", "?"];
pub const CMD_QUIT: &[&str] = &["quit", "exit", "q"];

pub const LOADING_MARK: &str = "...";
pub const ERROR_MARK: &str = "[error]";
pub const SUCCESS_MARK: &str = "[ok]";
