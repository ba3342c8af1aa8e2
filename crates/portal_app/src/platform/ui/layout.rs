use crate::platform::config::AppConfig;

pub fn banner(config: &AppConfig) -> Vec<String> {
    let mut lines = vec![
        "docportal: document search and indexing".to_string(),
        format!("  search endpoint: {}", config.search_url),
        format!("  index endpoint:  {}", config.index_url),
        String::new(),
    ];
    lines.extend(help_lines());
    lines
}

pub fn help_lines() -> Vec<String> {
    [
        "Commands:",
        "  search <query>      search indexed documents",
        "  upload <location>   submit a file path or URL for indexing",
        "  health              probe both services",
        "  help                show this list",
        "  quit                leave",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}
