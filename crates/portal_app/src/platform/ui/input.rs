use portal_core::Msg;

use super::constants::*;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Submit(Vec<Msg>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// The argument is passed on untrimmed; validation happens in the core.
pub fn parse_line(line: &str) -> UserCommand {
    let line = line.trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line.trim_end(), ""),
    };
    let word = word.to_ascii_lowercase();

    if word.is_empty() {
        UserCommand::Empty
    } else if CMD_SEARCH.contains(&word.as_str()) {
        UserCommand::Submit(vec![
            Msg::SearchInputChanged(rest.to_string()),
            Msg::SearchSubmitted,
        ])
    } else if CMD_UPLOAD.contains(&word.as_str()) {
        UserCommand::Submit(vec![
            Msg::UploadInputChanged(rest.to_string()),
            Msg::UploadSubmitted,
        ])
    } else if CMD_HEALTH.contains(&word.as_str()) {
        UserCommand::Submit(vec![Msg::HealthCheckRequested])
    } else if CMD_HELP.contains(&word.as_str()) {
        UserCommand::Help
    } else if CMD_QUIT.contains(&word.as_str()) {
        UserCommand::Quit
    } else {
        UserCommand::Unknown(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse_line("search  hybrid   retrieval\n"),
            UserCommand::Submit(vec![
                Msg::SearchInputChanged(" hybrid   retrieval\n".to_string()),
                Msg::SearchSubmitted,
            ])
        );
    }

    #[test]
    fn bare_command_submits_empty_input() {
        assert_eq!(
            parse_line("UPLOAD"),
            UserCommand::Submit(vec![
                Msg::UploadInputChanged(String::new()),
                Msg::UploadSubmitted,
            ])
        );
    }

    #[test]
    fn control_words() {
        assert_eq!(parse_line("   "), UserCommand::Empty);
        assert_eq!(parse_line("?"), UserCommand::Help);
        assert_eq!(parse_line("exit"), UserCommand::Quit);
        assert_eq!(
            parse_line("health"),
            UserCommand::Submit(vec![Msg::HealthCheckRequested])
        );
        assert_eq!(parse_line("frobnicate x"), UserCommand::Unknown("frobnicate".to_string()));
    }
}
