use super::CommandIntent;

/// How a route recognises its line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Matcher {
    /// Any line starting with the text.
    Prefix(&'static str),
    /// The word alone, or followed by whitespace and arguments.
    Keyword(&'static str),
    /// The whole line and nothing else.
    Exact(&'static str),
}

impl Matcher {
    /// Returns the remainder of `line` after the match.
    pub fn strip<'a>(&self, line: &'a str) -> Option<&'a str> {
        match *self {
            Matcher::Prefix(prefix) => line.strip_prefix(prefix),
            Matcher::Keyword(word) => {
                let rest = line.strip_prefix(word)?;
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    Some(rest.trim())
                } else {
                    None
                }
            }
            Matcher::Exact(text) => (line == text).then_some(""),
        }
    }
}

pub struct Route {
    pub matcher: Matcher,
    pub build: fn(&str) -> CommandIntent,
}

/// Checked top to bottom; the first match wins.
pub const ROUTES: &[Route] = &[
    Route {
        matcher: Matcher::Prefix("?"),
        build: |rest| CommandIntent::AiQuery(rest.trim().to_string()),
    },
    Route {
        matcher: Matcher::Keyword("!explain"),
        build: |rest| CommandIntent::Explain(rest.to_string()),
    },
    Route {
        matcher: Matcher::Keyword("!git"),
        build: |rest| CommandIntent::Git(rest.split_whitespace().map(String::from).collect()),
    },
    Route {
        matcher: Matcher::Keyword("!find"),
        build: |rest| CommandIntent::Find(rest.to_string()),
    },
    Route {
        matcher: Matcher::Keyword("cd"),
        build: |rest| CommandIntent::ChangeDir(rest.to_string()),
    },
    Route {
        matcher: Matcher::Keyword("!create"),
        build: |_| CommandIntent::Scaffold,
    },
    Route {
        matcher: Matcher::Exact("!help"),
        build: |_| CommandIntent::Help,
    },
    Route {
        matcher: Matcher::Exact("!models"),
        build: |_| CommandIntent::ListModels,
    },
];

pub struct IntentMatcher;

impl IntentMatcher {
    /// Classifies a trimmed input line. Unmatched lines go to the shell.
    pub fn analyze(line: &str) -> CommandIntent {
        Self::analyze_with(ROUTES, line)
    }

    pub fn analyze_with(routes: &[Route], line: &str) -> CommandIntent {
        routes
            .iter()
            .find_map(|route| route.matcher.strip(line).map(route.build))
            .unwrap_or_else(|| CommandIntent::Shell(line.to_string()))
    }
}
