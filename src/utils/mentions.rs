use regex::Regex;
use std::sync::OnceLock;

fn mention_regex() -> &'static Regex {
    static MENTION: OnceLock<Regex> = OnceLock::new();
    MENTION.get_or_init(|| Regex::new(r"@(\w+)").expect("mention pattern is valid"))
}

/// Usernames referenced as `@name`, in order of appearance, duplicates kept.
pub fn extract_mentions(content: &str) -> Vec<String> {
    mention_regex()
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_each_mention() {
        assert_eq!(
            extract_mentions("ping @alice and @bob_2, cc @alice."),
            vec!["alice", "bob_2", "alice"]
        );
    }

    #[test]
    fn ignores_bare_at() {
        assert!(extract_mentions("email me @ home").is_empty());
    }
}
