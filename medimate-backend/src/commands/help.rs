//! Help command - lists available commands

/// Execute the help command
pub fn execute(implicit_search_enabled: bool) -> String {
    let mut text = "I can help you with the following commands:\n\
        /search [medication name] - Get medication details\n\
        /notes [topic] - Get medical notes on a topic"
        .to_string();
    if implicit_search_enabled {
        text.push_str("\nYou can also just send a medication name.");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_variants() {
        let explicit = execute(false);
        assert_eq!(explicit.lines().count(), 3);
        assert!(explicit.contains("/search [medication name]"));

        let implicit = execute(true);
        assert!(implicit.ends_with("You can also just send a medication name."));
    }
}
