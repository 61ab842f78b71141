//! Parsing of takeaways and topics out of a generated summary

/// Extract key takeaways from a bullet-formatted summary
///
/// Bullet lines (`•` or `-`) are taken verbatim. When the summary carries no
/// bullets, the first few substantial sentences stand in.
pub fn extract_takeaways(summary: &str) -> Vec<String> {
    let mut takeaways: Vec<String> = summary
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            let stripped = line
                .strip_prefix('•')
                .or_else(|| line.strip_prefix('-'))?
                .trim();
            (!stripped.is_empty()).then(|| stripped.to_string())
        })
        .collect();

    if takeaways.is_empty() {
        takeaways = summary
            .split('.')
            .map(str::trim)
            .filter(|s| s.len() > 20)
            .take(3)
            .map(|s| format!("{s}."))
            .collect();
    }

    takeaways
}

/// Extract main topics from a summary
///
/// Lines mentioning "topic" or "theme" contribute the text after their colon.
/// Without such markers, the first few capitalized words stand in.
pub fn extract_topics(summary: &str) -> Vec<String> {
    let mut topics: Vec<String> = summary
        .lines()
        .filter_map(|line| {
            let line = line.trim().to_lowercase();
            if !line.contains("topic") && !line.contains("theme") {
                return None;
            }
            let (_, rest) = line.split_once(':')?;
            let topic = rest.trim();
            (!topic.is_empty()).then(|| topic.to_string())
        })
        .collect();

    if topics.is_empty() {
        for word in summary.split_whitespace() {
            if topics.len() >= 3 {
                break;
            }
            let word = word.trim_matches(|c: char| ".,!?;:".contains(c));
            if word.len() > 3 && word.chars().next().is_some_and(char::is_uppercase) {
                topics.push(word.to_string());
            }
        }
    }

    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_lines_become_takeaways() {
        let summary = "Summary:\nAn overview.\n\nKey Takeaways:\n• First point\n- Second point\n•  \n";
        let takeaways = extract_takeaways(summary);
        assert_eq!(takeaways, vec!["First point", "Second point"]);
    }

    #[test]
    fn takeaways_fall_back_to_sentences() {
        let summary = "This document describes the annual financial results. \
                       Revenue grew by twelve percent over the prior year. Ok.";
        let takeaways = extract_takeaways(summary);
        assert_eq!(takeaways.len(), 2);
        assert!(takeaways[0].ends_with('.'));
    }

    #[test]
    fn topic_lines_are_parsed_after_colon() {
        let summary = "Main Topics: climate policy\nAnother theme: energy markets\nplain line";
        let topics = extract_topics(summary);
        assert_eq!(topics, vec!["climate policy", "energy markets"]);
    }

    #[test]
    fn topics_fall_back_to_capitalized_words() {
        let summary = "Reviews the Quarterly figures for Contoso against Budget totals.";
        let topics = extract_topics(summary);
        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0], "Reviews");
    }
}
