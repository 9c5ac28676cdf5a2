use super::anchor::LineMatcher;

/// True when any line carries the marker, meaning the mutation already ran.
pub fn already_applied(lines: &[String], marker: &LineMatcher) -> bool {
    lines.iter().any(|line| marker.matches(line))
}

/// True when any line contains any of the given substrings.
pub fn contains_any(lines: &[String], needles: &[&str]) -> bool {
    lines
        .iter()
        .any(|line| needles.iter().any(|needle| line.contains(needle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_anywhere_in_file() {
        let src = vec![
            "import Vue from 'vue'".to_string(),
            "import './plugins/vuetify'".to_string(),
        ];
        assert!(already_applied(&src, &LineMatcher::substring("import './plugins/vuetify'")));
        assert!(!already_applied(&src, &LineMatcher::substring("@babel/polyfill")));
    }

    #[test]
    fn test_contains_any() {
        let src = vec!["  preset: {},".to_string()];
        assert!(contains_any(&src, &["preset,", "preset:"]));
        assert!(!contains_any(&src, &["theme,", "theme:"]));
    }
}
