use super::types::Config;
use crate::diagnostic::RuleCode;

/// Represents a config validation warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationWarning {
    pub message: String,
    pub rule: Option<String>,
}

fn known_codes() -> Vec<String> {
    RuleCode::ALL.iter().map(|c| c.as_str().to_string()).collect()
}

fn unknown_rule_warning(name: &str, context: &str) -> ConfigValidationWarning {
    let message = match suggest_similar_key(name, &known_codes()) {
        Some(suggestion) => format!("Unknown rule in {context}: {name} (did you mean: {suggestion}?)"),
        None => format!("Unknown rule in {context}: {name}"),
    };
    ConfigValidationWarning {
        message,
        rule: Some(name.to_string()),
    }
}

/// Check rule codes used in `[global] disable` and in rule sections.
///
/// Unknown codes are warned about but don't cause failures.
pub fn validate_config(config: &Config) -> Vec<ConfigValidationWarning> {
    let mut warnings = Vec::new();

    for name in &config.global.disable {
        if name.parse::<RuleCode>().is_err() {
            warnings.push(unknown_rule_warning(name, "[global] disable"));
        }
    }

    for name in config.rules.keys() {
        if name.parse::<RuleCode>().is_err() {
            warnings.push(unknown_rule_warning(name, "rule section"));
        }
    }

    warnings
}

/// Validates rule codes from the `--disable` CLI flag.
pub fn validate_cli_rule_names(disable: Option<&str>) -> Vec<ConfigValidationWarning> {
    let Some(disable) = disable else {
        return Vec::new();
    };

    disable
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && s.parse::<RuleCode>().is_err())
        .map(|name| unknown_rule_warning(name, "--disable"))
        .collect()
}

fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Closest valid key within a small edit distance, if any.
pub fn suggest_similar_key(unknown: &str, valid_keys: &[String]) -> Option<String> {
    let unknown_lower = unknown.to_lowercase();
    let max_distance = 2.max(unknown.len() / 3);

    let mut best_match: Option<(String, usize)> = None;

    for valid in valid_keys {
        let distance = levenshtein_distance(&unknown_lower, &valid.to_lowercase());
        if distance > max_distance {
            continue;
        }
        match &best_match {
            Some((_, best_dist)) if distance >= *best_dist => {}
            _ => best_match = Some((valid.clone(), distance)),
        }
    }

    best_match.map(|(key, _)| key)
}
