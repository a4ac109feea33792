use crate::api::trial::TrialParameter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TRIAL_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{trialParameters\.(.+?)\}").expect("trial parameter pattern is valid"));

/// Collects the `{trialParameters.<name>}` placeholders of a trial template.
///
/// Works on any text, valid yaml or not. Names appear once, in order of first
/// appearance, with empty reference and description.
pub fn extract_trial_parameters(text: &str) -> Vec<TrialParameter> {
    let mut seen = HashSet::new();
    TRIAL_PARAMETER
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .filter(|name| seen.insert(*name))
        .map(TrialParameter::named)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<String> {
        extract_trial_parameters(text)
            .into_iter()
            .map(|parameter| parameter.name)
            .collect()
    }

    #[test]
    fn first_seen_order_without_duplicates() {
        let parameters =
            extract_trial_parameters("{trialParameters.a} ... {trialParameters.b} ... {trialParameters.a}");
        assert_eq!(
            parameters,
            vec![TrialParameter::named("a"), TrialParameter::named("b")]
        );
    }

    #[test]
    fn empty_and_unterminated_tokens() {
        assert!(extract_trial_parameters("").is_empty());
        assert!(extract_trial_parameters("--lr={trialParameters.learningRate").is_empty());
    }

    #[test]
    fn lazy_match_stops_at_first_brace() {
        let template = r#"
command:
  - "python3"
  - "--lr=${trialParameters.learningRate}"
  - "--num-layers=${trialParameters.numberLayers}"
  - "--optimizer=${trialParameters.optimizer}"
  - "--repeat=${trialParameters.learningRate}"
"#;
        assert_eq!(names(template), vec!["learningRate", "numberLayers", "optimizer"]);
    }

    #[test]
    fn name_may_contain_dots() {
        assert_eq!(names("{trialParameters.a.b}"), vec!["a.b"]);
    }
}
