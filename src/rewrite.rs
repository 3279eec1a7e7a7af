use log::warn;

/// Ordered `from|to` substitutions, applied to a transcription before it is segmented.
#[derive(Debug, Clone, Default)]
pub struct RewriteRuleCollection {
    rules: Vec<RewriteRule>,
}

impl RewriteRuleCollection {
    pub fn parse(input: &str) -> Self {
        let rules = input
            .split('\n')
            .flat_map(|s| s.split(';'))
            .filter(|s| !s.trim().is_empty())
            .filter_map(|i| match RewriteRule::try_parse(i) {
                Some(r) => Some(r),
                None => {
                    warn!("ignoring malformed rewrite rule '{}'", i);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    pub fn apply_to_str(&self, input: &str) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |prev, next| next.apply_to_str(&prev))
    }
}

#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn try_parse(input: &str) -> Option<Self> {
        let (from, to) = input.split_once('|')?;
        if from.is_empty() || to.contains('|') {
            return None;
        }
        Some(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn apply_to_str(&self, input: &str) -> String {
        input.replace(&self.from, &self.to)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::raw_data::english::NORMALIZATION;

    #[test]
    fn t_simple_rule() {
        let rule = RewriteRule::try_parse("g|ɡ").unwrap();
        assert_eq!(rule.from, "g");
        assert_eq!(rule.to, "ɡ");
        assert_eq!(rule.apply_to_str("gʊdbaɪ"), "ɡʊdbaɪ");
    }

    #[test]
    fn t_malformed_rules() {
        assert!(RewriteRule::try_parse("nothing").is_none());
        assert!(RewriteRule::try_parse("|x").is_none());
        assert!(RewriteRule::try_parse("a|b|c").is_none());
        let rules = RewriteRuleCollection::parse("a|b;broken;;c|");
        assert_eq!(rules.rules.len(), 2);
        assert_eq!(rules.apply_to_str("abc"), "bb");
    }

    #[test]
    fn t_english_normalization() {
        let rules = RewriteRuleCollection::parse(NORMALIZATION);
        assert_eq!(rules.apply_to_str("'wa:tər"), "ˈwaːtər");
        assert_eq!(rules.apply_to_str("ʧɪʤ"), "tʃɪdʒ");
    }
}
