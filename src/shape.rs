use crate::word::{PhoneClass, Syllable};
use crate::SyllTabError::GenericParseError;
use crate::SyllTabResult;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum ShapeBucket {
    V,
    CV,
    VC,
    CVC,
    Other,
}

impl ShapeBucket {
    /// Column position within a report row's bucket fields.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub enum ShapeElement {
    Stress,
    Consonant,
    Vowel,
    Option(Vec<ShapeElement>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Token {
    Stress,
    Phone(PhoneClass),
}

impl ShapeElement {
    fn accepts(&self, token: Token) -> bool {
        matches!(
            (self, token),
            (ShapeElement::Stress, Token::Stress)
                | (ShapeElement::Consonant, Token::Phone(PhoneClass::Consonant))
                | (ShapeElement::Vowel, Token::Phone(PhoneClass::Vowel))
        )
    }
}

/// A whole-syllable pattern such as `(S)CV`: `S` stress marker, `C` consonant, `V` vowel,
/// parentheses mark an optional group.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct ShapePattern {
    elements: Vec<ShapeElement>,
}

impl ShapePattern {
    pub fn new(elements: Vec<ShapeElement>) -> Self {
        Self { elements }
    }

    pub fn try_parse(input: &str) -> SyllTabResult<Self> {
        let mut stack = vec![vec![]];
        for c in input.trim().chars() {
            let element = match c {
                '(' => {
                    stack.push(vec![]);
                    continue;
                }
                ')' => {
                    let inner = stack
                        .pop()
                        .filter(|_| !stack.is_empty())
                        .ok_or_else(|| unbalanced(input))?;
                    ShapeElement::Option(inner)
                }
                'S' | 's' => ShapeElement::Stress,
                'C' | 'c' => ShapeElement::Consonant,
                'V' | 'v' => ShapeElement::Vowel,
                _ => {
                    return Err(GenericParseError(format!(
                        "Unexpected '{}' in shape pattern '{}'",
                        c, input
                    )))
                }
            };
            stack.last_mut().ok_or_else(|| unbalanced(input))?.push(element);
        }
        if stack.len() != 1 {
            return Err(unbalanced(input));
        }
        let elements = stack.pop().ok_or_else(|| unbalanced(input))?;
        Ok(Self { elements })
    }

    pub fn matches(&self, syllable: &Syllable) -> bool {
        let tokens = syllable
            .stress()
            .map(|_| Token::Stress)
            .into_iter()
            .chain(syllable.phones().into_iter().map(|p| Token::Phone(p.class())))
            .collect::<Vec<_>>();
        match_ends(&self.elements, &tokens, 0).contains(&tokens.len())
    }
}

fn unbalanced(input: &str) -> crate::SyllTabError {
    GenericParseError(format!("Unbalanced parentheses in shape pattern '{}'", input))
}

/// Every position at which `pattern` can stop matching when started at `start`.
fn match_ends(pattern: &[ShapeElement], tokens: &[Token], start: usize) -> Vec<usize> {
    let mut positions = vec![start];
    for element in pattern {
        positions = positions
            .into_iter()
            .flat_map(|p| match element {
                ShapeElement::Option(inner) => {
                    let mut ends = vec![p];
                    ends.extend(match_ends(inner, tokens, p));
                    ends
                }
                other => {
                    if tokens.get(p).is_some_and(|t| other.accepts(*t)) {
                        vec![p + 1]
                    } else {
                        vec![]
                    }
                }
            })
            .unique()
            .collect();
        if positions.is_empty() {
            break;
        }
    }
    positions
}

/// First-match classification over an ordered list of patterns, anything unmatched is
/// [`ShapeBucket::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeClassifier {
    rules: Vec<(ShapePattern, ShapeBucket)>,
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        use ShapeElement::*;
        let optional_stress = || Option(vec![Stress]);
        Self {
            rules: vec![
                (ShapePattern::new(vec![optional_stress(), Vowel]), ShapeBucket::V),
                (
                    ShapePattern::new(vec![optional_stress(), Consonant, Vowel]),
                    ShapeBucket::CV,
                ),
                (
                    ShapePattern::new(vec![optional_stress(), Vowel, Consonant]),
                    ShapeBucket::VC,
                ),
                (
                    ShapePattern::new(vec![optional_stress(), Consonant, Vowel, Consonant]),
                    ShapeBucket::CVC,
                ),
            ],
        }
    }
}

impl ShapeClassifier {
    /// Parses `BUCKET=PATTERN` entries separated by `;` or newlines, e.g.
    /// [`DEFAULT_SHAPES`](crate::raw_data::DEFAULT_SHAPES).
    pub fn try_parse(input: &str) -> SyllTabResult<Self> {
        let rules = input
            .split('\n')
            .flat_map(|s| s.split(';'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|entry| -> SyllTabResult<(ShapePattern, ShapeBucket)> {
                let (name, pattern) = entry.split_once('=').ok_or_else(|| {
                    GenericParseError(format!("Expected BUCKET=PATTERN, got '{}'", entry))
                })?;
                let bucket = ShapeBucket::from_str(name.trim()).map_err(|_| {
                    GenericParseError(format!("Unknown shape bucket '{}'", name.trim()))
                })?;
                if bucket == ShapeBucket::Other {
                    return Err(GenericParseError(
                        "Other is the fallback bucket and takes no pattern".to_string(),
                    ));
                }
                Ok((ShapePattern::try_parse(pattern)?, bucket))
            })
            .collect::<SyllTabResult<Vec<_>>>()?;
        if rules.is_empty() {
            return Err(GenericParseError("No shape patterns given".to_string()));
        }
        Ok(Self { rules })
    }

    pub fn classify(&self, syllable: &Syllable) -> ShapeBucket {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.matches(syllable))
            .map(|(_, bucket)| *bucket)
            .unwrap_or(ShapeBucket::Other)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::raw_data::DEFAULT_SHAPES;
    use crate::word::test::{c, v};
    use crate::word::{Phone, Stress};

    fn syl(stress: Option<Stress>, phones: Vec<Phone>) -> Syllable {
        Syllable::from_phones(stress, phones)
    }

    #[test]
    fn t_parse_pattern() {
        let parsed = ShapePattern::try_parse("(S)CV").unwrap();
        assert_eq!(
            parsed.elements,
            vec![
                ShapeElement::Option(vec![ShapeElement::Stress]),
                ShapeElement::Consonant,
                ShapeElement::Vowel
            ]
        );
        assert!(ShapePattern::try_parse("(SCV").is_err());
        assert!(ShapePattern::try_parse("SCV)").is_err());
        assert!(ShapePattern::try_parse("CXV").is_err());
    }

    #[test]
    fn t_default_matches_parsed_defaults() {
        assert_eq!(ShapeClassifier::try_parse(DEFAULT_SHAPES).unwrap(), ShapeClassifier::default());
    }

    #[test]
    fn t_classify_basic_shapes() {
        let classifier = ShapeClassifier::default();
        assert_eq!(classifier.classify(&syl(None, vec![v("a")])), ShapeBucket::V);
        assert_eq!(classifier.classify(&syl(Some(Stress::Primary), vec![c("h"), v("ɛ")])), ShapeBucket::CV);
        assert_eq!(classifier.classify(&syl(None, vec![v("ʌ"), c("p")])), ShapeBucket::VC);
        assert_eq!(
            classifier.classify(&syl(Some(Stress::Secondary), vec![c("k"), v("æ"), c("t")])),
            ShapeBucket::CVC
        );
    }

    #[test]
    fn t_everything_else_is_other() {
        let classifier = ShapeClassifier::default();
        assert_eq!(classifier.classify(&syl(None, vec![c("s")])), ShapeBucket::Other);
        assert_eq!(classifier.classify(&syl(None, vec![])), ShapeBucket::Other);
        assert_eq!(classifier.classify(&syl(None, vec![v("i"), v("ə")])), ShapeBucket::Other);
        assert_eq!(
            classifier.classify(&syl(None, vec![c("s"), c("t"), v("ɪ"), c("ŋ")])),
            ShapeBucket::Other
        );
        let unknown = Phone::new("7", "7", PhoneClass::Unknown, 0);
        assert_eq!(classifier.classify(&syl(None, vec![unknown, v("a")])), ShapeBucket::Other);
    }

    #[test]
    fn t_first_match_wins() {
        let classifier = ShapeClassifier::try_parse("CVC=(S)C(C)V;CV=(S)CV").unwrap();
        assert_eq!(classifier.classify(&syl(None, vec![c("k"), v("a")])), ShapeBucket::CVC);
        assert!(ShapeClassifier::try_parse("Other=V").is_err());
        assert!(ShapeClassifier::try_parse("CCV=CCV").is_err());
    }

    #[test]
    fn t_empty_pattern_list() {
        assert!(ShapeClassifier::try_parse("").is_err());
        assert!(ShapeClassifier::try_parse(" \n ;; ").is_err());
    }
}
