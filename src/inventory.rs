use crate::raw_data;
use crate::sounds::{parse_consonants, parse_vowels, Sound, SoundKind};
use crate::word::{Phone, PhoneClass, Stress};
use crate::SyllTabError::GenericParseError;
use crate::SyllTabResult;
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::io;

const TIE_BARS: [char; 2] = ['\u{0361}', '\u{035C}'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Phone(Phone),
    Stress(Stress),
    Boundary,
}

/// Symbol table mapping IPA symbols to their phonemic features.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    sounds: HashMap<String, Sound>,
    longest: usize,
}

impl Inventory {
    pub fn from_charts<V: io::Read, C: io::Read>(vowels: V, consonants: C) -> SyllTabResult<Self> {
        let mut inventory = Self::default();
        for sound in parse_vowels(vowels)?.into_iter().chain(parse_consonants(consonants)?) {
            inventory.insert(sound);
        }
        if inventory.sounds.is_empty() {
            return Err(GenericParseError("Inventory contains no sounds".to_string()));
        }
        debug!("loaded inventory with {} sounds", inventory.sounds.len());
        Ok(inventory)
    }

    /// The full pulmonic vowel and consonant charts.
    pub fn standard() -> SyllTabResult<Self> {
        Self::from_charts(
            raw_data::VOWELS.as_bytes(),
            raw_data::PULMONIC_CONSONANTS.as_bytes(),
        )
    }

    /// Registers `;` separated vowel sequences as single vowel units. Every part of a
    /// diphthong must already be a vowel of the inventory.
    pub fn with_diphthongs(mut self, input: &str) -> SyllTabResult<Self> {
        for d in input.split(';').map(str::trim).filter(|d| !d.is_empty()) {
            let mut chars = d.chars();
            let (first, second) = match (chars.next(), chars.as_str()) {
                (Some(f), rest) if !rest.is_empty() => (f.to_string(), rest.to_string()),
                _ => return Err(GenericParseError(format!("'{}' is not a diphthong", d))),
            };
            let vowel_of = |s: &str| match self.sounds.get(s).map(|s| s.kind()) {
                Some(SoundKind::Vowel(v)) => Ok(*v),
                _ => Err(GenericParseError(format!("'{}' in diphthong '{}' is no vowel", s, d))),
            };
            let sound = Sound::diphthong(d.to_string(), vowel_of(&first)?, vowel_of(&second)?);
            self.insert(sound);
        }
        Ok(self)
    }

    fn insert(&mut self, sound: Sound) {
        let len = sound.representation().chars().count();
        if self.sounds.contains_key(sound.representation()) {
            debug!("duplicate symbol '{}' ignored", sound.representation());
            return;
        }
        trace!("'{}': {}", sound.representation(), sound.description_str());
        self.longest = self.longest.max(len);
        self.sounds.insert(sound.representation().to_string(), sound);
    }

    pub fn get(&self, symbol: &str) -> Option<&Sound> {
        self.sounds.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// Splits a transcription into phones and markers using greedy longest match.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let chars = text.chars().collect::<Vec<_>>();
        let mut result = vec![];
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if let Some(stress) = Stress::from_char(c) {
                result.push(Segment::Stress(stress));
                i += 1;
                continue;
            }
            if c == '.' || c.is_whitespace() {
                result.push(Segment::Boundary);
                i += 1;
                continue;
            }
            let (base, class, sonority, mut next) = match self.longest_match(&chars[i..]) {
                Some((sound, len)) => {
                    let class = if sound.is_vowel() {
                        PhoneClass::Vowel
                    } else {
                        PhoneClass::Consonant
                    };
                    (sound.representation().to_string(), class, sound.sonority(), i + len)
                }
                None => {
                    warn!("unknown symbol '{}' in '{}'", c, text);
                    (c.to_string(), PhoneClass::Unknown, 0, i + 1)
                }
            };
            while next < chars.len() {
                let d = chars[next];
                if TIE_BARS.contains(&d) {
                    next += if next + 1 < chars.len() { 2 } else { 1 };
                } else if is_attached(d) {
                    next += 1;
                } else {
                    break;
                }
            }
            let text = chars[i..next].iter().collect::<String>();
            result.push(Segment::Phone(Phone::new(text, base, class, sonority)));
            i = next;
        }
        result
    }

    fn longest_match(&self, chars: &[char]) -> Option<(&Sound, usize)> {
        (1..=self.longest.min(chars.len())).rev().find_map(|len| {
            let candidate = chars[..len].iter().collect::<String>();
            self.sounds.get(&candidate).map(|s| (s, len))
        })
    }
}

/// Combining diacritics and modifier letters belong to the preceding phone.
fn is_attached(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{02B0}'..='\u{02FF}') && Stress::from_char(c).is_none()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::raw_data::english::DIPHTHONGS;

    fn english() -> Inventory {
        Inventory::standard().unwrap().with_diphthongs(DIPHTHONGS).unwrap()
    }

    fn phones(segments: &[Segment]) -> Vec<(&str, PhoneClass)> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::Phone(p) => Some((p.text(), p.class())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn t_standard_inventory() {
        let inventory = Inventory::standard().unwrap();
        assert!(inventory.get("ɛ").unwrap().is_vowel());
        assert!(inventory.get("w").unwrap().is_consonant());
        assert!(inventory.get("ɡ").unwrap().is_consonant());
        assert!(inventory.len() > 150);
        assert_eq!(inventory.get("ɒ").unwrap().description_str(), "open back rounded vowel");
        assert_eq!(
            inventory.get("ʃ").unwrap().description_str(),
            "voiceless postalveolar sibilant fricative consonant"
        );
    }

    #[test]
    fn t_segment_with_diphthong() {
        let segments = english().segment("hɛˈloʊ");
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[2], Segment::Stress(Stress::Primary));
        assert_eq!(
            phones(&segments),
            vec![
                ("h", PhoneClass::Consonant),
                ("ɛ", PhoneClass::Vowel),
                ("l", PhoneClass::Consonant),
                ("oʊ", PhoneClass::Vowel),
            ]
        );
        assert_eq!(
            english().get("oʊ").unwrap().description_str(),
            "diphthong (close-mid back rounded to near-close near-back rounded)"
        );
    }

    #[test]
    fn t_diacritics_attach() {
        let segments = english().segment("pʰaːt\u{0361}s");
        assert_eq!(
            phones(&segments),
            vec![
                ("pʰ", PhoneClass::Consonant),
                ("aː", PhoneClass::Vowel),
                ("t\u{0361}s", PhoneClass::Consonant),
            ]
        );
        match &segments[0] {
            Segment::Phone(p) => assert_eq!(p.base(), "p"),
            _ => panic!("expected phone"),
        }
    }

    #[test]
    fn t_boundaries_and_unknown_symbols() {
        let segments = english().segment("ka.7o");
        assert_eq!(segments[2], Segment::Boundary);
        assert_eq!(phones(&segments)[2], ("7", PhoneClass::Unknown));
    }

    #[test]
    fn t_invalid_diphthong() {
        assert!(Inventory::standard().unwrap().with_diphthongs("ap").is_err());
        assert!(Inventory::standard().unwrap().with_diphthongs("a").is_err());
    }

    #[test]
    fn t_empty_charts() {
        let empty = "symbol,height,backness,roundedness";
        let consonants = "symbol,place,voice,manner";
        assert!(Inventory::from_charts(empty.as_bytes(), consonants.as_bytes()).is_err());
    }
}
