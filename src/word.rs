use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhoneClass {
    Vowel,
    Consonant,
    Unknown,
}

/// One segment of a transcription: an inventory symbol plus any diacritics attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone {
    pub(crate) text: String,
    pub(crate) base: String,
    pub(crate) class: PhoneClass,
    pub(crate) sonority: u8,
}

impl Phone {
    pub fn new(text: impl Into<String>, base: impl Into<String>, class: PhoneClass, sonority: u8) -> Self {
        Self {
            text: text.into(),
            base: base.into(),
            class,
            sonority,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The inventory symbol without diacritics.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn class(&self) -> PhoneClass {
        self.class
    }

    pub fn sonority(&self) -> u8 {
        self.sonority
    }

    pub fn is_vowel(&self) -> bool {
        self.class == PhoneClass::Vowel
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stress {
    Primary,
    Secondary,
}

impl Stress {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'ˈ' => Some(Self::Primary),
            'ˌ' => Some(Self::Secondary),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Stress::Primary => 'ˈ',
            Stress::Secondary => 'ˌ',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyllablePart {
    pub(crate) phones: Vec<Phone>,
}

impl SyllablePart {
    pub fn from_phones(phones: Vec<Phone>) -> Option<Self> {
        if phones.is_empty() {
            None
        } else {
            Some(Self { phones })
        }
    }

    pub fn display(&self) -> String {
        self.phones.iter().map(|p| p.text()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    pub(crate) stress: Option<Stress>,
    pub(crate) onset: Option<SyllablePart>,
    pub(crate) nucleus: SyllablePart,
    pub(crate) coda: Option<SyllablePart>,
}

impl Syllable {
    pub(crate) fn from_parts(
        stress: Option<Stress>,
        onset: Vec<Phone>,
        nucleus: Vec<Phone>,
        coda: Vec<Phone>,
    ) -> Self {
        Self {
            stress,
            onset: SyllablePart::from_phones(onset),
            nucleus: SyllablePart { phones: nucleus },
            coda: SyllablePart::from_phones(coda),
        }
    }

    /// Splits `phones` around the first run of vowels. Without a vowel, every phone ends up in
    /// the onset and the nucleus stays empty.
    pub fn from_phones(stress: Option<Stress>, phones: Vec<Phone>) -> Self {
        let start = phones
            .iter()
            .position(|p| p.is_vowel())
            .unwrap_or(phones.len());
        let end = phones[start..]
            .iter()
            .position(|p| !p.is_vowel())
            .map(|i| start + i)
            .unwrap_or(phones.len());
        let mut onset = phones;
        let mut nucleus = onset.split_off(start);
        let coda = nucleus.split_off(end - start);
        Self::from_parts(stress, onset, nucleus, coda)
    }

    pub fn stress(&self) -> Option<Stress> {
        self.stress
    }

    pub fn phones(&self) -> Vec<&Phone> {
        let mut result = vec![];
        if let Some(o) = &self.onset {
            result.extend(o.phones.iter());
        }
        result.extend(self.nucleus.phones.iter());
        if let Some(c) = &self.coda {
            result.extend(c.phones.iter());
        }
        result
    }

    pub fn display(&self) -> String {
        format!(
            "{}{}{}{}",
            self.stress.map(|s| s.symbol().to_string()).unwrap_or_default(),
            self.onset.as_ref().map(|v| v.display()).unwrap_or_default(),
            self.nucleus.display(),
            self.coda.as_ref().map(|v| v.display()).unwrap_or_default()
        )
    }
}

impl Display for Syllable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
