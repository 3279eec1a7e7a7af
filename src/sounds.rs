use crate::SyllTabError::GenericParseError;
use crate::SyllTabResult;
use std::collections::HashMap;
use std::io;
use std::str::FromStr;

pub use consonants::*;
pub use vowels::*;

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Sound {
    pub(crate) representation: String,
    pub(crate) description: SoundKind,
}

impl Sound {
    pub fn representation(&self) -> &str {
        self.representation.as_str()
    }

    pub fn kind(&self) -> &SoundKind {
        &self.description
    }

    pub fn is_consonant(&self) -> bool {
        matches!(self.description, SoundKind::Consonant(_))
    }

    pub fn is_vowel(&self) -> bool {
        matches!(
            self.description,
            SoundKind::Vowel(_) | SoundKind::Diphthong(_, _)
        )
    }

    pub fn diphthong(representation: String, first: Vowel, second: Vowel) -> Self {
        Self {
            representation,
            description: SoundKind::Diphthong(first, second),
        }
    }

    /// Position on the sonority scale, from 1 (stops) to 6 (vowels).
    pub fn sonority(&self) -> u8 {
        match &self.description {
            SoundKind::Vowel(_) | SoundKind::Diphthong(_, _) => 6,
            SoundKind::Consonant(c) => {
                if c.manners.contains(&Manner::Plosive) || c.manners.contains(&Manner::Affricate)
                {
                    1
                } else if c.manners.contains(&Manner::Fricative) {
                    2
                } else if c.manners.contains(&Manner::Nasal) {
                    3
                } else if c.manners.contains(&Manner::Lateral)
                    || c.manners.contains(&Manner::Trill)
                    || c.manners.contains(&Manner::TapFlap)
                {
                    4
                } else if c.manners.contains(&Manner::Approximant) {
                    if c.is_rhotic() {
                        4
                    } else {
                        5
                    }
                } else {
                    1
                }
            }
        }
    }

    pub fn description_str(&self) -> String {
        match &self.description {
            SoundKind::Vowel(v) => format!("{} vowel", v),
            SoundKind::Diphthong(a, b) => format!("diphthong ({} to {})", a, b),
            SoundKind::Consonant(c) => format!("{} consonant", c),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum SoundKind {
    Vowel(Vowel),
    Diphthong(Vowel, Vowel),
    Consonant(Consonant),
}

pub fn parse_csv_to_map<R: io::Read>(reader: R) -> SyllTabResult<Vec<HashMap<String, String>>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut records = vec![];
    for result in rdr.records() {
        let record = result?;
        let map = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.trim().to_string()))
            .collect::<HashMap<_, _>>();
        records.push(map);
    }
    Ok(records)
}

fn required<'a>(map: &'a HashMap<String, String>, key: &str) -> SyllTabResult<&'a str> {
    map.get(key)
        .map(|v| v.as_str())
        .ok_or_else(|| GenericParseError(format!("No {} defined", key)))
}

fn feature<T: FromStr>(map: &HashMap<String, String>, key: &str) -> SyllTabResult<T> {
    let value = required(map, key)?;
    T::from_str(value).map_err(|_| GenericParseError(format!("Could not parse {} '{}'", key, value)))
}

mod vowels {
    use super::{feature, parse_csv_to_map, required, Sound, SoundKind};
    use crate::SyllTabResult;
    use log::warn;
    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};
    use std::io;

    /// Rows that fail to parse are skipped with a warning, the chart itself must be readable.
    pub fn parse_vowels<R: io::Read>(input: R) -> SyllTabResult<Vec<Sound>> {
        let records = parse_csv_to_map(input)?;
        Ok(records
            .into_iter()
            .filter_map(|r| match Vowel::try_from_map(&r) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!("skipping vowel row: {}", e);
                    None
                }
            })
            .collect())
    }

    #[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash)]
    pub struct Vowel {
        pub(crate) height: Height,
        pub(crate) backness: Backness,
        pub(crate) roundedness: Roundedness,
    }

    impl Vowel {
        pub fn try_from_map(map: &HashMap<String, String>) -> SyllTabResult<Sound> {
            let vowel = Self {
                height: feature(map, "height")?,
                backness: feature(map, "backness")?,
                roundedness: feature(map, "roundedness")?,
            };
            Ok(Sound {
                representation: required(map, "symbol")?.to_owned(),
                description: SoundKind::Vowel(vowel),
            })
        }
    }

    impl Display for Vowel {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{} {} {}", self.height, self.backness, self.roundedness)
        }
    }

    #[derive(
        Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, strum::EnumString, strum::Display,
    )]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Height {
        Close,
        NearClose,
        CloseMid,
        Mid,
        OpenMid,
        NearOpen,
        Open,
    }

    #[derive(
        Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, strum::EnumString, strum::Display,
    )]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Backness {
        Front,
        NearFront,
        Central,
        NearBack,
        Back,
    }

    #[derive(
        Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, strum::EnumString, strum::Display,
    )]
    #[strum(serialize_all = "lowercase", ascii_case_insensitive)]
    pub enum Roundedness {
        Unrounded,
        Rounded,
    }
}

mod consonants {
    use super::{feature, parse_csv_to_map, required, Sound, SoundKind};
    use crate::SyllTabError::GenericParseError;
    use crate::SyllTabResult;
    use itertools::Itertools;
    use log::warn;
    use smallvec::SmallVec;
    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};
    use std::io;
    use std::str::FromStr;

    pub fn parse_consonants<R: io::Read>(input: R) -> SyllTabResult<Vec<Sound>> {
        let records = parse_csv_to_map(input)?;
        Ok(records
            .into_iter()
            .filter_map(|r| match Consonant::try_from_map(&r) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!("skipping consonant row: {}", e);
                    None
                }
            })
            .collect())
    }

    #[derive(Debug, Clone, Eq, Hash, PartialEq)]
    pub struct Manners {
        pub(crate) inner: SmallVec<[Manner; 4]>,
    }

    impl Manners {
        pub fn contains(&self, manner: &Manner) -> bool {
            self.inner.contains(manner)
        }
    }

    impl Display for Manners {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.inner.iter().join(" "))
        }
    }

    #[derive(Debug, Clone, Eq, Hash, PartialEq)]
    pub struct Consonant {
        pub(crate) voice: Option<Voice>,
        pub(crate) place: Place,
        pub(crate) manners: Manners,
    }

    impl Consonant {
        pub fn try_from_map(map: &HashMap<String, String>) -> SyllTabResult<Sound> {
            // A blank voice column is allowed, an unknown one is not.
            let voice = match map.get("voice").filter(|v| !v.is_empty()) {
                Some(v) => Some(
                    Voice::from_str(v)
                        .map_err(|_| GenericParseError(format!("Could not parse voice '{}'", v)))?,
                ),
                None => None,
            };
            let manners = required(map, "manner")?
                .split_whitespace()
                .filter_map(|m| Manner::from_str(m).ok())
                .sorted()
                .collect::<SmallVec<[Manner; 4]>>();
            if manners.is_empty() {
                return Err(GenericParseError("No manners defined".to_string()));
            }
            let consonant = Self {
                voice,
                place: feature(map, "place")?,
                manners: Manners { inner: manners },
            };
            Ok(Sound {
                representation: required(map, "symbol")?.to_owned(),
                description: SoundKind::Consonant(consonant),
            })
        }

        /// Central approximants articulated with the tongue tip or back, like `ɹ` and `ɻ`.
        pub fn is_rhotic(&self) -> bool {
            !self.manners.contains(&Manner::Lateral)
                && matches!(
                    self.place,
                    Place::Alveolar | Place::Postalveolar | Place::Retroflex | Place::Uvular
                )
        }
    }

    impl Display for Consonant {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            if let Some(v) = self.voice {
                write!(f, "{} ", v)?;
            }
            write!(f, "{} {}", self.place, self.manners)
        }
    }

    #[derive(
        Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, strum::EnumString, strum::Display,
    )]
    #[strum(serialize_all = "lowercase", ascii_case_insensitive)]
    pub enum Place {
        Bilabial,
        #[strum(serialize = "labial-velar")]
        LabialVelar,
        Labiodental,
        Linguolabial,
        Dental,
        Alveolar,
        Postalveolar,
        Retroflex,
        Palatal,
        Velar,
        Uvular,
        #[strum(serialize = "pharyngeal/epiglottal")]
        PharyngealEpiglottal,
        Glottal,
    }

    #[derive(
        Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, strum::EnumString, strum::Display,
    )]
    #[strum(serialize_all = "lowercase", ascii_case_insensitive)]
    pub enum Voice {
        Voiceless,
        Voiced,
    }

    #[derive(
        Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, strum::EnumString, strum::Display,
    )]
    #[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
    pub enum Manner {
        Sibilant,
        NonSibilant,
        Nasal,
        Plosive,
        Lateral,
        Affricate,
        Fricative,
        Approximant,
        #[strum(serialize = "tap/flap")]
        TapFlap,
        Trill,
    }
}
