use crate::inventory::{Inventory, Segment};
use crate::rewrite::RewriteRuleCollection;
use crate::word::{Phone, PhoneClass, Stress, Syllable};
use crate::SyllTabError::GenericParseError;
use crate::SyllTabResult;
use log::{debug, trace};
use std::collections::HashSet;

pub trait Syllabifier {
    /// Splits a transcription into syllables, in order. Never fails: symbols the syllabifier
    /// does not know still end up in some syllable.
    fn syllabify(&self, transcription: &str) -> Vec<Syllable>;
}

/// Decides which consonant sequences may start a syllable.
#[derive(Debug, Clone)]
pub enum OnsetPolicy {
    /// Any single consonant except `forbidden`, plus the listed clusters.
    Clusters {
        clusters: HashSet<Vec<String>>,
        forbidden: HashSet<String>,
    },
    /// Strictly rising sonority, `s` may precede a stop.
    Sonority,
}

impl OnsetPolicy {
    /// Builds a cluster policy from `;`/newline separated clusters written in IPA, e.g. `spɹ`.
    pub fn clusters(inventory: &Inventory, clusters: &str, forbidden: &str) -> SyllTabResult<Self> {
        let clusters = clusters
            .split('\n')
            .flat_map(|s| s.split(';'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|cluster| -> SyllTabResult<Vec<String>> {
                let bases = inventory
                    .segment(cluster)
                    .into_iter()
                    .map(|s| match s {
                        Segment::Phone(p) if p.class() == PhoneClass::Consonant => {
                            Ok(p.base().to_string())
                        }
                        _ => Err(GenericParseError(format!(
                            "Onset cluster '{}' must consist of consonants",
                            cluster
                        ))),
                    })
                    .collect::<SyllTabResult<Vec<_>>>()?;
                Ok(bases)
            })
            .collect::<SyllTabResult<HashSet<_>>>()?;
        let forbidden = forbidden
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self::Clusters {
            clusters,
            forbidden,
        })
    }

    pub fn is_legal(&self, onset: &[Phone]) -> bool {
        if onset.iter().any(|p| p.class() == PhoneClass::Vowel) {
            return false;
        }
        match onset {
            [] => true,
            [single] => match self {
                OnsetPolicy::Clusters { forbidden, .. } => !forbidden.contains(single.base()),
                OnsetPolicy::Sonority => true,
            },
            _ => match self {
                OnsetPolicy::Clusters { clusters, .. } => {
                    clusters.contains(&onset.iter().map(|p| p.base().to_string()).collect::<Vec<_>>())
                }
                OnsetPolicy::Sonority => {
                    let rest = match onset {
                        [s, stop, rest @ ..] if s.base() == "s" && stop.sonority() == 1 => {
                            // s + stop counts as one step of the scale
                            if rest.is_empty() {
                                return true;
                            }
                            &onset[1..]
                        }
                        _ => onset,
                    };
                    rest.windows(2)
                        .all(|w| w[0].sonority() != 0 && w[0].sonority() < w[1].sonority())
                }
            },
        }
    }
}

/// Maximal onset syllabifier: every vowel phone is a nucleus, intervocalic consonants go to
/// the longest legal onset of the next syllable and the remainder closes the previous one.
/// Stress marks and boundaries always start a new syllable.
#[derive(Debug, Clone)]
pub struct OnsetSyllabifier {
    inventory: Inventory,
    normalization: RewriteRuleCollection,
    policy: OnsetPolicy,
}

impl OnsetSyllabifier {
    pub fn new(inventory: Inventory, policy: OnsetPolicy) -> Self {
        Self {
            inventory,
            normalization: RewriteRuleCollection::default(),
            policy,
        }
    }

    pub(crate) fn with_normalization(mut self, rules: RewriteRuleCollection) -> Self {
        self.normalization = rules;
        self
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// A stress mark waits for the next phone, even across boundaries.
    fn chunks(&self, transcription: &str) -> Vec<(Option<Stress>, Vec<Phone>)> {
        let normalized = self.normalization.apply_to_str(transcription);
        let mut chunks = vec![];
        let mut current: (Option<Stress>, Vec<Phone>) = (None, vec![]);
        for segment in self.inventory.segment(&normalized) {
            match segment {
                Segment::Phone(p) => current.1.push(p),
                Segment::Stress(s) if current.1.is_empty() => {
                    if let Some(previous) = current.0.replace(s) {
                        debug!(
                            "'{}': stress {} replaced by {}",
                            transcription,
                            previous.symbol(),
                            s.symbol()
                        );
                    }
                }
                Segment::Stress(s) => {
                    chunks.push(std::mem::replace(&mut current, (Some(s), vec![])));
                }
                Segment::Boundary if current.1.is_empty() => {}
                Segment::Boundary => {
                    chunks.push(std::mem::take(&mut current));
                }
            }
        }
        if !current.1.is_empty() {
            chunks.push(current);
        } else if let Some(stress) = current.0 {
            debug!("'{}': trailing stress {} dropped", transcription, stress.symbol());
        }
        chunks
    }

    fn split_chunk(&self, stress: Option<Stress>, phones: Vec<Phone>) -> Vec<Syllable> {
        let nuclei = phones
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_vowel())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if nuclei.is_empty() {
            return vec![Syllable::from_phones(stress, phones)];
        }
        let mut starts = vec![0];
        for pair in nuclei.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let start = (prev + 1..=next)
                .find(|s| self.policy.is_legal(&phones[*s..next]))
                .unwrap_or(next);
            starts.push(start);
        }
        let mut syllables = vec![];
        let mut rest = phones;
        for (idx, &start) in starts.iter().enumerate().rev() {
            let mut part = rest.split_off(start);
            let nucleus_at = nuclei[idx] - start;
            let mut nucleus = part.split_off(nucleus_at);
            let coda = nucleus.split_off(1);
            let stress = if idx == 0 { stress } else { None };
            syllables.push(Syllable::from_parts(stress, part, nucleus, coda));
        }
        syllables.reverse();
        syllables
    }
}

impl Syllabifier for OnsetSyllabifier {
    fn syllabify(&self, transcription: &str) -> Vec<Syllable> {
        let syllables = self
            .chunks(transcription)
            .into_iter()
            .flat_map(|(stress, phones)| self.split_chunk(stress, phones))
            .collect::<Vec<_>>();
        trace!(
            "syllabified '{}' into {:?}",
            transcription,
            syllables.iter().map(|s| s.to_string()).collect::<Vec<_>>()
        );
        syllables
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::raw_data::english::{DIPHTHONGS, FORBIDDEN_ONSETS, NORMALIZATION, ONSET_CLUSTERS};

    fn inventory() -> Inventory {
        Inventory::standard().unwrap().with_diphthongs(DIPHTHONGS).unwrap()
    }

    fn english() -> OnsetSyllabifier {
        let inventory = inventory();
        let policy = OnsetPolicy::clusters(&inventory, ONSET_CLUSTERS, FORBIDDEN_ONSETS).unwrap();
        OnsetSyllabifier::new(inventory, policy)
            .with_normalization(RewriteRuleCollection::parse(NORMALIZATION))
    }

    fn texts(syllables: Vec<Syllable>) -> Vec<String> {
        syllables.into_iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn t_stress_starts_syllable() {
        assert_eq!(texts(english().syllabify("hɛˈloʊ")), vec!["hɛ", "ˈloʊ"]);
        assert_eq!(texts(english().syllabify("ɡʊdˈbaɪ")), vec!["ɡʊd", "ˈbaɪ"]);
    }

    #[test]
    fn t_maximal_onset() {
        assert_eq!(texts(english().syllabify("ˈsænɪti")), vec!["ˈsæ", "nɪ", "ti"]);
        assert_eq!(texts(english().syllabify("ˈwɪndoʊ")), vec!["ˈwɪn", "doʊ"]);
        assert_eq!(texts(english().syllabify("ˈɛkstɹə")), vec!["ˈɛk", "stɹə"]);
    }

    #[test]
    fn t_forbidden_onset_goes_to_coda() {
        assert_eq!(texts(english().syllabify("ˈsɪŋəɹ")), vec!["ˈsɪŋ", "əɹ"]);
    }

    #[test]
    fn t_hiatus_and_boundaries() {
        assert_eq!(texts(english().syllabify("aɪˈdiə")), vec!["aɪ", "ˈdi", "ə"]);
        assert_eq!(texts(english().syllabify("ka.ta")), vec!["ka", "ta"]);
        assert_eq!(texts(english().syllabify("s")), vec!["s"]);
        assert!(english().syllabify("").is_empty());
        assert!(english().syllabify("ˈ").is_empty());
    }

    #[test]
    fn t_stray_stress_marks() {
        assert_eq!(texts(english().syllabify("ˈ.ka")), vec!["ˈka"]);
        assert_eq!(texts(english().syllabify("ka. ˌ ta")), vec!["ka", "ˌta"]);
        assert_eq!(texts(english().syllabify("ˌˈka")), vec!["ˈka"]);
        assert_eq!(texts(english().syllabify("hɛˈ")), vec!["hɛ"]);
        let syllables = english().syllabify("ˈ.ka");
        assert_eq!(syllables[0].stress(), Some(Stress::Primary));
    }

    #[test]
    fn t_normalization_applies() {
        assert_eq!(texts(english().syllabify("'gʊd")), vec!["ˈɡʊd"]);
    }

    #[test]
    fn t_no_phone_lost() {
        let transcription = "ˌɛkstɹəˈɔɹdɪnɛɹi";
        let joined = texts(english().syllabify(transcription)).join("");
        assert_eq!(joined, transcription);
    }

    #[test]
    fn t_sonority_policy() {
        let inventory = inventory();
        let syllabifier = OnsetSyllabifier::new(inventory, OnsetPolicy::Sonority);
        assert_eq!(texts(syllabifier.syllabify("apla")), vec!["a", "pla"]);
        assert_eq!(texts(syllabifier.syllabify("alpa")), vec!["al", "pa"]);
        assert_eq!(texts(syllabifier.syllabify("astɹa")), vec!["a", "stɹa"]);
    }

    #[test]
    fn t_cluster_policy_rejects_vowels() {
        let inventory = inventory();
        assert!(OnsetPolicy::clusters(&inventory, "pa", "").is_err());
    }
}
