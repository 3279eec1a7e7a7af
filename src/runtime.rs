use crate::dictionary::{CsvDictionary, Dictionary};
use crate::inventory::Inventory;
use crate::raw_data::english;
use crate::rewrite::RewriteRuleCollection;
use crate::syllabify::{OnsetPolicy, OnsetSyllabifier, Syllabifier};
use crate::word::Syllable;
use crate::SyllTabError::RuntimeUnavailable;
use crate::{SyllTabError, SyllTabResult};
use log::info;
use std::path::Path;

/// Dictionary and syllabifier for one language, held for the duration of a run.
pub struct PhonologyRuntime {
    language: String,
    dictionary: CsvDictionary,
    syllabifier: OnsetSyllabifier,
}

fn unavailable(language: &str, e: SyllTabError) -> SyllTabError {
    RuntimeUnavailable(format!("{} ({})", language, e))
}

impl PhonologyRuntime {
    /// Loads the resources for `language`. A `dictionary` path replaces the built-in one.
    pub fn start(language: &str, dictionary: Option<&Path>) -> SyllTabResult<Self> {
        let runtime = match language {
            "eng" | "en" => Self::start_english(dictionary),
            other => Err(RuntimeUnavailable(format!(
                "no dictionary or syllabifier for language '{}'",
                other
            ))),
        }?;
        info!(
            "phonology runtime started for '{}' ({} words, {} sounds)",
            runtime.language,
            runtime.dictionary.len(),
            runtime.syllabifier.inventory().len()
        );
        Ok(runtime)
    }

    fn start_english(dictionary: Option<&Path>) -> SyllTabResult<Self> {
        let language = "eng";
        let inventory = Inventory::standard()
            .and_then(|i| i.with_diphthongs(english::DIPHTHONGS))
            .map_err(|e| unavailable(language, e))?;
        let policy = OnsetPolicy::clusters(
            &inventory,
            english::ONSET_CLUSTERS,
            english::FORBIDDEN_ONSETS,
        )
        .map_err(|e| unavailable(language, e))?;
        let dictionary = match dictionary {
            Some(path) => CsvDictionary::from_path(path),
            None => CsvDictionary::from_reader(english::DICTIONARY.as_bytes(), b',', true),
        }
        .map_err(|e| unavailable(language, e))?;
        Ok(Self {
            language: language.to_string(),
            dictionary,
            syllabifier: OnsetSyllabifier::new(inventory, policy)
                .with_normalization(RewriteRuleCollection::parse(english::NORMALIZATION)),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Dictionary for PhonologyRuntime {
    fn lookup(&self, word: &str) -> Vec<String> {
        self.dictionary.lookup(word)
    }
}

impl Syllabifier for PhonologyRuntime {
    fn syllabify(&self, transcription: &str) -> Vec<Syllable> {
        self.syllabifier.syllabify(transcription)
    }
}

impl Drop for PhonologyRuntime {
    fn drop(&mut self) {
        info!("phonology runtime for '{}' shut down", self.language);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn t_start_english() {
        let runtime = PhonologyRuntime::start("eng", None).unwrap();
        assert_eq!(runtime.language(), "eng");
        assert_eq!(runtime.lookup("sanity"), vec!["ˈsænɪti"]);
        let syllables = runtime
            .syllabify("ˈsænɪti")
            .into_iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        assert_eq!(syllables, vec!["ˈsæ", "nɪ", "ti"]);
    }

    #[test]
    fn t_unknown_language() {
        let err = PhonologyRuntime::start("tlh", None).err().unwrap();
        assert!(matches!(err, SyllTabError::RuntimeUnavailable(_)));
    }

    #[test]
    fn t_missing_dictionary() {
        let err = PhonologyRuntime::start("eng", Some(Path::new("/nonexistent/eng.csv")))
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Unable to start phonology runtime"));
    }

    #[test]
    fn t_custom_dictionary() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "orthography,ipa").unwrap();
        writeln!(file, "banana,bəˈnænə").unwrap();
        let runtime = PhonologyRuntime::start("en", Some(file.path())).unwrap();
        assert_eq!(runtime.lookup("banana"), vec!["bəˈnænə"]);
        assert!(runtime.lookup("hello").is_empty());
    }
}
