use crate::SyllTabResult;
use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

pub trait Dictionary {
    /// Candidate transcriptions for `word`, in dictionary order. Unknown words yield nothing.
    fn lookup(&self, word: &str) -> Vec<String>;
}

/// Word to transcription table read from delimited text.
#[derive(Debug, Clone, Default)]
pub struct CsvDictionary {
    entries: HashMap<String, Vec<String>>,
}

fn key(word: &str) -> String {
    word.trim().to_lowercase()
}

impl CsvDictionary {
    /// Reads `orthography,ipa` records. With `headers` the first record is skipped.
    pub fn from_reader<R: io::Read>(reader: R, delimiter: u8, headers: bool) -> SyllTabResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(headers)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(reader);
        let mut dictionary = Self::default();
        for result in rdr.records() {
            let record = result?;
            match (record.get(0), record.get(1)) {
                (Some(word), Some(ipa)) if !word.trim().is_empty() && !ipa.trim().is_empty() => {
                    dictionary.insert(word, ipa.trim());
                }
                _ => debug!("skipping dictionary record {:?}", record),
            }
        }
        Ok(dictionary)
    }

    /// `.txt` and `.tsv` files hold `word<TAB>ipa` lines without a header, anything else is
    /// read as CSV with an `orthography,ipa` header.
    pub fn from_path(path: &Path) -> SyllTabResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let tab_separated = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("txt") || e.eq_ignore_ascii_case("tsv"))
            .unwrap_or(false);
        let dictionary = if tab_separated {
            Self::from_reader(reader, b'\t', false)?
        } else {
            Self::from_reader(reader, b',', true)?
        };
        info!(
            "loaded {} dictionary entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn insert(&mut self, word: &str, transcription: &str) {
        let options = self.entries.entry(key(word)).or_default();
        if !options.iter().any(|o| o == transcription) {
            options.push(transcription.to_string());
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dictionary for CsvDictionary {
    fn lookup(&self, word: &str) -> Vec<String> {
        self.entries.get(&key(word)).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::raw_data::english::DICTIONARY;
    use std::io::Write;

    #[test]
    fn t_builtin_english() {
        let dictionary = CsvDictionary::from_reader(DICTIONARY.as_bytes(), b',', true).unwrap();
        assert_eq!(dictionary.lookup("hello"), vec!["hɛˈloʊ", "həˈloʊ"]);
        assert_eq!(dictionary.lookup(" World "), vec!["ˈwɝld"]);
        assert!(dictionary.lookup("orthography").is_empty());
        assert!(dictionary.lookup("xyzzy").is_empty());
    }

    #[test]
    fn t_duplicates_and_blanks() {
        let data = "orthography,ipa\ncat,ˈkæt\ncat,ˈkæt\n# comment\ndog,\n,ˈdɔɡ\ncat,ˈkat";
        let dictionary = CsvDictionary::from_reader(data.as_bytes(), b',', true).unwrap();
        assert_eq!(dictionary.lookup("CAT"), vec!["ˈkæt", "ˈkat"]);
        assert!(dictionary.lookup("dog").is_empty());
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn t_tab_separated_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "sanity\tˈsænɪti").unwrap();
        writeln!(file, "up\tˈʌp").unwrap();
        let dictionary = CsvDictionary::from_path(file.path()).unwrap();
        assert_eq!(dictionary.lookup("up"), vec!["ˈʌp"]);
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn t_missing_file() {
        assert!(CsvDictionary::from_path(Path::new("/nonexistent/dictionary.csv")).is_err());
    }
}
