use crate::cli::Cli;
use crate::raw_data::DEFAULT_WORDS;
use crate::shape::ShapeClassifier;
use crate::SyllTabError::Config;
use crate::SyllTabResult;
use log::debug;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "syllables.csv";

/// Where the finished table goes. `-` selects standard output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl From<String> for OutputTarget {
    fn from(value: String) -> Self {
        if value == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT))
    }
}

impl Display for OutputTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "standard output"),
            OutputTarget::File(p) => write!(f, "{}", p.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub words: Vec<String>,
    pub words_file: Option<PathBuf>,
    pub language: String,
    pub dictionary: Option<PathBuf>,
    pub output: OutputTarget,
    /// `BUCKET=PATTERN` list replacing the standard shape patterns.
    pub shapes: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            words: vec![],
            words_file: None,
            language: "eng".to_string(),
            dictionary: None,
            output: OutputTarget::default(),
            shapes: None,
        }
    }
}

impl Settings {
    pub fn from_json_file(path: &Path) -> SyllTabResult<Self> {
        let file = File::open(path)
            .map_err(|e| Config(format!("cannot open {}: {}", path.display(), e)))?;
        let settings = serde_json::from_reader(BufReader::new(file))?;
        debug!("read settings from {}", path.display());
        Ok(settings)
    }

    /// Defaults, then the config file named on the command line, then the flags themselves.
    pub fn from_cli(cli: Cli) -> SyllTabResult<Self> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = cli.words_file {
            settings.words_file = Some(path);
        }
        // positional words beat any words file
        if !cli.words.is_empty() {
            settings.words = cli.words;
            settings.words_file = None;
        }
        if let Some(language) = cli.language {
            settings.language = language;
        }
        if let Some(dictionary) = cli.dictionary {
            settings.dictionary = Some(dictionary);
        }
        if let Some(output) = cli.output {
            settings.output = OutputTarget::from(output);
        }
        Ok(settings)
    }

    /// Words file first, then the configured words, then the built-in list.
    pub fn resolve_words(&self) -> SyllTabResult<Vec<String>> {
        if let Some(path) = &self.words_file {
            return read_words(path);
        }
        if !self.words.is_empty() {
            return Ok(self.words.clone());
        }
        Ok(DEFAULT_WORDS.iter().map(|w| w.to_string()).collect())
    }

    pub fn classifier(&self) -> SyllTabResult<ShapeClassifier> {
        match &self.shapes {
            Some(shapes) => ShapeClassifier::try_parse(shapes),
            None => Ok(ShapeClassifier::default()),
        }
    }
}

/// One word per line; blank lines and `#` comments are skipped.
pub fn read_words(path: &Path) -> SyllTabResult<Vec<String>> {
    let file = File::open(path)
        .map_err(|e| Config(format!("cannot open words file {}: {}", path.display(), e)))?;
    let mut words = vec![];
    for line in BufReader::new(file).lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() && !word.starts_with('#') {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn t_defaults() {
        let settings = Settings::from_cli(Cli::parse_from(["sylltab"])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(
            settings.resolve_words().unwrap(),
            vec!["hello", "world", "goodbye", "sanity"]
        );
        assert_eq!(settings.output, OutputTarget::File(PathBuf::from("syllables.csv")));
    }

    #[test]
    fn t_cli_overrides_config() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(
            config,
            r#"{{"words": ["cat"], "language": "eng", "output": "-", "dictionary": "d.csv"}}"#
        )
        .unwrap();
        let path = config.path().to_str().unwrap();
        let settings = Settings::from_cli(Cli::parse_from(["sylltab", "-c", path])).unwrap();
        assert_eq!(settings.output, OutputTarget::Stdout);
        assert_eq!(settings.resolve_words().unwrap(), vec!["cat"]);
        assert_eq!(settings.dictionary, Some(PathBuf::from("d.csv")));

        let settings =
            Settings::from_cli(Cli::parse_from(["sylltab", "-c", path, "-o", "out.csv", "dog"]))
                .unwrap();
        assert_eq!(settings.output, OutputTarget::File(PathBuf::from("out.csv")));
        assert_eq!(settings.resolve_words().unwrap(), vec!["dog"]);
    }

    #[test]
    fn t_unknown_config_field() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(config, r#"{{"wordz": []}}"#).unwrap();
        assert!(Settings::from_json_file(config.path()).is_err());
    }

    #[test]
    fn t_words_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# greetings\nhello\n\n  goodbye  ").unwrap();
        let settings = Settings {
            words: vec!["ignored".to_string()],
            words_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(settings.resolve_words().unwrap(), vec!["hello", "goodbye"]);
    }

    #[test]
    fn t_positional_words_beat_words_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "goodbye").unwrap();
        let path = file.path().to_str().unwrap();
        let settings = Settings::from_cli(Cli::parse_from(["sylltab", "-w", path, "dog"])).unwrap();
        assert_eq!(settings.words_file, None);
        assert_eq!(settings.resolve_words().unwrap(), vec!["dog"]);

        let settings = Settings::from_cli(Cli::parse_from(["sylltab", "-w", path])).unwrap();
        assert_eq!(settings.resolve_words().unwrap(), vec!["goodbye"]);
    }

    #[test]
    fn t_custom_shapes() {
        let settings = Settings {
            shapes: Some("CV=CV".to_string()),
            ..Default::default()
        };
        assert!(settings.classifier().is_ok());
        let settings = Settings {
            shapes: Some("CV=Q".to_string()),
            ..Default::default()
        };
        assert!(settings.classifier().is_err());
        let settings = Settings {
            shapes: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(settings.classifier().is_err());
    }
}
