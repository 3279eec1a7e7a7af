use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Tabulate the syllable shapes (V, CV, VC, CVC, other) of dictionary transcriptions"
)]
pub struct Cli {
    /// Words to look up, defaults to a small sample list
    pub words: Vec<String>,

    /// Read words from a file, one per line
    #[arg(short = 'w', long)]
    pub words_file: Option<PathBuf>,

    /// Output CSV file, `-` for standard output [default: syllables.csv]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Dictionary file (`orthography,ipa` CSV, or `word<TAB>ipa` for .txt/.tsv)
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// Language of the dictionary and syllabifier [default: eng]
    #[arg(short, long)]
    pub language: Option<String>,

    /// JSON settings file, flags take precedence over it
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
