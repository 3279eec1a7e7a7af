use crate::config::{OutputTarget, Settings};
use crate::dictionary::Dictionary;
use crate::report::{ReportRow, ReportTable};
use crate::runtime::PhonologyRuntime;
use crate::shape::ShapeClassifier;
use crate::syllabify::Syllabifier;
use crate::SyllTabResult;
use log::{debug, info};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// One row per (word, transcription) pair, words in input order, transcriptions in lookup
/// order. Words without transcriptions contribute nothing.
pub fn build_table<D, S>(
    words: &[String],
    dictionary: &D,
    syllabifier: &S,
    classifier: &ShapeClassifier,
) -> ReportTable
where
    D: Dictionary + ?Sized,
    S: Syllabifier + ?Sized,
{
    let mut table = ReportTable::default();
    for word in words {
        let options = dictionary.lookup(word);
        if options.is_empty() {
            debug!("no transcription for '{}'", word);
        }
        for option in options {
            let syllables = syllabifier.syllabify(&option);
            table.push(ReportRow::build(word, &option, &syllables, classifier));
        }
    }
    table
}

/// Runs the whole batch. Nothing is written unless the runtime starts and the table is
/// complete; a file target only appears once fully written.
pub fn run(settings: &Settings) -> SyllTabResult<ReportTable> {
    let words = settings.resolve_words()?;
    let classifier = settings.classifier()?;
    let table = {
        let runtime = PhonologyRuntime::start(&settings.language, settings.dictionary.as_deref())?;
        build_table(&words, &runtime, &runtime, &classifier)
    };
    info!("{} words produced {} rows", words.len(), table.len());
    write_table(&table, &settings.output)?;
    Ok(table)
}

pub fn write_table(table: &ReportTable, target: &OutputTarget) -> SyllTabResult<()> {
    match target {
        OutputTarget::Stdout => write_to(table, io::stdout().lock())?,
        OutputTarget::File(path) => {
            persist_atomically(table, path)?;
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// Writes the complete table to `writer` and flushes it.
pub fn write_to<W: Write>(table: &ReportTable, mut writer: W) -> SyllTabResult<()> {
    table.write_csv(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn persist_atomically(table: &ReportTable, path: &Path) -> SyllTabResult<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;
    let temp_file = NamedTempFile::new_in(parent_dir)?;
    write_to(table, BufWriter::new(temp_file.as_file()))?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
