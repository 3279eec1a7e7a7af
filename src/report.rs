use crate::shape::{ShapeBucket, ShapeClassifier};
use crate::word::Syllable;
use crate::SyllTabResult;
use std::io;

pub const TABLE_HEADER: [&str; 7] = ["Orthography", "IPA", "V", "CV", "VC", "CVC", "Other"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub word: String,
    pub transcription: String,
    /// Indexed by [`ShapeBucket::index`].
    pub buckets: [String; 5],
}

impl ReportRow {
    pub fn build(
        word: &str,
        transcription: &str,
        syllables: &[Syllable],
        classifier: &ShapeClassifier,
    ) -> Self {
        let mut buckets: [String; 5] = Default::default();
        for syllable in syllables {
            let bucket = &mut buckets[classifier.classify(syllable).index()];
            if !bucket.is_empty() {
                bucket.push(' ');
            }
            bucket.push_str(&syllable.display());
        }
        Self {
            word: word.to_string(),
            transcription: transcription.to_string(),
            buckets,
        }
    }

    pub fn bucket(&self, bucket: ShapeBucket) -> &str {
        &self.buckets[bucket.index()]
    }

    pub fn export(&self) -> Vec<&str> {
        let mut fields = vec![self.word.as_str(), self.transcription.as_str()];
        fields.extend(self.buckets.iter().map(|b| b.as_str()));
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the header and every row as CSV records ending in `\r\n`. The header is written
    /// even without rows.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> SyllTabResult<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);
        wtr.write_record(TABLE_HEADER)?;
        for row in &self.rows {
            wtr.write_record(row.export())?;
        }
        wtr.flush()?;
        Ok(())
    }
}
