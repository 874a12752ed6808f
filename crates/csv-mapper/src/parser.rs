//! CSV parser producing mapped rows

use crate::config::{CsvParserOptions, CsvReaderOptions};
use crate::errors::{CsvError, CsvResult};
use crate::mapping::{CsvMapping, CsvMappingResult};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, trace};

/// Parser that tokenizes CSV input and maps each row into an `E`
#[derive(Debug)]
pub struct CsvParser<E> {
    options: CsvParserOptions,
    mapping: CsvMapping<E>,
}

impl<E: Default + 'static> CsvParser<E> {
    /// Create a parser from tokenizer options and a mapping
    pub fn new(options: CsvParserOptions, mapping: CsvMapping<E>) -> Self {
        Self { options, mapping }
    }

    /// Tokenizer options in use
    pub fn options(&self) -> &CsvParserOptions {
        &self.options
    }

    /// The row mapping in use
    pub fn mapping(&self) -> &CsvMapping<E> {
        &self.mapping
    }

    /// Parse text whose lines are split on the reader's line terminators
    ///
    /// Blank lines and comment lines are dropped. Row indices count every
    /// line of `data`, header included.
    pub fn read_from_string(
        &self,
        reader_options: &CsvReaderOptions,
        data: &str,
    ) -> CsvResult<Vec<CsvMappingResult<E>>> {
        self.options.validate()?;
        reader_options.validate()?;

        let skip = usize::from(self.options.skip_header);
        let results: Vec<_> = reader_options
            .split_lines(data)
            .into_iter()
            .enumerate()
            .skip(skip)
            .filter(|(_, line)| !line.trim().is_empty())
            .filter(|(_, line)| !self.is_comment(line))
            .map(|(row_index, line)| self.map_line(row_index, line))
            .collect();

        log_summary(&results);
        Ok(results)
    }

    /// Parse everything readable from `reader`
    ///
    /// Lines are terminated by `\n` or `\r\n`; quoted fields may span lines.
    /// The input is buffered in full. Row indices count source lines from the
    /// header, matching [`read_from_string`](Self::read_from_string); a
    /// multi-line record takes the index of its first line.
    pub fn read_from_reader<R: Read>(&self, mut reader: R) -> CsvResult<Vec<CsvMappingResult<E>>> {
        self.options.validate()?;

        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let mut csv_reader = self.reader_builder().from_reader(data.as_slice());
        let mut lines = LineIndex::new(&data, self.options.comment_u8());
        let mut next_row = usize::from(self.options.skip_header);

        let mut results = Vec::new();
        for record in csv_reader.records() {
            let result = match record {
                Ok(record) => {
                    let row_index = record
                        .position()
                        .map_or(next_row, |p| lines.row_at(p.byte()));
                    let tokens: Vec<&str> = record.iter().collect();
                    trace!(row_index, field_count = tokens.len(), "Tokenized CSV row");
                    self.mapping.map(row_index, &tokens)
                }
                Err(e) => {
                    let row_index = e.position().map_or(next_row, |p| lines.row_at(p.byte()));
                    CsvMappingResult {
                        row_index,
                        result: Err(CsvError::tokenize(row_index, e.to_string())),
                    }
                }
            };
            next_row = result.row_index + 1;
            results.push(result);
        }

        log_summary(&results);
        Ok(results)
    }

    /// Parse a CSV file
    pub fn read_from_file<P: AsRef<Path>>(&self, path: P) -> CsvResult<Vec<CsvMappingResult<E>>> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| CsvError::Io(format!("failed to open '{}': {}", path.display(), e)))?;
        debug!(path = %path.display(), "Reading CSV file");
        self.read_from_reader(BufReader::new(file))
    }

    fn is_comment(&self, line: &str) -> bool {
        self.options
            .comment_character
            .is_some_and(|c| line.starts_with(c))
    }

    fn map_line(&self, row_index: usize, line: &str) -> CsvMappingResult<E> {
        let mut csv_reader = self
            .reader_builder()
            .has_headers(false)
            .comment(None)
            .from_reader(line.as_bytes());

        let mut record = csv::StringRecord::new();
        match csv_reader.read_record(&mut record) {
            Ok(_) => {
                let tokens: Vec<&str> = record.iter().collect();
                trace!(row_index, field_count = tokens.len(), "Tokenized CSV row");
                self.mapping.map(row_index, &tokens)
            }
            Err(e) => CsvMappingResult {
                row_index,
                result: Err(CsvError::tokenize(row_index, e.to_string())),
            },
        }
    }

    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(self.options.skip_header)
            .delimiter(self.options.separator_u8())
            .quote(self.options.quote_char_u8())
            .comment(self.options.comment_u8())
            .flexible(true)
            .trim(if self.options.trim_fields {
                csv::Trim::Fields
            } else {
                csv::Trim::None
            });
        builder
    }
}

/// Maps record byte offsets back to source line indices
///
/// Offsets must be queried in increasing order.
struct LineIndex<'a> {
    data: &'a [u8],
    comment: Option<u8>,
    scanned: usize,
    line: usize,
}

impl<'a> LineIndex<'a> {
    fn new(data: &'a [u8], comment: Option<u8>) -> Self {
        Self {
            data,
            comment,
            scanned: 0,
            line: 0,
        }
    }

    /// Line holding the first content byte at or after `offset`
    ///
    /// Leftover terminators, blank lines and comment lines before the
    /// record are skipped.
    fn row_at(&mut self, offset: u64) -> usize {
        let len = self.data.len();
        let mut start = usize::try_from(offset).map_or(len, |o| o.min(len));
        loop {
            while start < len && matches!(self.data[start], b'\r' | b'\n') {
                start += 1;
            }
            if start < len && Some(self.data[start]) == self.comment {
                start = self.data[start..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(len, |p| start + p + 1);
                continue;
            }
            break;
        }

        if start < self.scanned {
            self.scanned = 0;
            self.line = 0;
        }
        self.line += self.data[self.scanned..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.scanned = start;
        self.line
    }
}

fn log_summary<E>(results: &[CsvMappingResult<E>]) {
    let valid = results.iter().filter(|r| r.is_valid()).count();
    debug!(
        rows = results.len(),
        valid,
        invalid = results.len() - valid,
        "Finished mapping CSV rows"
    );
}
