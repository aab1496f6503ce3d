//! Line-oriented record decoder.
//!
//! Each line of a source is split on a separator and must yield exactly the
//! expected number of fields. The first line that does not is reported as a
//! [`Error::SchemaMismatch`] and ends the sequence.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::marker::PhantomData;
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::Record;

/// Default field separator for university data files.
pub const DEFAULT_SEPARATOR: char = '\t';

/// Decoder options shared by every source in a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Field separator.
    pub separator: char,
    /// Consume the first line without yielding it.
    pub header: bool,
}

impl ReaderOptions {
    /// Create options with the given separator and no header.
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            header: false,
        }
    }

    /// Treat the first line as a header.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

/// Lazy decoder yielding one field vector per line.
///
/// The underlying reader is owned by the decoder, so a file handle is released
/// when the decoder is dropped, whether or not the scan completed.
pub struct RecordReader<R> {
    source_name: String,
    lines: Lines<R>,
    expected: usize,
    separator: char,
    skip_header: bool,
    line_number: usize,
    finished: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open a file for decoding.
    pub fn open(path: impl AsRef<Path>, expected: usize, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::NotFound {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        tracing::debug!(path = %path.display(), expected, "opened record source");
        Ok(Self::new(
            path.display().to_string(),
            BufReader::new(file),
            expected,
            options,
        ))
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Decode from any buffered reader. `source_name` appears in error messages.
    pub fn new(
        source_name: impl Into<String>,
        reader: R,
        expected: usize,
        options: ReaderOptions,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            lines: reader.lines(),
            expected,
            separator: options.separator,
            skip_header: options.header,
            line_number: 0,
            finished: false,
        }
    }

    /// Name used for this source in error messages.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Number of lines consumed so far, header included.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn fail(&mut self, err: Error) -> Option<Result<Vec<String>>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    let err = Error::Read {
                        source_name: self.source_name.clone(),
                        line: self.line_number + 1,
                        source: e,
                    };
                    return self.fail(err);
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };
            self.line_number += 1;

            // `lines()` strips "\n" and "\r\n"; a lone trailing '\r' can still remain
            let line = line.strip_suffix('\r').unwrap_or(&line);
            let fields: Vec<String> = line.split(self.separator).map(str::to_string).collect();

            if fields.len() != self.expected {
                let err = Error::SchemaMismatch {
                    source_name: self.source_name.clone(),
                    actual: fields.len(),
                    line: self.line_number,
                    expected: self.expected,
                };
                return self.fail(err);
            }

            if self.skip_header {
                self.skip_header = false;
                continue;
            }

            return Some(Ok(fields));
        }
    }
}

/// Decoder yielding typed records whose arity comes from [`Record::FIELDS`].
pub struct Records<T, R> {
    inner: RecordReader<R>,
    _marker: PhantomData<T>,
}

impl<T: Record> Records<T, BufReader<File>> {
    /// Open a file of `T` records.
    pub fn open(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        Ok(Self {
            inner: RecordReader::open(path, T::FIELDS, options)?,
            _marker: PhantomData,
        })
    }
}

impl<T: Record, R: BufRead> Records<T, R> {
    /// Decode `T` records from any buffered reader.
    pub fn new(source_name: impl Into<String>, reader: R, options: ReaderOptions) -> Self {
        Self {
            inner: RecordReader::new(source_name, reader, T::FIELDS, options),
            _marker: PhantomData,
        }
    }

    /// Name used for this source in error messages.
    pub fn source_name(&self) -> &str {
        self.inner.source_name()
    }

    /// Number of lines consumed so far, header included.
    pub fn line_number(&self) -> usize {
        self.inner.line_number()
    }

    /// Attach the source name and current line to an error raised while
    /// applying the most recent record.
    pub fn locate(&self, err: Error) -> Error {
        Error::InRecord {
            source_name: self.source_name().to_string(),
            line: self.line_number(),
            source: Box::new(err),
        }
    }
}

impl<T: Record, R: BufRead> Iterator for Records<T, R> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|fields| fields.map(T::from_fields))
    }
}
