//! Utilities for working with CSV files. Fields are comma-separated. A field holding a comma, a
//! quote, a line break or surrounding whitespace is written in double quotes, with embedded quotes
//! doubled; the reader accepts the same form, including quoted fields that span lines.

use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::ops::{Index, IndexMut};
use std::path::Path;

pub struct CsvWriter<W: Write> {
    writer: BufWriter<W>,
}
impl CsvWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::create(path)?;
        Ok(Self::wrap(file))
    }
}
impl<W: Write> CsvWriter<W> {
    pub fn wrap(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
        }
    }

    pub fn append<R>(&mut self, record: R) -> Result<(), io::Error>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        for (index, datum) in record.into_iter().enumerate() {
            if index != 0 {
                self.writer.write_all(b",")?;
            }
            let datum = datum.as_ref();
            if needs_quoting(datum) {
                self.writer.write_all(b"\"")?;
                self.writer.write_all(datum.replace('"', "\"\"").as_bytes())?;
                self.writer.write_all(b"\"")?;
            } else {
                self.writer.write_all(datum.as_bytes())?;
            }
        }
        self.writer.write_all(b"\n")
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}

fn needs_quoting(datum: &str) -> bool {
    datum.contains([',', '"', '\n', '\r']) || datum.trim() != datum
}

/// Reads non-blank records, yielding the 1-based line on which each record starts alongside its
/// fields. Unquoted fields are trimmed; quoted fields are kept verbatim.
pub struct CsvReader<R: BufRead> {
    lines: Lines<R>,
    line: usize,
}
impl CsvReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Ok(Self::wrap(BufReader::new(file)))
    }
}
impl<R: BufRead> CsvReader<R> {
    pub fn wrap(inner: R) -> Self {
        Self {
            lines: inner.lines(),
            line: 0,
        }
    }

    pub fn read(&mut self) -> Option<Result<(usize, Vec<String>), io::Error>> {
        loop {
            let line = self.lines.next()?;
            self.line += 1;
            match line {
                Err(err) => return Some(Err(err)),
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    let start = self.line;
                    return Some(self.split(line).map(|fields| (start, fields)));
                }
            }
        }
    }

    fn split(&mut self, mut line: String) -> Result<Vec<String>, io::Error> {
        let mut fields = vec![];
        let mut field = String::new();
        let mut quoted = false;
        let mut in_quotes = false;
        loop {
            let mut chars = line.chars().peekable();
            while let Some(c) = chars.next() {
                if in_quotes {
                    if c != '"' {
                        field.push(c);
                    } else if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                    continue;
                }
                match c {
                    ',' => {
                        fields.push(finish(&mut field, quoted));
                        quoted = false;
                    }
                    '"' if !quoted && field.trim().is_empty() => {
                        field.clear();
                        quoted = true;
                        in_quotes = true;
                    }
                    // padding after a closing quote
                    c if quoted && c.is_whitespace() => {}
                    c => field.push(c),
                }
            }
            if !in_quotes {
                break;
            }
            field.push('\n');
            line = match self.lines.next() {
                Some(next) => next?,
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("unterminated quoted field at line {}", self.line),
                    ))
                }
            };
            self.line += 1;
        }
        fields.push(finish(&mut field, quoted));
        Ok(fields)
    }
}

fn finish(field: &mut String, quoted: bool) -> String {
    let field = std::mem::take(field);
    if quoted {
        field
    } else {
        field.trim().to_string()
    }
}

impl<R: BufRead> Iterator for CsvReader<R> {
    type Item = Result<(usize, Vec<String>), io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    items: Vec<Cow<'static, str>>,
}
impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, || Cow::Borrowed(""));
        Self { items }
    }

    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let items = values
            .into_iter()
            .map(|value| Cow::Owned(value.to_string()))
            .collect();
        Self { items }
    }

    pub fn set(&mut self, ordinal: impl Into<usize>, value: impl ToString) {
        self.items[ordinal.into()] = Cow::Owned(value.to_string())
    }
}

impl IntoIterator for Record {
    type Item = Cow<'static, str>;
    type IntoIter = std::vec::IntoIter<Cow<'static, str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<I: Into<usize>> Index<I> for Record {
    type Output = Cow<'static, str>;

    fn index(&self, index: I) -> &Self::Output {
        &self.items[index.into()]
    }
}

impl<I: Into<usize>> IndexMut<I> for Record {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.items[index.into()]
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn read_skips_blank_lines() {
        let mut reader = CsvReader::wrap(Cursor::new("a, b\n\n  \nc,d,e\n"));
        assert_eq!((1, vec!["a".to_string(), "b".to_string()]), reader.next().unwrap().unwrap());
        assert_eq!(4, reader.next().unwrap().unwrap().0);
        assert!(reader.next().is_none());
    }

    #[test]
    fn write_records() {
        let mut writer = CsvWriter::wrap(Vec::new());
        writer.append(["id", "name"]).unwrap();
        let mut record = Record::with_capacity(2);
        record.set(1usize, "Alpha");
        record[0usize] = "a".into();
        writer.append(record).unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!("id,name\na,Alpha\n", String::from_utf8(bytes).unwrap());
    }

    #[test]
    fn write_quotes_awkward_fields() {
        let mut writer = CsvWriter::wrap(Vec::new());
        writer
            .append(["plain", "Smith, J", "the \"Reds\"", " padded", "two\nlines"])
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            "plain,\"Smith, J\",\"the \"\"Reds\"\"\",\" padded\",\"two\nlines\"\n",
            text
        );

        let (line, fields) = CsvReader::wrap(Cursor::new(text)).next().unwrap().unwrap();
        assert_eq!(1, line);
        assert_eq!(
            vec!["plain", "Smith, J", "the \"Reds\"", " padded", "two\nlines"],
            fields
        );
    }

    #[test]
    fn read_quoted_fields() {
        let mut reader = CsvReader::wrap(Cursor::new("a, \"b, c\" ,\"\"\nd,\"e\nf\"\ng\n"));
        assert_eq!(
            (1, vec!["a".to_string(), "b, c".to_string(), "".to_string()]),
            reader.next().unwrap().unwrap()
        );
        assert_eq!(
            (2, vec!["d".to_string(), "e\nf".to_string()]),
            reader.next().unwrap().unwrap()
        );
        assert_eq!((4, vec!["g".to_string()]), reader.next().unwrap().unwrap());
        assert!(reader.next().is_none());
    }

    #[test]
    fn read_unterminated_quote() {
        let mut reader = CsvReader::wrap(Cursor::new("a,\"b\nc\n"));
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(io::ErrorKind::InvalidData, err.kind());
        assert_eq!("unterminated quoted field at line 2", err.to_string());
    }
}
