use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::error::RecordError;
use crate::location::Point;

/// 从 `id,lat,lon` 格式的文本表格中读取坐标点
pub struct CsvSource<R> {
    reader: R,
    skip_header: bool,
    line: usize,
    buf: String,
}

impl CsvSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>, skip_header: bool) -> Result<Self, RecordError> {
        let path = path.as_ref();
        info!("读取文件: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), skip_header))
    }
}

impl<R: BufRead> CsvSource<R> {
    pub fn from_reader(reader: R, skip_header: bool) -> Self {
        Self { reader, skip_header, line: 0, buf: String::new() }
    }

    /// 读入一个物理行，返回 false 表示已读到末尾
    fn read_line(&mut self) -> Result<bool, RecordError> {
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => Ok(false),
            Ok(_) => {
                self.line += 1;
                Ok(true)
            }
            // 出错的行已被消费，仍然计入行号
            Err(source) => {
                self.line += 1;
                Err(RecordError::Read { line: self.line, source })
            }
        }
    }

    /// 读取下一条非空记录及其起始行号，返回 None 表示已读到末尾
    ///
    /// 引号内的字段可以跨行，此时会继续读入后续的行
    fn next_record(&mut self) -> Result<Option<(usize, Vec<String>)>, RecordError> {
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            let start = self.line;
            if self.buf.trim().is_empty() {
                continue;
            }

            let mut splitter = RecordSplitter::default();
            while splitter.feed(self.buf.trim_end_matches(['\r', '\n']), self.line)? {
                if !self.read_line()? {
                    return Err(RecordError::UnterminatedQuote { line: start });
                }
            }

            if self.skip_header {
                self.skip_header = false;
                continue;
            }
            return Ok(Some((start, splitter.finish())));
        }
    }

    fn parse(&self, line: usize, record: Vec<String>) -> Result<Point, RecordError> {
        let [id, lat, lon]: [String; 3] = record
            .try_into()
            .map_err(|record: Vec<String>| RecordError::FieldCount { line, found: record.len() })?;

        let lat = parse_coordinate(line, "latitude", &lat)?;
        let lon = parse_coordinate(line, "longitude", &lon)?;
        Ok(Point { id, lat, lon })
    }
}

impl<R: BufRead> Iterator for CsvSource<R> {
    type Item = Result<Point, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some((line, record))) => Some(self.parse(line, record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

fn parse_coordinate(line: usize, field: &'static str, value: &str) -> Result<f64, RecordError> {
    value.trim().parse().map_err(|source| RecordError::Coordinate {
        line,
        field,
        value: value.to_owned(),
        source,
    })
}

/// 按逗号切分记录，支持双引号包裹的字段，字段内的 `""` 表示一个引号
#[derive(Default)]
struct RecordSplitter {
    fields: Vec<String>,
    field: String,
    /// 当前处于引号内
    quoted: bool,
    /// 刚读完一个引号字段，之后只能是逗号或行尾
    closed: bool,
}

impl RecordSplitter {
    /// 处理一个物理行（不含换行符），返回 true 表示引号未闭合，需要继续读入下一行
    fn feed(&mut self, text: &str, line: usize) -> Result<bool, RecordError> {
        if self.quoted {
            self.field.push('\n');
        }

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if self.quoted {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        self.field.push('"');
                    }
                    '"' => {
                        self.quoted = false;
                        self.closed = true;
                    }
                    c => self.field.push(c),
                }
                continue;
            }

            match c {
                ',' => {
                    self.fields.push(std::mem::take(&mut self.field));
                    self.closed = false;
                }
                _ if self.closed => return Err(RecordError::Quote { line }),
                '"' if self.field.is_empty() => self.quoted = true,
                '"' => return Err(RecordError::BareQuote { line }),
                c => self.field.push(c),
            }
        }
        Ok(self.quoted)
    }

    fn finish(mut self) -> Vec<String> {
        self.fields.push(self.field);
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn read(data: &str, skip_header: bool) -> Vec<Result<Point, RecordError>> {
        CsvSource::from_reader(Cursor::new(data.to_owned()), skip_header).collect()
    }

    fn split(line: &str) -> Vec<String> {
        let mut splitter = RecordSplitter::default();
        assert!(!splitter.feed(line, 1).unwrap());
        splitter.finish()
    }

    #[test]
    fn test_split_record() {
        assert_eq!(split("a,1,2"), ["a", "1", "2"]);
        assert_eq!(split(r#""a,b",1,2"#), ["a,b", "1", "2"]);
        assert_eq!(split(r#""say ""hi""",1,2"#), [r#"say "hi""#, "1", "2"]);
        assert_eq!(split(r#""",1,2"#), ["", "1", "2"]);
        assert_eq!(split("a,,"), ["a", "", ""]);
    }

    #[test]
    fn test_read_with_header() {
        let points = read("id,lat,lng\n1,51.5,4.4\r\n\n2, -1.0 ,2\n", true);
        let points = points.into_iter().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(points, [Point::new("1", 51.5, 4.4), Point::new("2", -1.0, 2.0)]);
    }

    #[test]
    fn test_read_without_header() {
        let points = read("1,0,0\n", false);
        assert_eq!(points.len(), 1);
        assert!(points[0].is_ok());
    }

    #[test]
    fn test_field_count_error() {
        let points = read("id,lat,lng\n1,2\n", true);
        assert!(matches!(points[0], Err(RecordError::FieldCount { line: 2, found: 2 })));
    }

    #[test]
    fn test_coordinate_error() {
        let points = read("1,abc,2\n", false);
        match &points[0] {
            Err(RecordError::Coordinate { line, field, value, .. }) => {
                assert_eq!(*line, 1);
                assert_eq!(*field, "latitude");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(read("", true).is_empty());
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"id,lat,lng\na,1.5,2.5\nb,3,4\n").unwrap();

        let source = CsvSource::open(file.path(), true).unwrap();
        let ids = source.map(|p| p.unwrap().id).collect::<Vec<_>>();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = CsvSource::open(dir.path().join("missing.csv"), true);
        assert!(matches!(result, Err(RecordError::Io(_))));
    }

    #[test]
    fn test_multiline_quoted_field() {
        let points = read("id,lat,lng\n\"two\nlines\",1,2\nb,3,4\n", true);
        let points = points.into_iter().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(points, [Point::new("two\nlines", 1.0, 2.0), Point::new("b", 3.0, 4.0)]);
    }

    #[test]
    fn test_multiline_record_line_number() {
        let points = read("\"a\n\nb\",1\nc,x,0\n", false);
        assert!(matches!(points[0], Err(RecordError::FieldCount { line: 1, found: 2 })));
        assert!(matches!(points[1], Err(RecordError::Coordinate { line: 4, .. })));
    }

    #[test]
    fn test_bare_quote() {
        let points = read("a\"b,1,2\nc,3,4\n", false);
        assert!(matches!(points[0], Err(RecordError::BareQuote { line: 1 })));
        assert_eq!(points[1].as_ref().unwrap().id, "c");
    }

    #[test]
    fn test_text_after_closing_quote() {
        let points = read("1,2,3\n\"a\"b,1,2\n", false);
        assert!(matches!(points[1], Err(RecordError::Quote { line: 2 })));
    }

    #[test]
    fn test_unterminated_quote() {
        let points = read("a,1,2\n\"b,3,4\nc,5,6\n", false);
        assert_eq!(points.len(), 2);
        assert!(matches!(points[1], Err(RecordError::UnterminatedQuote { line: 2 })));
    }

    #[test]
    fn test_read_error_line_number() {
        let data = b"1,0,0\n\xff,1,2\n3,x,0\n".to_vec();
        let points = CsvSource::from_reader(Cursor::new(data), false).collect::<Vec<_>>();
        assert!(points[0].is_ok());
        assert!(matches!(points[1], Err(RecordError::Read { line: 2, .. })));
        assert!(matches!(points[2], Err(RecordError::Coordinate { line: 3, .. })));
    }
}
