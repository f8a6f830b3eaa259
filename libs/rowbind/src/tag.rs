/// Annotation value that marks a field as not mapped.
pub const IGNORE: &str = "-";

/// Separator between the table qualifier and the column in `table.column`.
pub const SEPARATOR: char = '.';

/// Parsed `#[db("...")]` annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag<'a> {
    /// No annotation, an empty one, or `"-"`.
    Ignored,
    /// `"column"`.
    Column(&'a str),
    /// `"table.column"`. `table` is informational only.
    Qualified { table: &'a str, column: &'a str },
}

impl<'a> FieldTag<'a> {
    /// Parse a raw annotation.
    ///
    /// Splits on the first `.` only; later dots stay in the column part.
    /// Content is not validated, so `"users."` yields an empty column.
    pub fn parse(raw: Option<&'a str>) -> Self {
        match raw {
            None | Some("") | Some(IGNORE) => FieldTag::Ignored,
            Some(raw) => match raw.split_once(SEPARATOR) {
                Some((table, column)) => FieldTag::Qualified { table, column },
                None => FieldTag::Column(raw),
            },
        }
    }

    /// The column name used for matching, `None` when ignored.
    pub fn column(&self) -> Option<&'a str> {
        match *self {
            FieldTag::Ignored => None,
            FieldTag::Column(column) | FieldTag::Qualified { column, .. } => Some(column),
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, FieldTag::Ignored)
    }
}
