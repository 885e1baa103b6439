//! Header-driven reader for comma- or whitespace-delimited text tables.
//!
//! Lines starting with `#` are comments and are kept aside so callers can pick
//! up `key: value` metadata. The first non-comment line is the header.

use crate::domain::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    Comma,
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableRow {
    pub(crate) line: usize,
    pub(crate) fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DelimitedTable {
    pub(crate) header: Vec<String>,
    pub(crate) rows: Vec<TableRow>,
    pub(crate) comments: Vec<String>,
}

impl DelimitedTable {
    pub(crate) fn parse(source_label: &str, content: &str) -> AnalysisResult<Self> {
        let mut comments = Vec::new();
        let mut header: Option<(Vec<String>, Delimiter)> = None;
        let mut rows = Vec::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                comments.push(comment.trim().to_string());
                continue;
            }

            match &header {
                None => {
                    let delimiter = if line.contains(',') {
                        Delimiter::Comma
                    } else {
                        Delimiter::Whitespace
                    };
                    header = Some((split_fields(line, delimiter), delimiter));
                }
                Some((columns, delimiter)) => {
                    let fields = split_fields(line, *delimiter);
                    if fields.len() != columns.len() {
                        return Err(AnalysisError::schema(
                            "SCHEMA.ROW_WIDTH",
                            format!(
                                "{}:{}: expected {} fields but found {}",
                                source_label,
                                line_number,
                                columns.len(),
                                fields.len()
                            ),
                        ));
                    }
                    rows.push(TableRow {
                        line: line_number,
                        fields,
                    });
                }
            }
        }

        let Some((header, _)) = header else {
            return Err(AnalysisError::schema(
                "SCHEMA.MISSING_HEADER",
                format!("{}: no header row found", source_label),
            ));
        };

        Ok(Self {
            header,
            rows,
            comments,
        })
    }

    /// Index of the first header column matching any alias.
    pub(crate) fn column(&self, aliases: &[&str]) -> Option<usize> {
        self.header.iter().position(|name| {
            let normalized = normalize_column_name(name);
            aliases
                .iter()
                .any(|alias| normalize_column_name(alias) == normalized)
        })
    }

    pub(crate) fn require_column(
        &self,
        source_label: &str,
        field: &str,
        aliases: &[&str],
    ) -> AnalysisResult<usize> {
        self.column(aliases).ok_or_else(|| {
            AnalysisError::schema(
                "SCHEMA.MISSING_COLUMN",
                format!(
                    "{}: required field '{}' is missing (accepted column names: {})",
                    source_label,
                    field,
                    aliases.join(", ")
                ),
            )
        })
    }

    /// Value of a `key: value` or `key = value` comment, first match wins.
    pub(crate) fn metadata(&self, key: &str) -> Option<&str> {
        self.comments.iter().find_map(|comment| {
            let (name, value) = comment.split_once(':').or_else(|| comment.split_once('='))?;
            (normalize_column_name(name) == normalize_column_name(key)).then(|| value.trim())
        })
    }
}

impl TableRow {
    pub(crate) fn integer(
        &self,
        source_label: &str,
        column: usize,
        field: &str,
    ) -> AnalysisResult<i32> {
        let token = self.fields[column].as_str();
        parse_integer_token(token).ok_or_else(|| {
            AnalysisError::schema(
                "SCHEMA.RECORD_FIELD",
                format!(
                    "{}:{}: field '{}' expects an integer but found '{}'",
                    source_label, self.line, field, token
                ),
            )
        })
    }

    pub(crate) fn text(
        &self,
        source_label: &str,
        column: usize,
        field: &str,
    ) -> AnalysisResult<&str> {
        let token = self.fields[column].as_str();
        if token.is_empty() {
            return Err(AnalysisError::schema(
                "SCHEMA.RECORD_FIELD",
                format!("{}:{}: field '{}' is empty", source_label, self.line, field),
            ));
        }
        Ok(token)
    }
}

/// Accepts plain integers and integral floats such as `12.0`, which ROOT
/// exports sometimes emit for integer branches.
pub(crate) fn parse_integer_token(token: &str) -> Option<i32> {
    if let Ok(value) = token.parse::<i32>() {
        return Some(value);
    }
    let value = token.parse::<f64>().ok()?;
    (value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX))
        .then_some(value as i32)
}

fn split_fields(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Comma => line
            .split(',')
            .map(|field| field.trim().trim_matches('"').to_string())
            .collect(),
        Delimiter::Whitespace => line.split_whitespace().map(str::to_string).collect(),
    }
}

fn normalize_column_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|character| *character != '_' && *character != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DelimitedTable, parse_integer_token};
    use crate::domain::AnalysisErrorCategory;

    #[test]
    fn comma_tables_keep_comments_and_rows() {
        let table = DelimitedTable::parse(
            "steps.csv",
            "# n_primaries: 100\npartID,processName,postPT,postPST\n-11,compt,2,13\n\n-11, phot ,2,12\n",
        )
        .expect("table should parse");

        assert_eq!(table.header.len(), 4);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].line, 5);
        assert_eq!(table.rows[1].fields[1], "phot");
        assert_eq!(table.metadata("n_primaries"), Some("100"));
        assert_eq!(table.metadata("nPrimaries"), Some("100"));
    }

    #[test]
    fn whitespace_tables_split_on_runs_of_blanks() {
        let table = DelimitedTable::parse("steps.dat", "PT  PST   name\n 2   13  compt\n")
            .expect("table should parse");
        assert_eq!(table.column(&["processSubType", "PST"]), Some(1));
        assert_eq!(table.rows[0].fields, vec!["2", "13", "compt"]);
    }

    #[test]
    fn ragged_rows_are_schema_errors() {
        let error = DelimitedTable::parse("steps.csv", "a,b,c\n1,2\n")
            .expect_err("short row should fail");
        assert_eq!(error.category(), AnalysisErrorCategory::SchemaError);
        assert_eq!(error.code(), "SCHEMA.ROW_WIDTH");
        assert!(error.message().contains("steps.csv:2"));
    }

    #[test]
    fn comment_only_content_has_no_header() {
        let error = DelimitedTable::parse("empty.csv", "# nothing here\n")
            .expect_err("missing header should fail");
        assert_eq!(error.code(), "SCHEMA.MISSING_HEADER");
    }

    #[test]
    fn integer_tokens_accept_integral_floats_only() {
        assert_eq!(parse_integer_token("-11"), Some(-11));
        assert_eq!(parse_integer_token("12.0"), Some(12));
        assert_eq!(parse_integer_token("12.5"), None);
        assert_eq!(parse_integer_token("compt"), None);
    }
}
