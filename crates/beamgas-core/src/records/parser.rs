use crate::domain::{AnalysisError, AnalysisResult, InteractionRecord, RecordSet};
use crate::table::{DelimitedTable, parse_integer_token};
use serde_json::{Map, Value};

pub(super) const PARTICLE_ID_COLUMNS: [&str; 5] =
    ["particleID", "partID", "particle", "pdg", "pdgID"];
pub(super) const PROCESS_NAME_COLUMNS: [&str; 3] = ["processName", "process", "name"];
pub(super) const PROCESS_TYPE_COLUMNS: [&str; 3] = ["PT", "postPT", "processType"];
pub(super) const PROCESS_SUBTYPE_COLUMNS: [&str; 4] =
    ["PST", "postPST", "processSubType", "subType"];
pub(super) const PRIMARIES_KEYS: [&str; 3] = ["n_primaries", "primaries", "nPrimaries"];

pub(super) fn parse_delimited_records(
    source_label: &str,
    content: &str,
) -> AnalysisResult<RecordSet> {
    let table = DelimitedTable::parse(source_label, content)?;
    let particle_column =
        table.require_column(source_label, "particleID", &PARTICLE_ID_COLUMNS)?;
    let name_column = table.require_column(source_label, "processName", &PROCESS_NAME_COLUMNS)?;
    let type_column = table.require_column(source_label, "PT", &PROCESS_TYPE_COLUMNS)?;
    let subtype_column = table.require_column(source_label, "PST", &PROCESS_SUBTYPE_COLUMNS)?;

    let records = table
        .rows
        .iter()
        .map(|row| -> AnalysisResult<InteractionRecord> {
            Ok(InteractionRecord {
                process_name: row.text(source_label, name_column, "processName")?.to_string(),
                process_type: row.integer(source_label, type_column, "PT")?,
                process_subtype: row.integer(source_label, subtype_column, "PST")?,
                particle_id: row.integer(source_label, particle_column, "particleID")?,
            })
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    let n_primaries = PRIMARIES_KEYS
        .iter()
        .find_map(|key| table.metadata(key))
        .map(|value| parse_primaries(source_label, value))
        .transpose()?;

    Ok(RecordSet {
        records,
        n_primaries,
    })
}

pub(super) fn parse_json_records(source_label: &str, content: &str) -> AnalysisResult<RecordSet> {
    let document: Value = serde_json::from_str(content).map_err(|source| {
        AnalysisError::schema(
            "SCHEMA.JSON_SYNTAX",
            format!("{}: invalid JSON: {}", source_label, source),
        )
    })?;

    let (items, n_primaries) = match &document {
        Value::Array(items) => (items, None),
        Value::Object(object) => {
            let items = object
                .get("records")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    AnalysisError::schema(
                        "SCHEMA.JSON_SHAPE",
                        format!(
                            "{}: expected a 'records' array at the top level",
                            source_label
                        ),
                    )
                })?;
            let n_primaries = match lookup_field(object, &PRIMARIES_KEYS) {
                None | Some(Value::Null) => None,
                Some(value) => Some(value.as_u64().ok_or_else(|| {
                    AnalysisError::schema(
                        "SCHEMA.PRIMARIES",
                        format!(
                            "{}: 'n_primaries' must be a non-negative integer, found {}",
                            source_label, value
                        ),
                    )
                })?),
            };
            (items, n_primaries)
        }
        _ => {
            return Err(AnalysisError::schema(
                "SCHEMA.JSON_SHAPE",
                format!(
                    "{}: expected an array of records or an object with 'records'",
                    source_label
                ),
            ));
        }
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| json_record(source_label, index, item))
        .collect::<AnalysisResult<Vec<_>>>()?;

    Ok(RecordSet {
        records,
        n_primaries,
    })
}

fn json_record(source_label: &str, index: usize, item: &Value) -> AnalysisResult<InteractionRecord> {
    let object = item.as_object().ok_or_else(|| {
        AnalysisError::schema(
            "SCHEMA.JSON_SHAPE",
            format!("{}: record #{} is not an object", source_label, index),
        )
    })?;

    let name = require_json_field(source_label, index, object, "processName", &PROCESS_NAME_COLUMNS)?;
    let process_name = name
        .as_str()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| json_field_error(source_label, index, "processName", "a non-empty string", name))?;

    Ok(InteractionRecord {
        process_name: process_name.trim().to_string(),
        process_type: json_integer(source_label, index, object, "PT", &PROCESS_TYPE_COLUMNS)?,
        process_subtype: json_integer(
            source_label,
            index,
            object,
            "PST",
            &PROCESS_SUBTYPE_COLUMNS,
        )?,
        particle_id: json_integer(
            source_label,
            index,
            object,
            "particleID",
            &PARTICLE_ID_COLUMNS,
        )?,
    })
}

fn json_integer(
    source_label: &str,
    index: usize,
    object: &Map<String, Value>,
    field: &str,
    aliases: &[&str],
) -> AnalysisResult<i32> {
    let value = require_json_field(source_label, index, object, field, aliases)?;
    let parsed = match value {
        Value::Number(number) => parse_integer_token(&number.to_string()),
        Value::String(text) => parse_integer_token(text.trim()),
        _ => None,
    };
    parsed.ok_or_else(|| json_field_error(source_label, index, field, "an integer", value))
}

fn require_json_field<'a>(
    source_label: &str,
    index: usize,
    object: &'a Map<String, Value>,
    field: &str,
    aliases: &[&str],
) -> AnalysisResult<&'a Value> {
    lookup_field(object, aliases).ok_or_else(|| {
        AnalysisError::schema(
            "SCHEMA.MISSING_FIELD",
            format!(
                "{}: record #{} is missing required field '{}' (accepted names: {})",
                source_label,
                index,
                field,
                aliases.join(", ")
            ),
        )
    })
}

fn lookup_field<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    object.iter().find_map(|(key, value)| {
        let normalized = key.replace('_', "");
        aliases
            .iter()
            .any(|alias| alias.replace('_', "").eq_ignore_ascii_case(&normalized))
            .then_some(value)
    })
}

fn json_field_error(
    source_label: &str,
    index: usize,
    field: &str,
    expected: &str,
    found: &Value,
) -> AnalysisError {
    AnalysisError::schema(
        "SCHEMA.RECORD_FIELD",
        format!(
            "{}: record #{} field '{}' expects {} but found {}",
            source_label, index, field, expected, found
        ),
    )
}

fn parse_primaries(source_label: &str, value: &str) -> AnalysisResult<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        AnalysisError::schema(
            "SCHEMA.PRIMARIES",
            format!(
                "{}: 'n_primaries' must be a non-negative integer, found '{}'",
                source_label, value
            ),
        )
    })
}
