//! Parser for the namespace-tagged tabular mapping format.
//!
//! The format is tab-separated. The first line declares the namespace
//! column order:
//!
//! ```text
//! namespaces	official	intermediate	named
//! class	a	class_1	core/world/World
//! 	field	I	b	field_7	age
//! 	method	()V	c	method_3	tick
//! ```
//!
//! Class rows carry the three class names in header order; member rows are
//! indented with a leading tab and carry the member kind, descriptor, and
//! the three member names.

use veneer_common::Namespace;

use crate::error::MappingError;
use crate::table::{ClassRecord, MappingTable, MemberRecord};

/// Parses the full table text.
pub(crate) fn parse(content: &str) -> Result<MappingTable, MappingError> {
    let mut lines = content.lines().enumerate();

    let column_order = match lines.next() {
        Some((_, header)) => parse_header(header)?,
        None => {
            return Err(MappingError::Header {
                reason: "empty mapping table".to_string(),
            })
        }
    };

    let mut classes: Vec<ClassRecord> = Vec::new();

    for (idx, raw) in lines {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        if let Some(member_row) = raw.strip_prefix('\t') {
            let Some(current) = classes.last_mut() else {
                return Err(MappingError::Record {
                    line: line_no,
                    reason: "member record before any class record".to_string(),
                });
            };
            let (kind, member) = parse_member(member_row, line_no, &column_order)?;
            match kind {
                MemberKind::Field => current.fields.push(member),
                MemberKind::Method => current.methods.push(member),
            }
        } else {
            classes.push(parse_class(raw, line_no, &column_order)?);
        }
    }

    MappingTable::from_records(classes)
}

/// Parses the header line into the declared namespace column order.
fn parse_header(header: &str) -> Result<[Namespace; 3], MappingError> {
    let mut cols = header.split('\t');
    if cols.next() != Some("namespaces") {
        return Err(MappingError::Header {
            reason: "expected header line starting with 'namespaces'".to_string(),
        });
    }

    let tags: Vec<&str> = cols.collect();
    if tags.len() != 3 {
        return Err(MappingError::Header {
            reason: format!("expected 3 namespace columns, found {}", tags.len()),
        });
    }

    let mut order = [Namespace::Official; 3];
    let mut seen = [false; 3];
    for (i, tag) in tags.iter().enumerate() {
        let ns = Namespace::parse(tag).ok_or_else(|| MappingError::Header {
            reason: format!("unknown namespace tag '{tag}'"),
        })?;
        if seen[ns.index()] {
            return Err(MappingError::Header {
                reason: format!("duplicate namespace tag '{tag}'"),
            });
        }
        seen[ns.index()] = true;
        order[i] = ns;
    }
    Ok(order)
}

/// Reorders columns from header order into [`Namespace::index`] order,
/// rejecting empty names.
fn names_in_table_order(
    cols: &[&str],
    line: usize,
    column_order: &[Namespace; 3],
) -> Result<[String; 3], MappingError> {
    let mut names: [String; 3] = Default::default();
    for (col, ns) in cols.iter().zip(column_order) {
        if col.is_empty() {
            return Err(MappingError::MissingNamespace {
                line,
                namespace: *ns,
            });
        }
        names[ns.index()] = (*col).to_string();
    }
    Ok(names)
}

/// Parses a `class` row.
fn parse_class(
    raw: &str,
    line: usize,
    column_order: &[Namespace; 3],
) -> Result<ClassRecord, MappingError> {
    let cols: Vec<&str> = raw.split('\t').collect();
    if cols.len() != 4 || cols[0] != "class" {
        return Err(MappingError::Record {
            line,
            reason: format!("expected 'class' row with 4 columns, found {}", cols.len()),
        });
    }
    Ok(ClassRecord {
        names: names_in_table_order(&cols[1..], line, column_order)?,
        fields: Vec::new(),
        methods: Vec::new(),
    })
}

enum MemberKind {
    Field,
    Method,
}

/// Parses a member row (leading tab already stripped).
fn parse_member(
    raw: &str,
    line: usize,
    column_order: &[Namespace; 3],
) -> Result<(MemberKind, MemberRecord), MappingError> {
    let cols: Vec<&str> = raw.split('\t').collect();
    if cols.len() != 5 {
        return Err(MappingError::Record {
            line,
            reason: format!("expected member row with 5 columns, found {}", cols.len()),
        });
    }
    let kind = match cols[0] {
        "field" => MemberKind::Field,
        "method" => MemberKind::Method,
        other => {
            return Err(MappingError::Record {
                line,
                reason: format!("unknown member kind '{other}'"),
            })
        }
    };
    if cols[1].is_empty() {
        return Err(MappingError::Record {
            line,
            reason: "empty member descriptor".to_string(),
        });
    }
    Ok((
        kind,
        MemberRecord {
            descriptor: cols[1].to_string(),
            names: names_in_table_order(&cols[2..], line, column_order)?,
        },
    ))
}
