//! Console rendering of reports, attributes, variables and records.

use cdf_check::{ComplianceReport, Issue, Severity};
use cdf_format::record::RecordBody;
use cdf_format::{CdfFile, RecordCatalog, Value, epoch_to_datetime, epoch16_to_datetime};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

/// Line printed for a file without issues.
pub const COMPLIANT: &str = "Format is OK.";
/// Line printed for a file with issues.
pub const NON_COMPLIANT: &str = "Format is non-compliant.";

/// Outcome line, then one line per issue.
pub fn check_text(report: &ComplianceReport) -> String {
    if report.is_compliant() {
        return COMPLIANT.to_string();
    }
    let mut lines = vec![NON_COMPLIANT.to_string(), "Reasons:".to_string()];
    lines.extend(report.issues().iter().map(ToString::to_string));
    lines.join("\n")
}

/// Issues in rule order.
pub fn issue_table(report: &ComplianceReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Severity"),
        header_cell("Category"),
        header_cell("Subject"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for issue in report.issues() {
        table.add_row(vec![
            Cell::new(issue.rule_id()),
            severity_cell(issue.severity()),
            Cell::new(issue.category().label()),
            subject_cell(issue),
            Cell::new(issue.message()),
        ]);
    }
    table
}

/// Header words in hex.
pub fn header_line(file: &CdfFile) -> String {
    let header = file.header();
    format!(
        "Version: {:#010x}  Compression: {:#010x}",
        header.magic, header.compression
    )
}

/// Global attributes in file order.
pub fn attribute_table(file: &CdfFile, iso_epochs: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute"),
        header_cell("Scope"),
        header_cell("Type"),
        header_cell("Start byte"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for attribute in file.global_attributes() {
        let data_type = attribute
            .data_type
            .map_or_else(|| dim_cell("-"), |t| Cell::new(t.name()));
        table.add_row(vec![
            name_cell(&attribute.name),
            Cell::new(attribute.scope),
            data_type,
            Cell::new(attribute.start_byte),
            values_cell(&attribute.values, iso_epochs),
        ]);
    }
    table
}

/// Variables in file order.
pub fn variable_table(file: &CdfFile) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Kind"),
        header_cell("Number"),
        header_cell("Type"),
        header_cell("PDS type"),
        header_cell("Dims"),
        header_cell("Records"),
        header_cell("Start byte"),
        header_cell("Role"),
    ]);
    apply_table_style(&mut table);
    for column in [2, 6, 7] {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for variable in file.variables() {
        let start = if variable.is_virtual() {
            dim_cell("virtual")
        } else {
            Cell::new(variable.start_byte)
        };
        table.add_row(vec![
            name_cell(&variable.name),
            Cell::new(variable.kind.label()),
            Cell::new(variable.number),
            Cell::new(variable.data_type.name()),
            Cell::new(variable.data_type.pds_name()),
            Cell::new(dims_text(&variable.dims)),
            Cell::new(variable.record_count),
            start,
            role_cell(variable.is_data(), variable.role().label()),
        ]);
    }
    table
}

/// Attributes attached to each variable.
pub fn variable_attribute_table(file: &CdfFile, iso_epochs: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Attribute"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    for variable in file.variables() {
        for (name, values) in &variable.attributes {
            table.add_row(vec![
                name_cell(&variable.name),
                Cell::new(name),
                values_cell(values, iso_epochs),
            ]);
        }
    }
    table
}

/// Every record in file order.
pub fn record_table(catalog: &RecordCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Offset"),
        header_cell("Kind"),
        header_cell("Size"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for record in catalog.records() {
        table.add_row(vec![
            Cell::new(record.offset()),
            Cell::new(record.kind().short_name()).fg(Color::Blue),
            Cell::new(record.envelope.size),
            Cell::new(record_detail(&record.body)),
        ]);
    }
    table
}

/// One-line description of a record body.
pub fn record_detail(body: &RecordBody) -> String {
    match body {
        RecordBody::FileDescriptor(cdr) => format!(
            "v{}.{}.{} {} gdr={}",
            cdr.version, cdr.release, cdr.increment, cdr.encoding, cdr.gdr_offset
        ),
        RecordBody::GlobalDescriptor(gdr) => format!(
            "rVDR={} zVDR={} ADR={} UIR={} rVars={} zVars={} attrs={}",
            gdr.rvdr_head,
            gdr.zvdr_head,
            gdr.adr_head,
            gdr.uir_head,
            gdr.r_var_count,
            gdr.z_var_count,
            gdr.attribute_count
        ),
        RecordBody::AttributeDescriptor(adr) => {
            format!("{} ({}) next={}", adr.name, adr.scope, adr.next)
        }
        RecordBody::AttributeEntry(entry) => format!(
            "attr={} entry={} {} x{} next={}",
            entry.attribute_number,
            entry.number,
            entry.data_type.name(),
            entry.element_count,
            entry.next
        ),
        RecordBody::VariableDescriptor(vdr) => format!(
            "{} {} #{} vxr={} next={}",
            vdr.name,
            vdr.data_type.name(),
            vdr.number,
            vdr.vxr_head,
            vdr.next
        ),
        RecordBody::VariableIndex(vxr) => format!(
            "{}/{} used next={}",
            vxr.used_count, vxr.entry_count, vxr.next
        ),
        RecordBody::VariableValues(vvr) => {
            format!("{} bytes at {}", vvr.data_len, vvr.data_offset)
        }
        RecordBody::UnusedInternal(uir) => format!("next={} prev={}", uir.next, uir.prev),
        RecordBody::Opaque => String::new(),
        RecordBody::Malformed => "malformed".to_string(),
    }
}

/// Render a value, optionally with epochs as timestamps.
pub fn format_value(value: &Value, iso_epochs: bool) -> String {
    if iso_epochs {
        let timestamp = match value {
            Value::Epoch(milliseconds) => epoch_to_datetime(*milliseconds)
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()),
            Value::Epoch16 {
                seconds,
                picoseconds,
            } => epoch16_to_datetime(*seconds, *picoseconds)
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.9f").to_string()),
            _ => None,
        };
        if let Some(timestamp) = timestamp {
            return timestamp;
        }
    }
    value.to_string()
}

pub fn format_values(values: &[Value], iso_epochs: bool) -> String {
    values
        .iter()
        .map(|v| format_value(v, iso_epochs))
        .collect::<Vec<_>>()
        .join(", ")
}

fn dims_text(dims: &[i32]) -> String {
    let parts: Vec<String> = dims.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn subject_cell(issue: &Issue) -> Cell {
    match issue.subject() {
        Some(subject) => Cell::new(subject),
        None => dim_cell("-"),
    }
}

fn role_cell(is_data: bool, role: &str) -> Cell {
    if is_data {
        Cell::new(role).fg(Color::Green)
    } else {
        dim_cell(role)
    }
}

fn values_cell(values: &[Value], iso_epochs: bool) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(format_values(values, iso_epochs))
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn name_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
