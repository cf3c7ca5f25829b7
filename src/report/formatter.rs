use super::{LineageRecord, LineageReport};

/// Formats lineage reports into human-readable strings.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format a whole report, one block per record.
    pub fn format_report(report: &LineageReport) -> String {
        if report.is_empty() {
            return "(no lineage records)".to_string();
        }
        let mut out = String::new();
        for record in &report.records {
            out.push_str(&Self::format_record(record));
            out.push('\n');
        }
        out
    }

    /// Format a single record as a headline plus its indented history.
    ///
    /// ```text
    /// orders_sink.full_name <- reader_a.name
    ///   1. Inferred via Reverse Mapping Analysis
    ///   2. Mapped to full_name in Mapper B
    /// ```
    pub fn format_record(record: &LineageRecord) -> String {
        let mut out = format!(
            "{}.{} <- {}",
            record.destination_node,
            record.target_field,
            Self::format_origin(record)
        );
        for (index, step) in record.history.iter().enumerate() {
            out.push_str(&format!("\n  {}. {}", index + 1, step));
        }
        out
    }

    fn format_origin(record: &LineageRecord) -> String {
        match (&record.source_node, &record.source_field) {
            (Some(node), Some(field)) => format!("{}.{}", node, field),
            (Some(node), None) => node.clone(),
            (None, Some(field)) => field.clone(),
            (None, None) => "(unknown origin)".to_string(),
        }
    }
}
