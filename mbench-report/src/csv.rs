//! CSV Output

use crate::ReportError;
use crate::report::Report;

const HEADER: [&str; 12] = [
    "name",
    "primitive",
    "status",
    "slots",
    "samples",
    "rejected",
    "min",
    "median",
    "mean",
    "max",
    "outlier_slots",
    "failure",
];

/// Generate a CSV report, one row per benchmark in report order.
///
/// Timing columns are empty for entries that never printed.
pub fn generate_csv_report(report: &Report) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    {
        let mut wtr = ::csv::WriterBuilder::new().from_writer(&mut buffer);
        wtr.write_record(HEADER)?;

        for result in &report.results {
            let mut record = vec![
                result.name.clone(),
                result.primitive.clone().unwrap_or_default(),
                result.status.as_str().to_string(),
            ];
            match &result.metrics {
                Some(m) => record.extend([
                    m.slots.to_string(),
                    m.samples.to_string(),
                    m.rejected.to_string(),
                    format!("{:.1}", m.min),
                    format!("{:.1}", m.median),
                    format!("{:.1}", m.mean),
                    format!("{:.1}", m.max),
                    m.outlier_slots.to_string(),
                ]),
                None => record.extend(std::iter::repeat_n(String::new(), 8)),
            }
            record.push(
                result
                    .failure
                    .as_ref()
                    .map(|f| format!("{}: {}", f.kind, f.message))
                    .unwrap_or_default(),
            );
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
    }
    Ok(String::from_utf8(buffer)?)
}
