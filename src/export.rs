use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::{HeaderEntry, WellLog};
use crate::interp::curves::DerivedCurves;
use crate::interp::summary::IntervalSummary;

/// Write the curve table augmented with the derived VCL and PHIE columns.
///
/// Null samples become empty cells, the same convention the CSV loader reads
/// back.
pub fn write_curve_table<W: Write>(out: W, log: &WellLog, derived: &DerivedCurves) -> Result<()> {
    let table = &log.table;
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["DEPTH".to_string()];
    header.extend(table.columns().iter().cloned());
    header.push("VCL".to_string());
    header.push("PHIE".to_string());
    writer.write_record(&header).context("writing CSV header")?;

    for (i, depth) in table.depths().iter().enumerate() {
        let mut row = vec![format!("{depth}")];
        for name in table.columns() {
            // columns() names always resolve
            row.push(cell(table.curve(name).unwrap()[i]));
        }
        row.push(cell(derived.vcl[i]));
        row.push(cell(derived.phie[i]));
        writer
            .write_record(&row)
            .with_context(|| format!("writing CSV row {i}"))?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Write the LAS header entries as a separate metadata table.
pub fn write_header<W: Write>(out: W, header: &[HeaderEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["MNEMONIC", "UNIT", "VALUE", "DESCRIPTION"])
        .context("writing header CSV")?;
    for entry in header {
        writer
            .write_record([&entry.mnemonic, &entry.unit, &entry.value, &entry.description])
            .with_context(|| format!("writing header entry {}", entry.mnemonic))?;
    }
    writer.flush().context("flushing header CSV")?;
    Ok(())
}

/// Write the interval summary as pretty-printed JSON.
pub fn write_summary<W: Write>(mut out: W, summary: &IntervalSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, summary).context("serializing summary")?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Export all interpretation artifacts next to the chosen curve-table path:
/// `<stem>.csv`, `<stem>_header.csv`, `<stem>_summary.json`.
pub fn export_all(
    curve_path: &Path,
    log: &WellLog,
    derived: &DerivedCurves,
    summary: &IntervalSummary,
) -> Result<()> {
    let file = std::fs::File::create(curve_path)
        .with_context(|| format!("creating {}", curve_path.display()))?;
    write_curve_table(file, log, derived)?;

    let header_path = sibling(curve_path, "_header.csv");
    let file = std::fs::File::create(&header_path)
        .with_context(|| format!("creating {}", header_path.display()))?;
    write_header(file, &log.header)?;

    let summary_path = sibling(curve_path, "_summary.json");
    let file = std::fs::File::create(&summary_path)
        .with_context(|| format!("creating {}", summary_path.display()))?;
    write_summary(file, summary)?;

    Ok(())
}

fn cell(v: Option<f64>) -> String {
    v.map(|v| format!("{v}")).unwrap_or_default()
}

fn sibling(path: &Path, suffix: &str) -> std::path::PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    path.with_file_name(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CurveTable;

    fn fixture() -> (WellLog, DerivedCurves) {
        let table = CurveTable::new(
            vec![100.0, 101.0],
            vec![
                ("GR".to_string(), vec![Some(20.0), None]),
                ("NPHI".to_string(), vec![Some(0.25), Some(0.3)]),
            ],
        )
        .unwrap();
        let log = WellLog {
            name: "COYOTE-1".to_string(),
            header: vec![HeaderEntry {
                mnemonic: "STRT".to_string(),
                unit: "M".to_string(),
                value: "100.0".to_string(),
                description: "START DEPTH".to_string(),
            }],
            table,
        };
        let derived = DerivedCurves {
            vcl: vec![Some(0.0), None],
            phie: vec![Some(0.25), None],
        };
        (log, derived)
    }

    #[test]
    fn curve_table_export_appends_derived_columns() {
        let (log, derived) = fixture();
        let mut out = Vec::new();
        write_curve_table(&mut out, &log, &derived).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("DEPTH,GR,NPHI,VCL,PHIE"));
        assert_eq!(lines.next(), Some("100,20,0.25,0,0.25"));
        // Nulls round-trip as empty cells.
        assert_eq!(lines.next(), Some("101,,0.3,,"));
    }

    #[test]
    fn header_export_is_a_separate_table() {
        let (log, _) = fixture();
        let mut out = Vec::new();
        write_header(&mut out, &log.header).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("MNEMONIC,UNIT,VALUE,DESCRIPTION"));
        assert!(text.contains("STRT,M,100.0,START DEPTH"));
    }

    #[test]
    fn summary_export_keeps_no_data_distinct_from_zero() {
        let summary = IntervalSummary {
            thickness: 0.0,
            net_sand: 0.0,
            net_to_gross: 0.0,
            mean_vcl: None,
            mean_phie: Some(0.0),
        };
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"mean_vcl\": null"));
        assert!(text.contains("\"mean_phie\": 0.0"));
    }
}
