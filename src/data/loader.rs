use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{CurveTable, HeaderEntry, WellLog};

/// LAS null sentinel used when the `~Well` section declares none.
const DEFAULT_NULL: f64 = -999.25;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a well log from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.las` – Log ASCII Standard 2.0, unwrapped (recommended)
/// * `.csv` – header row with curve names, first column is depth
pub fn load_file(path: &Path) -> Result<WellLog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN WELL");

    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    match ext.as_str() {
        "las" => parse_las(stem, &decode(raw)),
        "csv" => parse_csv(stem, decode(raw).as_bytes()),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Decode raw bytes as UTF-8, falling back to Latin-1.
///
/// Vendor LAS files are frequently Latin-1; every byte is a valid Latin-1
/// code point, so the fallback cannot fail.
fn decode(raw: Vec<u8>) -> String {
    match String::from_utf8(raw) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

// ---------------------------------------------------------------------------
// LAS 2.0 parser
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Version,
    Well,
    Curves,
    Parameters,
    Other,
    Ascii,
}

/// Parse the text of an unwrapped LAS 2.0 file.
///
/// Section lines start with `~`; `#` lines are comments.  Header lines follow
/// the `MNEM.UNIT  VALUE : DESCRIPTION` layout.  The first curve of the
/// `~Curve` section is the depth index; data values equal to the declared
/// `NULL` sentinel become absent samples.
pub fn parse_las(fallback_name: &str, text: &str) -> Result<WellLog> {
    let mut section = Section::Other;
    let mut well_name: Option<String> = None;
    let mut null_value = DEFAULT_NULL;
    let mut header = Vec::new();
    let mut curve_names: Vec<String> = Vec::new();
    let mut depths: Vec<f64> = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('~') {
            section = match rest.chars().next().map(|c| c.to_ascii_uppercase()) {
                Some('V') => Section::Version,
                Some('W') => Section::Well,
                Some('C') => Section::Curves,
                Some('P') => Section::Parameters,
                Some('A') => {
                    if curve_names.len() < 2 {
                        bail!("LAS ~Curve section must declare a depth curve and at least one log curve");
                    }
                    columns = vec![Vec::new(); curve_names.len() - 1];
                    Section::Ascii
                }
                _ => Section::Other,
            };
            continue;
        }

        match section {
            Section::Version => {
                let entry = parse_header_line(line)
                    .with_context(|| format!("LAS line {}: malformed header entry", line_no + 1))?;
                if entry.mnemonic.eq_ignore_ascii_case("WRAP")
                    && entry.value.to_ascii_uppercase().starts_with('Y')
                {
                    bail!("wrapped LAS files are not supported");
                }
            }
            Section::Well | Section::Parameters => {
                let entry = parse_header_line(line)
                    .with_context(|| format!("LAS line {}: malformed header entry", line_no + 1))?;
                if entry.mnemonic.eq_ignore_ascii_case("WELL") && !entry.value.is_empty() {
                    well_name = Some(entry.value.clone());
                }
                if entry.mnemonic.eq_ignore_ascii_case("NULL") {
                    if let Ok(v) = entry.value.parse::<f64>() {
                        null_value = v;
                    }
                }
                header.push(entry);
            }
            Section::Curves => {
                let entry = parse_header_line(line)
                    .with_context(|| format!("LAS line {}: malformed curve entry", line_no + 1))?;
                curve_names.push(entry.mnemonic.clone());
                header.push(entry);
            }
            Section::Ascii => {
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() != curve_names.len() {
                    bail!(
                        "LAS line {}: expected {} values, found {}",
                        line_no + 1,
                        curve_names.len(),
                        fields.len()
                    );
                }
                let mut row = fields.iter().enumerate().map(|(i, tok)| {
                    tok.parse::<f64>().with_context(|| {
                        format!("LAS line {}, column {}: '{tok}' is not a number", line_no + 1, i)
                    })
                });

                let depth = row.next().unwrap()?;
                if is_null(depth, null_value) {
                    bail!("LAS line {}: depth sample is the null sentinel", line_no + 1);
                }
                depths.push(depth);
                for column in columns.iter_mut() {
                    let v = row.next().unwrap()?;
                    column.push((!is_null(v, null_value)).then_some(v));
                }
            }
            Section::Other => {}
        }
    }

    if depths.is_empty() {
        bail!("LAS file contains no data rows");
    }

    let curves: Vec<(String, Vec<Option<f64>>)> = curve_names
        .iter()
        .skip(1)
        .cloned()
        .zip(columns)
        .collect();
    let table = CurveTable::new(depths, curves).context("building curve table")?;

    Ok(WellLog {
        name: well_name.unwrap_or_else(|| fallback_name.to_string()),
        header,
        table,
    })
}

fn is_null(v: f64, null_value: f64) -> bool {
    v.is_nan() || (v - null_value).abs() < 1e-6
}

/// Split a `MNEM.UNIT  VALUE : DESCRIPTION` line into its four parts.
///
/// The unit runs from the first `.` to the first whitespace; the description
/// starts at the *last* `:` so values may contain colons (e.g. timestamps).
fn parse_header_line(line: &str) -> Option<HeaderEntry> {
    let (mnemonic, rest) = line.split_once('.')?;
    let rest = rest.trim_end();
    let unit_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (unit, body) = rest.split_at(unit_end);

    let (value, description) = match body.rfind(':') {
        Some(pos) => (&body[..pos], &body[pos + 1..]),
        None => (body, ""),
    };

    Some(HeaderEntry {
        mnemonic: mnemonic.trim().to_string(),
        unit: unit.trim().to_string(),
        value: value.trim().to_string(),
        description: description.trim().to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// CSV layout: header row with curve names, first column is the depth index.
/// Empty cells (and the LAS null sentinel) are absent samples.
pub fn parse_csv(well_name: &str, bytes: &[u8]) -> Result<WellLog> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.len() < 2 {
        bail!("CSV must have a depth column and at least one curve column");
    }

    let mut depths = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len() - 1];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} cells, found {}",
                headers.len(),
                record.len()
            );
        }

        let depth: f64 = record[0]
            .trim()
            .parse()
            .with_context(|| format!("CSV row {row_no}: bad depth '{}'", &record[0]))?;
        depths.push(depth);

        for (col, cell) in columns.iter_mut().zip(record.iter().skip(1)) {
            let cell = cell.trim();
            if cell.is_empty() {
                col.push(None);
                continue;
            }
            let v: f64 = cell
                .parse()
                .with_context(|| format!("CSV row {row_no}: '{cell}' is not a number"))?;
            col.push((!is_null(v, DEFAULT_NULL)).then_some(v));
        }
    }

    if depths.is_empty() {
        bail!("CSV file contains no data rows");
    }

    let curves: Vec<(String, Vec<Option<f64>>)> =
        headers.iter().skip(1).cloned().zip(columns).collect();
    let table = CurveTable::new(depths, curves).context("building curve table")?;

    Ok(WellLog {
        name: well_name.to_string(),
        header: Vec::new(),
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LAS: &str = "\
~Version
VERS.   2.0 : CWLS LAS 2.0
WRAP.   NO  : One line per depth step
~Well
STRT.M  1500.0000 : START DEPTH
STOP.M  1501.5000 : STOP DEPTH
STEP.M  0.5000    : STEP
NULL.   -999.25   : NULL VALUE
WELL.   COYOTE-1  : WELL NAME
~Curve
DEPT.M   : Depth
GR  .GAPI : Gamma Ray
RT  .OHMM : Deep Resistivity
NPHI.V/V  : Neutron Porosity
~Ascii
1500.0   25.1    12.0   0.21
1500.5   88.7  -999.25  0.27
1501.0  -999.25   0.0   0.24
1501.5   42.3   150.0  -999.25
";

    #[test]
    fn parses_las_sections_and_null_sentinel() {
        let log = parse_las("fallback", SAMPLE_LAS).unwrap();
        assert_eq!(log.name, "COYOTE-1");
        assert_eq!(log.table.depths(), &[1500.0, 1500.5, 1501.0, 1501.5]);
        assert_eq!(log.table.columns(), &["GR", "RT", "NPHI"]);

        let gr = log.table.curve("GR").unwrap();
        assert_eq!(gr[1], Some(88.7));
        assert_eq!(gr[2], None);

        let rt = log.table.curve("RT").unwrap();
        assert_eq!(rt[1], None);
        assert_eq!(rt[2], Some(0.0));

        let nphi = log.table.curve("NPHI").unwrap();
        assert_eq!(nphi[3], None);
    }

    #[test]
    fn keeps_header_entries_with_units() {
        let log = parse_las("fallback", SAMPLE_LAS).unwrap();
        let strt = log
            .header
            .iter()
            .find(|e| e.mnemonic == "STRT")
            .expect("STRT entry");
        assert_eq!(strt.unit, "M");
        assert_eq!(strt.value, "1500.0000");
        assert_eq!(strt.description, "START DEPTH");
    }

    #[test]
    fn falls_back_to_file_stem_when_well_is_unnamed() {
        let text = SAMPLE_LAS.replace("WELL.   COYOTE-1  : WELL NAME\n", "");
        let log = parse_las("well_42", &text).unwrap();
        assert_eq!(log.name, "well_42");
    }

    #[test]
    fn rejects_wrapped_files() {
        let text = SAMPLE_LAS.replace("WRAP.   NO", "WRAP.   YES");
        let err = parse_las("x", &text).unwrap_err();
        assert!(err.to_string().contains("wrapped"));
    }

    #[test]
    fn rejects_short_data_rows() {
        let text = format!("{SAMPLE_LAS}1502.0  10.0\n");
        assert!(parse_las("x", &text).is_err());
    }

    #[test]
    fn header_value_may_contain_colons() {
        let entry = parse_header_line("DATE.   2024-03-01 10:30:00 : LOG DATE").unwrap();
        assert_eq!(entry.value, "2024-03-01 10:30:00");
        assert_eq!(entry.description, "LOG DATE");
    }

    #[test]
    fn latin1_fallback_decodes_every_byte() {
        let mut raw = b"WELL.  POZO N".to_vec();
        raw.push(0xBA); // masculine ordinal, Latin-1
        raw.extend_from_slice(b" 1 : NOMBRE");
        let text = decode(raw);
        assert!(text.contains('\u{00BA}'));
    }

    #[test]
    fn parses_csv_with_empty_cells() {
        let bytes = b"DEPTH,GR,RT\n100.0,25.0,1.5\n100.5,,2.0\n101.0,90.0,\n";
        let log = parse_csv("pad-3", bytes).unwrap();
        assert_eq!(log.name, "pad-3");
        assert_eq!(log.table.curve("GR").unwrap()[1], None);
        assert_eq!(log.table.curve("RT").unwrap()[2], None);
    }
}
