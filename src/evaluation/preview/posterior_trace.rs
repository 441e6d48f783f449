use crate::core::FeatureId;
use crate::evaluation::PosteriorRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, EnumIter, Display, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TraceFormat {
    Csv,
    Tsv,
    Json,
}

impl TraceFormat {
    pub fn extension(self) -> &'static str {
        self.into()
    }
}

/// Ordered record of every posterior emitted during a run.
#[derive(Debug, Clone, Default)]
pub struct PosteriorTrace {
    entries: Vec<PosteriorRecord>,
}

impl PosteriorTrace {
    pub fn push(&mut self, record: PosteriorRecord) {
        self.entries.push(record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&PosteriorRecord> {
        self.entries.last()
    }

    pub fn records(&self) -> &[PosteriorRecord] {
        &self.entries
    }

    pub fn for_feature<'a>(
        &'a self,
        feature: &'a FeatureId,
    ) -> impl Iterator<Item = &'a PosteriorRecord> + 'a {
        self.entries.iter().filter(move |r| &r.feature == feature)
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TraceFormat) -> Result<(), Error> {
        match fmt {
            TraceFormat::Csv => self.export_with_delimiter(path, ','),
            TraceFormat::Tsv => self.export_with_delimiter(path, '\t'),
            TraceFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(
            w,
            "chunk_index{d}feature{d}posterior_mean{d}posterior_variance{d}likelihood_variance{d}used_prior_fallback{d}cumulative_true_mean",
            d = delimiter
        )?;
        for r in &self.entries {
            writeln!(
                w,
                "{}{d}{}{d}{:.12}{d}{:.12}{d}{:.12}{d}{}{d}{:.12}",
                r.chunk_index,
                quote_if_needed(r.feature.as_str(), delimiter),
                r.posterior_mean,
                r.posterior_variance,
                r.likelihood_variance,
                r.used_prior_fallback,
                r.cumulative_true_mean,
                d = delimiter
            )?;
        }
        w.flush()
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &self.entries)?;
        writeln!(w)?;
        w.flush()
    }
}

fn quote_if_needed(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    fn record(chunk: u64, feature: &str, mean: f64, var: f64, fallback: bool) -> PosteriorRecord {
        PosteriorRecord {
            chunk_index: chunk,
            feature: FeatureId::from(feature),
            posterior_mean: mean,
            posterior_variance: var,
            likelihood_variance: 2.0,
            used_prior_fallback: fallback,
            cumulative_true_mean: 1.5,
        }
    }

    fn two_rows() -> PosteriorTrace {
        let mut t = PosteriorTrace::default();
        t.push(record(2, "age", 1.0, 0.5, false));
        t.push(record(2, "height, cm", 0.25, 0.125, true));
        t
    }

    #[test]
    fn default_is_empty_and_latest_none() {
        let t = PosteriorTrace::default();
        assert!(t.is_empty());
        assert!(t.latest().is_none());
    }

    #[test]
    fn for_feature_filters_in_order() {
        let mut t = two_rows();
        t.push(record(3, "age", 2.0, 0.25, false));
        let age = FeatureId::from("age");
        let chunks: Vec<u64> = t.for_feature(&age).map(|r| r.chunk_index).collect();
        assert_eq!(chunks, vec![2, 3]);
        assert_eq!(t.latest().unwrap().chunk_index, 3);
    }

    #[test]
    fn export_csv_quotes_feature_with_delimiter() {
        let tf = NamedTempFile::new().unwrap();
        two_rows().export(tf.path(), TraceFormat::Csv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
chunk_index,feature,posterior_mean,posterior_variance,likelihood_variance,used_prior_fallback,cumulative_true_mean
2,age,1.000000000000,0.500000000000,2.000000000000,false,1.500000000000
2,\"height, cm\",0.250000000000,0.125000000000,2.000000000000,true,1.500000000000
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_tsv_leaves_comma_unquoted() {
        let tf = NamedTempFile::new().unwrap();
        two_rows().export(tf.path(), TraceFormat::Tsv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let second = got.lines().nth(2).unwrap();
        assert!(second.starts_with("2\theight, cm\t0.250000000000"));
    }

    #[test]
    fn export_json_is_parseable() {
        let tf = NamedTempFile::new().unwrap();
        two_rows().export(tf.path(), TraceFormat::Json).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let parsed: Vec<PosteriorRecord> = serde_json::from_str(&got).unwrap();
        assert_eq!(parsed, two_rows().records());
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!(TraceFormat::from_str("CSV").unwrap(), TraceFormat::Csv);
        assert_eq!(TraceFormat::from_str("json").unwrap(), TraceFormat::Json);
        assert!(TraceFormat::from_str("xml").is_err());
        assert_eq!(TraceFormat::Tsv.extension(), "tsv");
    }
}
