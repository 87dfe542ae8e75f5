//! Filename classification for archive entries.
//!
//! The download service has used three naming conventions over time.
//! Same-day files are recognised first and skipped; full-history and
//! year-to-date files are imported; anything else is an error.

use crate::constants::{FULL_HISTORY_PATTERN, TODAY_PATTERN, YEAR_TO_DATE_PATTERN};
use crate::error::{ImportError, Result};
use crate::models::{Category, Disposition, FileKind, ImportTarget};
use regex::{Captures, Regex};
use tracing::trace;

/// Decides the [`Disposition`] of an archive entry from its path
pub struct FilenameClassifier {
    today: Regex,
    full_history: Regex,
    year_to_date: Regex,
}

impl FilenameClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            today: Regex::new(TODAY_PATTERN)?,
            full_history: Regex::new(FULL_HISTORY_PATTERN)?,
            year_to_date: Regex::new(YEAR_TO_DATE_PATTERN)?,
        })
    }

    /// Classify one entry path
    pub fn classify(&self, entry: &str) -> Result<Disposition> {
        if self.today.is_match(entry) {
            trace!("Skipping same-day file {}", entry);
            return Ok(Disposition::Skip);
        }

        let (caps, kind) = if let Some(caps) = self.full_history.captures(entry) {
            (caps, FileKind::FullHistory)
        } else if let Some(caps) = self.year_to_date.captures(entry) {
            (caps, FileKind::YearToDate)
        } else {
            return Err(ImportError::UnrecognizedFilename {
                entry: entry.to_string(),
            });
        };

        Ok(Disposition::Import(target_from(&caps, kind)?))
    }
}

fn target_from(caps: &Captures<'_>, kind: FileKind) -> Result<ImportTarget> {
    let token = caps.name("type").map_or("", |m| m.as_str());
    let station_id = caps.name("station").map_or("", |m| m.as_str());

    Ok(ImportTarget {
        category: Category::from_token(token)?,
        station_id: station_id.to_string(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(entry: &str) -> Result<Disposition> {
        FilenameClassifier::new().unwrap().classify(entry)
    }

    fn import_target(entry: &str) -> ImportTarget {
        match classify(entry).unwrap() {
            Disposition::Import(target) => target,
            Disposition::Skip => panic!("{} should be imported", entry),
        }
    }

    #[test]
    fn test_full_history_file() {
        let target = import_target("grundwasser-gwo/100_beginn_bis_01.01.2020_x.csv");
        assert_eq!(target.category, Category::Water);
        assert_eq!(target.station_id, "100");
        assert_eq!(target.kind, FileKind::FullHistory);

        let target = import_target("meteo-n/2345_beginn_bis_17.03.2024_niederschlag.csv");
        assert_eq!(target.category, Category::Rain);
        assert_eq!(target.station_id, "2345");
    }

    #[test]
    fn test_year_to_date_file() {
        let target = import_target("grundwasser-gwo/100_01.01.2024_17.03.2024_grundwasserstand.csv");
        assert_eq!(target.category, Category::Water);
        assert_eq!(target.station_id, "100");
        assert_eq!(target.kind, FileKind::YearToDate);

        let target = import_target("meteo-n/99_01.01.2024_17.03.2024_n.csv");
        assert_eq!(target.category, Category::Rain);
        assert_eq!(target.station_id, "99");
    }

    #[test]
    fn test_today_file_is_skipped() {
        assert_eq!(
            classify("grundwasser-gwo/100_31.12.2099_Xrest.csv").unwrap(),
            Disposition::Skip
        );
        assert_eq!(
            classify("meteo-n/100_17.03.2024_tageswerte.csv").unwrap(),
            Disposition::Skip
        );
    }

    #[test]
    fn test_today_pattern_does_not_shadow_importable_files() {
        let classifier = FilenameClassifier::new().unwrap();
        for entry in [
            "grundwasser-gwo/100_beginn_bis_01.01.2020_x.csv",
            "grundwasser-gwo/100_01.01.2020_31.12.2020_x.csv",
            "meteo-n/5_beginn_bis_31.12.1999_abc.csv",
            "meteo-n/5_01.01.1999_31.12.1999_abc.csv",
        ] {
            assert!(!classifier.today.is_match(entry), "{}", entry);
            assert!(matches!(
                classifier.classify(entry).unwrap(),
                Disposition::Import(_)
            ));
        }
    }

    #[test]
    fn test_unrecognized_filenames() {
        for entry in [
            "readme.txt",
            "abfluss/100_beginn_bis_01.01.2020_x.csv",
            "grundwasser-gwo/_beginn_bis_01.01.2020_x.csv",
            "grundwasser-gwo/100_beginn_bis_2020_x.csv",
            "grundwasser-gwo/",
        ] {
            assert!(
                matches!(
                    classify(entry),
                    Err(ImportError::UnrecognizedFilename { .. })
                ),
                "{}",
                entry
            );
        }
    }
}
