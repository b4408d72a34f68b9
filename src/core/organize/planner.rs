//! Deterministic target paths from timestamps.

use super::types::PlacementPlan;
use crate::core::timestamp::TimestampedFile;
use crate::error::ConfigError;
use chrono::{Datelike, Locale, NaiveDateTime};
use pure_rust_locales::locale_match;
use std::path::{Path, PathBuf};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Locale used for month folder names unless told otherwise
pub const DEFAULT_MONTH_LOCALE: &str = "en_US";

/// Parse a POSIX-style locale name such as `en_US` or `pl_PL`
pub fn parse_locale(name: &str) -> Result<Locale, ConfigError> {
    Locale::try_from(name).map_err(|_| ConfigError::UnknownLocale {
        name: name.to_string(),
    })
}

/// Maps timestamps to `{root}/{yyyy}/{yyyy}_{MM}{Month}/{yyyy-MM-dd_HH-mm-ss}[_N].ext`
#[derive(Debug, Clone)]
pub struct PlacementPlanner {
    output_root: PathBuf,
    locale: Locale,
}

impl PlacementPlanner {
    pub fn new(output_root: impl Into<PathBuf>, locale: Locale) -> Self {
        Self {
            output_root: output_root.into(),
            locale,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Plan for `file`; `counter` 0 is the plain name, N > 0 appends `_N`
    pub fn plan(&self, file: &TimestampedFile, counter: u32) -> PlacementPlan {
        let at = file.timestamp.at;
        PlacementPlan {
            target_directory: self.target_directory(at),
            target_file_name: Self::file_name(at, file.source.extension(), counter),
        }
    }

    pub fn target_directory(&self, at: NaiveDateTime) -> PathBuf {
        self.output_root
            .join(format!("{:04}", at.year()))
            .join(self.month_directory_name(at))
    }

    /// `2023_11November`
    pub fn month_directory_name(&self, at: NaiveDateTime) -> String {
        format!(
            "{:04}_{:02}{}",
            at.year(),
            at.month(),
            self.month_name(at)
        )
    }

    /// Standalone month name in the planner's locale, ASCII-folded and
    /// capitalized. Locales with a separate nominative table (`ALT_MON`,
    /// e.g. Polish `listopad` vs. `listopada`) use it.
    pub fn month_name(&self, at: NaiveDateTime) -> String {
        let months = locale_match!(self.locale => LC_TIME::ALT_MON)
            .unwrap_or(locale_match!(self.locale => LC_TIME::MON));
        let localized = months.get(at.month0() as usize).copied().unwrap_or_default();
        capitalize_first(&strip_diacritics(localized))
    }

    /// `2023-11-01_00-00-00`, `_N` for N > 0, then the original extension
    pub fn file_name(at: NaiveDateTime, extension: Option<&str>, counter: u32) -> String {
        let base = at.format("%Y-%m-%d_%H-%M-%S").to_string();
        let stem = if counter == 0 {
            base
        } else {
            format!("{}_{}", base, counter)
        };
        match extension {
            Some(ext) if !ext.is_empty() => format!("{}.{}", stem, ext),
            _ => stem,
        }
    }
}

/// Remove accents: decompose, drop combining marks, fold a few letters
/// that have no decomposition.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'ł' => 'l',
            'Ł' => 'L',
            'ø' => 'o',
            'Ø' => 'O',
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .collect()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn english() -> PlacementPlanner {
        PlacementPlanner::new("/out", parse_locale(DEFAULT_MONTH_LOCALE).unwrap())
    }

    #[test]
    fn month_directory_english() {
        let planner = english();
        assert_eq!(
            planner.target_directory(at(2023, 11, 1, 0, 0, 0)),
            PathBuf::from("/out/2023/2023_11November")
        );
    }

    #[test]
    fn month_directory_pads_month() {
        let planner = english();
        assert_eq!(
            planner.month_directory_name(at(2024, 1, 15, 12, 0, 0)),
            "2024_01January"
        );
    }

    #[test]
    fn localized_month_is_ascii_and_capitalized() {
        let planner = PlacementPlanner::new("/out", parse_locale("fr_FR").unwrap());
        let name = planner.month_name(at(2023, 2, 1, 0, 0, 0));

        assert!(name.is_ascii(), "{} should be ASCII", name);
        assert!(name.starts_with('F'), "{} should be capitalized", name);
    }

    #[test]
    fn polish_months_use_nominative_form() {
        let planner = PlacementPlanner::new("/out", parse_locale("pl_PL").unwrap());

        assert_eq!(planner.month_name(at(2023, 1, 1, 0, 0, 0)), "Styczen");
        assert_eq!(planner.month_name(at(2023, 3, 1, 0, 0, 0)), "Marzec");
        assert_eq!(
            planner.target_directory(at(2023, 11, 1, 0, 0, 0)),
            PathBuf::from("/out/2023/2023_11Listopad")
        );
    }

    #[test]
    fn file_name_formats() {
        let t = at(2023, 5, 1, 10, 30, 0);
        assert_eq!(
            PlacementPlanner::file_name(t, Some("jpg"), 0),
            "2023-05-01_10-30-00.jpg"
        );
        assert_eq!(
            PlacementPlanner::file_name(t, Some("JPG"), 2),
            "2023-05-01_10-30-00_2.JPG"
        );
        assert_eq!(
            PlacementPlanner::file_name(t, None, 1),
            "2023-05-01_10-30-00_1"
        );
    }

    #[test]
    fn strip_diacritics_folds_accents() {
        assert_eq!(strip_diacritics("février"), "fevrier");
        assert_eq!(strip_diacritics("août"), "aout");
        assert_eq!(strip_diacritics("październik"), "pazdziernik");
        assert_eq!(strip_diacritics("Łódź"), "Lodz");
        assert_eq!(strip_diacritics("March"), "March");
    }

    #[test]
    fn capitalize_only_first_letter() {
        assert_eq!(capitalize_first("listopad"), "Listopad");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn unknown_locale_is_config_error() {
        assert!(matches!(
            parse_locale("xx_NOWHERE"),
            Err(ConfigError::UnknownLocale { .. })
        ));
    }
}
