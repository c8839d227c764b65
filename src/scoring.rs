use tracing::info;

use crate::error::{LoaderError, Result};
use crate::record::Record;
use crate::wages::marker_digits;

/// Weights for growth, education, income, and availability, in that order.
const SCORE_WEIGHTS: [f64; 4] = [0.5, 0.5, 1.0, 1.0];

/// Reference ceilings the wage-derived sub-scores are measured against.
const MAX_INCOME: f64 = 130_000.0 / 4.0;
const MAX_OPENINGS: f64 = 11_000.0 / 4.0;

const PROSPECTS_FIELD: &str = "Prospects";
const EDUCATION_FIELD: &str = "EntryEduLevel";
const MEDIAN_WAGE_FIELD: &str = "MedianAnnWage";
const OPENINGS_FIELD: &str = "AnnualAvgOpenings";

/// Job-growth outlook mapped to 0..=4. Lenient: an unrecognized label
/// scores 0 rather than failing.
pub fn growth_score(raw: &str) -> i64 {
    match raw {
        "Very Favorable" => 4,
        "Favorable" => 3,
        "Unfavorable" => 2,
        "Very Unfavorable" => 1,
        "NA" => 3,
        _ => 0,
    }
}

/// Entry education level mapped to 0..=4, case-insensitive. Unlike
/// `growth_score` this is strict: an unrecognized level fails the run.
pub fn education_score(raw: &str) -> Result<i64> {
    match raw.to_lowercase().as_str() {
        "less than high school" => Ok(4),
        "high school diploma or equivalent" | "high school" => Ok(3),
        "postsecondary non-degree award" | "some college, no degree" => Ok(2),
        "associate's degree" => Ok(1),
        "bachelor's degree" | "master's degree" | "doctoral or professional degree" => Ok(0),
        _ => Err(LoaderError::InvalidInput {
            field: EDUCATION_FIELD.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Median annual wage scaled against the income ceiling. Accepts a plain
/// number or a `>`/`<`-marked one; anything else fails.
pub fn income_score(raw: &str) -> Result<f64> {
    let numeric = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .or_else(|| marker_digits(raw).and_then(|d| d.parse::<f64>().ok()));
    match numeric {
        Some(value) => Ok(value / MAX_INCOME),
        None => Err(LoaderError::InvalidInput {
            field: MEDIAN_WAGE_FIELD.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Annual average openings scaled against the openings ceiling. The wage
/// survey reports very small counts as the literal "Less than 10".
pub fn availability_score(raw: &str) -> Result<f64> {
    if raw == "Less than 10" {
        return Ok(10.0 / MAX_OPENINGS);
    }
    match raw.parse::<f64>().ok().filter(|v| v.is_finite()) {
        Some(value) => Ok(value / MAX_OPENINGS),
        None => Err(LoaderError::InvalidInput {
            field: OPENINGS_FIELD.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Grade label for a rescaled composite score. Thresholds are exclusive
/// lower bounds, checked highest first.
pub fn blue_econ_grade(total: f64) -> &'static str {
    if total > 3.0 {
        "Premium"
    } else if total > 1.5 {
        "Great"
    } else if total > 0.4 {
        "Good"
    } else {
        "Not Recommended"
    }
}

/// Two-pass scoring over the merged dataset.
///
/// Pass 1 computes each sub-score only when its source field exists (a
/// merge-conflicted field is read by its first value) and appends it to the
/// record, then combines the present sub-scores into a weighted composite.
/// Pass 2 rescales every composite so the dataset maximum maps to 5.0 and
/// assigns the grade from the rescaled value. An empty dataset, or one where
/// no record scores above zero, cannot be rescaled and fails.
pub fn score_dataset(records: &mut [Record]) -> Result<()> {
    if records.is_empty() {
        return Err(LoaderError::DegenerateDataset(
            "no records to score".to_string(),
        ));
    }

    let mut raw_scores = Vec::with_capacity(records.len());
    for record in records.iter_mut() {
        let mut subs: [Option<f64>; 4] = [None; 4];

        if let Some(raw) = record.first_value(PROSPECTS_FIELD).map(str::to_string) {
            let score = growth_score(&raw);
            record.set_scalar("GrowthScore", score.to_string());
            subs[0] = Some(score as f64);
        }
        if let Some(raw) = record.first_value(EDUCATION_FIELD).map(str::to_string) {
            let score = education_score(&raw)?;
            record.set_scalar("EducationScore", score.to_string());
            subs[1] = Some(score as f64);
        }
        if let Some(raw) = record.first_value(MEDIAN_WAGE_FIELD).map(str::to_string) {
            let score = income_score(&raw)?;
            record.set_scalar("IncomeScore", score.to_string());
            subs[2] = Some(score);
        }
        if let Some(raw) = record.first_value(OPENINGS_FIELD).map(str::to_string) {
            let score = availability_score(&raw)?;
            record.set_scalar("AvailabilityScore", score.to_string());
            subs[3] = Some(score);
        }

        // absent sub-scores are omitted from the sum, not zero-weighted
        let composite: f64 = SCORE_WEIGHTS
            .iter()
            .zip(subs.iter())
            .filter_map(|(weight, sub)| sub.map(|s| weight * s))
            .sum();
        raw_scores.push(composite);
    }

    let max_score = raw_scores.iter().cloned().fold(f64::MIN, f64::max);
    if max_score <= 0.0 {
        return Err(LoaderError::DegenerateDataset(format!(
            "maximum composite score is {}, cannot rescale",
            max_score
        )));
    }
    info!(
        "rescaling {} records against max composite score {}",
        records.len(),
        max_score
    );

    for (record, raw) in records.iter_mut().zip(raw_scores) {
        // divide first: the ratio is exactly 1.0 for the maximum record, so
        // the top of the range lands on 5.0 with no rounding residue
        let rescaled = raw / max_score * 5.0;
        record.set_scalar("BlueEconScore", rescaled.to_string());
        record.set_scalar("BlueEconGrade", blue_econ_grade(rescaled));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_growth_score_mapping() {
        assert_eq!(growth_score("Very Favorable"), 4);
        assert_eq!(growth_score("Favorable"), 3);
        assert_eq!(growth_score("Unfavorable"), 2);
        assert_eq!(growth_score("Very Unfavorable"), 1);
        assert_eq!(growth_score("NA"), 3);
        assert_eq!(growth_score("Somewhat Favorable"), 0);
        assert_eq!(growth_score(""), 0);
    }

    #[test]
    fn test_education_score_mapping_case_insensitive() {
        assert_eq!(education_score("Less than High School").unwrap(), 4);
        assert_eq!(education_score("High school diploma or equivalent").unwrap(), 3);
        assert_eq!(education_score("high school").unwrap(), 3);
        assert_eq!(education_score("Postsecondary non-degree award").unwrap(), 2);
        assert_eq!(education_score("Some college, no degree").unwrap(), 2);
        assert_eq!(education_score("Associate's degree").unwrap(), 1);
        assert_eq!(education_score("Bachelor's degree").unwrap(), 0);
        assert_eq!(education_score("Master's degree").unwrap(), 0);
        assert_eq!(education_score("Doctoral or professional degree").unwrap(), 0);
    }

    #[test]
    fn test_education_score_is_strict() {
        let err = education_score("Trade apprenticeship").unwrap_err();
        assert!(matches!(err, LoaderError::InvalidInput { .. }));
    }

    #[test]
    fn test_income_score_values() {
        assert_close(income_score("75000").unwrap(), 75000.0 / 32500.0);
        assert_close(income_score(">50000").unwrap(), 50000.0 / 32500.0);
        assert!(matches!(
            income_score("N/A"),
            Err(LoaderError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_non_finite_numerics_are_rejected() {
        for raw in ["inf", "-inf", "NaN", "+1e999"] {
            assert!(matches!(
                income_score(raw),
                Err(LoaderError::InvalidInput { .. })
            ));
            assert!(matches!(
                availability_score(raw),
                Err(LoaderError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_availability_score_values() {
        assert_close(availability_score("Less than 10").unwrap(), 10.0 / 2750.0);
        assert_close(availability_score("5500").unwrap(), 2.0);
        assert!(matches!(
            availability_score("unknown"),
            Err(LoaderError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(blue_econ_grade(5.0), "Premium");
        assert_eq!(blue_econ_grade(3.01), "Premium");
        assert_eq!(blue_econ_grade(3.0), "Great");
        assert_eq!(blue_econ_grade(1.51), "Great");
        assert_eq!(blue_econ_grade(1.5), "Good");
        assert_eq!(blue_econ_grade(0.41), "Good");
        assert_eq!(blue_econ_grade(0.4), "Not Recommended");
        assert_eq!(blue_econ_grade(0.0), "Not Recommended");
    }

    fn openings_record(openings: &str) -> Record {
        let mut record = Record::new();
        record.set_scalar("SocCode", "11-1011");
        record.set_scalar("AnnualAvgOpenings", openings);
        record
    }

    #[test]
    fn test_rescale_maps_max_to_five() {
        // availability-only records with raw composites 1.0, 2.0, 4.0
        let mut records = vec![
            openings_record("2750"),
            openings_record("5500"),
            openings_record("11000"),
        ];
        score_dataset(&mut records).unwrap();

        assert_eq!(records[0].first_value("BlueEconScore"), Some("1.25"));
        assert_eq!(records[1].first_value("BlueEconScore"), Some("2.5"));
        assert_eq!(records[2].first_value("BlueEconScore"), Some("5"));
        assert_eq!(records[0].first_value("BlueEconGrade"), Some("Good"));
        assert_eq!(records[1].first_value("BlueEconGrade"), Some("Great"));
        assert_eq!(records[2].first_value("BlueEconGrade"), Some("Premium"));
    }

    #[test]
    fn test_max_record_rescales_to_exactly_five() {
        // a maximum the division cannot represent cleanly; the top record
        // must still come out as exactly 5
        let mut records = vec![openings_record("1234"), openings_record("2468")];
        score_dataset(&mut records).unwrap();
        assert_eq!(records[1].first_value("BlueEconScore"), Some("5"));
        assert_eq!(records[0].first_value("BlueEconScore"), Some("2.5"));
    }

    #[test]
    fn test_missing_source_fields_skip_sub_scores() {
        let mut record = Record::new();
        record.set_scalar("SocCode", "11-1011");
        record.set_scalar("Prospects", "Very Favorable");
        let mut records = vec![record];
        score_dataset(&mut records).unwrap();

        assert_eq!(records[0].first_value("GrowthScore"), Some("4"));
        assert!(!records[0].contains("EducationScore"));
        assert!(!records[0].contains("IncomeScore"));
        assert!(!records[0].contains("AvailabilityScore"));
        // lone growth sub-score, weight 0.5, rescaled to the ceiling
        assert_eq!(records[0].first_value("BlueEconScore"), Some("5"));
    }

    #[test]
    fn test_composite_weights() {
        let mut record = Record::new();
        record.set_scalar("Prospects", "Very Favorable"); // 4 * 0.5
        record.set_scalar("EntryEduLevel", "Less than High School"); // 4 * 0.5
        record.set_scalar("MedianAnnWage", "32500"); // 1.0 * 1
        record.set_scalar("AnnualAvgOpenings", "2750"); // 1.0 * 1

        let mut records = vec![record];
        score_dataset(&mut records).unwrap();
        // composite 6.0 is also the max, so the rescaled value is 5
        assert_eq!(records[0].first_value("BlueEconScore"), Some("5"));
        assert_eq!(records[0].first_value("BlueEconGrade"), Some("Premium"));
    }

    #[test]
    fn test_empty_dataset_is_degenerate() {
        let mut records: Vec<Record> = Vec::new();
        let err = score_dataset(&mut records).unwrap_err();
        assert!(matches!(err, LoaderError::DegenerateDataset(_)));
    }

    #[test]
    fn test_zero_max_score_is_degenerate() {
        let mut record = Record::new();
        record.set_scalar("Prospects", "No Data Published"); // unmapped, scores 0
        let mut records = vec![record];
        let err = score_dataset(&mut records).unwrap_err();
        assert!(matches!(err, LoaderError::DegenerateDataset(_)));
    }

    #[test]
    fn test_invalid_wage_aborts_scoring() {
        let mut record = Record::new();
        record.set_scalar("MedianAnnWage", "confidential");
        let mut records = vec![record];
        let err = score_dataset(&mut records).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidInput { .. }));
    }
}
