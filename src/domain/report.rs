//! Plain-text assessment report.

use chrono::NaiveDateTime;

/// File name offered for the exported report.
pub const REPORT_FILE_NAME: &str = "obesity_report.txt";

/// MIME type of the exported report.
pub const REPORT_MIME: &str = "text/plain";

pub const INPUTS_HEADING: &str = "=== Inputs ===";
pub const RESULTS_HEADING: &str = "=== Results ===";
pub const RECOMMENDATIONS_HEADING: &str = "=== Recommendations ===";

/// Ordered key/value lines of one report section.
pub type ReportEntries = Vec<(String, String)>;

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Serialize an assessment into the downloadable text report.
///
/// One line per entry; recommendations are numbered from 1.
#[must_use]
pub fn format_report(
    name: Option<&str>,
    inputs: &[(String, String)],
    results: &[(String, String)],
    recommendations: &[String],
    generated_at: NaiveDateTime,
) -> String {
    let mut lines = Vec::new();

    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        lines.push(format!("Name: {}", single_line(name)));
    }
    lines.push(format!(
        "Obesity assessment report, generated at {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    lines.push(INPUTS_HEADING.to_string());
    for (key, value) in inputs {
        lines.push(format!("{}: {}", single_line(key), single_line(value)));
    }

    lines.push(String::new());
    lines.push(RESULTS_HEADING.to_string());
    for (key, value) in results {
        lines.push(format!("{}: {}", single_line(key), single_line(value)));
    }

    lines.push(String::new());
    lines.push(RECOMMENDATIONS_HEADING.to_string());
    for (i, rec) in recommendations.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, single_line(rec)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 26, 53))
            .expect("valid timestamp")
    }

    fn entries(pairs: &[(&str, &str)]) -> ReportEntries {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Parse a report back into its sections.
    fn parse(report: &str) -> (ReportEntries, ReportEntries, Vec<String>) {
        #[derive(PartialEq)]
        enum Section {
            Header,
            Inputs,
            Results,
            Recommendations,
        }

        let mut section = Section::Header;
        let (mut inputs, mut results, mut recs) = (Vec::new(), Vec::new(), Vec::new());

        for line in report.lines() {
            match line {
                INPUTS_HEADING => section = Section::Inputs,
                RESULTS_HEADING => section = Section::Results,
                RECOMMENDATIONS_HEADING => section = Section::Recommendations,
                "" => {}
                _ => match section {
                    Section::Header => {}
                    Section::Inputs | Section::Results => {
                        let (k, v) = line.split_once(": ").expect("key: value line");
                        let target = if section == Section::Inputs {
                            &mut inputs
                        } else {
                            &mut results
                        };
                        target.push((k.to_string(), v.to_string()));
                    }
                    Section::Recommendations => {
                        let (n, text) = line.split_once(". ").expect("numbered line");
                        assert_eq!(n.parse::<usize>().ok(), Some(recs.len() + 1));
                        recs.push(text.to_string());
                    }
                },
            }
        }

        (inputs, results, recs)
    }

    #[test]
    fn test_layout() {
        let report = format_report(
            Some("Sara"),
            &entries(&[("Weight (kg)", "70.0")]),
            &entries(&[("BMI", "24.22")]),
            &["Eat well.".to_string()],
            timestamp(),
        );

        let expected = "Name: Sara\n\
            Obesity assessment report, generated at 2026-03-14 09:26:53\n\
            === Inputs ===\n\
            Weight (kg): 70.0\n\
            \n\
            === Results ===\n\
            BMI: 24.22\n\
            \n\
            === Recommendations ===\n\
            1. Eat well.";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_blank_name_is_omitted() {
        let report = format_report(Some("   "), &[], &[], &[], timestamp());
        assert!(report.starts_with("Obesity assessment report"));

        let report = format_report(None, &[], &[], &[], timestamp());
        assert!(!report.contains("Name:"));
    }

    #[test]
    fn test_round_trip() {
        let inputs = entries(&[
            ("Weight (kg)", "80.0"),
            ("Comorbidities", "hypertension, gout"),
            ("Weight-affecting medications", "none"),
        ]);
        let results = entries(&[
            ("BMI", "29.38"),
            ("Waist-to-hip ratio", "undefined"),
            ("Waist threshold (personal)", "90 cm"),
        ]);
        let recs = vec![
            "Status: overweight. Advice: counselling.".to_string(),
            "Waist-to-height ratio = 0.58 (>0.5): central obesity.".to_string(),
            "Important: guidance only.".to_string(),
        ];

        let report = format_report(Some("Reza"), &inputs, &results, &recs, timestamp());
        let (parsed_inputs, parsed_results, parsed_recs) = parse(&report);

        assert_eq!(parsed_inputs, inputs);
        assert_eq!(parsed_results, results);
        assert_eq!(parsed_recs, recs);
    }

    #[test]
    fn test_values_stay_on_one_line() {
        let report = format_report(
            Some("A\nB"),
            &entries(&[("Other", "x\ny")]),
            &[],
            &[],
            timestamp(),
        );
        assert!(report.contains("Name: A B"));
        assert!(report.contains("Other: x y"));
    }
}
