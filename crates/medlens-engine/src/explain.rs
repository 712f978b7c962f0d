//! Explanation templates.
//!
//! Output uses lightweight markup for the rendering layer: `**bold**`,
//! bullet lines, pipe-delimited table rows and `###` headers.

use medlens_types::{
    ExplanationMode, ExplanationPair, ExtractionResult, Language, Measurement, MeasurementStatus,
};

use crate::types::EngineConfig;

const PATIENT_QUESTIONS: [&str; 3] = [
    "What do these results mean?",
    "Do I need follow-up tests?",
    "Should I make lifestyle changes?",
];

/// Generates the short and long explanation for an extraction result.
///
/// Both texts begin with the language's disclaimer and a blank line. A
/// structured result without measurements is explained as raw text.
///
/// # Examples
///
/// ```
/// use medlens_engine::{generate_explanation, parse_measurements};
/// use medlens_types::{ExplanationMode, Language, ReportCategory};
///
/// let result = parse_measurements("Glucose 250 mg/dl", ReportCategory::Bloodtest);
/// let pair = generate_explanation(&result, ExplanationMode::Patient, Language::English);
/// assert!(pair.short_explanation.starts_with(Language::ENGLISH_DISCLAIMER));
/// assert!(pair.short_explanation.contains("**Glucose**: Higher than normal"));
/// ```
pub fn generate_explanation(
    result: &ExtractionResult,
    mode: ExplanationMode,
    language: Language,
) -> ExplanationPair {
    generate_explanation_with_config(result, mode, language, &EngineConfig::default())
}

/// Same as [`generate_explanation`] with explicit tunables.
pub fn generate_explanation_with_config(
    result: &ExtractionResult,
    mode: ExplanationMode,
    language: Language,
    config: &EngineConfig,
) -> ExplanationPair {
    let (short, long) = match result {
        ExtractionResult::Structured { data, .. } if !data.is_empty() => match mode {
            ExplanationMode::Patient => (patient_summary(result), patient_details(data)),
            ExplanationMode::Clinician => (clinical_summary(result), clinical_panel(data)),
        },
        ExtractionResult::Imaging { findings, .. } => (
            imaging_summary(findings, config.imaging_summary_findings),
            imaging_details(findings),
        ),
        other => (
            text_preview(other.raw_text(), config.preview_chars),
            text_full(other.raw_text()),
        ),
    };

    let disclaimer = language.disclaimer();
    ExplanationPair {
        short_explanation: format!("{disclaimer}\n\n{short}"),
        long_explanation: format!("{disclaimer}\n\n{long}"),
    }
}

fn patient_summary(result: &ExtractionResult) -> String {
    let mut out = String::from("📋 **Your Test Results Summary**\n\n");
    let abnormal: Vec<&Measurement> = result.abnormal().collect();

    if abnormal.is_empty() {
        out.push_str("✅ Good news! All values are within normal range.\n");
        return out;
    }

    out.push_str("⚠️ Some values need attention:\n\n");
    for item in abnormal {
        let direction = if item.status == MeasurementStatus::High {
            "Higher"
        } else {
            "Lower"
        };
        out.push_str(&format!("• **{}**: {direction} than normal\n", item.name));
    }
    out.push_str("\n💡 Please discuss these with your doctor.");
    out
}

fn patient_details(data: &[Measurement]) -> String {
    let mut out = String::from("📋 **Detailed Analysis**\n\n");
    for item in data {
        let status = match item.status {
            MeasurementStatus::Normal => "✅ Normal",
            MeasurementStatus::High => "⚠️ High",
            MeasurementStatus::Low => "⚠️ Low",
        };
        let reference: &str = if item.reference_range.is_empty() {
            "N/A"
        } else {
            &item.reference_range
        };
        out.push_str(&format!(
            "**{}**: {} {}\n- Status: {status}\n- Reference: {reference}\n\n",
            item.name,
            item.value_text(),
            item.unit
        ));
    }
    out.push_str("\n### Questions for Your Doctor:");
    for question in PATIENT_QUESTIONS {
        out.push_str(&format!("\n• {question}"));
    }
    out
}

fn clinical_summary(result: &ExtractionResult) -> String {
    let mut out = String::from("📊 **Clinical Summary**\n\n");
    let abnormal: Vec<&Measurement> = result.abnormal().collect();

    if abnormal.is_empty() {
        out.push_str("All parameters within reference ranges.\n");
        return out;
    }

    out.push_str("🔴 **Abnormal Values:**\n");
    for item in abnormal {
        out.push_str(&format!(
            "• {}: {} {} ({}) - Ref: {}\n",
            item.name,
            item.value_text(),
            item.unit,
            item.status.as_str().to_uppercase(),
            item.reference_range
        ));
    }
    out
}

fn clinical_panel(data: &[Measurement]) -> String {
    let mut out = String::from(
        "📊 **Complete Panel Analysis**\n\n| Parameter | Value | Unit | Status | Reference |\n|---|---|---|---|---|\n",
    );
    for item in data {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            item.name,
            item.value_text(),
            item.unit,
            item.status.as_str().to_uppercase(),
            item.reference_range
        ));
    }
    out.push_str(
        "\n**Note**: Clinical correlation required. This automated analysis is based solely on extracted data.",
    );
    out
}

fn bullets<'a>(lines: impl IntoIterator<Item = &'a String>) -> String {
    lines
        .into_iter()
        .map(|line| format!("• {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn imaging_summary(findings: &[String], shown: usize) -> String {
    format!(
        "📷 **Imaging Report Summary**\n\nKey findings:\n{}\n\n💡 Discuss with your doctor.",
        bullets(findings.iter().take(shown))
    )
}

fn imaging_details(findings: &[String]) -> String {
    format!(
        "📷 **Detailed Imaging Findings**\n\n{}\n\n**Note**: Full interpretation requires radiologist review.",
        bullets(findings)
    )
}

fn text_preview(raw_text: &str, chars: usize) -> String {
    let preview: String = raw_text.chars().take(chars).collect();
    format!("📄 **Report Summary**\n\nExtracted content preview:\n{preview}...")
}

fn text_full(raw_text: &str) -> String {
    format!("📄 **Full Extracted Content**\n\n{raw_text}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_measurements;
    use medlens_types::ReportCategory;

    const LANGUAGES: [Language; 3] = [Language::English, Language::Tamil, Language::Hindi];
    const MODES: [ExplanationMode; 2] = [ExplanationMode::Patient, ExplanationMode::Clinician];

    fn sample_results() -> Vec<ExtractionResult> {
        vec![
            parse_measurements("Hemoglobin: 9.5 g/dl\nSodium 140 meq/l", ReportCategory::Bloodtest),
            parse_measurements("Sodium 140 meq/l", ReportCategory::Bloodtest),
            parse_measurements("No acute findings\nLungs clear", ReportCategory::Xray),
            parse_measurements("handwritten note", ReportCategory::Handwritten),
            parse_measurements("", ReportCategory::Labtest),
        ]
    }

    fn body<'a>(text: &'a str, language: Language) -> &'a str {
        text.strip_prefix(language.disclaimer())
            .and_then(|rest| rest.strip_prefix("\n\n"))
            .expect("explanation starts with disclaimer and blank line")
    }

    #[test]
    fn test_every_combination_starts_with_disclaimer() {
        for result in sample_results() {
            for mode in MODES {
                for language in LANGUAGES {
                    let pair = generate_explanation(&result, mode, language);
                    assert!(!body(&pair.short_explanation, language).is_empty());
                    assert!(!body(&pair.long_explanation, language).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_unknown_language_uses_english_disclaimer() {
        let result = parse_measurements("Glucose 80", ReportCategory::Bloodtest);
        let pair = generate_explanation(&result, ExplanationMode::Patient, Language::from_code("french"));
        assert!(pair.short_explanation.starts_with(Language::ENGLISH_DISCLAIMER));
        assert!(pair.long_explanation.starts_with(Language::ENGLISH_DISCLAIMER));
    }

    #[test]
    fn test_patient_abnormal_summary() {
        let result = parse_measurements(
            "Hemoglobin: 9.5 g/dl\nGlucose 250 mg/dl\nSodium 140 meq/l",
            ReportCategory::Bloodtest,
        );
        let pair = generate_explanation(&result, ExplanationMode::Patient, Language::English);
        assert_eq!(
            body(&pair.short_explanation, Language::English),
            "📋 **Your Test Results Summary**\n\n⚠️ Some values need attention:\n\n\
             • **Hemoglobin**: Lower than normal\n\
             • **Glucose**: Higher than normal\n\
             \n💡 Please discuss these with your doctor."
        );
    }

    #[test]
    fn test_clinician_values_use_exponent_form_when_extreme() {
        let result = parse_measurements("Glucose 0.0000001 mg/dl", ReportCategory::Bloodtest);
        let pair = generate_explanation(&result, ExplanationMode::Clinician, Language::English);
        assert!(pair
            .short_explanation
            .contains("• Glucose: 1e-7 mg/dl (LOW) - Ref: 70 - 100 mg/dL\n"));
        assert!(pair
            .long_explanation
            .contains("| Glucose | 1e-7 | mg/dl | LOW | 70 - 100 mg/dL |\n"));
    }

    #[test]
    fn test_patient_all_normal_summary() {
        let result = parse_measurements("Sodium 140 meq/l", ReportCategory::Bloodtest);
        let pair = generate_explanation(&result, ExplanationMode::Patient, Language::Tamil);
        assert_eq!(
            body(&pair.short_explanation, Language::Tamil),
            "📋 **Your Test Results Summary**\n\n✅ Good news! All values are within normal range.\n"
        );
    }

    #[test]
    fn test_patient_details() {
        let result = parse_measurements("Hemoglobin: 9.5 g/dl\nFerritin 80", ReportCategory::Bloodtest);
        let pair = generate_explanation(&result, ExplanationMode::Patient, Language::English);
        assert_eq!(
            body(&pair.long_explanation, Language::English),
            "📋 **Detailed Analysis**\n\n\
             **Hemoglobin**: 9.5 g/dl\n- Status: ⚠️ Low\n- Reference: 12 - 17.5 g/dL\n\n\
             **Ferritin**: 80 \n- Status: ✅ Normal\n- Reference: N/A\n\n\
             \n### Questions for Your Doctor:\n\
             • What do these results mean?\n\
             • Do I need follow-up tests?\n\
             • Should I make lifestyle changes?"
        );
    }

    #[test]
    fn test_clinician_summary_and_panel() {
        let result = parse_measurements("Glucose 250 mg/dl\nSodium 140 meq/l", ReportCategory::Labtest);
        let pair = generate_explanation(&result, ExplanationMode::Clinician, Language::Hindi);
        assert_eq!(
            body(&pair.short_explanation, Language::Hindi),
            "📊 **Clinical Summary**\n\n🔴 **Abnormal Values:**\n\
             • Glucose: 250 mg/dl (HIGH) - Ref: 70 - 100 mg/dL\n"
        );
        assert_eq!(
            body(&pair.long_explanation, Language::Hindi),
            "📊 **Complete Panel Analysis**\n\n\
             | Parameter | Value | Unit | Status | Reference |\n|---|---|---|---|---|\n\
             | Glucose | 250 | mg/dl | HIGH | 70 - 100 mg/dL |\n\
             | Sodium | 140 | meq/l | NORMAL | 136 - 145 mEq/L |\n\
             \n**Note**: Clinical correlation required. This automated analysis is based solely on extracted data."
        );
    }

    #[test]
    fn test_clinician_all_normal() {
        let result = parse_measurements("Potassium 4.0", ReportCategory::Labtest);
        let pair = generate_explanation(&result, ExplanationMode::Clinician, Language::English);
        assert!(pair
            .short_explanation
            .ends_with("All parameters within reference ranges.\n"));
    }

    #[test]
    fn test_imaging_explanation() {
        let findings: Vec<String> = (1..=7).map(|i| format!("Finding {i}")).collect();
        let result = ExtractionResult::Imaging {
            raw_text: findings.join("\n"),
            findings,
        };
        for mode in MODES {
            let pair = generate_explanation(&result, mode, Language::English);
            let short = body(&pair.short_explanation, Language::English);
            assert!(short.starts_with("📷 **Imaging Report Summary**\n\nKey findings:\n• Finding 1\n"));
            assert!(short.contains("• Finding 5\n\n💡 Discuss with your doctor."));
            assert!(!short.contains("Finding 6"));

            let long = body(&pair.long_explanation, Language::English);
            assert!(long.contains("• Finding 7\n\n**Note**: Full interpretation requires radiologist review."));
        }
    }

    #[test]
    fn test_unstructured_preview_truncates() {
        let text = "x".repeat(500);
        let result = ExtractionResult::Unstructured { raw_text: text.clone() };
        let pair = generate_explanation(&result, ExplanationMode::Patient, Language::English);
        let short = body(&pair.short_explanation, Language::English);
        assert_eq!(
            short,
            format!("📄 **Report Summary**\n\nExtracted content preview:\n{}...", "x".repeat(300))
        );
        assert_eq!(
            body(&pair.long_explanation, Language::English),
            format!("📄 **Full Extracted Content**\n\n{text}")
        );
    }

    #[test]
    fn test_empty_structured_explained_as_text() {
        let result = ExtractionResult::Structured {
            data: vec![],
            raw_text: "nothing parsed".to_string(),
        };
        let pair = generate_explanation(&result, ExplanationMode::Clinician, Language::English);
        assert!(pair.long_explanation.ends_with("📄 **Full Extracted Content**\n\nnothing parsed"));
    }

    #[test]
    fn test_generation_is_stateless() {
        let result = parse_measurements("Glucose 50", ReportCategory::Bloodtest);
        let first = generate_explanation(&result, ExplanationMode::Patient, Language::English);
        let second = generate_explanation(&result, ExplanationMode::Patient, Language::English);
        assert_eq!(first, second);
    }
}
