//! Keyword chat over an analysed report.
//!
//! Replies are assembled from the extraction result and the report text only;
//! nothing outside the report is consulted.

use medlens_types::{ExtractionResult, Measurement, MeasurementStatus};

/// Suffix appended to every chat reply.
pub const CHAT_DISCLAIMER: &str =
    "\n\n⚠️ *This is based only on your uploaded report. Consult a healthcare professional for advice.*";

const GREETINGS: [&str; 3] = ["hello", "hi", "hey"];
const SUMMARY_KEYWORDS: [&str; 3] = ["report", "result", "finding"];
const CONCERN_KEYWORDS: [&str; 5] = ["abnormal", "concern", "worry", "high", "low"];

const SUMMARY_FINDINGS: usize = 5;
const SUMMARY_PREVIEW_CHARS: usize = 400;
const SNIPPET_BEFORE: usize = 50;
const SNIPPET_AFTER: usize = 150;
const MIN_SEARCH_WORD_CHARS: usize = 4;

/// Report data a chat reply may draw on.
#[derive(Debug, Clone, Copy)]
pub struct ChatContext<'a> {
    /// Full text extracted from the report.
    pub extracted_text: &'a str,
    /// Stored extraction result, if the report was analysed.
    pub extracted: Option<&'a ExtractionResult>,
}

impl<'a> ChatContext<'a> {
    fn structured(&self) -> Option<&'a ExtractionResult> {
        self.extracted
            .filter(|result| matches!(result, ExtractionResult::Structured { .. }))
    }

    fn measurements(&self) -> Option<&'a [Measurement]> {
        self.structured().map(ExtractionResult::measurements)
    }
}

/// Answers a chat message about a report.
///
/// The first rule that applies wins: greeting, a named measurement, a
/// summary request, a question about abnormal values, a text search for the
/// message's longer words, then a fallback.
///
/// # Examples
///
/// ```
/// use medlens_engine::chat::{respond, ChatContext};
/// use medlens_engine::parse_measurements;
/// use medlens_types::ReportCategory;
///
/// let text = "Glucose 250 mg/dl";
/// let result = parse_measurements(text, ReportCategory::Bloodtest);
/// let context = ChatContext { extracted_text: text, extracted: Some(&result) };
///
/// let reply = respond("What about my glucose?", &context);
/// assert!(reply.contains("higher than normal"));
/// ```
pub fn respond(message: &str, context: &ChatContext<'_>) -> String {
    let reply = compose(&message.to_lowercase(), context);
    format!("{reply}{CHAT_DISCLAIMER}")
}

fn compose(message: &str, context: &ChatContext<'_>) -> String {
    if is_greeting(message) {
        return "Hello! I'm ready to help you understand your report. Ask me about any values, findings, or terms!".to_string();
    }

    if let Some(data) = context.measurements() {
        if let Some(item) = data
            .iter()
            .find(|item| message.contains(&item.name.to_lowercase()))
        {
            return describe_measurement(item);
        }
    }

    if SUMMARY_KEYWORDS.iter().any(|k| message.contains(k)) {
        return summary(context);
    }

    if CONCERN_KEYWORDS.iter().any(|k| message.contains(k)) {
        if let Some(result) = context.structured() {
            return abnormal_overview(result);
        }
    }

    if let Some(found) = search_text(message, context.extracted_text) {
        return format!("Found in your report:\n\n\"{found}\"\n\nWould you like more details?");
    }

    "I couldn't find specific information about that in your report. Please ask about values or terms from your uploaded report.".to_string()
}

/// Greetings must be whole words so "this" or "which" do not count.
fn is_greeting(message: &str) -> bool {
    message
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| GREETINGS.contains(&word))
}

fn describe_measurement(item: &Measurement) -> String {
    let status = match item.status {
        MeasurementStatus::Normal => "within normal range",
        MeasurementStatus::High => "higher than normal",
        MeasurementStatus::Low => "lower than normal",
    };
    let reference: &str = if item.reference_range.is_empty() {
        "Not specified"
    } else {
        &item.reference_range
    };
    format!(
        "**{}** shows a value of **{} {}**. This is {status}. Reference range: {reference}.",
        item.name,
        item.value_text(),
        item.unit
    )
}

fn list_item(item: &Measurement) -> String {
    format!(
        "• **{}**: {} {} ({})\n",
        item.name,
        item.value_text(),
        item.unit,
        item.status
    )
}

fn summary(context: &ChatContext<'_>) -> String {
    let mut out = String::from("📋 **Your Report Summary:**\n\n");
    match context.extracted {
        Some(ExtractionResult::Structured { data, .. }) => {
            for item in data {
                out.push_str(&list_item(item));
            }
        }
        Some(ExtractionResult::Imaging { findings, .. }) => {
            for finding in findings.iter().take(SUMMARY_FINDINGS) {
                out.push_str(&format!("• {finding}\n"));
            }
        }
        _ => {
            let preview: String = context
                .extracted_text
                .chars()
                .take(SUMMARY_PREVIEW_CHARS)
                .collect();
            out.push_str(&preview);
            out.push_str("...");
        }
    }
    out
}

fn abnormal_overview(result: &ExtractionResult) -> String {
    let abnormal: Vec<&Measurement> = result.abnormal().collect();
    if abnormal.is_empty() {
        return "✅ All values in your report appear to be within normal ranges.".to_string();
    }

    let mut out = String::from("⚠️ **Values outside normal range:**\n\n");
    for item in abnormal {
        out.push_str(&list_item(item));
    }
    out.push_str("\nPlease discuss these with your doctor.");
    out
}

/// Finds the first longer message word in the text and returns the passage
/// around it.
fn search_text(message: &str, text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let word = message
        .split(' ')
        .filter(|w| w.chars().count() >= MIN_SEARCH_WORD_CHARS)
        .find(|w| lower.contains(w))?;

    let byte_idx = lower.find(word)?;
    let char_idx = lower[..byte_idx].chars().count();
    let start = char_idx.saturating_sub(SNIPPET_BEFORE);
    let end = char_idx + SNIPPET_AFTER;

    let snippet: String = text.chars().skip(start).take(end - start).collect();
    Some(snippet.trim().to_string())
}
