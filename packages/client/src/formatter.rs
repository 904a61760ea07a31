//! Survey formatting utilities for terminal display.

use kairan_server::domain::{Question, QuestionId, Survey};
use kairan_shared::time::to_jst_rfc3339;

const RULE: &str = "============================================================";

/// Survey formatter for terminal display
pub struct SurveyFormatter;

impl SurveyFormatter {
    /// Format a survey snapshot, one line per question in id order
    ///
    /// Single and multiple choice questions list the selected option indices,
    /// free text questions show the text.
    pub fn format_survey(survey: &Survey, received_at: i64) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{RULE}\n"));
        output.push_str(&format!(
            "Survey v{} ({} question(s)) at {}\n",
            survey.version,
            survey.len(),
            Self::timestamp(received_at)
        ));

        if survey.is_empty() {
            output.push_str("(No questions)\n");
        }
        for (id, question) in survey.questions() {
            output.push_str(&Self::format_question(id, question));
            output.push('\n');
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format one question as `#id kind: answer`
    pub fn format_question(id: QuestionId, question: &Question) -> String {
        let kind = question.question_type().as_str();
        let answer = match (question.options(), question.text()) {
            (Some(options), _) => {
                let selected: Vec<String> = options
                    .iter()
                    .enumerate()
                    .filter(|(_, option)| option.selected)
                    .map(|(index, _)| index.to_string())
                    .collect();
                if selected.is_empty() {
                    "(none selected)".to_string()
                } else {
                    format!("[{}] of {}", selected.join(", "), options.len())
                }
            }
            (None, Some(text)) if !text.is_empty() => format!("{text:?}"),
            _ => "(empty)".to_string(),
        };
        format!("#{id} {kind}: {answer}")
    }

    /// Format a presence notification
    pub fn format_presence(count: u32, received_at: i64) -> String {
        format!(
            "* {} client(s) connected at {}\n",
            count,
            Self::timestamp(received_at)
        )
    }

    fn timestamp(millis: i64) -> String {
        to_jst_rfc3339(millis).unwrap_or_else(|| millis.to_string())
    }
}
