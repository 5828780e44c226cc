//! Instruction template for the career counsellor
//!
//! Each turn sends one system message built from this template: a persona
//! directive, response constraints, the rendered conversation history and
//! the student's new question.

/// Placeholder replaced by the rendered conversation history
pub const HISTORY_PLACEHOLDER: &str = "{chat_history}";

/// Placeholder replaced by the student's question
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Counsellor instruction template
pub const CAREER_COUNSELOR_TEMPLATE: &str = "
You are an expert career counselor specializing in education and career planning for students. \
Provide a concise (under 500 words), actionable, and encouraging response tailored to the student's query. \
Include specific skills, courses, certifications, or resources (e.g., Coursera, freeCodeCamp, GitHub). \
If the query is vague, ask a clarifying question to provide targeted advice. \
Use the conversation history to maintain context and avoid repetition. \
Structure responses with bullet points for clarity when listing steps or resources. \
Ensure answers are practical and student-focused.

Conversation History:
{chat_history}

Student's Question:
{input}

Answer:
";

/// A fixed instruction template with `{chat_history}` and `{input}` slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    template: &'static str,
}

impl PromptTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// The career counsellor template
    pub const fn career_counselor() -> Self {
        Self::new(CAREER_COUNSELOR_TEMPLATE)
    }

    pub fn as_str(&self) -> &'static str {
        self.template
    }

    /// Fill both slots in a single left-to-right pass.
    ///
    /// Substituted text is never scanned again, so braces typed by the
    /// student stay literal.
    pub fn render(&self, history: &str, input: &str) -> String {
        let mut out = String::with_capacity(self.template.len() + history.len() + input.len());
        let mut rest = self.template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];

            if let Some(after) = tail.strip_prefix(HISTORY_PLACEHOLDER) {
                out.push_str(history);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(INPUT_PLACEHOLDER) {
                out.push_str(input);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }

        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::career_counselor()
    }
}

/// Build the instruction for one turn from rendered history and the new question
pub fn format_prompt(history: &str, input: &str) -> String {
    PromptTemplate::career_counselor().render(history, input)
}
