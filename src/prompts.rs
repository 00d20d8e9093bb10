//! System prompts for LLM-backed translation.
//!
//! Callers can override the default via
//! [`crate::config::AnalysisConfig::system_prompt`]; the constant here is used
//! only when no override is provided.

use whatlang::Lang;

/// Default system prompt for translating resume text.
///
/// `{source}` and `{target}` are replaced with English language names.
pub const DEFAULT_TRANSLATION_PROMPT: &str = r#"You are a professional translator specialising in resumes and CVs.

Translate the text supplied by the user from {source} into {target}.

Rules:
1. Translate ALL content; do not summarise or omit sections
2. Keep technology names, product names, programming languages, and acronyms
   exactly as written (e.g. Python, SQL, Tableau, AWS)
3. Keep line breaks where the original has them
4. Output ONLY the translated text
5. Do NOT wrap the output in code fences
6. Do NOT add commentary, notes, or a "Translation:" preamble"#;

/// Fill the source and target language names into a prompt template.
pub fn translation_prompt(template: &str, source: Lang, target: Lang) -> String {
    template
        .replace("{source}", source.eng_name())
        .replace("{target}", target.eng_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_language_names() {
        let p = translation_prompt(DEFAULT_TRANSLATION_PROMPT, Lang::Fra, Lang::Eng);
        assert!(p.contains("from French into English"), "got: {p}");
        assert!(!p.contains("{source}"));
        assert!(!p.contains("{target}"));
    }

    #[test]
    fn custom_template_without_placeholders_is_untouched() {
        let p = translation_prompt("Translate to English.", Lang::Deu, Lang::Eng);
        assert_eq!(p, "Translate to English.");
    }
}
