use chrono::{DateTime, Local};

use crate::generator::types::StudySheetPreferences;

pub const AGENT_ROLE: &str = "Generates a compact, high-density, one-page study sheet from a blog or tutorial, tailored to the user's learning focus and tone preference.";

pub const AGENT_DESCRIPTION: &str = r#"You are a study sheet generator. You are given:
1. A blog or tutorial URL that the user wants summarized.
2. The user’s chosen focus (e.g., key concepts, steps, or summary).
3. The desired tone (e.g., academic, friendly, or neutral).

Your task is to generate a structured, markdown-formatted study sheet that condenses all essential information into a tight, efficient format."#;

pub const AGENT_INSTRUCTIONS: &[&str] = &[
    "Start the document with: ## 📝 Study Sheet",
    "",
    "- Immediately begin with content. **Do not include introductions, overviews, or descriptions of the study sheet itself.**",
    "",
    "- Dynamically decide appropriate section headings based on the content. Use only what’s relevant from the source blog/tutorial.",
    "- Use space-efficient formatting:",
    "   - Bullet points",
    "   - Numbered steps",
    "   - Markdown tables (if useful)",
    "   - Blockquotes for definitions",
    "   - Use markdown icons (✅ ⚠️ 💡 etc.) to enhance scannability",
    "",
    "- **Be concise**: Use short phrases or sentence fragments where possible. Avoid long paragraphs.",
    "",
    "- If including code or formulas, keep them brief and directly relevant.",
    "",
    "- Match the tone to the user’s request (academic, friendly, or neutral), but do not label the tone or describe it.",
    "",
    "- Strictly prohibit any reference to diagrams or visuals of any kind. Do NOT:",
    "   - Mention diagrams, images, visualizations, or illustrations.",
    "   - Include headers like '📌 Diagram Suggestion'.",
    "   - Describe what a diagram would show.",
    "   - Suggest the reader visualize or imagine a diagram.",
    "",
    "- Also prohibit:",
    "   - Closing remarks, summaries, or motivational lines.",
    "   - Any statements about what was covered in the study sheet.",
    "",
    "- Limit the sheet to one page (~600–800 words). Prioritize density, clarity, and compact structure.",
    "",
    "Output only the **final Markdown-formatted study sheet**. Do not explain your process or include helper content.",
];

/// 用户prompt末尾的生成指令。
/// 注意它与AGENT_INSTRUCTIONS中禁止提及图表的要求相互矛盾，两段文字均按原样保留。
pub const CLOSING_INSTRUCTION: &str = "Generate a markdown-formatted study sheet from the blog content using the above preferences. If helpful, suggest locations for appropriate diagrams.";

/// 构建system prompt：描述、角色、指令列表以及附加信息（markdown要求与当前时间）
pub fn build_system_prompt(now: DateTime<Local>) -> String {
    let mut prompt = String::new();

    prompt.push_str(AGENT_DESCRIPTION);
    prompt.push_str("\n\n<your_role>\n");
    prompt.push_str(AGENT_ROLE);
    prompt.push_str("\n</your_role>\n\n<instructions>\n");
    for instruction in AGENT_INSTRUCTIONS {
        // 空行用于分隔指令组，原样保留
        if instruction.is_empty() {
            prompt.push('\n');
        } else {
            prompt.push_str(&format!("- {}\n", instruction));
        }
    }
    prompt.push_str("</instructions>\n\n<additional_information>\n");
    prompt.push_str("- Use markdown to format your answers.\n");
    prompt.push_str(&format!(
        "- The current time is {}.\n",
        now.format("%Y-%m-%d %H:%M:%S")
    ));
    prompt.push_str("</additional_information>");

    prompt
}

/// 将三个偏好值代入固定模板，构建用户prompt
pub fn build_user_prompt(preferences: &StudySheetPreferences) -> String {
    format!(
        "Blog or Tutorial Link: {}\nFocus Preference: {}\nTone Preference: {}\n\n{}",
        preferences.blog_link, preferences.focus, preferences.tone, CLOSING_INSTRUCTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::types::{Focus, Tone};
    use chrono::TimeZone;

    #[test]
    fn test_user_prompt_contains_all_preferences() {
        let preferences = StudySheetPreferences {
            blog_link: "https://example.com/rust-ownership".to_string(),
            focus: Focus::SummaryKeyPoints,
            tone: Tone::NeutralBalanced,
        };

        let prompt = build_user_prompt(&preferences);

        assert!(prompt.contains("Blog or Tutorial Link: https://example.com/rust-ownership"));
        assert!(prompt.contains("Focus Preference: Summary + Key Points"));
        assert!(prompt.contains("Tone Preference: Neutral & Balanced"));
        assert!(prompt.ends_with(CLOSING_INSTRUCTION));
    }

    #[test]
    fn test_user_prompt_keeps_link_verbatim() {
        let preferences = StudySheetPreferences {
            blog_link: "https://example.com/post?id=1&lang=en#intro".to_string(),
            ..Default::default()
        };

        let prompt = build_user_prompt(&preferences);
        assert!(prompt.contains("https://example.com/post?id=1&lang=en#intro"));
        assert!(prompt.contains("Key Concepts & Definitions"));
        assert!(prompt.contains("Formal & Academic"));
    }

    #[test]
    fn test_system_prompt_structure() {
        let now = Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let prompt = build_system_prompt(now);

        assert!(prompt.starts_with("You are a study sheet generator."));
        assert!(prompt.contains(&format!("<your_role>\n{}\n</your_role>", AGENT_ROLE)));
        assert!(prompt.contains("- Start the document with: ## 📝 Study Sheet\n"));
        assert!(prompt.contains("- - Limit the sheet to one page (~600–800 words)."));
        assert!(prompt.contains("- Use markdown to format your answers."));
        assert!(prompt.contains("The current time is 2026-03-14 09:26:53."));
        assert!(prompt.ends_with("</additional_information>"));
    }

    #[test]
    fn test_system_prompt_contains_every_instruction() {
        let prompt = build_system_prompt(Local::now());

        for instruction in AGENT_INSTRUCTIONS.iter().filter(|i| !i.is_empty()) {
            assert!(prompt.contains(instruction), "missing: {}", instruction);
        }
    }

    #[test]
    fn test_diagram_instructions_are_both_present() {
        let system_prompt = build_system_prompt(Local::now());
        let user_prompt = build_user_prompt(&StudySheetPreferences::default());

        assert!(system_prompt.contains("Strictly prohibit any reference to diagrams"));
        assert!(user_prompt.contains("suggest locations for appropriate diagrams"));
    }
}
