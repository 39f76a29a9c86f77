/// Appended to the prompt when a flat magenta backdrop is requested, so the
/// background can be keyed out afterwards.
pub const FLAT_BACKGROUND_INSTRUCTION: &str = "BACKGROUND: solid flat uniform magenta pink (#FF00FF) color only. \
NO borders, NO outlines, NO frames, NO shadows, NO gradients. \
Subject has natural colors, floating directly on pure magenta background.";

pub fn build_prompt(raw_prompt: &str, use_flat_background: bool) -> String {
    if use_flat_background {
        format!("{}. {}", raw_prompt, FLAT_BACKGROUND_INSTRUCTION)
    } else {
        raw_prompt.to_string()
    }
}

/// First `max_chars` characters of a prompt, for log lines.
pub fn preview(prompt: &str, max_chars: usize) -> String {
    let mut chars = prompt.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prompt_unchanged() {
        for prompt in ["", "a cute cat", "夕焼けの風景", "ends with period."] {
            assert_eq!(build_prompt(prompt, false), prompt);
        }
    }

    #[test]
    fn test_flat_background_prompt() {
        let prompt = build_prompt("an icon of a sword", true);
        assert!(prompt.starts_with("an icon of a sword. "));
        assert!(prompt.contains("#FF00FF"));
        assert!(prompt.ends_with(FLAT_BACKGROUND_INSTRUCTION));
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 100), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ねこねこ", 2), "ねこ...");
    }
}
