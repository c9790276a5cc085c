// src/generation/parse.rs
//! Turning raw generation output into usable values

use serde::de::DeserializeOwned;

use super::GenerationError;

/// Strip ```json ... ``` or ``` ... ``` fences a model wraps around JSON.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text.strip_prefix("```") else {
        return text;
    };

    let body = stripped
        .strip_prefix("json")
        .or_else(|| stripped.strip_prefix("JSON"))
        .unwrap_or(stripped)
        .trim_start();

    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Parse a (possibly fenced) JSON object out of a response.
pub fn parse_json_response<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    Ok(serde_json::from_str(strip_code_fences(text))?)
}

/// Recover bullets from a rewrite response.
///
/// Dash-prefixed lines lose the dash; other non-empty lines count as bullets
/// unless they are markdown headings. When nothing is recovered the original
/// bullets come back unchanged.
pub fn parse_bullets(response: &str, original: &[String]) -> Vec<String> {
    let bullets: Vec<String> = response
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            if let Some(rest) = line.strip_prefix('-') {
                let rest = rest.trim_start();
                (!rest.is_empty()).then(|| rest.to_string())
            } else if !line.is_empty() && !line.starts_with('#') {
                Some(line.to_string())
            } else {
                None
            }
        })
        .collect();

    if bullets.is_empty() {
        original.to_vec()
    } else {
        bullets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn originals() -> Vec<String> {
        vec!["Built the billing service".to_string(), "Mentored two interns".to_string()]
    }

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_leaves_plain_json() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_with_trailing_chatter() {
        let input = "```json\n{\"a\": 1}\n```\nLet me know if you need more.";
        assert_eq!(strip_code_fences(input), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_json_response_rejects_prose() {
        let result = parse_json_response::<Value>("Sure! Here is the data you asked for.");
        assert!(matches!(result, Err(GenerationError::Parse(_))));
    }

    #[test]
    fn test_three_dash_lines_give_three_bullets() {
        let response = "- Shipped the billing rewrite\n- Led on-call rotation\n-Cut build times by 40%";
        let bullets = parse_bullets(response, &originals());
        assert_eq!(
            bullets,
            vec![
                "Shipped the billing rewrite",
                "Led on-call rotation",
                "Cut build times by 40%"
            ]
        );
    }

    #[test]
    fn test_plain_lines_are_accepted_and_headings_skipped() {
        let response = "# Rewritten bullets\n\nDesigned the ingestion pipeline\n- Ran migrations";
        let bullets = parse_bullets(response, &originals());
        assert_eq!(bullets, vec!["Designed the ingestion pipeline", "Ran migrations"]);
    }

    #[test]
    fn test_nothing_recovered_keeps_original() {
        assert_eq!(parse_bullets("", &originals()), originals());
        assert_eq!(parse_bullets("# Heading only\n\n   \n-", &originals()), originals());
    }
}
