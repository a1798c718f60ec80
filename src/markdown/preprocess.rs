//! Text level rewrites applied before includes and Markdown conversion.

/// Placeholder for an escaped opening brace while includes are resolved.
const OPEN_BRACE_TOKEN: &str = "\u{E000}mdviewer-open-brace\u{E000}";

/// Placeholder for an escaped closing brace while includes are resolved.
const CLOSE_BRACE_TOKEN: &str = "\u{E000}mdviewer-close-brace\u{E000}";

/// Rewrites `1)` style list markers to `1.` so both notations produce the
/// same ordered list.
///
/// Only the first `)` of each line is considered, and only when everything
/// before it (ignoring surrounding whitespace) is a number. Indentation is
/// kept so nested lists stay nested.
pub fn normalize_list_styles(text: &str) -> String {
    text.split('\n')
        .map(normalize_list_marker)
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_list_marker(line: &str) -> String {
    let Some(pos) = line.find(')') else {
        return line.to_string();
    };

    let prefix = &line[..pos];
    let number = prefix.trim();

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return line.to_string();
    }

    let indent = &prefix[..prefix.len() - prefix.trim_start().len()];
    format!("{}{}.{}", indent, number, &line[pos + 1..])
}

/// Swaps backslash escaped braces for placeholder tokens so they cannot be
/// taken for include directives.
pub fn protect_escaped_braces(text: &str) -> String {
    text.replace("\\{", OPEN_BRACE_TOKEN)
        .replace("\\}", CLOSE_BRACE_TOKEN)
}

/// Turns placeholder tokens back into the escaped braces they replaced.
///
/// The backslash stays: Markdown drops it from prose, and code spans and
/// fenced blocks keep it verbatim.
pub fn restore_braces(text: &str) -> String {
    text.replace(OPEN_BRACE_TOKEN, "\\{")
        .replace(CLOSE_BRACE_TOKEN, "\\}")
}
