/// Builds the instruction asking the generator for extra synonyms of `word`.
///
/// Given synonyms are listed so the model can skip them; the answer is expected as a
/// comma-only list, which [`parse_synonym_csv`] turns back into words.
pub fn synonym_prompt(word: &str, definition: Option<&str>, synonyms: &[String]) -> String {
    let definition = definition.unwrap_or_default();
    let given = synonyms.join(", ");

    format!(
        "I have the word \"{word}\" with the definition: \"{definition}\"\n\
         Some synonyms of the word are: \"{given}\"\n\
         Give me a list of synonyms for the word \"{word}\" based on its definition except already given synonyms.\n\
         Respond only with the list of synonyms in CSV format, without determiners, sentences, or punctuation.\n\
         Do not include any spaces between the synonyms, only commas."
    )
}

/// Splits a generator answer into candidate words, keeping their order.
///
/// Reasoning blocks (`<think>...</think>`) are dropped first. An unterminated block
/// swallows the rest of the answer.
pub fn parse_synonym_csv(raw: &str) -> Vec<String> {
    strip_think_blocks(raw)
        .split([',', '\n', ';'])
        .map(|item| {
            item.trim()
                .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.' | '*' | '-'))
                .trim()
        })
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_think_blocks(raw: &str) -> String {
    const OPEN: &str = "<think>";
    const CLOSE: &str = "</think>";

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        match rest[start..].find(CLOSE) {
            Some(end) => rest = &rest[start + end + CLOSE.len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}
