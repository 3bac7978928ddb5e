//! Command line tokenizer.

/// A command name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased command name.
    pub name: String,
    pub args: Vec<String>,
}

/// Splits a line on spaces and tabs.
///
/// Single or double quotes group text (including whitespace) into one token;
/// the quotes themselves are dropped. A quoted empty string yields an empty
/// token. An unterminated quote runs to the end of the line.
///
/// # Example
///
/// ```
/// use dtree::repl::parser::tokenize;
///
/// assert_eq!(
///     tokenize(r#"add decision "Is it raining?""#),
///     vec!["add", "decision", "Is it raining?"]
/// );
/// assert_eq!(tokenize("connect n1 n2 ''"), vec!["connect", "n1", "n2", ""]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_token = true;
                }
                ' ' | '\t' => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

/// Tokenizes a line into a command, or `None` if the line is blank.
pub fn parse(line: &str) -> Option<ParsedCommand> {
    let mut tokens = tokenize(line).into_iter();
    let name = tokens.next()?.to_lowercase();
    Some(ParsedCommand {
        name,
        args: tokens.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(tokenize("  list \t preview "), vec!["list", "preview"]);
    }

    #[test]
    fn test_quotes_group_words() {
        assert_eq!(
            tokenize(r#"edit n1 label 'Take "the" umbrella'"#),
            vec!["edit", "n1", "label", r#"Take "the" umbrella"#]
        );
    }

    #[test]
    fn test_quote_inside_word() {
        assert_eq!(tokenize(r#"a"b c"d"#), vec!["ab cd"]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(tokenize(r#"add action "Go home"#), vec!["add", "action", "Go home"]);
    }

    #[test]
    fn test_parse_lowercases_name_only() {
        let cmd = parse("ADD Decision Ready").unwrap();
        assert_eq!(cmd.name, "add");
        assert_eq!(cmd.args, vec!["Decision", "Ready"]);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   \t"), None);
    }
}
