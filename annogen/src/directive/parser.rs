//! Line-oriented directive parser.
//!
//! The parser walks the input once with a single line of lookahead. It has two
//! states: scanning for `@` lines, and collecting an embedded template after an
//! argument list that ended with `{`.

use super::lexer::{self, Token, DIRECTIVE_MARKER};
use super::Directive;
use std::iter::{Enumerate, Peekable};

/// Separator between a parameter key and its value.
pub const PARAM_SEPARATOR: &str = "=>";

/// Parse comment text into directives, in source order.
pub fn parse(text: &str) -> Vec<Directive> {
    parse_lines(text.lines())
}

/// Parse an iterator of comment lines into directives, in source order.
pub fn parse_lines<'a, I>(lines: I) -> Vec<Directive>
where
    I: IntoIterator<Item = &'a str>,
{
    DirectiveParser::new(lines.into_iter()).run()
}

struct DirectiveParser<'a, I: Iterator<Item = &'a str>> {
    lines: Peekable<Enumerate<I>>,
    directives: Vec<Directive>,
}

impl<'a, I: Iterator<Item = &'a str>> DirectiveParser<'a, I> {
    fn new(lines: I) -> Self {
        Self {
            lines: lines.enumerate().peekable(),
            directives: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Directive> {
        while let Some((index, raw)) = self.lines.next() {
            let Token::Directive(text) = lexer::lex(raw) else {
                continue;
            };
            if let Some(directive) = self.directive(text, index + 1) {
                self.directives.push(directive);
            }
        }
        self.directives
    }

    /// Parse one `@...` line, collecting the template body if one follows.
    fn directive(&mut self, text: &str, line: usize) -> Option<Directive> {
        let body = text.strip_prefix(DIRECTIVE_MARKER).unwrap_or(text);

        let Some(open) = body.find('(') else {
            let name = body.trim();
            if name.is_empty() {
                return None;
            }
            let mut directive = Directive::new(name);
            directive.line = line;
            return Some(directive);
        };

        let name = body[..open].trim();
        if name.is_empty() {
            tracing::trace!(line, "skipping directive without a name");
            return None;
        }

        let mut directive = Directive::new(name);
        directive.line = line;

        // First `(` and last `)` delimit the list; no balancing inside.
        let args = body[open + 1..].trim();
        let args = args.strip_suffix(')').unwrap_or(args).trim_end();

        match args.strip_suffix('{') {
            Some(before_brace) => {
                parse_arguments(before_brace, &mut directive);
                directive.template = Some(self.template());
            }
            None => parse_arguments(args, &mut directive),
        }

        Some(directive)
    }

    /// Collect template lines up to a confirmed `})` terminator.
    ///
    /// A `})` line only terminates when the next non-blank line is a directive
    /// or the input ends; otherwise it is kept as template content. Blank lines
    /// consumed while looking ahead go back into the body.
    fn template(&mut self) -> String {
        let mut body: Vec<&str> = Vec::new();

        while let Some((_, raw)) = self.lines.next() {
            match lexer::lex(raw) {
                Token::TemplateEnd(text) => {
                    let mut blanks = 0;
                    while self
                        .lines
                        .next_if(|(_, next)| lexer::lex(next) == Token::Blank)
                        .is_some()
                    {
                        blanks += 1;
                    }

                    let confirmed = match self.lines.peek() {
                        None => true,
                        Some((_, next)) => lexer::lex(next).is_directive(),
                    };
                    if confirmed {
                        break;
                    }
                    body.push(text);
                    body.extend(std::iter::repeat("").take(blanks));
                }
                token => body.push(token.text()),
            }
        }

        body.join("\n").trim().to_string()
    }
}

/// Split a comma-separated argument list into arguments and params.
fn parse_arguments(text: &str, directive: &mut Directive) {
    for part in text.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((key, value)) = part.split_once(PARAM_SEPARATOR) {
            directive
                .params
                .insert(key.trim().to_string(), value.trim().to_string());
        }
        directive.arguments.push(part.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_simple_arguments() {
        let directives = parse("@name(a, b, c)");

        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].name, "name");
        assert_eq!(directives[0].arguments, vec!["a", "b", "c"]);
        assert!(directives[0].params.is_empty());
        assert!(directives[0].template.is_none());
    }

    #[test]
    fn test_parse_key_value_params() {
        let directives = parse("@name(a => 1, b => 2)");

        assert_eq!(directives[0].arguments, vec!["a => 1", "b => 2"]);
        assert_eq!(directives[0].params, params(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_parse_mixed_arguments() {
        let directives = parse("// @iface(Reader, out => io.rs)");

        assert_eq!(directives[0].arguments, vec!["Reader", "out => io.rs"]);
        assert_eq!(directives[0].params, params(&[("out", "io.rs")]));
        assert_eq!(directives[0].positional().collect::<Vec<_>>(), vec!["Reader"]);
    }

    #[test]
    fn test_parse_without_parens() {
        let directives = parse("/// @assets");

        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].name, "assets");
        assert!(directives[0].arguments.is_empty());
    }

    #[test]
    fn test_parse_drops_empty_arguments() {
        let directives = parse("@name(a,, b , ,)");
        assert_eq!(directives[0].arguments, vec!["a", "b"]);

        let directives = parse("@name()");
        assert!(directives[0].arguments.is_empty());
    }

    #[test]
    fn test_parse_param_last_write_wins() {
        let directives = parse("@name(k => 1, k => 2)");

        assert_eq!(directives[0].param("k"), Some("2"));
        assert_eq!(directives[0].arguments.len(), 2);
    }

    #[test]
    fn test_parse_param_value_split_at_first_separator() {
        let directives = parse("@name(map => a => b)");
        assert_eq!(directives[0].param("map"), Some("a => b"));
    }

    #[test]
    fn test_parse_list_delimited_by_outer_parens() {
        let directives = parse("@name(f(x), y)");
        assert_eq!(directives[0].arguments, vec!["f(x)", "y"]);
    }

    #[test]
    fn test_parse_no_paren_balancing() {
        let directives = parse("@name(f(x, y), z)");
        assert_eq!(directives[0].arguments, vec!["f(x", "y)", "z"]);
    }

    #[test]
    fn test_parse_template_keeps_trailing_block_comment_in_line_comments() {
        let text = "\
/// @templater({
/// let x = 1; /* note */
/// })";
        let directives = parse(text);
        assert_eq!(directives[0].template.as_deref(), Some("let x = 1; /* note */"));
    }

    #[test]
    fn test_parse_skips_non_directive_lines() {
        let text = "\
/// Some documentation.
///
/// Contact: someone@example.com
/// @first
/// More docs.
/// @second(x)";
        let directives = parse(text);

        let names: Vec<_> = directives.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(directives[0].line, 4);
        assert_eq!(directives[1].line, 6);
    }

    #[test]
    fn test_parse_preserves_repeated_names() {
        let directives = parse("@gen(a)\n@gen(b)\n@gen(a)");

        assert_eq!(directives.len(), 3);
        assert_eq!(directives[0].arguments, vec!["a"]);
        assert_eq!(directives[1].arguments, vec!["b"]);
        assert_eq!(directives[2].arguments, vec!["a"]);
    }

    #[test]
    fn test_parse_skips_empty_name() {
        assert!(parse("@").is_empty());
        assert!(parse("@(a, b)").is_empty());
    }

    #[test]
    fn test_parse_template_followed_by_directive() {
        let text = "\
// @templater(id => X, {
//     fn {{name}}() {}
//     // nested
// })
// @after(1)";
        let directives = parse(text);

        assert_eq!(directives.len(), 2);
        let templater = &directives[0];
        assert_eq!(templater.name, "templater");
        assert_eq!(templater.arguments, vec!["id => X"]);
        assert_eq!(templater.param("id"), Some("X"));
        assert_eq!(
            templater.template.as_deref(),
            Some("fn {{name}}() {}\n// nested")
        );
        assert_eq!(directives[1].name, "after");
        assert_eq!(directives[1].line, 5);
    }

    #[test]
    fn test_parse_template_false_terminator_is_content() {
        let text = "\
@templater({
first
})
not a directive
})
@next";
        let directives = parse(text);

        assert_eq!(directives.len(), 2);
        assert_eq!(
            directives[0].template.as_deref(),
            Some("first\n})\nnot a directive")
        );
        assert_eq!(directives[1].name, "next");
    }

    #[test]
    fn test_parse_terminator_confirmed_across_blank_lines() {
        let directives = parse("@templater({\nbody\n})\n\n   \n@next");
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].template.as_deref(), Some("body"));

        let directives = parse("/**\n * @templater({\n *   body\n * })\n */");
        assert_eq!(directives[0].template.as_deref(), Some("body"));
    }

    #[test]
    fn test_parse_unconfirmed_terminator_keeps_blank_lines() {
        let directives = parse("@t({\na\n})\n\nb\n})");
        assert_eq!(directives[0].template.as_deref(), Some("a\n})\n\nb"));
    }

    #[test]
    fn test_parse_template_terminated_by_end_of_input() {
        let directives = parse("@templater(a, {\nbody\n})");

        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].arguments, vec!["a"]);
        assert_eq!(directives[0].template.as_deref(), Some("body"));
    }

    #[test]
    fn test_parse_unterminated_template_keeps_buffer() {
        let directives = parse("@templater({\nline one\n\nline two");

        assert_eq!(directives.len(), 1);
        assert_eq!(
            directives[0].template.as_deref(),
            Some("line one\n\nline two")
        );
    }

    #[test]
    fn test_parse_template_swallows_directives_until_terminator() {
        // Directive lines inside an open template are content.
        let directives = parse("@outer({\n@inner(x)\n})\n@tail");

        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].template.as_deref(), Some("@inner(x)"));
        assert_eq!(directives[1].name, "tail");
    }

    #[test]
    fn test_parse_block_comment_template() {
        let text = "\
/**
 * @templater(file => out.rs, {
 *   struct {{name}}Builder;
 * })
 * @done
 */";
        let directives = parse(text);

        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].param("file"), Some("out.rs"));
        assert_eq!(
            directives[0].template.as_deref(),
            Some("struct {{name}}Builder;")
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "@a(1)\n@b(k => v, {\nx\n})\n@c";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_parse_lines_matches_parse() {
        let lines = ["// @a(1)", "// @b"];
        assert_eq!(parse_lines(lines), parse(&lines.join("\n")));
    }
}
