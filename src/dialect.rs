//! Translation of the action dialect used by template files into MiniJinja.
//!
//! Template files are written with Go-style actions: `{{ .Name }}`,
//! `{{ ToCamelCase .Name }}`, `{{ .Name | printf "%s-api" }}`,
//! `{{ if ne .Port -1 }} ... {{ else }} ... {{ end }}` and
//! `{{/* comments */}}`. Only `{{` opens an action. Everything else,
//! including `{%` and `{#`, is plain text and passes through unchanged.
//!
//! Each action is rewritten into MiniJinja syntax using the delimiters of
//! [`syntax`], which keeps `{{ }}` for expressions and moves blocks and
//! comments to `{{% %}}` and `{{/* */}}`.

use minijinja::syntax::SyntaxConfig;
use minijinja::{Error, ErrorKind};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

pub const BLOCK_START: &str = "{{%";
pub const BLOCK_END: &str = "%}}";
pub const COMMENT_START: &str = "{{/*";
pub const COMMENT_END: &str = "*/}}";

/// One action, with the optional `{{- ` and ` -}}` trim markers.
static ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(-\s)?(.*?)(\s-)?\}\}").unwrap());

/// Delimiters matching the output of [`translate_actions`].
pub fn syntax() -> Result<SyntaxConfig, Error> {
    SyntaxConfig::builder()
        .block_delimiters(BLOCK_START, BLOCK_END)
        .variable_delimiters("{{", "}}")
        .comment_delimiters(COMMENT_START, COMMENT_END)
        .build()
}

fn unsupported(action: &str, reason: &str) -> Error {
    Error::new(
        ErrorKind::SyntaxError,
        format!(
            "unsupported template action '{{{{{}}}}}': {reason}",
            action.trim()
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Field path without the leading dot, e.g. `Name`
    Field(String),
    Ident(String),
    /// String or number, already spelled the MiniJinja way
    Literal(String),
    Pipe,
    Open,
    Close,
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&f) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn string(&mut self) -> Result<Token, Error> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some('"') => return Ok(Token::Literal(self.src[start..self.pos].to_string())),
                Some(_) => {}
                None => return Err(unsupported(self.src, "unterminated string")),
            }
        }
    }

    fn raw_string(&mut self) -> Result<Token, Error> {
        self.bump();
        let raw = self.eat_while(|c| c != '`');
        if self.bump() != Some('`') {
            return Err(unsupported(self.src, "unterminated raw string"));
        }
        let quoted = serde_json::to_string(raw)
            .map_err(|e| Error::new(ErrorKind::SyntaxError, e.to_string()))?;
        Ok(Token::Literal(quoted))
    }

    fn number(&mut self) -> Token {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        self.eat_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
        Token::Literal(self.src[start..self.pos].to_string())
    }

    fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            let signed = matches!(c, '-' | '+')
                && self.peek_second().is_some_and(|n| n.is_ascii_digit());
            let starts_number = c.is_ascii_digit() || signed;
            let starts_field = c == '.'
                && self
                    .peek_second()
                    .is_some_and(|n| n.is_alphabetic() || n == '_');
            let token = match c {
                c if c.is_whitespace() => {
                    self.bump();
                    continue;
                }
                '|' => {
                    self.bump();
                    Token::Pipe
                }
                '(' => {
                    self.bump();
                    Token::Open
                }
                ')' => {
                    self.bump();
                    Token::Close
                }
                '"' => self.string()?,
                '`' => self.raw_string()?,
                '.' if starts_field => {
                    self.bump();
                    let path = self.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
                    Token::Field(path.to_string())
                }
                '.' => return Err(unsupported(self.src, "the bare dot is not supported")),
                '$' => return Err(unsupported(self.src, "variables are not supported")),
                '\'' => {
                    return Err(unsupported(
                        self.src,
                        "character constants are not supported",
                    ))
                }
                _ if starts_number => self.number(),
                c if c.is_alphabetic() || c == '_' => {
                    let name = self.eat_while(|c| c.is_alphanumeric() || c == '_');
                    Token::Ident(name.to_string())
                }
                c => {
                    return Err(unsupported(
                        self.src,
                        &format!("unexpected character '{c}'"),
                    ))
                }
            };
            tokens.push(token);
        }
        Ok(tokens)
    }
}

enum Term {
    Function(String),
    Value(String),
}

impl Term {
    /// A function name in argument position is a call without arguments.
    fn into_value(self) -> String {
        match self {
            Term::Function(name) => format!("{name}()"),
            Term::Value(value) => value,
        }
    }
}

/// Turns a pipeline into a MiniJinja expression. A piped value becomes the
/// last argument of the next command.
struct Parser<'a> {
    action: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(action: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            action,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn error(&self, reason: &str) -> Error {
        unsupported(self.action, reason)
    }

    /// Parses the whole token slice as one pipeline.
    fn expression(mut self) -> Result<String, Error> {
        let expr = self.pipeline()?;
        if self.pos < self.tokens.len() {
            return Err(self.error("unexpected ')'"));
        }
        Ok(expr)
    }

    fn pipeline(&mut self) -> Result<String, Error> {
        let mut value = self.command(None)?;
        while self.peek() == Some(&Token::Pipe) {
            self.advance();
            value = self.command(Some(value))?;
        }
        Ok(value)
    }

    fn command(&mut self, piped: Option<String>) -> Result<String, Error> {
        let mut terms = Vec::new();
        while let Some(token) = self.peek() {
            if matches!(token, Token::Pipe | Token::Close) {
                break;
            }
            terms.push(self.term()?);
        }

        let mut terms = terms.into_iter();
        match terms.next() {
            None => Err(self.error("missing value")),
            Some(Term::Function(name)) => {
                let mut args: Vec<String> = terms.map(Term::into_value).collect();
                args.extend(piped);
                self.call(&name, args)
            }
            Some(Term::Value(value)) => {
                if terms.next().is_some() || piped.is_some() {
                    return Err(self.error("only functions take arguments"));
                }
                Ok(value)
            }
        }
    }

    fn term(&mut self) -> Result<Term, Error> {
        match self.advance() {
            Some(Token::Field(path)) => Ok(Term::Value(path.clone())),
            Some(Token::Literal(literal)) => Ok(Term::Value(literal.clone())),
            Some(Token::Ident(ident)) => Ok(match ident.as_str() {
                "true" | "false" => Term::Value(ident.clone()),
                "nil" => Term::Value("none".to_string()),
                _ => Term::Function(ident.clone()),
            }),
            Some(Token::Open) => {
                let inner = self.pipeline()?;
                if self.advance() != Some(&Token::Close) {
                    return Err(self.error("unclosed '('"));
                }
                Ok(Term::Value(format!("({inner})")))
            }
            _ => Err(self.error("unexpected token")),
        }
    }

    fn call(&self, name: &str, args: Vec<String>) -> Result<String, Error> {
        let binary = |op: &str| match args.as_slice() {
            [a, b] => Ok(format!("({a} {op} {b})")),
            _ => Err(self.error(&format!("{name} takes two arguments"))),
        };
        match name {
            "eq" => match args.split_first() {
                Some((first, rest)) if !rest.is_empty() => {
                    let checks: Vec<String> =
                        rest.iter().map(|b| format!("{first} == {b}")).collect();
                    Ok(format!("({})", checks.join(" or ")))
                }
                _ => Err(self.error("eq takes at least two arguments")),
            },
            "ne" => binary("!="),
            "lt" => binary("<"),
            "le" => binary("<="),
            "gt" => binary(">"),
            "ge" => binary(">="),
            "and" | "or" if !args.is_empty() => {
                let separator = format!(" {name} ");
                Ok(format!("({})", args.join(separator.as_str())))
            }
            "not" | "len" => match args.as_slice() {
                [a] if name == "not" => Ok(format!("(not {a})")),
                [a] => Ok(format!("({a} | length)")),
                _ => Err(self.error(&format!("{name} takes one argument"))),
            },
            _ => Ok(format!("{name}({})", args.join(", "))),
        }
    }
}

fn trim_marks(left: bool, right: bool) -> (&'static str, &'static str) {
    (if left { "-" } else { "" }, if right { "-" } else { "" })
}

/// Translates the body of one action.
fn translate_action(left_trim: bool, body: &str, right_trim: bool) -> Result<String, Error> {
    let (l, r) = trim_marks(left_trim, right_trim);
    let trimmed = body.trim();

    if trimmed.starts_with("/*") {
        if !trimmed.ends_with("*/") || trimmed.len() < 4 {
            return Err(unsupported(body, "unclosed comment"));
        }
        return Ok(format!("{COMMENT_START}{l} {r}{COMMENT_END}"));
    }

    let block = |statement: String| -> Result<String, Error> {
        Ok(format!("{BLOCK_START}{l} {statement} {r}{BLOCK_END}"))
    };
    let tokens = Lexer { src: body, pos: 0 }.tokenize()?;

    if let [Token::Ident(keyword), rest @ ..] = tokens.as_slice() {
        match keyword.as_str() {
            "if" => {
                let condition = Parser::new(body, rest).expression()?;
                return block(format!("if {condition}"));
            }
            "else" => {
                return match rest {
                    [] => block("else".to_string()),
                    [Token::Ident(next), condition @ ..] if next == "if" => {
                        let condition = Parser::new(body, condition).expression()?;
                        block(format!("elif {condition}"))
                    }
                    _ => Err(unsupported(body, "malformed else")),
                };
            }
            "end" if rest.is_empty() => return block("endif".to_string()),
            "end" => return Err(unsupported(body, "end takes no arguments")),
            "range" | "with" | "define" | "template" | "block" | "break" | "continue" => {
                let reason = format!("{keyword} actions are not supported");
                return Err(unsupported(body, &reason));
            }
            _ => {}
        }
    }

    let expr = Parser::new(body, &tokens).expression()?;
    Ok(format!("{{{{{l} {expr} {r}}}}}"))
}

/// Rewrites every action in `source` into MiniJinja syntax. Text outside of
/// actions is copied verbatim.
///
/// # Errors
/// * A syntax error for actions outside the supported subset: variables,
///   `range`, `with` and template definitions
pub fn translate_actions(source: &str) -> Result<Cow<'_, str>, Error> {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;

    for caps in ACTION.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let body = caps.get(2).map_or("", |m| m.as_str());
        output.push_str(&source[last..whole.start()]);
        output.push_str(&translate_action(
            caps.get(1).is_some(),
            body,
            caps.get(3).is_some(),
        )?);
        last = whole.end();
    }

    if last == 0 {
        return Ok(Cow::Borrowed(source));
    }
    output.push_str(&source[last..]);
    Ok(Cow::Owned(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(source: &str) -> String {
        translate_actions(source).unwrap().into_owned()
    }

    #[test]
    fn test_fields_and_prefix_calls() {
        assert_eq!(translate("{{.Name}}"), "{{ Name }}");
        assert_eq!(translate("{{- .Port -}}"), "{{- Port -}}");
        assert_eq!(
            translate("{{ToCamelCase .Name}}"),
            "{{ ToCamelCase(Name) }}"
        );
        assert_eq!(
            translate("{{ SkipFirstPart \"a-b-c\" }}"),
            "{{ SkipFirstPart(\"a-b-c\") }}"
        );
    }

    #[test]
    fn test_pipes_append_the_piped_value() {
        assert_eq!(
            translate("{{ .Name | ToPascalCase }}"),
            "{{ ToPascalCase(Name) }}"
        );
        assert_eq!(
            translate("{{ .Name | printf \"%s-%d\" | ToCamelCase }}"),
            "{{ ToCamelCase(printf(\"%s-%d\", Name)) }}"
        );
        assert_eq!(
            translate("{{ printf \"%s\" (ToCamelCase .Name) }}"),
            "{{ printf(\"%s\", (ToCamelCase(Name))) }}"
        );
    }

    #[test]
    fn test_control_actions() {
        assert_eq!(
            translate("{{if ne .Port -1}}a{{else if eq .Port 0 1}}b{{else}}c{{end}}"),
            "{{% if (Port != -1) %}}a{{% elif (Port == 0 or Port == 1) %}}b\
             {{% else %}}c{{% endif %}}"
        );
        assert_eq!(
            translate("{{- if and .Name (gt .Port 0) -}}"),
            "{{%- if (Name and ((Port > 0))) -%}}"
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(translate("{{/* note */}}"), "{{/* */}}");
        assert_eq!(translate("{{- /* note */ -}}"), "{{/*- -*/}}");
    }

    #[test]
    fn test_raw_strings_and_literals() {
        assert_eq!(translate("{{ `a\"b` }}"), "{{ \"a\\\"b\" }}");
        assert_eq!(translate("{{ nil }}"), "{{ none }}");
        assert_eq!(translate("{{ -3 }}"), "{{ -3 }}");
    }

    #[test]
    fn test_text_outside_actions_is_untouched() {
        assert!(matches!(
            translate_actions("a {% b %} {# c #}").unwrap(),
            Cow::Borrowed(_)
        ));
        assert_eq!(translate("${#X} {{.Name}} {%d}"), "${#X} {{ Name }} {%d}");
    }

    #[test]
    fn test_unsupported_actions() {
        for action in [
            "{{ range .Items }}",
            "{{ with .Name }}",
            "{{ $x := .Name }}",
            "{{ . }}",
            "{{ .Name .Port }}",
            "{{ end .Name }}",
            "{{ }}",
            "{{ (ToCamelCase .Name }}",
            "{{ \"open }}",
        ] {
            let err = translate_actions(action).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::SyntaxError, "{action}");
        }
    }
}
