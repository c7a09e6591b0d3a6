//! Content rendering for template-classified files.
//! Wraps a MiniJinja environment that exposes the naming transforms and
//! the `Name` and `Port` fields of the template parameters.
use crate::dialect::{syntax, translate_actions};
use crate::error::{Error, Result};
use crate::naming::{
    skip_first_and_last_part, skip_first_part, skip_last_part, to_camel_case, to_pascal_case,
};
use crate::processor::TemplateParameters;
use minijinja::value::{Rest, Value};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders template source against the given parameters.
    ///
    /// # Errors
    /// * Returns the engine's [`minijinja::Error`] on invalid syntax or an
    ///   undefined field or function, so callers can attach the file path.
    fn render(
        &self,
        template: &str,
        parameters: &TemplateParameters,
    ) -> std::result::Result<String, minijinja::Error>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

fn register_transform(env: &mut Environment<'static>, name: &'static str, f: fn(&str) -> String) {
    env.add_function(name, move |value: String| f(&value));
    env.add_filter(name, move |value: String| f(&value));
}

/// `printf` with the `%s`, `%v`, `%d`, `%q` and `%%` verbs.
fn printf(format: String, args: Rest<Value>) -> std::result::Result<String, minijinja::Error> {
    let mut out = String::with_capacity(format.len());
    let mut args = args.iter();
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let verb = chars.next().ok_or_else(|| {
            minijinja::Error::new(ErrorKind::InvalidOperation, "printf format ends with '%'")
        })?;
        if verb == '%' {
            out.push('%');
            continue;
        }
        let Some(arg) = args.next() else {
            out.push_str(&format!("%!{verb}(MISSING)"));
            continue;
        };
        match verb {
            's' | 'v' => out.push_str(&arg.to_string()),
            'd' => match arg.as_i64() {
                Some(n) => out.push_str(&n.to_string()),
                None => {
                    return Err(minijinja::Error::new(
                        ErrorKind::InvalidOperation,
                        format!("printf %d expects an integer, got '{arg}'"),
                    ))
                }
            },
            'q' => {
                let quoted = serde_json::to_string(&arg.to_string()).map_err(|e| {
                    minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string())
                })?;
                out.push_str(&quoted);
            }
            other => {
                return Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("unsupported printf verb '%{other}'"),
                ))
            }
        }
    }
    Ok(out)
}

/// `print`: operands are concatenated, with a space between two operands
/// when neither is a string.
fn print(args: Rest<Value>) -> String {
    let mut out = String::new();
    let mut previous_is_string = true;
    for (i, arg) in args.iter().enumerate() {
        let is_string = arg.as_str().is_some();
        if i > 0 && !is_string && !previous_is_string {
            out.push(' ');
        }
        out.push_str(&arg.to_string());
        previous_is_string = is_string;
    }
    out
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the naming transforms registered as both
    /// functions and filters.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the action delimiters are rejected
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        let delimiters = syntax().map_err(|e| Error::TemplateError(e.to_string()))?;
        env.set_syntax(delimiters);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        register_transform(&mut env, "ToPascalCase", to_pascal_case);
        register_transform(&mut env, "ToCamelCase", to_camel_case);
        register_transform(&mut env, "SkipFirstPart", skip_first_part);
        register_transform(&mut env, "SkipLastPart", skip_last_part);
        register_transform(&mut env, "SkipFirstAndLastPart", skip_first_and_last_part);
        env.add_function("printf", printf);
        env.add_function("print", print);

        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        parameters: &TemplateParameters,
    ) -> std::result::Result<String, minijinja::Error> {
        let source = translate_actions(template)?;
        self.env.render_str(&source, parameters)
    }
}

/// Renders `content` with a fresh [`MiniJinjaRenderer`].
///
/// # Errors
/// * `Error::TemplateError` on invalid syntax or undefined references
pub fn render(parameters: &TemplateParameters, content: &str) -> Result<String> {
    MiniJinjaRenderer::new()?
        .render(content, parameters)
        .map_err(|e| Error::TemplateError(e.to_string()))
}
