//! Type expression parser
//!
//! Parses textual annotations such as `Annotated[list[int], "ids"]`,
//! `Optional[str]`, `str | None` or `dict[str, Issue]` into `TypeAnnotation`.
//! Names that are not built in resolve against a `TypeRegistry`.

use serde_json::Value;

use crate::error::{Result, ToolwireError};

use super::annotation::TypeAnnotation;
use super::registry::TypeRegistry;

/// Deepest bracket nesting accepted in a type expression
const MAX_NESTING_DEPTH: usize = 64;

/// Parse a type expression
pub fn parse_type(input: &str, registry: &TypeRegistry) -> Result<TypeAnnotation> {
    let mut parser = TypeParser {
        src: input,
        pos: 0,
        depth: 0,
        registry,
    };
    let annotation = parser.parse_expr()?;
    parser.skip_ws();
    if parser.pos < parser.src.len() {
        return Err(parser.error(format!("unexpected trailing input '{}'", parser.rest())));
    }
    Ok(annotation)
}

struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    registry: &'a TypeRegistry,
}

impl<'a> TypeParser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn error(&self, message: impl Into<String>) -> ToolwireError {
        ToolwireError::parse(self.pos, message)
    }

    fn found(&self) -> String {
        match self.peek() {
            Some(c) => format!("'{}'", c),
            None => "end of input".to_string(),
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}', found {}", c, self.found())))
        }
    }

    fn parse_expr(&mut self) -> Result<TypeAnnotation> {
        if self.depth == MAX_NESTING_DEPTH {
            self.skip_ws();
            return Err(self.error(format!(
                "type expression nested deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        let result = self.parse_union();
        self.depth -= 1;
        result
    }

    fn parse_union(&mut self) -> Result<TypeAnnotation> {
        let mut members = vec![self.parse_term()?];
        while self.eat('|') {
            members.push(self.parse_term()?);
        }
        if members.len() == 1 {
            Ok(members.remove(0))
        } else {
            Ok(TypeAnnotation::union(members))
        }
    }

    fn parse_ident(&mut self) -> Result<(usize, &'a str)> {
        self.skip_ws();
        let start = self.pos;
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(rest.len());
        if len == 0 || rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error(format!("expected a type name, found {}", self.found())));
        }
        self.pos += len;
        Ok((start, &rest[..len]))
    }

    fn parse_term(&mut self) -> Result<TypeAnnotation> {
        let (start, name) = self.parse_ident()?;
        let name = name.strip_prefix("typing.").unwrap_or(name);

        match name {
            "str" => self.simple(TypeAnnotation::Str, name),
            "int" => self.simple(TypeAnnotation::Int, name),
            "float" => self.simple(TypeAnnotation::Float, name),
            "bool" => self.simple(TypeAnnotation::Bool, name),
            "None" => self.simple(TypeAnnotation::None, name),
            "Any" => self.simple(TypeAnnotation::Any, name),
            "list" | "List" => {
                self.expect('[')?;
                let inner = self.parse_expr()?;
                self.expect(']')?;
                Ok(TypeAnnotation::list(inner))
            }
            "dict" | "Dict" => {
                self.expect('[')?;
                let key = self.parse_expr()?;
                self.expect(',')?;
                let value = self.parse_expr()?;
                self.expect(']')?;
                Ok(TypeAnnotation::dict(key, value))
            }
            "Optional" => {
                self.expect('[')?;
                let inner = self.parse_expr()?;
                self.expect(']')?;
                Ok(TypeAnnotation::optional(inner))
            }
            "Union" => {
                self.expect('[')?;
                let mut members = vec![self.parse_expr()?];
                while self.eat(',') {
                    members.push(self.parse_expr()?);
                }
                self.expect(']')?;
                Ok(TypeAnnotation::union(members))
            }
            "Annotated" => {
                self.expect('[')?;
                let base = self.parse_expr()?;
                if !self.eat(',') {
                    return Err(self.error("Annotated requires at least one metadata element"));
                }
                let mut metadata = vec![self.parse_literal()?];
                while self.eat(',') {
                    metadata.push(self.parse_literal()?);
                }
                self.expect(']')?;
                Ok(TypeAnnotation::annotated(base, metadata))
            }
            other => match self.registry.lookup(other) {
                Some(annotation) => self.simple(annotation, other),
                None => Err(ToolwireError::parse(start, format!("unknown type '{}'", other))),
            },
        }
    }

    fn simple(&mut self, annotation: TypeAnnotation, name: &str) -> Result<TypeAnnotation> {
        self.skip_ws();
        if self.peek() == Some('[') {
            return Err(self.error(format!("type '{}' does not take parameters", name)));
        }
        Ok(annotation)
    }

    fn parse_literal(&mut self) -> Result<Value> {
        self.skip_ws();
        match self.peek() {
            Some('\'') => self.parse_single_quoted(),
            Some(_) => {
                let mut stream = serde_json::Deserializer::from_str(self.rest()).into_iter::<Value>();
                match stream.next() {
                    Some(Ok(value)) => {
                        self.pos += stream.byte_offset();
                        Ok(value)
                    }
                    Some(Err(e)) => Err(self.error(format!("invalid metadata literal: {}", e))),
                    None => Err(self.error("expected a metadata literal")),
                }
            }
            None => Err(self.error("expected a metadata literal, found end of input")),
        }
    }

    fn parse_single_quoted(&mut self) -> Result<Value> {
        let start = self.pos;
        let body = &self.src[start + 1..];
        let mut out = String::new();
        let mut chars = body.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\'' => {
                    self.pos = start + 1 + i + 1;
                    return Ok(Value::String(out));
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                c => out.push(c),
            }
        }
        Err(ToolwireError::parse(start, "unterminated string literal"))
    }
}
