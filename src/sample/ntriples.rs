//! Line-based N-Triples reading
//!
//! One statement per line: subject, predicate and object separated by
//! whitespace and terminated by `.`. Subjects and objects may be IRIs or blank
//! nodes; objects may also be literals. Blank nodes are kept as their `_:label`
//! text. Language-tagged and plain literals become `xsd:string` literals.

use crate::output::{Term, Triple};
use thiserror::Error;

/// Datatype of plain and language-tagged literals
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Errors raised while reading N-Triples
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NTriplesError {
    /// The statement is not terminated by `.`
    #[error("Line {line}: statement must end with '.'")]
    MissingTerminator {
        /// One-based line number
        line: usize,
    },

    /// A string literal is not closed
    #[error("Line {line}: unterminated string literal")]
    UnterminatedLiteral {
        /// One-based line number
        line: usize,
    },

    /// The statement does not have exactly three terms
    #[error("Line {line}: expected 3 terms, found {found}")]
    TermCount {
        /// One-based line number
        line: usize,
        /// Number of terms found
        found: usize,
    },

    /// A term is not valid in its position
    #[error("Line {line}: invalid {position} '{token}'")]
    InvalidTerm {
        /// One-based line number
        line: usize,
        /// `subject`, `predicate` or `object`
        position: &'static str,
        /// Offending term
        token: String,
    },
}

/// Parse one line; blank lines and comments yield `Ok(None)`
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<Triple>, NTriplesError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let Some(body) = line.strip_suffix('.') else {
        return Err(NTriplesError::MissingTerminator { line: line_number });
    };

    let tokens = tokenize(body.trim(), line_number)?;
    let [subject, predicate, object] = &tokens[..] else {
        return Err(NTriplesError::TermCount { line: line_number, found: tokens.len() });
    };

    let invalid = |position: &'static str, token: &str| NTriplesError::InvalidTerm {
        line: line_number,
        position,
        token: token.to_string(),
    };

    let subject = parse_resource(subject).ok_or_else(|| invalid("subject", subject))?;
    let predicate = parse_iri(predicate).ok_or_else(|| invalid("predicate", predicate))?;
    let object = if object.starts_with('"') {
        parse_literal(object).ok_or_else(|| invalid("object", object))?
    } else {
        Term::Iri(parse_resource(object).ok_or_else(|| invalid("object", object))?)
    };

    Ok(Some(Triple { subject, predicate, object }))
}

/// Parse a whole document, stopping at the first malformed line
pub fn parse_document(content: &str) -> Result<Vec<Triple>, NTriplesError> {
    let mut triples = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if let Some(triple) = parse_line(line, idx + 1)? {
            triples.push(triple);
        }
    }
    Ok(triples)
}

fn tokenize(body: &str, line_number: usize) -> Result<Vec<String>, NTriplesError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in body.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }

        match c {
            '\\' if in_quotes => {
                escaped = true;
                current.push(c);
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(NTriplesError::UnterminatedLiteral { line: line_number });
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_iri(token: &str) -> Option<String> {
    let iri = token.strip_prefix('<')?.strip_suffix('>')?;
    (!iri.is_empty() && !iri.contains(&['<', '>', '"', ' '][..])).then(|| iri.to_string())
}

fn parse_resource(token: &str) -> Option<String> {
    match token.strip_prefix("_:") {
        Some(label) if !label.is_empty() => Some(token.to_string()),
        Some(_) => None,
        None => parse_iri(token),
    }
}

fn parse_literal(token: &str) -> Option<Term> {
    let rest = token.strip_prefix('"')?;

    let mut escaped = false;
    let mut end = None;
    for (idx, c) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            end = Some(idx);
            break;
        }
    }
    let end = end?;

    let value = unescape(&rest[..end])?;
    let suffix = &rest[end + 1..];
    let datatype = if suffix.is_empty() || suffix.starts_with('@') {
        XSD_STRING.to_string()
    } else {
        parse_iri(suffix.strip_prefix("^^")?)?
    };

    Some(Term::Literal { value, datatype })
}

fn unescape(raw: &str) -> Option<String> {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => value.push('\\'),
            '"' => value.push('"'),
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'u' => value.push(hex_char(&mut chars, 4)?),
            'U' => value.push(hex_char(&mut chars, 8)?),
            _ => return None,
        }
    }
    Some(value)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::vocab;

    #[test]
    fn test_parse_iri_statement() {
        let triple = parse_line(
            "<http://x/f> <http://geovocab.org/geometry#geometry> <http://x/g> .",
            1,
        )
        .unwrap()
        .unwrap();
        assert_eq!(triple.subject, "http://x/f");
        assert_eq!(triple.predicate, vocab::GEOVOCAB_GEOMETRY);
        assert_eq!(triple.object, Term::iri("http://x/g"));
    }

    #[test]
    fn test_parse_typed_literal_with_spaces() {
        let line = "<http://x/g> <http://www.opengis.net/ont/geosparql#asWKT> \
                    \"POINT(13.7 51.05)\"^^<http://www.opengis.net/ont/geosparql#wktLiteral> .";
        let triple = parse_line(line, 1).unwrap().unwrap();
        assert_eq!(triple.object, Term::wkt("POINT(13.7 51.05)"));
    }

    #[test]
    fn test_blank_nodes_and_plain_literals() {
        let triple = parse_line("_:b0 <http://x/p> \"caf\\u00E9 \\\"x\\\"\"@fr .", 1).unwrap().unwrap();
        assert_eq!(triple.subject, "_:b0");
        assert_eq!(triple.object, Term::literal("café \"x\"", XSD_STRING));

        let triple = parse_line("<http://x/s> <http://x/p> _:b1.", 1).unwrap().unwrap();
        assert_eq!(triple.object, Term::iri("_:b1"));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line("   ", 1), Ok(None));
        assert_eq!(parse_line("# comment", 1), Ok(None));
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            parse_line("<http://x/s> <http://x/p> <http://x/o>", 4),
            Err(NTriplesError::MissingTerminator { line: 4 })
        );
        assert_eq!(
            parse_line("<http://x/s> <http://x/p> \"open .", 2),
            Err(NTriplesError::UnterminatedLiteral { line: 2 })
        );
        assert_eq!(
            parse_line("<http://x/s> <http://x/p> .", 3),
            Err(NTriplesError::TermCount { line: 3, found: 2 })
        );
        assert!(matches!(
            parse_line("\"s\" <http://x/p> <http://x/o> .", 5),
            Err(NTriplesError::InvalidTerm { line: 5, position: "subject", .. })
        ));
        assert!(matches!(
            parse_line("<http://x/s> _:p <http://x/o> .", 6),
            Err(NTriplesError::InvalidTerm { line: 6, position: "predicate", .. })
        ));
    }

    #[test]
    fn test_parse_document_counts_lines() {
        let content = "<http://x/a> <http://x/p> <http://x/b> .\n\n<http://x/a> <http://x/p> oops .\n";
        assert_eq!(
            parse_document(content),
            Err(NTriplesError::InvalidTerm {
                line: 3,
                position: "object",
                token: "oops".to_string()
            })
        );
    }
}
