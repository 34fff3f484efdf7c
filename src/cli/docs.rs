//! Documentation content for the searchql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Precedence,
    Fields,
    Ordering,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "precedence" | "operators" | "ops" => Some(Self::Precedence),
            "fields" | "field" => Some(Self::Fields),
            "ordering" | "order" | "match" => Some(Self::Ordering),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SEARCHQL DOCUMENTATION

searchql compiles free-text search queries into backend filters. A query is a
list of words and quoted phrases, optionally combined with prefixes, keywords,
field scopes and parentheses.

DOCUMENTATION CATEGORIES

  syntax            Words, phrases, prefixes, keywords and groups
  precedence        How OR, adjacency, AND and prefixes bind
  fields            Restricting words to a single field
  ordering          The order parameter and match(id, ...) directives
  errors            What each compile error means

QUICK REFERENCE

  harry potter           Either word
  "harry potter"         Exact phrase
  -film  +harry          Exclude / require
  harry AND potter       Both words
  harry OR potter        Either word
  title:harry            Field scope
  (harry OR ron) -film   Grouping

Run 'searchql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Precedence) => Ok(PRECEDENCE_DOC),
        Some(DocCategory::Fields) => Ok(FIELDS_DOC),
        Some(DocCategory::Ordering) => Ok(ORDERING_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

WORDS
  Any run of characters other than whitespace, quotes and parentheses.
  Words are matched case-insensitively against the default fields.

    harry
    150064

PHRASES
  Double-quoted words, matched as an exact ordered run of words.
  A backslash escapes the next character inside a phrase.

    "harry potter"
    "say \"hi\""

PREFIXES
  -word      the document must NOT contain the word
  +word      the document must contain the word
  A prefix must touch its operand: "- film" is an error.

KEYWORDS
  AND, OR    case-insensitive; "and" and "Or" are keywords too

GROUPS
  (harry OR ron) -film
"#;

const PRECEDENCE_DOC: &str = r#"PRECEDENCE

From loosest to tightest:

  1. OR
  2. adjacency (words next to each other)
  3. AND
  4. prefixes (-, +), field scopes and groups

Adjacent words are alternatives. Prefixed operands in the same run are joined
to the alternatives by AND:

  harry potter             or(harry, potter)
  harry potter -150064     and(or(harry, potter), not(150064))
  +harry potter            and(harry, potter)
  a b AND c                or(a, and(b, c))
  a OR b c                 or(a, or(b, c))

Use 'searchql check <query>' to see how a query is read.
"#;

const FIELDS_DOC: &str = r#"FIELDS

  field:operand

Restricts a word, phrase or group to one field. The field name is resolved
through the configured aliases (for example title -> fields.title.value).
When fields are nested, the innermost one applies.

  title:harry
  title:"harry potter"
  title:(harry OR ron)
  -body:film

With strict_fields enabled, unknown field names are rejected.
"#;

const ORDERING_DOC: &str = r#"ORDERING

The order parameter is either a direction or a match directive.

  asc, desc          sort direction for --sort (anything else is asc)
  match(2001,1001)   documents with these identifiers come first, in this order

Identifiers are compared against the configured key_field (default: nid).
Repeated identifiers keep their first position. Documents not listed follow
in natural order, or by identifier when remainder = "by_key".

  searchql search "harry" --order "match(2001,1001)" --input docs.json
"#;

const ERRORS_DOC: &str = r#"ERRORS

Every error reports the character offset where it was detected.

  unterminated phrase    a '"' without its closing quote
  invalid character      a control character in the query
  unexpected token       a token that cannot appear here, such as a stray ')'
  missing operand        '-', '+', 'field:', AND or OR with nothing after it
  empty group            '()'
  unclosed group         '(' without its ')'
  exclusion of an exclusion   '--film' or '-(-film)'
  empty phrase           '""'
  empty query            nothing but whitespace
  nesting too deep       more than 128 groups or field scopes inside each other
  malformed order        a match(...) directive that cannot be read
"#;
