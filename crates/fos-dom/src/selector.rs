//! Selector Matching
//!
//! A compact subset of CSS selectors: comma separated lists of compound
//! selectors built from a type (or `*`), `#id`, `.class`, `[attr]`,
//! `[attr="value"]` and `:not(...)`. Combinators are not supported.

use std::fmt;
use std::str::FromStr;

use crate::ElementData;

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("unexpected end of selector")]
    UnexpectedEnd,
    #[error("unsupported pseudo-class :{0}")]
    UnsupportedPseudo(String),
}

/// Attribute condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrSelector {
    /// `[name]`
    Exists(String),
    /// `[name="value"]`
    Equals(String, String),
}

impl AttrSelector {
    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Exists(name) => element.has_attr(name),
            Self::Equals(name, value) => element.get_attr(name) == Some(value.as_str()),
        }
    }
}

/// Compound selector (all conditions must hold)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
    pub negations: Vec<Compound>,
}

impl Compound {
    /// Universal selector `*`
    pub fn any() -> Self {
        Self::default()
    }

    /// Type selector
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Add an `[attr]` condition
    pub fn with_attr(mut self, name: &str) -> Self {
        self.attrs.push(AttrSelector::Exists(name.to_ascii_lowercase()));
        self
    }

    /// Add an `[attr="value"]` condition
    pub fn with_attr_value(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .push(AttrSelector::Equals(name.to_ascii_lowercase(), value.to_string()));
        self
    }

    /// Add a `:not(...)` condition
    pub fn not(mut self, negated: Compound) -> Self {
        self.negations.push(negated);
        self
    }

    /// Check an element against this compound
    pub fn matches(&self, element: &ElementData) -> bool {
        if self.tag.as_ref().is_some_and(|t| *t != element.tag) {
            return false;
        }
        if self.id.as_ref().is_some_and(|id| element.id() != Some(id.as_str())) {
            return false;
        }
        self.classes.iter().all(|c| element.has_class(c))
            && self.attrs.iter().all(|a| a.matches(element))
            && !self.negations.iter().any(|n| n.matches(element))
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.negations.is_empty();
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if bare => f.write_str("*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for attr in &self.attrs {
            match attr {
                AttrSelector::Exists(name) => write!(f, "[{name}]")?,
                AttrSelector::Equals(name, value) => write!(f, "[{name}=\"{value}\"]")?,
            }
        }
        for negated in &self.negations {
            write!(f, ":not({negated})")?;
        }
        Ok(())
    }
}

/// Comma separated selector list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Compound>);

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser { input, pos: 0 }.list().map(Self)
    }

    /// Build from compounds
    pub fn from_compounds(compounds: impl IntoIterator<Item = Compound>) -> Self {
        Self(compounds.into_iter().collect())
    }

    /// Check if any compound matches
    pub fn matches(&self, element: &ElementData) -> bool {
        self.0.iter().any(|c| c.matches(element))
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(SelectorError::Unexpected { found, offset: self.pos }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    fn ident(&mut self) -> Result<&str, SelectorError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            self.bump();
        }
        if start == self.pos {
            return match self.peek() {
                Some(found) => Err(SelectorError::Unexpected { found, offset: self.pos }),
                None => Err(SelectorError::UnexpectedEnd),
            };
        }
        Ok(&self.input[start..self.pos])
    }

    fn value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                loop {
                    match self.bump() {
                        Some(c) if c == quote => break,
                        Some(_) => {}
                        None => return Err(SelectorError::UnexpectedEnd),
                    }
                }
                Ok(self.input[start..self.pos - quote.len_utf8()].to_string())
            }
            _ => self.ident().map(str::to_string),
        }
    }

    fn list(&mut self) -> Result<Vec<Compound>, SelectorError> {
        let mut out = Vec::new();
        loop {
            self.skip_ws();
            if self.peek().is_none() {
                return Err(SelectorError::Empty);
            }
            out.push(self.compound()?);
            self.skip_ws();
            match self.peek() {
                None => return Ok(out),
                Some(',') => {
                    self.bump();
                }
                Some(found) => return Err(SelectorError::Unexpected { found, offset: self.pos }),
            }
        }
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => {
                self.bump();
            }
            Some(c) if c.is_alphabetic() => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.ident()?.to_string());
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?.to_string());
                }
                Some('[') => {
                    self.bump();
                    self.skip_ws();
                    let name = self.ident()?.to_ascii_lowercase();
                    self.skip_ws();
                    let attr = if self.peek() == Some('=') {
                        self.bump();
                        self.skip_ws();
                        let value = self.value()?;
                        self.skip_ws();
                        AttrSelector::Equals(name, value)
                    } else {
                        AttrSelector::Exists(name)
                    };
                    self.expect(']')?;
                    compound.attrs.push(attr);
                }
                Some(':') => {
                    self.bump();
                    let pseudo = self.ident()?.to_ascii_lowercase();
                    if pseudo != "not" {
                        return Err(SelectorError::UnsupportedPseudo(pseudo));
                    }
                    self.expect('(')?;
                    self.skip_ws();
                    let negated = self.compound()?;
                    self.skip_ws();
                    self.expect(')')?;
                    compound.negations.push(negated);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return match self.peek() {
                Some(found) => Err(SelectorError::Unexpected { found, offset: self.pos }),
                None => Err(SelectorError::UnexpectedEnd),
            };
        }
        Ok(compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
        let mut el = ElementData::new(tag);
        for (name, value) in attrs {
            el.attrs.set_attribute(name, value);
        }
        el
    }

    #[test]
    fn test_parse_simple() {
        let list = SelectorList::parse("div").unwrap();
        assert_eq!(list.0, vec![Compound::tag("div")]);

        let list: SelectorList = "#main.a.b".parse().unwrap();
        assert_eq!(list.0[0].id.as_deref(), Some("main"));
        assert_eq!(list.0[0].classes, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_not_and_attrs() {
        let list = SelectorList::parse(r#"button:not([disabled]), [tabindex]:not([tabindex=""])"#).unwrap();
        assert_eq!(
            list.0,
            vec![
                Compound::tag("button").not(Compound::any().with_attr("disabled")),
                Compound::any()
                    .with_attr("tabindex")
                    .not(Compound::any().with_attr_value("tabindex", "")),
            ]
        );
    }

    #[test]
    fn test_display_round_trip() {
        let source = r#"input:not([disabled]), [tabindex]:not([tabindex=""])"#;
        let list = SelectorList::parse(source).unwrap();
        assert_eq!(list.to_string(), source);
        assert_eq!(SelectorList::parse("*").unwrap().to_string(), "*");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(SelectorList::parse(""), Err(SelectorError::Empty));
        assert_eq!(SelectorList::parse("a,"), Err(SelectorError::Empty));
        assert_eq!(SelectorList::parse("[x"), Err(SelectorError::UnexpectedEnd));
        assert_eq!(
            SelectorList::parse(":focus"),
            Err(SelectorError::UnsupportedPseudo("focus".into()))
        );
        assert!(matches!(
            SelectorList::parse("div span"),
            Err(SelectorError::Unexpected { found: 's', .. })
        ));
    }

    #[test]
    fn test_matching() {
        let list = SelectorList::parse(r#"button:not([disabled]), [tabindex]:not([tabindex=""])"#).unwrap();

        assert!(list.matches(&element("button", &[])));
        assert!(!list.matches(&element("button", &[("disabled", "")])));
        assert!(list.matches(&element("div", &[("tabindex", "0")])));
        assert!(!list.matches(&element("div", &[("tabindex", "")])));
        assert!(!list.matches(&element("div", &[])));
    }
}
