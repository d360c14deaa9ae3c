use std::fmt;

/// A declared tag path, relative to the element that encloses the binding.
///
/// Anchored paths (`"a/b"`) must equal the current path stack; descendant paths (`"//a/b"`)
/// match whenever the stack ends with their segments, at any depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlPath {
    segments: Vec<String>,
    descendant: bool,
}

/// A declared path split into its element part and, for attribute bindings, the attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPath {
    pub element: XmlPath,
    pub attribute: Option<String>,
}

impl XmlPath {
    /// The path of the enclosing element itself.
    pub fn own_element() -> Self {
        Self {
            segments: Vec::new(),
            descendant: false,
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_descendant(&self) -> bool {
        self.descendant
    }

    pub fn is_own_element(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true when the given stack satisfies this path.
    pub fn matches<S: AsRef<str>>(&self, stack: &[S]) -> bool {
        if self.descendant {
            stack.len() >= self.segments.len()
                && self.segments_equal(&stack[stack.len() - self.segments.len()..])
        } else {
            stack.len() == self.segments.len() && self.segments_equal(stack)
        }
    }

    /// Returns true when `self` is anchored and a strict prefix of the anchored path `other`.
    pub(crate) fn is_strict_prefix_of(&self, other: &XmlPath) -> bool {
        !self.descendant
            && !other.descendant
            && self.segments.len() < other.segments.len()
            && self.segments_equal(&other.segments[..self.segments.len()])
    }

    fn segments_equal<S: AsRef<str>>(&self, stack: &[S]) -> bool {
        self.segments
            .iter()
            .zip(stack)
            .all(|(segment, name)| segment == name.as_ref())
    }

    /// Parses a declared path into its element path and optional trailing attribute.
    pub(crate) fn parse(raw: &str) -> Result<ParsedPath, &'static str> {
        let (descendant, body) = match raw.strip_prefix("//") {
            Some(rest) if rest.is_empty() => return Err("descendant path names no element"),
            Some(rest) => (true, rest),
            None if raw.starts_with('/') => return Err("path must be relative or start with //"),
            None => (false, raw),
        };

        if body.is_empty() {
            return Ok(ParsedPath {
                element: XmlPath::own_element(),
                attribute: None,
            });
        }

        let parts: Vec<&str> = body.split('/').collect();
        let last = parts.len() - 1;
        let mut segments = Vec::with_capacity(parts.len());
        let mut attribute = None;

        for (idx, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                return Err("empty path segment");
            }
            match part.strip_prefix('@') {
                Some(_) if idx != last => return Err("attribute must be the last segment"),
                Some("") => return Err("empty attribute name"),
                Some(name) => attribute = Some(name.to_string()),
                None => segments.push(part.to_string()),
            }
        }

        if descendant && segments.is_empty() {
            return Err("descendant path names no element");
        }

        Ok(ParsedPath {
            element: XmlPath {
                segments,
                descendant,
            },
            attribute,
        })
    }
}

impl fmt::Display for XmlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descendant {
            f.write_str("//")?;
        }
        if self.segments.is_empty() {
            return f.write_str(".");
        }
        f.write_str(&self.segments.join("/"))
    }
}

/// Picks the binding to activate among the candidates whose path matches: the shortest
/// declared path wins, the first declared one on ties.
pub(crate) fn select_shortest<'b, B>(
    candidates: impl Iterator<Item = &'b B>,
    path_of: impl Fn(&B) -> &XmlPath,
) -> Option<&'b B>
where
    B: 'b,
{
    let mut best: Option<&'b B> = None;
    for candidate in candidates {
        let replace = match best {
            Some(current) => path_of(candidate).len() < path_of(current).len(),
            None => true,
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}
