use log::{debug, error};

use crate::{
    core::{
        coerce::CoerceContext,
        definition::{Assign, ClassDefinition, DefinitionRegistry, FieldBinding, XmlObject},
        path::XmlPath,
    },
    error::{MappingError, ParsingError},
    xml::{ParserOptions, StartElement, TokenSource, XmlToken},
};

/// One forward pass over a token stream.
///
/// The scan owns the absolute element depth; every object under construction keeps its own
/// path stack, relative to the object's element, on the call stack of [`Scan::build_object`].
pub(crate) struct Scan<'s> {
    tokens: &'s mut dyn TokenSource,
    registry: &'s DefinitionRegistry,
    options: &'s ParserOptions,
    depth: usize,
}

/// Text collected for an element-text binding until its element closes.
struct TextCapture<'d, T> {
    binding: &'d FieldBinding<T>,
    text: String,
}

impl<'s> Scan<'s> {
    pub(crate) fn new(
        tokens: &'s mut dyn TokenSource,
        registry: &'s DefinitionRegistry,
        options: &'s ParserOptions,
    ) -> Self {
        Self {
            tokens,
            registry,
            options,
            depth: 0,
        }
    }

    pub(crate) fn registry(&self) -> &'s DefinitionRegistry {
        self.registry
    }

    /// Number of elements currently open in the document.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    fn next(&mut self) -> Result<Option<XmlToken>, MappingError> {
        let token = self.tokens.next_token()?;
        match &token {
            Some(XmlToken::Start(_)) => self.depth += 1,
            Some(XmlToken::End(_)) => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        Ok(token)
    }

    /// Advances to the next element matching the document-level `node` path.
    ///
    /// `stack` holds the absolute element path and is shared between calls: the matched
    /// element stays on it and must be popped by the caller once the element is consumed.
    pub(crate) fn find_next(
        &mut self,
        node: &XmlPath,
        stack: &mut Vec<String>,
    ) -> Result<Option<StartElement>, MappingError> {
        loop {
            match self.next()? {
                Some(XmlToken::Start(element)) => {
                    stack.push(element.name().to_string());
                    if node.matches(stack.as_slice()) {
                        debug!("Found <{}> at depth {}", element.name(), self.depth);
                        return Ok(Some(element));
                    }
                }
                Some(XmlToken::End(_)) => {
                    stack.pop();
                }
                Some(XmlToken::Text(_)) => {}
                None => {
                    if let Some(open) = stack.last() {
                        error!("Document ended inside <{}>", open);
                        return Err(ParsingError::Truncated {
                            element: open.clone(),
                        }
                        .into());
                    }
                    return Ok(None);
                }
            }
        }
    }

    /// Consumes tokens until the element opened at `depth` is closed.
    pub(crate) fn skip_to_close(&mut self, depth: usize, element: &str) -> Result<(), MappingError> {
        while self.depth >= depth {
            if self.next()?.is_none() {
                error!("Document ended inside <{}>", element);
                return Err(ParsingError::Truncated {
                    element: element.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Builds a `T` from the element whose start token was just consumed, reading up to and
    /// including its end token. Returns the instance and the number of values assigned.
    pub(crate) fn build_object<T: XmlObject>(
        &mut self,
        definition: &ClassDefinition<T>,
        start: &StartElement,
    ) -> Result<(T, usize), MappingError> {
        let mut instance = T::default();
        let mut stack: Vec<String> = Vec::new();
        let mut captures: Vec<Option<TextCapture<'_, T>>> = Vec::new();

        let mut assigned = self.apply_attributes(definition, &stack, start, &mut instance)?;
        let mut own_text = definition.resolve(&stack).map(|binding| TextCapture {
            binding,
            text: String::new(),
        });

        loop {
            let Some(token) = self.next()? else {
                error!("Document ended inside <{}>", start.name());
                return Err(ParsingError::Truncated {
                    element: start.name().to_string(),
                }
                .into());
            };

            match token {
                XmlToken::Start(element) => {
                    stack.push(element.name().to_string());
                    assigned += self.apply_attributes(definition, &stack, &element, &mut instance)?;

                    let capture = match definition.resolve(&stack) {
                        Some(binding) => match binding.assign() {
                            Assign::Child(child) => {
                                if child.build(&mut instance, self, &element)? {
                                    assigned += 1;
                                }
                                // The child consumed the element's end token.
                                stack.pop();
                                continue;
                            }
                            Assign::Value(_) => Some(TextCapture {
                                binding,
                                text: String::new(),
                            }),
                        },
                        None => None,
                    };
                    captures.push(capture);
                }
                XmlToken::Text(chunk) => {
                    let capture = if stack.is_empty() {
                        own_text.as_mut()
                    } else {
                        captures.last_mut().and_then(Option::as_mut)
                    };
                    if let Some(capture) = capture {
                        capture.text.push_str(&chunk);
                    }
                }
                XmlToken::End(_) => {
                    if stack.is_empty() {
                        if let Some(capture) = own_text.take() {
                            assigned +=
                                self.assign_text(&capture, start, &stack, &mut instance)?;
                        }
                        return Ok((instance, assigned));
                    }
                    if let Some(Some(capture)) = captures.pop() {
                        assigned += self.assign_text(&capture, start, &stack, &mut instance)?;
                    }
                    stack.pop();
                }
            }
        }
    }

    fn apply_attributes<T>(
        &self,
        definition: &ClassDefinition<T>,
        stack: &[String],
        element: &StartElement,
        instance: &mut T,
    ) -> Result<usize, MappingError> {
        let mut assigned = 0;
        for (binding, name) in definition.attributes_at(stack) {
            if let Some(value) = element.attribute(name) {
                assigned += self.assign_value(binding, value, instance, || {
                    format!("{}/@{}", location(element, stack), name)
                })?;
            }
        }
        Ok(assigned)
    }

    fn assign_text<T>(
        &self,
        capture: &TextCapture<'_, T>,
        start: &StartElement,
        stack: &[String],
        instance: &mut T,
    ) -> Result<usize, MappingError> {
        self.assign_value(capture.binding, &capture.text, instance, || {
            location(start, stack)
        })
    }

    fn assign_value<T>(
        &self,
        binding: &FieldBinding<T>,
        raw: &str,
        instance: &mut T,
        location: impl FnOnce() -> String,
    ) -> Result<usize, MappingError> {
        let Assign::Value(set) = binding.assign() else {
            return Ok(0);
        };
        let raw = if self.options.trim_text {
            raw.trim()
        } else {
            raw
        };
        let ctx = CoerceContext {
            date_format: &self.options.date_format,
        };
        match set(instance, raw, &ctx) {
            Ok(true) => Ok(1),
            Ok(false) => Ok(0),
            Err(source) => Err(ParsingError::ValueFormat {
                path: location(),
                source,
            }
            .into()),
        }
    }
}

/// Human readable position of a value: the object's element followed by the relative stack.
fn location(start: &StartElement, stack: &[String]) -> String {
    if stack.is_empty() {
        start.name().to_string()
    } else {
        format!("{}/{}", start.name(), stack.join("/"))
    }
}

/// Builds the first element matching the node path of `T`, then reads the rest of the
/// document so that trailing malformed content is still reported.
pub(crate) fn build_root<T: XmlObject>(
    scan: &mut Scan<'_>,
    definition: &ClassDefinition<T>,
) -> Result<T, MappingError> {
    let mut stack = Vec::new();
    let Some(start) = scan.find_next(definition.node_path(), &mut stack)? else {
        error!(
            "No element matching {} found for {}",
            definition.node_path(),
            definition.type_name()
        );
        return Err(ParsingError::RootNotFound {
            path: definition.node_path().to_string(),
        }
        .into());
    };

    let (root, assigned) = scan.build_object(definition, &start)?;
    stack.pop();
    debug!(
        "Built {} from <{}> ({} values)",
        definition.type_name(),
        start.name(),
        assigned
    );

    while let Some(extra) = scan.find_next(definition.node_path(), &mut stack)? {
        // Later matches are not part of the result; only well-formedness matters here.
        stack.pop();
        let depth = scan.depth();
        scan.skip_to_close(depth, extra.name())?;
    }
    Ok(root)
}
