use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str,
};

use log::{debug, error};
use quick_xml::{Reader, escape::unescape, events::BytesStart, events::Event};

use crate::error::ParsingError;

/// An opened element with its attributes, names stripped of any namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartElement {
    name: String,
    attributes: Vec<(String, String)>,
}

impl StartElement {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute, unescaped.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// One structural event of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlToken {
    Start(StartElement),
    End(String),
    /// Character data. A run of text may be split over several tokens.
    Text(String),
}

/// A forward-only cursor over the tokens of one document.
///
/// Returns `Ok(None)` once the stream is exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Option<XmlToken>, ParsingError>;
}

impl TokenSource for std::vec::IntoIter<XmlToken> {
    fn next_token(&mut self) -> Result<Option<XmlToken>, ParsingError> {
        Ok(self.next())
    }
}

/// [`TokenSource`] over a quick-xml pull reader.
///
/// Empty elements are reported as a start followed by an end, entity and character
/// references are resolved into text, and comments, processing instructions and
/// declarations are skipped.
pub struct XmlTokenReader<R> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlTokenReader<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buffer: Vec::with_capacity(1024),
        }
    }
}

impl<R: Read> XmlTokenReader<BufReader<R>> {
    /// Wraps `reader` in a [`BufReader`] of the given capacity.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self::new(BufReader::with_capacity(capacity, reader))
    }
}

impl XmlTokenReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(capacity: usize, path: P) -> Result<Self, ParsingError> {
        let file_path = path.as_ref();
        let file = File::open(file_path).map_err(|e| {
            error!("Failed to open XML file {}: {}", file_path.display(), e);
            ParsingError::Io(e)
        })?;
        debug!("Reading XML from {}", file_path.display());
        Ok(Self::with_capacity(capacity, file))
    }
}

fn start_element(event: &BytesStart<'_>) -> Result<StartElement, ParsingError> {
    let name = event.local_name();
    let mut element = StartElement::new(str::from_utf8(name.as_ref())?);
    for attr in event.attributes() {
        let attr = attr?;
        let key = attr.key.local_name();
        let value = unescape(str::from_utf8(&attr.value)?)?;
        element
            .attributes
            .push((str::from_utf8(key.as_ref())?.to_string(), value.into_owned()));
    }
    Ok(element)
}

impl<R: BufRead> TokenSource for XmlTokenReader<R> {
    fn next_token(&mut self) -> Result<Option<XmlToken>, ParsingError> {
        loop {
            self.buffer.clear();
            let token = match self.reader.read_event_into(&mut self.buffer)? {
                Event::Start(ref e) => XmlToken::Start(start_element(e)?),
                Event::End(ref e) => {
                    let name = e.local_name();
                    XmlToken::End(str::from_utf8(name.as_ref())?.to_string())
                }
                Event::Text(ref e) => XmlToken::Text(str::from_utf8(e)?.to_string()),
                Event::CData(ref e) => XmlToken::Text(str::from_utf8(e)?.to_string()),
                Event::GeneralRef(ref e) => {
                    let reference = format!("&{};", str::from_utf8(e)?);
                    XmlToken::Text(unescape(&reference)?.into_owned())
                }
                Event::Eof => return Ok(None),
                _ => continue,
            };
            return Ok(Some(token));
        }
    }
}
