//! Configuration: the top-level document, an ordered collection of sections

use crate::binary;
use crate::convert::ConfigValue;
use crate::encoding::{self, TextEncoding};
use crate::error::{ConfigError, Result};
use crate::model::{Options, Section, Setting};
use crate::parser;
use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// A configuration document.
///
/// Sections keep their insertion order; duplicate names are permitted and
/// independently addressable. The document owns its [`Options`] context, so
/// two configurations can parse and convert with fully independent
/// delimiter sets, format policies, and converter registries.
#[derive(Debug)]
pub struct Configuration {
    sections: Vec<Section>,
    options: Options,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    /// Create an empty document with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create an empty document with the given options.
    pub fn with_options(options: Options) -> Self {
        Self {
            sections: Vec::new(),
            options,
        }
    }

    /// The options this document is parsed, rendered, and converted against.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable access to the options.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    // ---- text loading ----

    /// Parse a document from an in-memory string with default options.
    pub fn from_str(source: &str) -> Result<Self> {
        Self::from_str_with(source, Options::default())
    }

    /// Parse a document from an in-memory string with the given options.
    pub fn from_str_with(source: &str, options: Options) -> Result<Self> {
        let sections = parser::parse(source, &options)?;
        Ok(Self { sections, options })
    }

    /// Load a document from a file; the text encoding is detected from the
    /// byte order mark, defaulting to UTF-8.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        let source = encoding::decode(&bytes, None)?;
        Self::from_str(&source)
    }

    /// Load a document from a file with an explicit text encoding.
    pub fn from_file_with_encoding(
        path: impl AsRef<Path>,
        text_encoding: TextEncoding,
    ) -> Result<Self> {
        let bytes = fs::read(path)?;
        let source = encoding::decode(&bytes, Some(text_encoding))?;
        Self::from_str(&source)
    }

    /// Load a document from a byte stream. Pass `None` to detect the
    /// encoding from the byte order mark.
    pub fn from_reader(
        reader: &mut impl Read,
        text_encoding: Option<TextEncoding>,
    ) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let source = encoding::decode(&bytes, text_encoding)?;
        Self::from_str(&source)
    }

    // ---- text saving ----

    /// Render the document to its text form.
    ///
    /// Pre-comments and inline comments are re-emitted only while the
    /// corresponding options flags are enabled, so a document loaded with
    /// comment capture on can be saved without them by flipping the flags.
    pub fn save_to_string(&self) -> String {
        let mut out = String::new();
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            if self.options.parse_pre_comments() {
                for comment in section.pre_comments() {
                    out.push_str(&comment.to_string());
                    out.push('\n');
                }
            }
            out.push_str(&section.to_string());
            if self.options.parse_inline_comments() {
                if let Some(comment) = section.comment() {
                    out.push(' ');
                    out.push_str(&comment.to_string());
                }
            }
            out.push('\n');

            for setting in section.iter() {
                if self.options.parse_pre_comments() {
                    for comment in setting.pre_comments() {
                        out.push_str(&comment.to_string());
                        out.push('\n');
                    }
                }
                out.push_str(&setting.to_string());
                if self.options.parse_inline_comments() {
                    if let Some(comment) = setting.comment() {
                        out.push(' ');
                        out.push_str(&comment.to_string());
                    }
                }
                out.push('\n');
            }
        }
        out
    }

    /// Save the document to a file as UTF-8 text.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.save_to_string())?;
        Ok(())
    }

    /// Save the document to a writer as UTF-8 text.
    pub fn save_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(self.save_to_string().as_bytes())?;
        Ok(())
    }

    // ---- binary loading and saving ----

    /// Load a document from its binary form.
    pub fn from_binary_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = fs::File::open(path)?;
        Self::from_binary_reader(&mut file)
    }

    /// Load a document from a binary stream.
    pub fn from_binary_reader(reader: &mut impl Read) -> Result<Self> {
        let sections = binary::read_document(reader)?;
        Ok(Self {
            sections,
            options: Options::default(),
        })
    }

    /// Save the document in its binary form.
    pub fn save_to_binary_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = fs::File::create(path)?;
        self.save_to_binary_writer(&mut file)
    }

    /// Save the document to a binary stream.
    pub fn save_to_binary_writer(&self, writer: &mut impl Write) -> Result<()> {
        binary::write_document(writer, &self.sections)
    }

    // ---- section collection ----

    /// Number of sections in the document.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if the document holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Append a section. Duplicate names are allowed.
    pub fn add(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// True if a section with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.find_section(name).is_some()
    }

    /// The section at a position. Positional access never creates.
    pub fn section_at(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Mutable access to the section at a position.
    pub fn section_at_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    /// The first section with the given name, creating an empty one if no
    /// match exists.
    pub fn section(&mut self, name: &str) -> &mut Section {
        if let Some(index) = self.position_of(name) {
            return &mut self.sections[index];
        }
        self.sections.push(Section::new(name));
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// The first section with the given name, without creating one.
    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.name().eq_ignore_ascii_case(name))
    }

    /// Mutable variant of [`Configuration::find_section`].
    pub fn find_section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|section| section.name().eq_ignore_ascii_case(name))
    }

    /// All sections with the given name, in insertion order.
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections
            .iter()
            .filter(move |section| section.name().eq_ignore_ascii_case(name))
    }

    /// Remove the first section with the given name and return it.
    pub fn remove(&mut self, name: &str) -> Result<Section> {
        match self.position_of(name) {
            Some(index) => Ok(self.sections.remove(index)),
            None => Err(ConfigError::NotFound {
                kind: "section",
                name: name.to_string(),
            }),
        }
    }

    /// Remove the section at a position and return it.
    pub fn remove_at(&mut self, index: usize) -> Result<Section> {
        if index >= self.sections.len() {
            return Err(ConfigError::IndexOutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        Ok(self.sections.remove(index))
    }

    /// Remove every section with the given name; returns how many were
    /// removed.
    pub fn remove_all_named(&mut self, name: &str) -> usize {
        let before = self.sections.len();
        self.sections
            .retain(|section| !section.name().eq_ignore_ascii_case(name));
        before - self.sections.len()
    }

    /// Remove all sections.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Iterate over the sections in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Mutable iteration over the sections.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.sections.iter_mut()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.name().eq_ignore_ascii_case(name))
    }

    // ---- typed accessors ----

    /// Decode a setting as a scalar of type `T`.
    ///
    /// Unlike by-name tree access this never creates entries; an absent
    /// section or setting is [`ConfigError::NotFound`].
    pub fn value<T: ConfigValue>(&self, section: &str, setting: &str) -> Result<T> {
        self.existing_setting(section, setting)?.value(&self.options)
    }

    /// Decode a setting as an array with elements of type `T`.
    pub fn array_value<T: ConfigValue>(
        &self,
        section: &str,
        setting: &str,
    ) -> Result<Option<Vec<T>>> {
        self.existing_setting(section, setting)?
            .array_value(&self.options)
    }

    /// Encode a scalar into a setting, creating the section and setting if
    /// they do not exist yet.
    pub fn set_value<T: ConfigValue>(
        &mut self,
        section: &str,
        setting: &str,
        value: &T,
    ) -> Result<()> {
        // Field-level borrows so the options stay readable while the tree
        // is borrowed mutably.
        let options = &self.options;
        Self::vivify(&mut self.sections, section, setting).set_value(value, options)
    }

    /// Encode a slice as an array setting, creating the section and setting
    /// if they do not exist yet.
    pub fn set_array<T: ConfigValue>(
        &mut self,
        section: &str,
        setting: &str,
        values: &[T],
    ) -> Result<()> {
        let options = &self.options;
        Self::vivify(&mut self.sections, section, setting).set_array(values, options)
    }

    fn existing_setting(&self, section: &str, setting: &str) -> Result<&Setting> {
        let section = self
            .find_section(section)
            .ok_or_else(|| ConfigError::NotFound {
                kind: "section",
                name: section.to_string(),
            })?;
        section
            .find_setting(setting)
            .ok_or_else(|| ConfigError::NotFound {
                kind: "setting",
                name: setting.to_string(),
            })
    }

    fn vivify<'a>(
        sections: &'a mut Vec<Section>,
        section: &str,
        setting: &str,
    ) -> &'a mut Setting {
        let index = match sections
            .iter()
            .position(|s| s.name().eq_ignore_ascii_case(section))
        {
            Some(index) => index,
            None => {
                sections.push(Section::new(section));
                sections.len() - 1
            }
        };
        sections[index].setting(setting)
    }
}

/// Document equality compares the section tree only; the options context is
/// a conversion environment, not document content.
impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.save_to_string())
    }
}
