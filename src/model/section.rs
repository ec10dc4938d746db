//! Section: a named, ordered collection of settings

use crate::error::{ConfigError, Result};
use crate::model::{Comment, Setting};
use std::fmt;

/// A named group of [`Setting`]s.
///
/// Settings keep their insertion order. Names are compared ASCII
/// case-insensitively and duplicates are permitted; by-name lookup returns
/// the first match, [`Section::settings_named`] returns all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    settings: Vec<Setting>,
    comment: Option<Comment>,
    pre_comments: Vec<Comment>,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Vec::new(),
            comment: None,
            pre_comments: Vec::new(),
        }
    }

    /// The section's name. Name identity is ASCII case-insensitive.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The inline comment, if any.
    pub fn comment(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }

    /// Set or clear the inline comment.
    pub fn set_comment(&mut self, comment: Option<Comment>) {
        self.comment = comment;
    }

    /// Comment lines attached above this section.
    pub fn pre_comments(&self) -> &[Comment] {
        &self.pre_comments
    }

    /// Append a pre-comment.
    pub fn add_pre_comment(&mut self, comment: Comment) {
        self.pre_comments.push(comment);
    }

    /// Replace all pre-comments.
    pub fn set_pre_comments(&mut self, comments: Vec<Comment>) {
        self.pre_comments = comments;
    }

    /// Number of settings in this section.
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// True if the section holds no settings.
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Append a setting. Duplicate names are allowed.
    pub fn add(&mut self, setting: Setting) {
        self.settings.push(setting);
    }

    /// True if a setting with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.find_setting(name).is_some()
    }

    /// The setting at a position. Positional access never creates.
    pub fn setting_at(&self, index: usize) -> Option<&Setting> {
        self.settings.get(index)
    }

    /// Mutable access to the setting at a position.
    pub fn setting_at_mut(&mut self, index: usize) -> Option<&mut Setting> {
        self.settings.get_mut(index)
    }

    /// The first setting with the given name, creating an empty one if no
    /// match exists.
    pub fn setting(&mut self, name: &str) -> &mut Setting {
        // Two-pass lookup keeps the borrow checker satisfied.
        if let Some(index) = self.position_of(name) {
            return &mut self.settings[index];
        }
        self.settings.push(Setting::new(name));
        let last = self.settings.len() - 1;
        &mut self.settings[last]
    }

    /// The first setting with the given name, without creating one.
    pub fn find_setting(&self, name: &str) -> Option<&Setting> {
        self.settings
            .iter()
            .find(|setting| setting.name().eq_ignore_ascii_case(name))
    }

    /// Mutable variant of [`Section::find_setting`].
    pub fn find_setting_mut(&mut self, name: &str) -> Option<&mut Setting> {
        self.settings
            .iter_mut()
            .find(|setting| setting.name().eq_ignore_ascii_case(name))
    }

    /// All settings with the given name, in insertion order.
    pub fn settings_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Setting> {
        self.settings
            .iter()
            .filter(move |setting| setting.name().eq_ignore_ascii_case(name))
    }

    /// Remove the first setting with the given name and return it.
    pub fn remove(&mut self, name: &str) -> Result<Setting> {
        match self.position_of(name) {
            Some(index) => Ok(self.settings.remove(index)),
            None => Err(ConfigError::NotFound {
                kind: "setting",
                name: name.to_string(),
            }),
        }
    }

    /// Remove the setting at a position and return it.
    pub fn remove_at(&mut self, index: usize) -> Result<Setting> {
        if index >= self.settings.len() {
            return Err(ConfigError::IndexOutOfRange {
                index,
                len: self.settings.len(),
            });
        }
        Ok(self.settings.remove(index))
    }

    /// Remove every setting with the given name; returns how many were
    /// removed.
    pub fn remove_all_named(&mut self, name: &str) -> usize {
        let before = self.settings.len();
        self.settings
            .retain(|setting| !setting.name().eq_ignore_ascii_case(name));
        before - self.settings.len()
    }

    /// Remove all settings.
    pub fn clear(&mut self) {
        self.settings.clear();
    }

    /// Iterate over the settings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.settings.iter()
    }

    /// Mutable iteration over the settings.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Setting> {
        self.settings.iter_mut()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.settings
            .iter()
            .position(|setting| setting.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}
