//! Two-way mapping between a section and a structured object's members

use crate::convert::ConfigValue;
use crate::error::Result;
use crate::model::{Options, Section, Setting};

type ApplyFn<T> = Box<dyn Fn(&mut T, &Setting, &Options) -> Result<()>>;
type CaptureFn<T> = Box<dyn Fn(&T, &mut Setting, &Options) -> Result<()>>;

/// One bindable member of a type: a setting name plus the closures that
/// move a value in and out of the member.
pub struct Field<T> {
    name: &'static str,
    apply: ApplyFn<T>,
    capture: CaptureFn<T>,
}

impl<T> Field<T> {
    /// A scalar member bound through the setting's scalar codec.
    pub fn scalar<V>(
        name: &'static str,
        get: impl Fn(&T) -> V + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> Self
    where
        V: ConfigValue,
    {
        Self {
            name,
            apply: Box::new(move |target, setting, options| {
                let value = setting.value::<V>(options)?;
                set(target, value);
                Ok(())
            }),
            capture: Box::new(move |source, setting, options| {
                setting.set_value(&get(source), options)
            }),
        }
    }

    /// An array member bound through the setting's array codec.
    ///
    /// On apply, the member is replaced wholesale with the decoded vector,
    /// so its length always matches the decoded array. A setting whose value
    /// is not array-shaped leaves the member untouched.
    pub fn array<V>(
        name: &'static str,
        get: impl Fn(&T) -> Vec<V> + 'static,
        set: impl Fn(&mut T, Vec<V>) + 'static,
    ) -> Self
    where
        V: ConfigValue,
    {
        Self {
            name,
            apply: Box::new(move |target, setting, options| {
                if let Some(values) = setting.array_value::<V>(options)? {
                    set(target, values);
                }
                Ok(())
            }),
            capture: Box::new(move |source, setting, options| {
                setting.set_array(&get(source), options)
            }),
        }
    }

    /// The setting name this field binds to.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A type that exposes its bindable members.
pub trait Bindable: Sized {
    /// The member table the binder iterates over.
    fn fields() -> Vec<Field<Self>>;
}

/// Copies values between a [`Section`] and a [`Bindable`] object.
///
/// Members can be excluded from binding through a name predicate; exclusion
/// is a policy of the binder instance, not of the bound type.
#[derive(Default)]
pub struct Binder {
    exclude: Option<Box<dyn Fn(&str) -> bool>>,
}

impl Binder {
    /// A binder that binds every declared field.
    pub fn new() -> Self {
        Self::default()
    }

    /// A binder that skips fields whose name matches the predicate.
    pub fn with_exclusion(predicate: impl Fn(&str) -> bool + 'static) -> Self {
        Self {
            exclude: Some(Box::new(predicate)),
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        match &self.exclude {
            Some(predicate) => predicate(name),
            None => false,
        }
    }

    /// Decode matching settings into the target's members.
    ///
    /// Members with no same-named setting are left untouched.
    pub fn bind_into<T: Bindable>(
        &self,
        section: &Section,
        target: &mut T,
        options: &Options,
    ) -> Result<()> {
        for field in T::fields() {
            if self.is_excluded(field.name) {
                continue;
            }
            if let Some(setting) = section.find_setting(field.name) {
                (field.apply)(target, setting, options)?;
            }
        }
        Ok(())
    }

    /// Create or overwrite settings from the source's members.
    pub fn capture_from<T: Bindable>(
        &self,
        section: &mut Section,
        source: &T,
        options: &Options,
    ) -> Result<()> {
        for field in T::fields() {
            if self.is_excluded(field.name) {
                continue;
            }
            let setting = section.setting(field.name);
            (field.capture)(source, setting, options)?;
        }
        Ok(())
    }

    /// Build a new section holding the source's members.
    pub fn section_from_object<T: Bindable>(
        &self,
        name: &str,
        source: &T,
        options: &Options,
    ) -> Result<Section> {
        let mut section = Section::new(name);
        self.capture_from(&mut section, source, options)?;
        Ok(section)
    }
}
