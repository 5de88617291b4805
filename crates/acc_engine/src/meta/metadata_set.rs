use alloc::string::ToString;
use alloc::sync::Arc;

use acc_host::{Tag, Value};

use crate::ConfigError;
use crate::format::{FormatTable, NamingFormat};
use crate::meta::{MutatorRef, OptionKind};

// -----------------------------------------------------------------------------
// Setting

/// One entry of a [`MetadataSet`].
///
/// When `explicit` is `false` the value is the kind's neutral default.
#[derive(Debug, Clone, Default)]
pub struct Setting<T> {
    pub explicit: bool,
    pub value: T,
}

impl<T: Clone> Setting<T> {
    #[inline]
    const fn new(value: T) -> Self {
        Self {
            explicit: true,
            value,
        }
    }

    #[inline]
    fn or(&self, parent: &Self) -> Self {
        if self.explicit {
            self.clone()
        } else {
            parent.clone()
        }
    }
}

// -----------------------------------------------------------------------------
// OptionValue

/// The value of one option kind, as returned by [`MetadataSet::get`].
#[derive(Debug, Clone)]
pub enum OptionValue {
    Bool(bool),
    Mutator(Option<MutatorRef>),
    Format(Option<Arc<dyn NamingFormat>>),
}

// -----------------------------------------------------------------------------
// MetadataSet

/// Settings of every [`OptionKind`], each with an explicit flag.
///
/// An explicitly disabled setting (`Get(false)`, `Mutator(null)`) is
/// distinct from an unset one: only the latter is filled from a parent by
/// [`overlay_onto`](Self::overlay_onto).
///
/// # Examples
///
/// ```
/// use acc_engine::format::FormatTable;
/// use acc_engine::meta::{MetadataSet, OptionKind};
/// use acc_host::Tag;
///
/// let formats = FormatTable::new();
/// let class = MetadataSet::from_tags(&[Tag::get(true), Tag::set(true)], "class `Foo`", &formats).unwrap();
/// let property = MetadataSet::from_tags(&[Tag::set(false)], "property `Foo::bar`", &formats).unwrap();
///
/// let effective = property.overlay_onto(&class);
/// assert!(effective.readable());
/// assert!(!effective.writable());
/// assert!(effective.is_explicit(OptionKind::Writable));
/// assert!(!effective.is_explicit(OptionKind::Deletable));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetadataSet {
    readable: Setting<bool>,
    writable: Setting<bool>,
    deletable: Setting<bool>,
    immutable: Setting<bool>,
    case_insensitive: Setting<bool>,
    mutator: Setting<Option<MutatorRef>>,
    format: Setting<Option<Arc<dyn NamingFormat>>>,
}

impl MetadataSet {
    /// Creates a set where nothing is explicit.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from metadata tags.
    ///
    /// Tag identifiers are matched ignoring case; unrecognized tags are
    /// skipped and a later tag of the same kind overrides an earlier one.
    /// `target` names the tagged item in error messages.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::SwitchDisabled`] for `Immutable(false)` and `ICase(false)`.
    /// - [`ConfigError::UnknownFormat`] when `Format` names an unregistered format.
    /// - [`ConfigError::InvalidTagArgument`] for malformed arguments.
    pub fn from_tags(tags: &[Tag], target: &str, formats: &FormatTable) -> Result<Self, ConfigError> {
        let mut set = Self::new();

        for tag in tags {
            let Some(kind) = OptionKind::from_tag(tag.name()) else {
                log::trace!("ignored tag `{tag}` on {target}");
                continue;
            };

            let invalid = |reason| ConfigError::InvalidTagArgument {
                target: target.to_string(),
                tag: tag.to_string(),
                reason,
            };

            match kind {
                OptionKind::Readable | OptionKind::Writable | OptionKind::Deletable => {
                    let enabled = Setting::new(switch(tag.args()).ok_or_else(|| invalid(SWITCH))?);
                    match kind {
                        OptionKind::Readable => set.readable = enabled,
                        OptionKind::Writable => set.writable = enabled,
                        _ => set.deletable = enabled,
                    }
                }
                OptionKind::Immutable | OptionKind::CaseInsensitive => {
                    match switch(tag.args()) {
                        Some(true) => {}
                        Some(false) => {
                            return Err(ConfigError::SwitchDisabled {
                                target: target.to_string(),
                                option: kind,
                            });
                        }
                        None => return Err(invalid(SWITCH)),
                    }
                    if kind == OptionKind::Immutable {
                        set.immutable = Setting::new(true);
                    } else {
                        set.case_insensitive = Setting::new(true);
                    }
                }
                OptionKind::Mutator => {
                    let [arg] = tag.args() else {
                        return Err(invalid("expects exactly one argument"));
                    };
                    set.mutator = Setting::new(MutatorRef::parse(arg).map_err(invalid)?);
                }
                OptionKind::NamingFormat => {
                    let Some((Value::Str(name), args)) = tag.args().split_first() else {
                        return Err(invalid("expects a format name"));
                    };
                    let format = formats.create(name, args).ok_or_else(|| ConfigError::UnknownFormat {
                        target: target.to_string(),
                        format: name.clone(),
                    })?;
                    set.format = Setting::new(Some(format));
                }
            }
        }

        Ok(set)
    }

    /// Fills every kind left unset in `self` from `parent`.
    ///
    /// Entries are copied whole, explicit flag included.
    pub fn overlay_onto(&self, parent: &MetadataSet) -> MetadataSet {
        MetadataSet {
            readable: self.readable.or(&parent.readable),
            writable: self.writable.or(&parent.writable),
            deletable: self.deletable.or(&parent.deletable),
            immutable: self.immutable.or(&parent.immutable),
            case_insensitive: self.case_insensitive.or(&parent.case_insensitive),
            mutator: self.mutator.or(&parent.mutator),
            format: self.format.or(&parent.format),
        }
    }

    /// Sets the naming format unless one is explicit already.
    pub fn with_default_format(mut self, format: Arc<dyn NamingFormat>) -> Self {
        if !self.format.explicit {
            self.format = Setting::new(Some(format));
        }
        self
    }

    /// Returns the explicit flag and value of a kind.
    pub fn get(&self, kind: OptionKind) -> (bool, OptionValue) {
        let flag = |s: &Setting<bool>| (s.explicit, OptionValue::Bool(s.value));

        match kind {
            OptionKind::Readable => flag(&self.readable),
            OptionKind::Writable => flag(&self.writable),
            OptionKind::Deletable => flag(&self.deletable),
            OptionKind::Immutable => flag(&self.immutable),
            OptionKind::CaseInsensitive => flag(&self.case_insensitive),
            OptionKind::Mutator => (
                self.mutator.explicit,
                OptionValue::Mutator(self.mutator.value.clone()),
            ),
            OptionKind::NamingFormat => (
                self.format.explicit,
                OptionValue::Format(self.format.value.clone()),
            ),
        }
    }

    /// Returns `true` if the kind was set explicitly.
    #[inline]
    pub fn is_explicit(&self, kind: OptionKind) -> bool {
        self.get(kind).0
    }

    #[inline]
    pub fn readable(&self) -> bool {
        self.readable.value
    }

    #[inline]
    pub fn writable(&self) -> bool {
        self.writable.value
    }

    #[inline]
    pub fn deletable(&self) -> bool {
        self.deletable.value
    }

    #[inline]
    pub fn immutable(&self) -> bool {
        self.immutable.value
    }

    #[inline]
    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive.value
    }

    #[inline]
    pub fn mutator(&self) -> Option<&MutatorRef> {
        self.mutator.value.as_ref()
    }

    #[inline]
    pub fn format(&self) -> Option<&Arc<dyn NamingFormat>> {
        self.format.value.as_ref()
    }
}

const SWITCH: &str = "expects no argument or a single bool";

/// `[]` is `true`, `[bool]` is that bool.
fn switch(args: &[Value]) -> Option<bool> {
    match args {
        [] => Some(true),
        [Value::Bool(b)] => Some(*b),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Tests
