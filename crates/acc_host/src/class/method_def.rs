use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::class::Modifiers;
use crate::{Instance, Value};

// -----------------------------------------------------------------------------
// Method bodies

/// Body of an instance method: receives the receiver and positional arguments.
pub type InstanceMethod = Arc<dyn Fn(&mut Instance, Vec<Value>) -> Value + Send + Sync>;

/// Body of a static method: receives positional arguments only.
pub type StaticMethod = Arc<dyn Fn(Vec<Value>) -> Value + Send + Sync>;

/// The callable part of a [`MethodDef`].
#[derive(Clone)]
pub enum MethodBody {
    Instance(InstanceMethod),
    Static(StaticMethod),
}

impl fmt::Debug for MethodBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("MethodBody::Instance"),
            Self::Static(_) => f.write_str("MethodBody::Static"),
        }
    }
}

// -----------------------------------------------------------------------------
// MethodDef

/// A method declared in a class body.
///
/// The `STATIC` modifier always agrees with the body kind.
///
/// # Examples
///
/// ```
/// use acc_host::{MethodDef, Value};
///
/// let method = MethodDef::public("getFooValue", |this, _args| this.field_or_null("foo"));
/// assert!(!method.modifiers().is_static());
///
/// let method = MethodDef::public_static("upper", |args| {
///     let s = args.first().and_then(Value::as_str).unwrap_or_default();
///     Value::from(s.to_uppercase())
/// });
/// assert!(method.modifiers().is_static());
/// ```
#[derive(Debug, Clone)]
pub struct MethodDef {
    name: Arc<str>,
    modifiers: Modifiers,
    body: MethodBody,
}

impl MethodDef {
    /// Creates an instance method with the given visibility.
    ///
    /// A `STATIC` flag in `visibility` is dropped.
    pub fn instance<F>(name: &str, visibility: Modifiers, body: F) -> Self
    where
        F: Fn(&mut Instance, Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            modifiers: visibility.difference(Modifiers::STATIC),
            body: MethodBody::Instance(Arc::new(body)),
        }
    }

    /// Creates a static method with the given visibility.
    pub fn static_fn<F>(name: &str, visibility: Modifiers, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            modifiers: visibility.union(Modifiers::STATIC),
            body: MethodBody::Static(Arc::new(body)),
        }
    }

    #[inline]
    pub fn public<F>(name: &str, body: F) -> Self
    where
        F: Fn(&mut Instance, Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self::instance(name, Modifiers::PUBLIC, body)
    }

    #[inline]
    pub fn protected<F>(name: &str, body: F) -> Self
    where
        F: Fn(&mut Instance, Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self::instance(name, Modifiers::PROTECTED, body)
    }

    #[inline]
    pub fn private<F>(name: &str, body: F) -> Self
    where
        F: Fn(&mut Instance, Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self::instance(name, Modifiers::PRIVATE, body)
    }

    #[inline]
    pub fn public_static<F>(name: &str, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self::static_fn(name, Modifiers::PUBLIC, body)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    pub fn body(&self) -> &MethodBody {
        &self.body
    }

    /// Invokes the method.
    ///
    /// Static methods ignore the receiver.
    pub fn invoke(&self, receiver: &mut Instance, args: Vec<Value>) -> Value {
        match &self.body {
            MethodBody::Instance(body) => body(receiver, args),
            MethodBody::Static(body) => body(args),
        }
    }
}
