use core::fmt;
use std::borrow::Cow;

use thiserror::Error;

use crate::{ops::opt::Opt, sync::type_singleton::type_singleton};

pub type Message = Cow<'static, str>;

/// An [`Option`] that can carry a message explaining why the value is there or not.
///
/// Value and message are independent slots: an absent value may come with a message and a present
/// value may come without one.
/// Combinators never mutate the receiver and hand back a new or the same value.
/// The one exception is [`Opt::take`], which moves the value out and leaves the message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MsgOpt<T> {
    value: Option<T>,
    message: Option<Message>,
}
impl<T> MsgOpt<T> {
    #[must_use]
    pub const fn new(value: Option<T>, message: Option<Message>) -> Self {
        Self { value, message }
    }
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(None, None)
    }
    #[must_use]
    pub const fn of(value: T) -> Self {
        Self::new(Some(value), None)
    }
    #[must_use]
    pub const fn of_nullable(value: Option<T>) -> Self {
        Self::new(value, None)
    }
    /// Like [`Self::of`] for a source that may turn out to be empty
    pub fn try_of(value: Option<T>) -> Result<Self, MsgOptError> {
        let value = value.ok_or(MsgOptError::AbsentValue)?;
        Ok(Self::of(value))
    }
    pub fn from_opt(opt: impl Opt<T>) -> Self {
        Self::of_nullable(opt.into())
    }

    #[must_use]
    pub fn with_message(self, message: impl Into<Message>) -> Self {
        Self::new(self.value, Some(message.into()))
    }
    #[must_use]
    pub fn without_message(self) -> Self {
        Self::new(self.value, None)
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.value.is_some()
    }
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.value.is_none()
    }
    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
    /// Run `translator` over the raw message slot.
    ///
    /// `translator` is called even when there is no message and receives [`None`] then.
    pub fn translate_message<R>(&self, translator: impl FnOnce(Option<&str>) -> R) -> R {
        translator(self.message())
    }

    pub fn get(&self) -> Result<&T, MsgOptError> {
        self.value.as_ref().ok_or(MsgOptError::NoSuchElement)
    }
    pub fn into_value(self) -> Result<T, MsgOptError> {
        self.value.ok_or(MsgOptError::NoSuchElement)
    }
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        self.value.as_ref()
    }
    /// Drops the message
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        self.value
    }
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Option<Message>) {
        (self.value, self.message)
    }

    pub fn if_present(&self, action: impl FnOnce(&T)) {
        if let Some(v) = &self.value {
            action(v);
        }
    }
    pub fn if_present_or_else(&self, action: impl FnOnce(&T), empty_action: impl FnOnce()) {
        match &self.value {
            Some(v) => action(v),
            None => empty_action(),
        }
    }

    /// An absent receiver is returned as is, message included.
    /// A present value rejected by `predicate` yields [`Self::empty`].
    #[must_use]
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        let keep = match &self.value {
            Some(v) => predicate(v),
            None => true,
        };
        if keep { self } else { Self::empty() }
    }
    /// The message is not carried over
    pub fn map<U>(self, mapper: impl FnOnce(T) -> U) -> MsgOpt<U> {
        match self.value {
            Some(v) => MsgOpt::of(mapper(v)),
            None => MsgOpt::empty(),
        }
    }
    /// Same as [`Self::map`] but `mapper` may come up empty
    pub fn filter_map<U>(self, mapper: impl FnOnce(T) -> Option<U>) -> MsgOpt<U> {
        match self.value {
            Some(v) => MsgOpt::of_nullable(mapper(v)),
            None => MsgOpt::empty(),
        }
    }
    pub fn flat_map<U>(self, mapper: impl FnOnce(T) -> MsgOpt<U>) -> MsgOpt<U> {
        match self.value {
            Some(v) => mapper(v),
            None => MsgOpt::empty(),
        }
    }
    /// [`MsgOptError::NoInstance`] if `mapper` produces no instance at all.
    ///
    /// An empty instance from `mapper` is a valid result.
    pub fn try_flat_map<U>(
        self,
        mapper: impl FnOnce(T) -> Option<MsgOpt<U>>,
    ) -> Result<MsgOpt<U>, MsgOptError> {
        match self.value {
            Some(v) => mapper(v).ok_or(MsgOptError::NoInstance),
            None => Ok(MsgOpt::empty()),
        }
    }
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        if self.is_present() { self } else { other }
    }
    #[must_use]
    pub fn or_else(self, supplier: impl FnOnce() -> Self) -> Self {
        if self.is_present() { self } else { supplier() }
    }
    pub fn try_or_else(
        self,
        supplier: impl FnOnce() -> Option<Self>,
    ) -> Result<Self, MsgOptError> {
        if self.is_present() {
            return Ok(self);
        }
        supplier().ok_or(MsgOptError::NoInstance)
    }

    pub fn iter(&self) -> core::option::Iter<'_, T> {
        self.value.iter()
    }

    pub fn unwrap_or(self, fallback: T) -> T {
        self.value.unwrap_or(fallback)
    }
    pub fn unwrap_or_else(self, supplier: impl FnOnce() -> T) -> T {
        self.value.unwrap_or_else(supplier)
    }
    /// `error` is only called when the value is absent
    pub fn ok_or_else<E>(self, error: impl FnOnce() -> E) -> Result<T, E> {
        self.value.ok_or_else(error)
    }
    /// An absent value turns into [`MsgOptError::NoSuchElement`] with the message, if any, as
    /// context
    pub fn ok_or_anyhow(self) -> anyhow::Result<T> {
        let Some(value) = self.value else {
            let err = anyhow::Error::new(MsgOptError::NoSuchElement);
            return Err(match self.message {
                Some(message) => err.context(message),
                None => err,
            });
        };
        Ok(value)
    }
}
impl<T> MsgOpt<T>
where
    T: Send + Sync + 'static,
{
    /// The one empty instance shared by the whole process.
    ///
    /// Repeated calls return the same address, from any thread.
    #[must_use]
    pub fn shared_empty() -> &'static Self {
        &type_singleton(|| SharedEmpty(Self::empty())).0
    }
}

/// Registry slot reserved for [`MsgOpt::shared_empty`]
struct SharedEmpty<T>(MsgOpt<T>);
impl<T> Default for MsgOpt<T> {
    fn default() -> Self {
        Self::empty()
    }
}
impl<T> From<Option<T>> for MsgOpt<T> {
    fn from(value: Option<T>) -> Self {
        Self::of_nullable(value)
    }
}
impl<T> From<MsgOpt<T>> for Option<T> {
    fn from(value: MsgOpt<T>) -> Self {
        value.into_option()
    }
}
/// [`Opt::take`] leaves the message in place
impl<T: Clone> Opt<T> for MsgOpt<T> {
    type GetOut = T;
    fn none() -> Self {
        Self::empty()
    }
    fn some(v: T) -> Self {
        Self::of(v)
    }
    fn get(&self) -> Option<Self::GetOut> {
        self.value.clone()
    }
    fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}
impl<T> IntoIterator for MsgOpt<T> {
    type Item = T;
    type IntoIter = core::option::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.value.into_iter()
    }
}
impl<'a, T> IntoIterator for &'a MsgOpt<T> {
    type Item = &'a T;
    type IntoIter = core::option::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<T: fmt::Display> fmt::Display for MsgOpt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_none() && self.message.is_none() {
            return write!(f, "MsgOpt::empty");
        }
        write!(f, "MsgOpt[value=")?;
        match &self.value {
            Some(v) => fmt::Display::fmt(v, f)?,
            None => write!(f, "None")?,
        }
        write!(f, ", message=")?;
        match &self.message {
            Some(m) => f.write_str(m)?,
            None => write!(f, "None")?,
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MsgOptError {
    #[error("value must be present")]
    AbsentValue,
    #[error("no value present")]
    NoSuchElement,
    #[error("callback produced no instance")]
    NoInstance,
}
