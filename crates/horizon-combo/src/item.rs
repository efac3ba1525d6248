//! Item capabilities.
//!
//! The controller treats items as opaque values. Everything it needs to know
//! about an item, its label and any named field a projection path refers
//! to, comes through the [`ComboItem`] trait.

use std::fmt;

/// A named field value read from an item.
///
/// `FieldValue` is the scalar payload of a projection: the label source for a
/// display path, or the companion value for a value path.
///
/// # Example
///
/// ```
/// use horizon_combo::FieldValue;
///
/// let value = FieldValue::from(42);
/// assert_eq!(value.as_int(), Some(42));
/// assert_eq!(value.to_string(), "42");
///
/// assert_eq!(FieldValue::None.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// The field exists but holds no value.
    #[default]
    None,
    /// String data.
    String(String),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data.
    Bool(bool),
}

impl FieldValue {
    /// Returns `true` if this is `FieldValue::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, FieldValue::None)
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Renders the value's string form; `None` renders as the empty string.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::None => Ok(()),
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Float(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Int(n as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Int(n as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Float(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(FieldValue::None, Into::into)
    }
}

/// Capability interface for values shown in a combo.
///
/// # Example
///
/// ```
/// use horizon_combo::{ComboItem, FieldValue};
///
/// #[derive(Clone, PartialEq)]
/// struct Country {
///     code: String,
///     name: String,
/// }
///
/// impl ComboItem for Country {
///     fn display_string(&self) -> String {
///         self.name.clone()
///     }
///
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "Code" => Some(FieldValue::from(self.code.as_str())),
///             "Name" => Some(FieldValue::from(self.name.as_str())),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ComboItem {
    /// The item's natural string form.
    fn display_string(&self) -> String;

    /// Look up a named field.
    ///
    /// Return `None` when the item has no field called `name`, and
    /// `Some(FieldValue::None)` when the field exists but is empty.
    fn field(&self, _name: &str) -> Option<FieldValue> {
        None
    }
}

impl ComboItem for String {
    fn display_string(&self) -> String {
        self.clone()
    }
}

impl ComboItem for &'static str {
    fn display_string(&self) -> String {
        (*self).to_string()
    }
}

macro_rules! impl_combo_item_for_int {
    ($($ty:ty),*) => {
        $(
            impl ComboItem for $ty {
                fn display_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_combo_item_for_int!(i32, i64, u32, u64, usize);
