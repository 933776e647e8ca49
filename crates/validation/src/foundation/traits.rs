//! The capability a record implements to be validated.

use crate::foundation::FieldValue;

/// One field's declaration: its name, its current value and its rule tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRules<'a> {
    /// Field name as it should appear in failures.
    pub name: &'static str,
    /// The field's current value.
    pub value: FieldValue<'a>,
    /// Rule tag, e.g. `"required,stringContains=example"`.
    pub tag: &'static str,
}

impl<'a> FieldRules<'a> {
    /// Creates a declaration from anything convertible into a [`FieldValue`].
    pub fn new(name: &'static str, value: impl Into<FieldValue<'a>>, tag: &'static str) -> Self {
        Self {
            name,
            value: value.into(),
            tag,
        }
    }
}

/// Implemented by record types whose fields carry rule declarations.
///
/// Declarations are part of the type and never change at runtime; only the
/// values do. The [`validatable!`](crate::validatable) macro writes this
/// impl from `field => "tag"` pairs.
///
/// # Examples
///
/// ```
/// use validation::foundation::{FieldRules, Validatable};
///
/// struct Signup {
///     email: String,
///     age: u32,
/// }
///
/// impl Validatable for Signup {
///     fn fields(&self) -> Vec<FieldRules<'_>> {
///         vec![
///             FieldRules::new("email", &self.email, "required,email"),
///             FieldRules::new("age", self.age, "min=18"),
///         ]
///     }
/// }
/// ```
pub trait Validatable {
    /// Returns every declared field, in declaration order.
    fn fields(&self) -> Vec<FieldRules<'_>>;
}

impl<T: Validatable + ?Sized> Validatable for &T {
    fn fields(&self) -> Vec<FieldRules<'_>> {
        (**self).fields()
    }
}

impl<T: Validatable + ?Sized> Validatable for Box<T> {
    fn fields(&self) -> Vec<FieldRules<'_>> {
        (**self).fields()
    }
}
