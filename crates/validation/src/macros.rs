//! Declaration macro for record types.

/// Implements [`Validatable`](crate::foundation::Validatable) from
/// `field => "tag"` pairs.
///
/// Each field is borrowed and converted with `FieldValue::from(&self.field)`,
/// so its type needs a `From<&T>` impl for
/// [`FieldValue`](crate::foundation::FieldValue): strings, integers, floats,
/// `bool`, `chrono` dates and timestamps, `Vec<T>`, and `Option` of those.
///
/// A field can be reported under a different name with `as "Name"`.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Utc};
/// use validation::{validatable, validate};
///
/// struct Booking {
///     guest: String,
///     nights: u8,
///     arrival: DateTime<Utc>,
///     note: Option<String>,
/// }
///
/// validatable!(Booking {
///     guest as "Guest" => "required,max=64",
///     nights => "min=1,max=30",
///     arrival => "dateAfter=now",
///     note => "max=200",
/// });
///
/// let booking = Booking {
///     guest: String::new(),
///     nights: 2,
///     arrival: Utc::now() + chrono::TimeDelta::days(3),
///     note: None,
/// };
///
/// let err = validate(&booking).unwrap_err();
/// assert_eq!(err.fields(), vec!["Guest"]);
/// ```
#[macro_export]
macro_rules! validatable {
    (@name $field:ident) => {
        stringify!($field)
    };

    (@name $field:ident $name:literal) => {
        $name
    };

    ($ty:ty { $($field:ident $(as $name:literal)? => $tag:literal),* $(,)? }) => {
        impl $crate::foundation::Validatable for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::foundation::FieldRules<'_>> {
                ::std::vec![
                    $(
                        $crate::foundation::FieldRules::new(
                            $crate::validatable!(@name $field $($name)?),
                            &self.$field,
                            $tag,
                        ),
                    )*
                ]
            }
        }
    };
}
