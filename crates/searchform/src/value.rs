//! Conversions accepted by the form setters.

/// A value handed to [`SearchForm::set`](crate::SearchForm::set).
///
/// Empty strings and `None` both mean "no value": setting them leaves the
/// field as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValue(Option<String>);

impl FieldValue {
    /// The absent value.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Returns the concrete value, treating the empty string as absent.
    #[must_use]
    pub fn into_value(self) -> Option<String> {
        self.0.filter(|value| !value.is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self(Some(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self(Some(value))
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self(Some(value.clone()))
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::none, Into::into)
    }
}

macro_rules! field_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self(Some(value.to_string()))
                }
            }
        )*
    };
}

field_value_from_number!(u8, u16, u32, u64, usize, i32, i64);

/// One or more strings joined into a single parameter value.
///
/// Used by setters that accept either a single string or a list, such as
/// [`SearchForm::query`](crate::SearchForm::query).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueList(Vec<String>);

impl ValueList {
    /// Join the items with `sep`.
    #[must_use]
    pub fn join(&self, sep: &str) -> String {
        self.0.join(sep)
    }

    /// Join the items with `sep` and wrap the result in square brackets.
    #[must_use]
    pub fn bracketed(&self, sep: &str) -> String {
        format!("[{}]", self.0.join(sep))
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ValueList {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for ValueList {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl<S> From<Vec<S>> for ValueList
where
    S: Into<String>,
{
    fn from(values: Vec<S>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<S, const N: usize> From<[S; N]> for ValueList
where
    S: Into<String>,
{
    fn from(values: [S; N]) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<S> From<&[S]> for ValueList
where
    S: AsRef<str>,
{
    fn from(values: &[S]) -> Self {
        Self(values.iter().map(|v| v.as_ref().to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_no_value() {
        assert_eq!(FieldValue::from("").into_value(), None);
        assert_eq!(FieldValue::from(None::<&str>).into_value(), None);
        assert_eq!(FieldValue::from(Some("en-us")).into_value().as_deref(), Some("en-us"));
    }

    #[test]
    fn zero_is_a_value() {
        assert_eq!(FieldValue::from(0u32).into_value().as_deref(), Some("0"));
    }

    #[test]
    fn value_list_accepts_single_and_many() {
        assert_eq!(ValueList::from("p1"), ValueList::from(["p1"]));
        assert_eq!(ValueList::from(vec!["a", "b"]).bracketed(","), "[a,b]");
        let owned = vec!["x".to_string(), "y".to_string()];
        assert_eq!(ValueList::from(owned.as_slice()).join(""), "xy");
        assert!(ValueList::from(Vec::<String>::new()).is_empty());
    }
}
