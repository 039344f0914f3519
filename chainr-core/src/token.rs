//! Token rendering.
//!
//! Matching never inspects a token: each handler's `supports` decides on its
//! own. The only thing the resolver needs from a token is a printable form
//! for [`ResolveError::UnsupportedType`].
//!
//! Primitive tokens render their plain string form. Structured tokens
//! (JSON arrays and objects, or anything wrapped in [`Structured`]) render
//! their canonical compact JSON form, with object keys sorted.
//!
//! [`ResolveError::UnsupportedType`]: crate::ResolveError::UnsupportedType

use serde::Serialize;
use serde_json::Value;

/// A value that can be used to select handlers.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a resolver token",
    label = "missing `Token` implementation",
    note = "Implement `Token::render`, or wrap structured values in `Structured`."
)]
pub trait Token {
    /// Printable form used in error messages.
    fn render(&self) -> String;
}

macro_rules! display_token {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Token for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_token!(
    str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64,
);

impl<T: Token + ?Sized> Token for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Token + ?Sized> Token for Box<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Token + ?Sized> Token for std::sync::Arc<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Token> Token for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(token) => token.render(),
            None => "null".to_string(),
        }
    }
}

impl Token for Value {
    fn render(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(_) | Value::Object(_) => self.to_string(),
        }
    }
}

/// Wraps an arbitrary serializable value so it can be used as a token.
///
/// ```rust,ignore
/// #[derive(Serialize)]
/// struct Kind { family: &'static str, version: u32 }
///
/// let token = Structured(Kind { family: "pdf", version: 2 });
/// assert_eq!(token.render(), r#"{"family":"pdf","version":2}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Structured<S>(pub S);

impl<S> Structured<S> {
    /// Borrow the wrapped value.
    pub fn inner(&self) -> &S {
        &self.0
    }

    /// Unwrap the value.
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S: Serialize> Token for Structured<S> {
    fn render(&self) -> String {
        // Going through `Value` sorts object keys.
        match serde_json::to_value(&self.0) {
            Ok(value) => value.render(),
            Err(_) => "<unrenderable>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[test]
    fn primitives_render_plain() {
        assert_eq!("c".render(), "c");
        assert_eq!(String::from("pdf").render(), "pdf");
        assert_eq!(42_u32.render(), "42");
        assert_eq!((-7_i64).render(), "-7");
        assert_eq!(true.render(), "true");
        assert_eq!(None::<u8>.render(), "null");
    }

    #[test]
    fn json_scalars_render_plain() {
        assert_eq!(json!("image").render(), "image");
        assert_eq!(json!(3).render(), "3");
        assert_eq!(Value::Null.render(), "null");
    }

    #[test]
    fn json_objects_render_canonical() {
        let token = json!({ "b": 2, "a": { "z": true, "y": [1, 2] } });
        assert_eq!(token.render(), r#"{"a":{"y":[1,2],"z":true},"b":2}"#);
    }

    #[derive(Serialize)]
    struct Kind {
        version: u32,
        family: &'static str,
    }

    #[test]
    fn structured_renders_sorted_json() {
        let token = Structured(Kind {
            version: 2,
            family: "pdf",
        });
        assert_eq!(token.render(), r#"{"family":"pdf","version":2}"#);
    }

    #[derive(Serialize)]
    enum Format {
        Pdf,
    }

    #[test]
    fn structured_strings_render_plain() {
        assert_eq!(Structured("c").render(), "c");
        assert_eq!(Structured(Format::Pdf).render(), "Pdf");
        assert_eq!(Structured(7_u8).render(), "7");
    }

    #[test]
    fn structured_unit_renders_null() {
        assert_eq!(Structured(()).render(), "null");
    }
}
