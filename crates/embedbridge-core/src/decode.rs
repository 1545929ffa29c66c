//! Typed decoding of raw script results.
//!
//! Values that do not parse are reported as [`BridgeError::DecodeFailure`];
//! nothing is coerced to a default.

use std::str::FromStr;

use crate::error::{BridgeError, Result};

/// A type a raw script result can be decoded into.
pub trait Decode: Sized {
    /// Human readable name of the expected type.
    const EXPECTED: &'static str;

    fn decode(raw: &str) -> Result<Self>;
}

fn failure(expected: &'static str, raw: &str) -> BridgeError {
    BridgeError::DecodeFailure {
        expected,
        raw: raw.to_string(),
    }
}

impl Decode for String {
    const EXPECTED: &'static str = "text";

    fn decode(raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

impl Decode for bool {
    const EXPECTED: &'static str = "boolean";

    fn decode(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(failure(Self::EXPECTED, raw))
        }
    }
}

macro_rules! decode_integer {
    ($($ty:ty),*) => {
        $(
            impl Decode for $ty {
                const EXPECTED: &'static str = "integer";

                fn decode(raw: &str) -> Result<Self> {
                    raw.trim().parse().map_err(|_| failure(Self::EXPECTED, raw))
                }
            }
        )*
    };
}

decode_integer!(i32, i64, u32, u64);

impl Decode for f64 {
    const EXPECTED: &'static str = "number";

    fn decode(raw: &str) -> Result<Self> {
        raw.trim().parse().map_err(|_| failure(Self::EXPECTED, raw))
    }
}

/// Decode an enum (or any [`FromStr`] type) from its textual form.
///
/// Use this to implement [`Decode`] for enums:
///
/// ```
/// use std::str::FromStr;
/// use embedbridge_core::{decode_from_str, Decode, Result};
///
/// #[derive(Debug, PartialEq)]
/// enum Stretch { None, Fill }
///
/// impl FromStr for Stretch {
///     type Err = ();
///     fn from_str(s: &str) -> std::result::Result<Self, ()> {
///         match s {
///             "None" => Ok(Stretch::None),
///             "Fill" => Ok(Stretch::Fill),
///             _ => Err(()),
///         }
///     }
/// }
///
/// impl Decode for Stretch {
///     const EXPECTED: &'static str = "stretch mode";
///     fn decode(raw: &str) -> Result<Self> {
///         decode_from_str(raw, Self::EXPECTED)
///     }
/// }
///
/// assert_eq!(Stretch::decode("Fill").unwrap(), Stretch::Fill);
/// assert!(Stretch::decode("Zoom").is_err());
/// ```
pub fn decode_from_str<T: FromStr>(raw: &str, expected: &'static str) -> Result<T> {
    raw.trim().parse().map_err(|_| failure(expected, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Visibility {
        Visible,
        Collapsed,
    }

    impl FromStr for Visibility {
        type Err = String;

        fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
            match s {
                "Visible" => Ok(Visibility::Visible),
                "Collapsed" => Ok(Visibility::Collapsed),
                other => Err(other.to_string()),
            }
        }
    }

    impl Decode for Visibility {
        const EXPECTED: &'static str = "visibility";

        fn decode(raw: &str) -> Result<Self> {
            decode_from_str(raw, Self::EXPECTED)
        }
    }

    #[test]
    fn test_decode_bool() {
        assert!(bool::decode("true").unwrap());
        assert!(!bool::decode("false").unwrap());
        assert!(bool::decode("True").unwrap());
        assert!(bool::decode(" false ").is_ok());
    }

    #[test]
    fn test_decode_bool_rejects_garbage() {
        let err = bool::decode("notabool").unwrap_err();
        match err {
            BridgeError::DecodeFailure { expected, raw } => {
                assert_eq!(expected, "boolean");
                assert_eq!(raw, "notabool");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(bool::decode("").is_err());
        assert!(bool::decode("1").is_err());
    }

    #[test]
    fn test_decode_integer() {
        assert_eq!(i64::decode("480").unwrap(), 480);
        assert_eq!(i32::decode("-3").unwrap(), -3);
        assert_eq!(u32::decode(" 60 ").unwrap(), 60);
    }

    #[test]
    fn test_decode_integer_rejects_fraction() {
        assert!(i64::decode("12.5").unwrap_err().is_decode_failure());
        assert!(u32::decode("-1").is_err());
        assert!(i32::decode("undefined").is_err());
    }

    #[test]
    fn test_decode_float() {
        assert_eq!(f64::decode("12.5").unwrap(), 12.5);
        assert!(f64::decode("abc").is_err());
    }

    #[test]
    fn test_decode_text_is_verbatim() {
        assert_eq!(String::decode(" a b ").unwrap(), " a b ");
    }

    #[test]
    fn test_decode_enum() {
        assert_eq!(Visibility::decode("Visible").unwrap(), Visibility::Visible);
        assert_eq!(Visibility::decode("Collapsed").unwrap(), Visibility::Collapsed);
        let err = Visibility::decode("Hidden").unwrap_err();
        assert!(err.to_string().contains("visibility"));
        assert!(err.to_string().contains("Hidden"));
    }
}
