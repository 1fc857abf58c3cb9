#[doc(hidden)]
#[macro_export]
/// A macro which defines a string backed enum type.
///
/// Known values are matched exactly (case-sensitive), anything else
/// is preserved as-is in the generated `Unknown(String)` variant.
macro_rules! __enum_builder {
    (
        $(#[$m:meta])*
        @String
        $enum_vis:vis enum $enum_name:ident
        { $( $(#[$enum_meta:meta])* $enum_var:ident => $enum_val:literal $(| $enum_val_alt:literal)* ),* $(,)? }
    ) => {
        $(#[$m])*
        #[derive(Debug, PartialEq, Eq, Clone, Hash)]
        $enum_vis enum $enum_name {
            $(
                $(#[$enum_meta])*
                $enum_var
            ),*
            ,Unknown(String)
        }

        impl $enum_name {
            // NOTE(allow) generated irrespective if there are callers
            #[allow(dead_code)]
            $enum_vis fn as_str(&self) -> &str {
                match self {
                    $( $enum_name::$enum_var => $enum_val),*
                    ,$enum_name::Unknown(v) => v.as_str(),
                }
            }

            /// Same as `FromStr` or `From<&str>` but returning
            /// `None` for unknown values
            // NOTE(allow) generated irrespective if there are callers
            #[allow(dead_code)]
            $enum_vis fn strict_parse(s: &str) -> Option<Self> {
                match s {
                    $($enum_val $(| $enum_val_alt)* => Some($enum_name::$enum_var)),*
                    , _ => None,
                }
            }

            /// Returns `true` if this is not an `Unknown` value.
            // NOTE(allow) generated irrespective if there are callers
            #[allow(dead_code)]
            $enum_vis fn is_known(&self) -> bool {
                !matches!(self, $enum_name::Unknown(_))
            }
        }

        impl<'a> From<&'a str> for $enum_name {
            fn from(s: &'a str) -> Self {
                match s {
                    $($enum_val $(| $enum_val_alt)* => $enum_name::$enum_var),*
                    , _ => $enum_name::Unknown(s.to_owned()),
                }
            }
        }

        impl From<String> for $enum_name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($enum_val $(| $enum_val_alt)* => $enum_name::$enum_var),*
                    , _ => $enum_name::Unknown(s),
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(s.into())
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::macros::enums::__SerdeSerialize for $enum_name {
            #[inline]
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::macros::enums::__SerdeSerializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::macros::enums::__SerdeDeserialize<'de> for $enum_name {
            #[inline]
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::macros::enums::__SerdeDeserializer<'de>,
            {
                let s = <::std::borrow::Cow<'de, str> as $crate::macros::enums::__SerdeDeserialize<'de>>::deserialize(deserializer)?;
                Ok(s.as_ref().into())
            }
        }
    };
}

#[doc(inline)]
pub use crate::__enum_builder as enum_builder;

#[doc(hidden)]
pub use serde::{
    Deserialize as __SerdeDeserialize, Deserializer as __SerdeDeserializer,
    Serialize as __SerdeSerialize, Serializer as __SerdeSerializer,
};

#[cfg(test)]
mod tests {
    use super::enum_builder;

    enum_builder! {
        /// Test fruit.
        @String
        enum Fruit {
            Apple => "apple",
            Pear => "pear" | "poire",
        }
    }

    #[test]
    fn exact_match_only() {
        assert_eq!(Fruit::from("apple"), Fruit::Apple);
        assert_eq!(Fruit::from("poire"), Fruit::Pear);
        assert_eq!(Fruit::from("APPLE"), Fruit::Unknown("APPLE".to_owned()));
        assert_eq!(Fruit::strict_parse("Apple"), None);
    }

    #[test]
    fn unknown_preserved() {
        let fruit: Fruit = "kiwi".parse().unwrap();
        assert!(!fruit.is_known());
        assert_eq!(fruit.as_str(), "kiwi");
        assert_eq!(fruit.to_string(), "kiwi");
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&Fruit::Pear).unwrap();
        assert_eq!(json, r#""pear""#);
        let fruit: Fruit = serde_json::from_str(r#""kiwi""#).unwrap();
        assert_eq!(fruit, Fruit::Unknown("kiwi".to_owned()));
    }
}
