//! hidden signet macros

#[doc(hidden)]
#[macro_use]
pub mod enums;

#[doc(inline)]
pub use ::paste::paste;

#[doc(hidden)]
#[macro_export]
/// Generates a consuming `with_*` and a borrowing `set_*` method from a
/// single builder body.
///
/// Bodies taking an `Option<T>` argument additionally get `maybe_*` and
/// `without_*`/`unset_*` variants. Bodies returning `Result<Self, E>` get
/// the `try_` prefixed forms instead.
macro_rules! __generate_set_and_with {
    (
        $(#[$outer_doc:meta])*
        $vis:vis fn $fn_name:ident(mut $self_token:ident) -> Self {
            $($body:tt)*
        }
    ) => {
        $crate::macros::paste! {
            $(#[$outer_doc])*
            #[must_use]
            $vis fn [<with_ $fn_name>](mut $self_token) -> Self {
                $($body)*
            }

            $(#[$outer_doc])*
            $vis fn [<set_ $fn_name>](&mut $self_token) -> &mut Self {
                $($body)*
            }
        }
    };
    (
        $(#[$outer_doc:meta])*
        $vis:vis fn $fn_name:ident(mut $self_token:ident, $param_name:ident: Option<$param_ty:ty> $(,)?) -> Self {
            $($body:tt)*
        }
    ) => {
        $crate::macros::paste! {
            $(#[$outer_doc])*
            #[must_use]
            $vis fn [<maybe_with_ $fn_name>](mut $self_token, $param_name: Option<$param_ty>) -> Self {
                $($body)*
            }

            $(#[$outer_doc])*
            $vis fn [<maybe_set_ $fn_name>](&mut $self_token, $param_name: Option<$param_ty>) -> &mut Self {
                $($body)*
            }

            $(#[$outer_doc])*
            #[must_use]
            $vis fn [<with_ $fn_name>](mut $self_token, $param_name: $param_ty) -> Self {
                let $param_name: Option<$param_ty> = Some($param_name);
                $($body)*
            }

            $(#[$outer_doc])*
            $vis fn [<set_ $fn_name>](&mut $self_token, $param_name: $param_ty) -> &mut Self {
                let $param_name: Option<$param_ty> = Some($param_name);
                $($body)*
            }

            $(#[$outer_doc])*
            #[must_use]
            $vis fn [<without_ $fn_name>](mut $self_token) -> Self {
                let $param_name: Option<$param_ty> = None;
                $($body)*
            }

            $(#[$outer_doc])*
            $vis fn [<unset_ $fn_name>](&mut $self_token) -> &mut Self {
                let $param_name: Option<$param_ty> = None;
                $($body)*
            }
        }
    };
    (
        $(#[$outer_doc:meta])*
        $vis:vis fn $fn_name:ident(mut $self_token:ident, $($param_name:ident: $param_ty:ty),+ $(,)?) -> Self {
            $($body:tt)*
        }
    ) => {
        $crate::macros::paste! {
            $(#[$outer_doc])*
            #[must_use]
            $vis fn [<with_ $fn_name>](mut $self_token, $($param_name: $param_ty),+) -> Self {
                $($body)*
            }

            $(#[$outer_doc])*
            $vis fn [<set_ $fn_name>](&mut $self_token, $($param_name: $param_ty),+) -> &mut Self {
                $($body)*
            }
        }
    };
    (
        $(#[$outer_doc:meta])*
        $vis:vis fn $fn_name:ident(mut $self_token:ident, $($param_name:ident: $param_ty:ty),+ $(,)?) -> Result<Self, $error:ty> {
            $($body:tt)*
        }
    ) => {
        $crate::macros::paste! {
            $(#[$outer_doc])*
            $vis fn [<try_with_ $fn_name>](mut $self_token, $($param_name: $param_ty),+) -> Result<Self, $error> {
                $($body)*
            }

            $(#[$outer_doc])*
            $vis fn [<try_set_ $fn_name>](&mut $self_token, $($param_name: $param_ty),+) -> Result<&mut Self, $error> {
                $($body)*
            }
        }
    };
}

#[doc(inline)]
pub use crate::__generate_set_and_with as generate_set_and_with;

#[doc(inline)]
pub use enums::enum_builder;

#[cfg(test)]
mod tests {
    use super::{enum_builder, generate_set_and_with};

    #[derive(Debug, Default)]
    struct Settings {
        name: Option<String>,
        retries: u8,
        verbose: bool,
    }

    impl Settings {
        generate_set_and_with! {
            fn verbose(mut self) -> Self {
                self.verbose = true;
                self
            }
        }

        generate_set_and_with! {
            fn name(mut self, name: Option<String>) -> Self {
                self.name = name;
                self
            }
        }

        generate_set_and_with! {
            fn retries(mut self, retries: u8) -> Result<Self, String> {
                if retries > 5 {
                    return Err(format!("too many retries: {retries}"));
                }
                self.retries = retries;
                Ok(self)
            }
        }
    }

    #[test]
    fn generated_with_and_set() {
        let settings = Settings::default().with_verbose().with_name("a".to_owned());
        assert!(settings.verbose);
        assert_eq!(settings.name.as_deref(), Some("a"));

        let mut settings = settings.without_name();
        assert!(settings.name.is_none());
        settings.set_name("b".to_owned());
        assert_eq!(settings.name.as_deref(), Some("b"));
        settings.maybe_set_name(None);
        assert!(settings.name.is_none());
    }

    #[test]
    fn generated_try_variants() {
        let mut settings = Settings::default().try_with_retries(3).unwrap();
        assert_eq!(settings.retries, 3);
        assert!(settings.try_set_retries(9).is_err());
        assert_eq!(settings.retries, 3);
    }

    enum_builder! {
        @String
        enum Level {
            Low => "low",
            High => "high",
        }
    }

    #[test]
    fn enum_builder_reachable_from_macros() {
        assert_eq!(Level::from("high"), Level::High);
        assert_eq!(Level::Low.as_str(), "low");
        assert!(!Level::from("LOW").is_known());
    }
}
