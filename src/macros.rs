//! Macros for declaring state enums.

/// Declare a state enum together with its transition table and default.
///
/// Each variant carries its stored value and its label. The generated enum
/// serializes as the value, implements [`State`](crate::core::State) and
/// [`StateEnum`](crate::core::StateEnum), displays as the value and parses
/// from a value or variant name. `transitions` maps each destination to the
/// origins allowed into it; both `transitions` and `default` are optional.
///
/// # Example
///
/// ```
/// use statefield::core::StateEnum;
/// use statefield::state_enum;
///
/// state_enum! {
///     pub enum PaymentStatus {
///         NotStarted = ("not_started", "Not Started"),
///         InProgress = ("in_progress", "In Progress"),
///         Completed = ("completed", "Completed"),
///         Failed = ("failed", "Failed"),
///     }
///     transitions: {
///         InProgress: [NotStarted, Failed],
///         Failed: [InProgress],
///         Completed: [InProgress],
///     }
///     default: NotStarted
/// }
///
/// let definition = PaymentStatus::definition();
/// assert!(definition.is_valid_transition(&PaymentStatus::InProgress, &PaymentStatus::Completed));
/// assert_eq!(definition.default_value(), Some(&PaymentStatus::NotStarted));
/// assert_eq!("in_progress".parse::<PaymentStatus>(), Ok(PaymentStatus::InProgress));
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = ($value:literal, $label:literal)
            ),* $(,)?
        }

        $(transitions: {
            $($to:ident: [$($from:ident),* $(,)?]),* $(,)?
        })?
        $(default: $default:ident)?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $value)]
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn value(&self) -> &str {
                match self {
                    $(Self::$variant => $value),*
                }
            }

            fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }
        }

        impl $crate::core::StateEnum for $name {
            fn members() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),*]
            }

            fn definition() -> &'static $crate::definition::StateDefinition<Self> {
                static DEFINITION: ::std::sync::OnceLock<$crate::definition::StateDefinition<$name>> =
                    ::std::sync::OnceLock::new();

                DEFINITION.get_or_init(|| {
                    let builder = $crate::definition::DefinitionBuilder::new(stringify!($name))
                        .members(<Self as $crate::core::StateEnum>::members());
                    $($(
                        let builder = builder.allow(Self::$to, [$(Self::$from),*]);
                    )*)?
                    $(
                        let builder = builder.default_value(Self::$default);
                    )?
                    builder
                        .build()
                        .expect("state_enum! definitions only reference their own variants")
                })
            }
        }

        $(
            impl ::std::default::Default for $name {
                fn default() -> Self {
                    Self::$default
                }
            }
        )?

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::value(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::StateError;

            fn from_str(raw: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::core::StateEnum>::definition().coerce(raw)
            }
        }
    };
}
