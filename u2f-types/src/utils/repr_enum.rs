//! Enums whose variants stand for a fixed code on the wire.

/// A code with no matching variant in a [`repr_enum!`] generated enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCode<I>(pub I);

impl<I: std::fmt::LowerHex> std::fmt::Display for UnknownCode<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown code {:#x}", self.0)
    }
}

/// Declare a fieldless enum together with the conversions to and from its wire code.
macro_rules! repr_enum {
    (
        $(#[$attr:meta])*
        $name:ident: $repr:ty {
            $($(#[$variant_attr:meta])* $variant:ident = $code:literal,)*
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_attr])* $variant,)*
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $code,)*
                }
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = $crate::utils::repr_enum::UnknownCode<$repr>;

            fn try_from(code: $repr) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)*
                    unknown => Err($crate::utils::repr_enum::UnknownCode(unknown)),
                }
            }
        }
    };
}
