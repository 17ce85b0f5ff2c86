/// Declares a closed set of string constants as an enum.
///
/// Parsing goes through [`crate::validators::is_enum`], so an unknown value
/// is a [`crate::error::ValidationError`] naming the field.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every wire value, in declaration order
            pub const ALL: &'static [&'static str] = &[$($value),+];

            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::ValidationError;

            fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
                crate::validators::is_enum($field, value, Self::ALL)?;
                Self::VARIANTS
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == value)
                    .ok_or_else(|| crate::error::ValidationError::new($field, format!("unknown value {value:?}")))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use string_enum;
