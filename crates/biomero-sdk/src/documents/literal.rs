/// A closed set of string literals a field may take.
pub trait Literal: Sized + Copy + 'static {
    const ALLOWED: &'static [&'static str];

    fn from_literal(value: &str) -> Option<Self>;

    fn as_str(self) -> &'static str;
}

macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $literal:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $literal)]
                $variant,
            )+
        }

        impl $crate::documents::literal::Literal for $name {
            const ALLOWED: &'static [&'static str] = &[$($literal),+];

            fn from_literal(value: &str) -> Option<Self> {
                match value {
                    $($literal => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $literal,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::documents::literal::Literal::as_str(*self))
            }
        }
    };
}

pub(crate) use literal_enum;
