// Licensed under the Apache-2.0 license

//! Closed integer domains with symbolic names.
//!
//! `hab_enum!` declares a `#[repr(u8)]` enum together with lookups between
//! wire values and names. Validation goes through `TryFrom<u8>`, which
//! rejects any value the domain does not list with `HabError::InvalidValue`.

macro_rules! hab_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($field:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// Every member of the domain, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Field name reported in `InvalidValue` errors.
            pub const FIELD: &'static str = $field;

            /// Wire value.
            pub const fn value(self) -> u8 {
                self as u8
            }

            /// Symbolic name.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Returns true if `value` belongs to the domain.
            pub fn is_valid(value: u8) -> bool {
                matches!(value, $($value)|+)
            }

            /// Looks up a member by its symbolic name, ignoring ASCII case.
            /// `HAB_` names also answer to their final segment, so
            /// `"SHA256"` finds `HAB_ALG_SHA256`.
            pub fn from_name(name: &str) -> $crate::error::HabResult<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.name().eq_ignore_ascii_case(name))
                    .or_else(|| {
                        Self::ALL.iter().copied().find(|member| {
                            $crate::protocol::domain::short_name(member.name())
                                .is_some_and(|short| short.eq_ignore_ascii_case(name))
                        })
                    })
                    .ok_or($crate::error::HabError::UnknownName)
            }

            /// Symbolic name of `value`, or its hexadecimal literal when the
            /// domain has no member with that value.
            pub fn to_name(value: u8) -> ::alloc::string::String {
                match Self::try_from(value) {
                    Ok(member) => ::alloc::string::String::from(member.name()),
                    Err(_) => ::alloc::format!("0x{:08X}", value),
                }
            }

            /// Symbolic names in declaration order.
            pub fn names() -> impl Iterator<Item = &'static str> {
                Self::ALL.iter().map(|member| member.name())
            }

            /// `(name, value)` pairs in declaration order.
            pub fn items() -> impl Iterator<Item = (&'static str, u8)> {
                Self::ALL.iter().map(|member| (member.name(), member.value()))
            }
        }

        impl TryFrom<u8> for $name {
            type Error = $crate::error::HabError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err($crate::error::HabError::InvalidValue {
                        field: $field,
                        value: u32::from(value),
                    }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(member: $name) -> Self {
                member as u8
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use hab_enum;

/// Final segment of a `HAB_` prefixed name.
pub(crate) fn short_name(label: &str) -> Option<&str> {
    label
        .strip_prefix("HAB_")
        .and_then(|rest| rest.rsplit('_').next())
}

#[cfg(test)]
mod tests {
    use super::short_name;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("HAB_ALG_SHA256"), Some("SHA256"));
        assert_eq!(short_name("HAB_CMD_INS_KEY_CSF"), Some("CSF"));
        assert_eq!(short_name("WRITE_VALUE"), None);
    }
}
