//! Macro for implementing `as_str`, Display and FromStr for wire enums
//!
//! Several request fields are closed sets of strings on the wire (audience,
//! HTTP method). This macro keeps their string forms in a single table.
//!
//! # Example
//!
//! ```rust
//! use venmo_domain::impl_wire_str_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Sms,
//!     Email,
//! }
//!
//! impl_wire_str_conversions!(Channel {
//!     Sms => "sms",
//!     Email => "email",
//! });
//!
//! assert_eq!(Channel::Sms.as_str(), "sms");
//! assert_eq!("EMAIL".parse::<Channel>().unwrap(), Channel::Email);
//! ```

/// Implements `as_str`, Display and FromStr for a fieldless enum.
///
/// Parsing is ASCII case-insensitive; Display and `as_str` always produce the
/// exact string from the table.
#[macro_export]
macro_rules! impl_wire_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Verb {
        Get,
        Delete,
    }

    impl_wire_str_conversions!(Verb {
        Get => "GET",
        Delete => "DELETE",
    });

    #[test]
    fn as_str_and_display_use_table_strings() {
        assert_eq!(Verb::Get.as_str(), "GET");
        assert_eq!(Verb::Delete.to_string(), "DELETE");
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!(Verb::from_str("get").unwrap(), Verb::Get);
        assert_eq!(Verb::from_str("Delete").unwrap(), Verb::Delete);
    }

    #[test]
    fn parsing_unknown_value_names_the_enum() {
        let err = Verb::from_str("patch").unwrap_err();
        assert_eq!(err, "Invalid Verb: patch");
    }
}
