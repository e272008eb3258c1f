use std::fmt;

/// Machine-readable error code defined by the service (e.g. `invalid_email`)
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

/// Name of the request field or argument that caused the error
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Parameter(String);

macro_rules! string_field {
    ($name:ident) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the field is unset
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub(crate) fn take(&mut self) -> Self {
                std::mem::take(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_field!(Code);
string_field!(Parameter);

/// Logical operation a chain link belongs to, such as `users.create`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Op(&'static str);

impl Op {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
