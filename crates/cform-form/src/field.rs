#![forbid(unsafe_code)]

//! Field identifiers and the mutable field values.

use std::fmt;

/// One of the four contact form fields.
///
/// Declaration order is display order; `Ord` follows it, so ordered
/// collections keyed by `FieldId` iterate firstName → lastName → email →
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FieldId {
    /// Required, at least five characters.
    FirstName,
    /// Required.
    LastName,
    /// Required, must look like an email address.
    Email,
    /// Optional free text.
    Message,
}

impl FieldId {
    /// All fields in display order.
    pub const ALL: [FieldId; 4] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Message,
    ];

    /// Machine name, as used in error texts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// Input label. Required fields carry a trailing `*`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name*",
            Self::LastName => "Last Name*",
            Self::Email => "Email*",
            Self::Message => "Message",
        }
    }

    /// Label used in front of a submitted value.
    #[must_use]
    pub const fn summary_label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name:",
            Self::LastName => "Last Name:",
            Self::Email => "Email:",
            Self::Message => "Message:",
        }
    }

    /// Look a field up by machine name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Position in display order.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current values of every field.
///
/// An empty `message` means no message was provided.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FormFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    /// Create empty fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        *self.get_mut(field) = value.into();
        self
    }

    /// Value of `field`.
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Email => &self.email,
            FieldId::Message => &self.message,
        }
    }

    pub(crate) fn get_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::Email => &mut self.email,
            FieldId::Message => &mut self.message,
        }
    }

    /// The message, if one was provided.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        (!self.message.is_empty()).then_some(self.message.as_str())
    }

    /// `(field, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        FieldId::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_the_form() {
        let labels: Vec<_> = FieldId::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["First Name*", "Last Name*", "Email*", "Message"]);
        assert_eq!(FieldId::Message.summary_label(), "Message:");
    }

    #[test]
    fn ord_follows_display_order() {
        let mut shuffled = vec![
            FieldId::Email,
            FieldId::Message,
            FieldId::FirstName,
            FieldId::LastName,
        ];
        shuffled.sort();
        assert_eq!(shuffled, FieldId::ALL.to_vec());
        assert_eq!(FieldId::Email.index(), 2);
    }

    #[test]
    fn from_name_round_trips() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_name(field.name()), Some(field));
        }
        assert_eq!(FieldId::from_name("phone"), None);
        assert_eq!(FieldId::LastName.to_string(), "lastName");
    }

    #[test]
    fn message_is_optional() {
        let fields = FormFields::new().with(FieldId::FirstName, "Andrew");
        assert_eq!(fields.get(FieldId::FirstName), "Andrew");
        assert_eq!(fields.message(), None);
        let fields = fields.with(FieldId::Message, "Monkey");
        assert_eq!(fields.message(), Some("Monkey"));
    }
}
