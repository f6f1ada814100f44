//! [`Client`] definitions.

use common::{unit, DateTimeOf};
#[cfg(doc)]
use common::DateTime;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

use super::{
    contact::{validated_string, Email, Name, Phone},
    define_id,
};

/// Customer buying from the business.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// ID of this [`Client`].
    pub id: Id,

    /// [`Name`] of this [`Client`].
    pub name: Name,

    /// Identity [`Document`] of this [`Client`].
    pub document: Document,

    /// Delivery address of this [`Client`], if known.
    #[serde(default)]
    pub address: Option<String>,

    /// [`Phone`] of this [`Client`].
    pub phone: Phone,

    /// [`Email`] of this [`Client`], if known.
    #[serde(default)]
    pub email: Option<Email>,

    /// [`DateTime`] when this [`Client`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Client`] was last updated.
    pub updated_at: UpdateDateTime,
}

define_id!(Client);

/// Short reference to a [`Client`] embedded into other entities.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Summary {
    /// ID of the referenced [`Client`].
    pub id: Id,

    /// [`Name`] of the referenced [`Client`].
    pub name: Name,
}

/// Identity document number of a [`Client`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Document(String);

validated_string!(Document);

impl Document {
    /// Checks whether the given `number` is a valid [`Document`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        (1..=20).contains(&number.len())
            && number.chars().all(|c| c.is_ascii_alphanumeric())
    }

    /// Returns the [`DocumentKind`] of this [`Document`], guessed by its
    /// format.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        let all_digits = self.0.chars().all(|c| c.is_ascii_digit());
        match self.0.len() {
            8 if all_digits => DocumentKind::Dni,
            11 if all_digits => DocumentKind::Ruc,
            _ => DocumentKind::Other,
        }
    }
}

/// Kind of a [`Document`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum DocumentKind {
    /// National identity document of a person.
    #[display("DNI")]
    Dni,

    /// Tax ID of a company.
    #[display("RUC")]
    Ruc,

    /// Any other document (passport, foreigner card).
    #[display("OTHER")]
    Other,
}

/// Data of a [`Client`] being created or updated.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// [`Name`] of the [`Client`].
    pub name: Name,

    /// [`Document`] of the [`Client`].
    pub document: Document,

    /// Delivery address of the [`Client`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// [`Phone`] of the [`Client`].
    pub phone: Phone,

    /// [`Email`] of the [`Client`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

/// [`DateTime`] when a [`Client`] was created.
pub type CreationDateTime = DateTimeOf<(Client, unit::Creation)>;

/// [`DateTime`] when a [`Client`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Client, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::{Client, Document, DocumentKind};

    #[test]
    fn document_kind() {
        assert_eq!(Document::new("12345678").unwrap().kind(), DocumentKind::Dni);
        assert_eq!(
            Document::new("20123456789").unwrap().kind(),
            DocumentKind::Ruc,
        );
        assert_eq!(Document::new("X1234567").unwrap().kind(), DocumentKind::Other);
        assert!(Document::new("12-34").is_none());
        assert!(Document::new("").is_none());
    }

    #[test]
    fn deserializes_canonical_shape() {
        let client: Client = serde_json::from_str(
            r#"{
                "id": "c1",
                "name": "Bodega Rosa",
                "document": "12345678",
                "phone": "987654321",
                "createdAt": "2024-05-01T10:00:00.000Z",
                "updatedAt": "2024-05-02T10:00:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(client.id.as_ref(), "c1");
        assert_eq!(client.address, None);
        assert_eq!(client.email, None);
    }

    #[test]
    fn rejects_invalid_document_at_boundary() {
        let res = serde_json::from_str::<Client>(
            r#"{
                "id": "c1",
                "name": "Bodega Rosa",
                "document": "",
                "phone": "987654321",
                "createdAt": "2024-05-01T10:00:00.000Z",
                "updatedAt": "2024-05-02T10:00:00.000Z"
            }"#,
        );
        assert!(res.is_err());
    }
}
