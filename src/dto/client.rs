//! Transfer object for clients crossing the service boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::client::Client;
use crate::domain::types::{ClientId, validate_cpf};

/// Serializable projection of [`Client`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    #[serde(default)]
    pub id: Option<ClientId>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom(function = "cpf_digits"))]
    pub cpf: String,
    #[validate(range(min = 0.0))]
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    #[validate(range(min = 0))]
    pub children: i32,
}

fn cpf_digits(cpf: &str) -> Result<(), ValidationError> {
    validate_cpf(cpf).map_err(|_| ValidationError::new("cpf"))
}

impl ClientDto {
    #[must_use]
    pub fn new(
        id: Option<ClientId>,
        name: impl Into<String>,
        cpf: impl Into<String>,
        income: f64,
        birth_date: DateTime<Utc>,
        children: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cpf: cpf.into(),
            income,
            birth_date,
            children,
        }
    }

    /// Builds the entity carrying exactly the values of this DTO.
    #[must_use]
    pub fn to_entity(&self) -> Client {
        Client {
            id: self.id,
            name: self.name.clone(),
            cpf: self.cpf.clone(),
            income: self.income,
            birth_date: self.birth_date,
            children: self.children,
        }
    }

    /// Overwrites the mutable fields of `entity` with this DTO's values.
    ///
    /// The entity keeps its own identifier.
    pub fn copy_onto(&self, entity: &mut Client) {
        entity.name = self.name.clone();
        entity.cpf = self.cpf.clone();
        entity.income = self.income;
        entity.birth_date = self.birth_date;
        entity.children = self.children;
    }
}

impl From<&Client> for ClientDto {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            cpf: client.cpf.clone(),
            income: client.income,
            birth_date: client.birth_date,
            children: client.children,
        }
    }
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            cpf: client.cpf,
            income: client.income,
            birth_date: client.birth_date,
            children: client.children,
        }
    }
}

impl From<ClientDto> for Client {
    fn from(dto: ClientDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            cpf: dto.cpf,
            income: dto.income,
            birth_date: dto.birth_date,
            children: dto.children,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn jorge() -> Client {
        Client::new(
            Some(ClientId::new(8).unwrap()),
            "Jorge Amado",
            "10204374161",
            2500.0,
            "1975-11-10T07:00:00Z".parse().unwrap(),
            0,
        )
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let dto = ClientDto::from(&jorge());
        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 8,
                "name": "Jorge Amado",
                "cpf": "10204374161",
                "income": 2500.0,
                "birthDate": "1975-11-10T07:00:00Z",
                "children": 0
            })
        );
    }

    #[test]
    fn deserializes_without_id() {
        let dto: ClientDto = serde_json::from_value(json!({
            "name": "Maria",
            "cpf": "12345698700",
            "income": 20000.0,
            "birthDate": "2010-08-14T20:50:00Z",
            "children": 4
        }))
        .unwrap();

        assert_eq!(dto.id, None);
        assert_eq!(dto.children, 4);
    }

    #[test]
    fn copy_onto_keeps_entity_id() {
        let mut entity = jorge();
        let dto = ClientDto::new(None, "Other", "99999999999", 10.0, Utc::now(), 3);

        dto.copy_onto(&mut entity);

        assert_eq!(entity.id, Some(ClientId::new(8).unwrap()));
        assert_eq!(entity.name, "Other");
        assert_eq!(entity.cpf, "99999999999");
        assert_eq!(entity.children, 3);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut dto = ClientDto::from(jorge());
        assert!(dto.validate().is_ok());

        dto.cpf = "123".to_string();
        dto.income = -1.0;
        dto.children = -2;
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("cpf"));
        assert!(fields.contains_key("income"));
        assert!(fields.contains_key("children"));
    }

    proptest! {
        #[test]
        fn entity_dto_round_trip_is_identity(
            id in proptest::option::of(1i64..i64::MAX),
            name in "\\PC{0,40}",
            cpf in "[0-9]{11}",
            income in 0.0f64..1.0e12,
            seconds in -2_000_000_000i64..4_000_000_000,
            children in 0i32..30,
        ) {
            let birth_date = Utc.timestamp_opt(seconds, 0).unwrap();
            let client = Client::new(
                id.map(|id| ClientId::new(id).unwrap()),
                name,
                cpf,
                income,
                birth_date,
                children,
            );

            let dto = ClientDto::from(&client);
            prop_assert_eq!(&dto.to_entity(), &client);
            prop_assert_eq!(Client::from(dto), client);
        }
    }
}
