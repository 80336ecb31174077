use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::Client as DomainClient;
use crate::domain::types::{ClientId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    /// Stored as UTC.
    pub birth_date: NaiveDateTime,
    pub children: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`]; a `None` id lets SQLite assign one.
pub struct NewClient<'a> {
    pub id: Option<i64>,
    pub name: &'a str,
    pub cpf: &'a str,
    pub income: f64,
    pub birth_date: NaiveDateTime,
    pub children: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Data written when saving over an existing [`Client`] row.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub cpf: &'a str,
    pub income: f64,
    pub birth_date: NaiveDateTime,
    pub children: i32,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ClientId::new(client.id)?),
            name: client.name,
            cpf: client.cpf,
            income: client.income,
            birth_date: client.birth_date.and_utc(),
            children: client.children,
        })
    }
}

impl<'a> From<&'a DomainClient> for NewClient<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            id: client.id.map(ClientId::get),
            name: client.name.as_str(),
            cpf: client.cpf.as_str(),
            income: client.income,
            birth_date: client.birth_date.naive_utc(),
            children: client.children,
        }
    }
}

impl<'a> From<&'a DomainClient> for UpdateClient<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            name: client.name.as_str(),
            cpf: client.cpf.as_str(),
            income: client.income,
            birth_date: client.birth_date.naive_utc(),
            children: client.children,
        }
    }
}
