use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ClientId;

/// A client record as owned by storage.
///
/// `id` is `None` until the record has been saved for the first time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Client {
    pub id: Option<ClientId>,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

impl Client {
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
}
