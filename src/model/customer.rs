use crate::model::{is_blank, AccountRef, CustomerId};
use serde::{Deserialize, Serialize};

/// A customer profile wrapping an account.
///
/// Phone and address may be empty at sign-up; placing an order requires both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub account: AccountRef,
    pub avatar: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    pub fn new(id: CustomerId, params: CustomerCreate) -> Self {
        Self {
            id,
            account: params.account,
            avatar: params.avatar,
            phone: params.phone.unwrap_or_default(),
            address: params.address.unwrap_or_default(),
        }
    }

    /// Whether the profile carries the contact details an order needs.
    pub fn can_order(&self) -> bool {
        !is_blank(&self.phone) && !is_blank(&self.address)
    }
}

/// Payload for creating a customer profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub account: AccountRef,
    pub avatar: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Profile changes; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
