//! Customer aggregate service
//!
//! This module orchestrates reads and writes of a customer together with its
//! optional address and contact. Every mutation runs in one unit of work, so
//! the aggregate is persisted completely or not at all.
//!
//! The service raises `NotFound` and `ValidationFailed` itself. Storage
//! failures (including constraint conflicts) propagate untouched as
//! [`CustomerError::Store`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use core_kernel::CustomerId;

use crate::address::AddressDetails;
use crate::contact::ContactDetails;
use crate::customer::{Customer, CustomerDetails};
use crate::error::CustomerError;
use crate::ports::{
    AddressRecord, ContactRecord, CustomerRecord, CustomerStore, CustomerUnitOfWork, NewAddress,
    NewContact, NewCustomer,
};
use crate::validation::CustomerValidator;

/// Service managing the customer aggregate
///
/// # Example
///
/// ```rust,ignore
/// let service = CustomerService::new(store);
/// let created = service.create_customer(details).await?;
/// let fetched = service.get_customer(created.id).await?;
/// ```
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    /// Creates a service over the given storage adapter
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Returns the storage adapter backing this service
    pub fn store(&self) -> &Arc<dyn CustomerStore> {
        &self.store
    }

    /// Retrieves a customer with its address and contact populated
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no customer has this ID
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        info!("Fetching customer");
        let mut uow = self.store.begin().await?;
        let customer = load_customer(uow.as_mut(), id).await?;
        info!("Customer fetched");
        Ok(customer)
    }

    /// Retrieves every customer in storage order
    ///
    /// An empty store yields an empty vector.
    #[instrument(skip(self))]
    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        info!("Fetching all customers");
        let mut uow = self.store.begin().await?;

        let customers = uow.find_all_customers().await?;
        let mut addresses: HashMap<CustomerId, AddressRecord> = uow
            .find_all_addresses()
            .await?
            .into_iter()
            .map(|a| (a.customer_id, a))
            .collect();
        let mut contacts: HashMap<CustomerId, ContactRecord> = uow
            .find_all_contacts()
            .await?
            .into_iter()
            .map(|c| (c.customer_id, c))
            .collect();

        let customers: Vec<Customer> = customers
            .into_iter()
            .map(|record| {
                let address = addresses.remove(&record.id);
                let contact = contacts.remove(&record.id);
                Customer::from_records(record, address, contact)
            })
            .collect();

        info!(count = customers.len(), "Customers fetched");
        Ok(customers)
    }

    /// Creates a customer and any supplied address and contact
    ///
    /// Supplied parts are linked to the new customer's ID before they are
    /// stored.
    ///
    /// # Errors
    ///
    /// * `ValidationFailed` if any field rule is violated (nothing is stored)
    /// * `Store` with a conflict if the email or phone number is taken
    #[instrument(skip(self, details))]
    pub async fn create_customer(&self, details: CustomerDetails) -> Result<Customer, CustomerError> {
        info!("Creating customer");
        CustomerValidator::check(&details)?;

        let CustomerDetails {
            first_name,
            last_name,
            email,
            address,
            contact,
        } = details;

        let mut uow = self.store.begin().await?;
        let customer = uow
            .insert_customer(NewCustomer {
                first_name,
                last_name,
                email,
            })
            .await?;

        let address = match address {
            Some(details) => Some(
                uow.insert_address(NewAddress::owned_by(customer.id, details))
                    .await?,
            ),
            None => None,
        };
        let contact = match contact {
            Some(details) => Some(
                uow.insert_contact(NewContact::owned_by(customer.id, details))
                    .await?,
            ),
            None => None,
        };

        uow.commit().await?;

        let created = Customer::from_records(customer, address, contact);
        info!(customer_id = %created.id, "Customer created");
        Ok(created)
    }

    /// Updates a customer, merging supplied parts into the stored ones
    ///
    /// Names and email are always overwritten. A supplied address or contact
    /// overwrites the stored one in place (keeping its ID), or is inserted
    /// when the customer has none. Omitted parts are left untouched.
    ///
    /// # Errors
    ///
    /// * `ValidationFailed` if any field rule is violated
    /// * `NotFound` if no customer has this ID
    /// * `Store` with a conflict if the new email or phone number is taken
    #[instrument(skip(self, details), fields(customer_id = %id))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        details: CustomerDetails,
    ) -> Result<Customer, CustomerError> {
        info!("Updating customer");
        CustomerValidator::check(&details)?;

        let mut uow = self.store.begin().await?;
        let mut record = find_existing(uow.as_mut(), id).await?;

        record.first_name = details.first_name;
        record.last_name = details.last_name;
        record.email = details.email;
        let record = uow.update_customer(record).await?;

        let address = merge_address(uow.as_mut(), id, details.address).await?;
        let contact = merge_contact(uow.as_mut(), id, details.contact).await?;

        uow.commit().await?;

        info!("Customer updated");
        Ok(Customer::from_records(record, address, contact))
    }

    /// Deletes a customer along with its address and contact
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no customer has this ID
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), CustomerError> {
        info!("Deleting customer");
        let mut uow = self.store.begin().await?;
        find_existing(uow.as_mut(), id).await?;

        if let Some(address) = uow.find_address_by_customer(id).await? {
            uow.delete_address(address.id).await?;
        }
        if let Some(contact) = uow.find_contact_by_customer(id).await? {
            uow.delete_contact(contact.id).await?;
        }
        uow.delete_customer(id).await?;

        uow.commit().await?;

        info!("Customer deleted");
        Ok(())
    }
}

async fn find_existing(
    uow: &mut dyn CustomerUnitOfWork,
    id: CustomerId,
) -> Result<CustomerRecord, CustomerError> {
    match uow.find_customer(id).await? {
        Some(record) => Ok(record),
        None => {
            warn!(customer_id = %id, "Customer not found");
            Err(CustomerError::NotFound(id))
        }
    }
}

async fn load_customer(
    uow: &mut dyn CustomerUnitOfWork,
    id: CustomerId,
) -> Result<Customer, CustomerError> {
    let record = find_existing(uow, id).await?;
    let address = uow.find_address_by_customer(id).await?;
    let contact = uow.find_contact_by_customer(id).await?;

    if let Some(address) = &address {
        ensure_owner(id, address.customer_id, "Address")?;
    }
    if let Some(contact) = &contact {
        ensure_owner(id, contact.customer_id, "Contact")?;
    }

    Ok(Customer::from_records(record, address, contact))
}

/// Find by owner, else insert
async fn merge_address(
    uow: &mut dyn CustomerUnitOfWork,
    owner: CustomerId,
    details: Option<AddressDetails>,
) -> Result<Option<AddressRecord>, CustomerError> {
    let existing = uow.find_address_by_customer(owner).await?;
    let Some(details) = details else {
        return Ok(existing);
    };

    let stored = match existing {
        Some(mut address) => {
            ensure_owner(owner, address.customer_id, "Address")?;
            address.apply(details);
            uow.update_address(address).await?
        }
        None => uow.insert_address(NewAddress::owned_by(owner, details)).await?,
    };
    Ok(Some(stored))
}

/// Find by owner, else insert
async fn merge_contact(
    uow: &mut dyn CustomerUnitOfWork,
    owner: CustomerId,
    details: Option<ContactDetails>,
) -> Result<Option<ContactRecord>, CustomerError> {
    let existing = uow.find_contact_by_customer(owner).await?;
    let Some(details) = details else {
        return Ok(existing);
    };

    let stored = match existing {
        Some(mut contact) => {
            ensure_owner(owner, contact.customer_id, "Contact")?;
            contact.apply(details);
            uow.update_contact(contact).await?
        }
        None => uow.insert_contact(NewContact::owned_by(owner, details)).await?,
    };
    Ok(Some(stored))
}

fn ensure_owner(expected: CustomerId, actual: CustomerId, part: &str) -> Result<(), CustomerError> {
    if expected != actual {
        return Err(CustomerError::illegal_state(format!(
            "{} belongs to customer {}, not customer {}",
            part, actual, expected
        )));
    }
    Ok(())
}
