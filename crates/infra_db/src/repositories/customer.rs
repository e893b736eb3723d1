//! Customer repository implementation
//!
//! This module provides SQL access to the `customers`, `addresses` and
//! `contacts` tables. The repository borrows a connection (usually the one
//! inside an open transaction) so that every statement of a unit of work runs
//! on the same transaction.
//!
//! # Tables
//!
//! - `customers`: one row per customer, `email` unique
//! - `addresses`: at most one row per customer, linked by `customer_id`
//! - `contacts`: at most one row per customer, `phone_number` unique
//!
//! Address and contact rows are removed by `ON DELETE CASCADE` when their
//! customer is deleted.

use sqlx::PgConnection;

use crate::error::DatabaseError;

/// Repository for customer, address and contact rows
///
/// # Example
///
/// ```rust,ignore
/// let mut tx = pool.begin().await?;
/// let row = CustomerRepository::new(&mut tx)
///     .insert_customer("John", "Doe", "john.doe@example.com")
///     .await?;
/// tx.commit().await?;
/// ```
pub struct CustomerRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> CustomerRepository<'c> {
    /// Creates a repository over the given connection
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Customers
    // ========================================================================

    /// Retrieves a customer row by its identifier
    pub async fn find_customer(&mut self, id: i64) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, email
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Retrieves every customer row ordered by identifier
    pub async fn find_all_customers(&mut self) -> Result<Vec<CustomerRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, email
            FROM customers
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// Inserts a customer row
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` on `customers_email_key` if the email is taken
    pub async fn insert_customer(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<CustomerRow, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, email
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Overwrites a customer row
    pub async fn update_customer(&mut self, row: &CustomerRow) -> Result<CustomerRow, DatabaseError> {
        sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, email = $4
            WHERE id = $1
            RETURNING id, first_name, last_name, email
            "#,
        )
        .bind(row.id)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.email)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Customer", row.id))
    }

    /// Deletes a customer row; owned rows follow by cascade
    pub async fn delete_customer(&mut self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", id));
        }
        Ok(())
    }

    // ========================================================================
    // Addresses
    // ========================================================================

    /// Retrieves an address row by its identifier
    pub async fn find_address(&mut self, id: i64) -> Result<Option<AddressRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, customer_id, street, city, state, zip, address_type
            FROM addresses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Retrieves the address owned by a customer
    pub async fn find_address_by_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Option<AddressRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, customer_id, street, city, state, zip, address_type
            FROM addresses
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Retrieves every address row ordered by identifier
    pub async fn find_all_addresses(&mut self) -> Result<Vec<AddressRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, customer_id, street, city, state, zip, address_type
            FROM addresses
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// Inserts an address row
    pub async fn insert_address(&mut self, address: &NewAddressRow) -> Result<AddressRow, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            INSERT INTO addresses (customer_id, street, city, state, zip, address_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, customer_id, street, city, state, zip, address_type
            "#,
        )
        .bind(address.customer_id)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip)
        .bind(address.address_type)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Overwrites an address row
    pub async fn update_address(&mut self, row: &AddressRow) -> Result<AddressRow, DatabaseError> {
        sqlx::query_as::<_, AddressRow>(
            r#"
            UPDATE addresses
            SET customer_id = $2, street = $3, city = $4, state = $5, zip = $6, address_type = $7
            WHERE id = $1
            RETURNING id, customer_id, street, city, state, zip, address_type
            "#,
        )
        .bind(row.id)
        .bind(row.customer_id)
        .bind(&row.street)
        .bind(&row.city)
        .bind(&row.state)
        .bind(&row.zip)
        .bind(row.address_type)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Address", row.id))
    }

    /// Deletes an address row
    pub async fn delete_address(&mut self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Address", id));
        }
        Ok(())
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    /// Retrieves a contact row by its identifier
    pub async fn find_contact(&mut self, id: i64) -> Result<Option<ContactRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, customer_id, phone_number, contact_type
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Retrieves the contact owned by a customer
    pub async fn find_contact_by_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Option<ContactRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, customer_id, phone_number, contact_type
            FROM contacts
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Retrieves every contact row ordered by identifier
    pub async fn find_all_contacts(&mut self) -> Result<Vec<ContactRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, customer_id, phone_number, contact_type
            FROM contacts
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// Inserts a contact row
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` on `contacts_phone_number_key` if the number is taken
    pub async fn insert_contact(&mut self, contact: &NewContactRow) -> Result<ContactRow, DatabaseError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (customer_id, phone_number, contact_type)
            VALUES ($1, $2, $3)
            RETURNING id, customer_id, phone_number, contact_type
            "#,
        )
        .bind(contact.customer_id)
        .bind(&contact.phone_number)
        .bind(contact.contact_type)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Overwrites a contact row
    pub async fn update_contact(&mut self, row: &ContactRow) -> Result<ContactRow, DatabaseError> {
        sqlx::query_as::<_, ContactRow>(
            r#"
            UPDATE contacts
            SET customer_id = $2, phone_number = $3, contact_type = $4
            WHERE id = $1
            RETURNING id, customer_id, phone_number, contact_type
            "#,
        )
        .bind(row.id)
        .bind(row.customer_id)
        .bind(&row.phone_number)
        .bind(row.contact_type)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Contact", row.id))
    }

    /// Deletes a contact row
    pub async fn delete_contact(&mut self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Contact", id));
        }
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

/// Database row for a customer
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Database row for an address
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AddressRow {
    pub id: i64,
    pub customer_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address_type: Option<AddressType>,
}

/// Data for inserting an address row
#[derive(Debug, Clone)]
pub struct NewAddressRow {
    pub customer_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address_type: Option<AddressType>,
}

/// Database row for a contact
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ContactRow {
    pub id: i64,
    pub customer_id: i64,
    pub phone_number: Option<String>,
    pub contact_type: Option<ContactType>,
}

/// Data for inserting a contact row
#[derive(Debug, Clone)]
pub struct NewContactRow {
    pub customer_id: i64,
    pub phone_number: Option<String>,
    pub contact_type: Option<ContactType>,
}

// ============================================================================
// Database Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "address_type", rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Work,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "contact_type", rename_all = "lowercase")]
pub enum ContactType {
    Mobile,
    Home,
    Work,
}
