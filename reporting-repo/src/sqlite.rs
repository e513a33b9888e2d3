//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;

use reporting_types::{
    Account, AccountFilter, AccountId, Commission, CommissionFilter, CommissionId, Customer,
    CustomerAggregate, CustomerFilter, CustomerId, CustomerRepository, RepoError, Repository,
    Transaction, TransactionFilter, TransactionId,
};

use crate::types::sqlite_rows::{AccountRow, CommissionRow, CustomerRow, TransactionRow};
use crate::types::{ceil_to_micros, db_err, format_timestamp};

const MIGRATION: &str = include_str!("../migrations/0001_create_tables.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        tracing::debug!("SQLite schema ready");

        Ok(repo)
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        sqlx::raw_sql(MIGRATION)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<Customer> for SqliteRepo {
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        let row: Option<CustomerRow> =
            sqlx::query_as(r#"SELECT id, name, email, created_at FROM customers WHERE id = ?"#)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        row.map(CustomerRow::into_domain).transpose()
    }

    async fn find(&self, filter: CustomerFilter) -> Result<Vec<Customer>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT c.id, c.name, c.email, c.created_at FROM customers c WHERE 1 = 1",
        );

        if let Some(account_id) = filter.owns_account {
            qb.push(" AND EXISTS (SELECT 1 FROM accounts a WHERE a.customer_id = c.id AND a.id = ")
                .push_bind(account_id.to_string())
                .push(")");
        }
        if let Some(transaction_id) = filter.owns_transaction {
            qb.push(
                " AND EXISTS (SELECT 1 FROM transactions t WHERE t.customer_id = c.id AND t.id = ",
            )
            .push_bind(transaction_id.to_string())
            .push(")");
        }
        qb.push(" ORDER BY c.created_at, c.id");

        let rows: Vec<CustomerRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(CustomerRow::into_domain).collect()
    }

    async fn add_and_return(&self, customer: Customer) -> Result<Customer, RepoError> {
        let row: CustomerRow = sqlx::query_as(
            r#"INSERT INTO customers (id, name, email, created_at) VALUES (?, ?, ?, ?)
               RETURNING id, name, email, created_at"#,
        )
        .bind(customer.id.to_string())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(format_timestamp(customer.created_at))
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row.into_domain()
    }
}

#[async_trait]
impl CustomerRepository for SqliteRepo {
    async fn get_full_customer(
        &self,
        id: CustomerId,
    ) -> Result<Option<CustomerAggregate>, RepoError> {
        let id_str = id.to_string();

        let row: Option<CustomerRow> =
            sqlx::query_as(r#"SELECT id, name, email, created_at FROM customers WHERE id = ?"#)
                .bind(&id_str)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let accounts: Vec<AccountRow> = sqlx::query_as(
            r#"SELECT id, customer_id, account_number, opened_at FROM accounts
               WHERE customer_id = ? ORDER BY opened_at, id"#,
        )
        .bind(&id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let transactions: Vec<TransactionRow> = sqlx::query_as(
            r#"SELECT id, customer_id, account_id, date, amount, description FROM transactions
               WHERE customer_id = ? ORDER BY date, id"#,
        )
        .bind(&id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Some(CustomerAggregate {
            customer: row.into_domain()?,
            accounts: accounts
                .into_iter()
                .map(AccountRow::into_domain)
                .collect::<Result<_, _>>()?,
            transactions: transactions
                .into_iter()
                .map(TransactionRow::into_domain)
                .collect::<Result<_, _>>()?,
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<Account> for SqliteRepo {
    async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepoError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"SELECT id, customer_id, account_number, opened_at FROM accounts WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(AccountRow::into_domain).transpose()
    }

    async fn find(&self, filter: AccountFilter) -> Result<Vec<Account>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT id, customer_id, account_number, opened_at FROM accounts WHERE 1 = 1",
        );
        if let Some(customer_id) = filter.customer_id {
            qb.push(" AND customer_id = ")
                .push_bind(customer_id.to_string());
        }
        qb.push(" ORDER BY opened_at, id");

        let rows: Vec<AccountRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(AccountRow::into_domain).collect()
    }

    async fn add_and_return(&self, account: Account) -> Result<Account, RepoError> {
        let row: AccountRow = sqlx::query_as(
            r#"INSERT INTO accounts (id, customer_id, account_number, opened_at) VALUES (?, ?, ?, ?)
               RETURNING id, customer_id, account_number, opened_at"#,
        )
        .bind(account.id.to_string())
        .bind(account.customer_id.to_string())
        .bind(&account.account_number)
        .bind(format_timestamp(account.opened_at))
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row.into_domain()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<Transaction> for SqliteRepo {
    async fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        let row: Option<TransactionRow> = sqlx::query_as(
            r#"SELECT id, customer_id, account_id, date, amount, description
               FROM transactions WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(TransactionRow::into_domain).transpose()
    }

    async fn find(&self, filter: TransactionFilter) -> Result<Vec<Transaction>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT id, customer_id, account_id, date, amount, description FROM transactions WHERE 1 = 1",
        );
        if let Some(customer_id) = filter.customer_id {
            qb.push(" AND customer_id = ")
                .push_bind(customer_id.to_string());
        }
        if let Some(account_id) = filter.account_id {
            qb.push(" AND account_id = ")
                .push_bind(account_id.to_string());
        }
        if let Some(from) = filter.date_from {
            qb.push(" AND date >= ")
                .push_bind(format_timestamp(ceil_to_micros(from)));
        }
        if let Some(to) = filter.date_to {
            qb.push(" AND date <= ").push_bind(format_timestamp(to));
        }
        qb.push(" ORDER BY date, id");

        let rows: Vec<TransactionRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(TransactionRow::into_domain).collect()
    }

    async fn add_and_return(&self, tx: Transaction) -> Result<Transaction, RepoError> {
        let row: TransactionRow = sqlx::query_as(
            r#"INSERT INTO transactions (id, customer_id, account_id, date, amount, description)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING id, customer_id, account_id, date, amount, description"#,
        )
        .bind(tx.id.to_string())
        .bind(tx.customer_id.to_string())
        .bind(tx.account_id.to_string())
        .bind(format_timestamp(tx.date))
        .bind(tx.amount)
        .bind(&tx.description)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row.into_domain()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commissions
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<Commission> for SqliteRepo {
    async fn get_by_id(&self, id: CommissionId) -> Result<Option<Commission>, RepoError> {
        let row: Option<CommissionRow> =
            sqlx::query_as(r#"SELECT id, transaction_id, amount FROM commissions WHERE id = ?"#)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        row.map(CommissionRow::into_domain).transpose()
    }

    async fn find(&self, filter: CommissionFilter) -> Result<Vec<Commission>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT c.id, c.transaction_id, c.amount FROM commissions c \
             JOIN transactions t ON t.id = c.transaction_id WHERE 1 = 1",
        );
        if let Some(transaction_id) = filter.transaction_id {
            qb.push(" AND c.transaction_id = ")
                .push_bind(transaction_id.to_string());
        }
        if let Some(customer_id) = filter.customer_id {
            qb.push(" AND t.customer_id = ")
                .push_bind(customer_id.to_string());
        }
        if let Some(account_id) = filter.account_id {
            qb.push(" AND t.account_id = ")
                .push_bind(account_id.to_string());
        }
        if let Some(from) = filter.date_from {
            qb.push(" AND t.date >= ")
                .push_bind(format_timestamp(ceil_to_micros(from)));
        }
        if let Some(to) = filter.date_to {
            qb.push(" AND t.date <= ").push_bind(format_timestamp(to));
        }
        qb.push(" ORDER BY t.date, c.id");

        let rows: Vec<CommissionRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(CommissionRow::into_domain).collect()
    }

    async fn add_and_return(&self, commission: Commission) -> Result<Commission, RepoError> {
        let row: CommissionRow = sqlx::query_as(
            r#"INSERT INTO commissions (id, transaction_id, amount) VALUES (?, ?, ?)
               RETURNING id, transaction_id, amount"#,
        )
        .bind(commission.id.to_string())
        .bind(commission.transaction_id.to_string())
        .bind(commission.amount)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row.into_domain()
    }
}
