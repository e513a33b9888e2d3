//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use reporting_types::{
    Account, AccountFilter, AccountId, Commission, CommissionFilter, CommissionId, Customer,
    CustomerAggregate, CustomerFilter, CustomerId, CustomerRepository, RepoError, Repository,
    Transaction, TransactionFilter, TransactionId,
};

use crate::types::{ceil_to_micros, db_err};
use crate::types::pg_rows::{AccountRow, CommissionRow, CustomerRow, TransactionRow};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::debug!("PostgreSQL schema ready");
        Ok(Self { pool })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<Customer> for PostgresRepo {
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        let row: Option<CustomerRow> =
            sqlx::query_as(r#"SELECT id, name, email, created_at FROM customers WHERE id = $1"#)
                .bind(id.into_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        Ok(row.map(Customer::from))
    }

    async fn find(&self, filter: CustomerFilter) -> Result<Vec<Customer>, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT c.id, c.name, c.email, c.created_at FROM customers c WHERE TRUE",
        );

        if let Some(account_id) = filter.owns_account {
            qb.push(" AND EXISTS (SELECT 1 FROM accounts a WHERE a.customer_id = c.id AND a.id = ")
                .push_bind(account_id.into_uuid())
                .push(")");
        }
        if let Some(transaction_id) = filter.owns_transaction {
            qb.push(
                " AND EXISTS (SELECT 1 FROM transactions t WHERE t.customer_id = c.id AND t.id = ",
            )
            .push_bind(transaction_id.into_uuid())
            .push(")");
        }
        qb.push(" ORDER BY c.created_at, c.id");

        let rows: Vec<CustomerRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn add_and_return(&self, customer: Customer) -> Result<Customer, RepoError> {
        let row: CustomerRow = sqlx::query_as(
            r#"INSERT INTO customers (id, name, email, created_at) VALUES ($1, $2, $3, $4)
               RETURNING id, name, email, created_at"#,
        )
        .bind(customer.id.into_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }
}

#[async_trait]
impl CustomerRepository for PostgresRepo {
    async fn get_full_customer(
        &self,
        id: CustomerId,
    ) -> Result<Option<CustomerAggregate>, RepoError> {
        let row: Option<CustomerRow> =
            sqlx::query_as(r#"SELECT id, name, email, created_at FROM customers WHERE id = $1"#)
                .bind(id.into_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let accounts: Vec<AccountRow> = sqlx::query_as(
            r#"SELECT id, customer_id, account_number, opened_at FROM accounts
               WHERE customer_id = $1 ORDER BY opened_at, id"#,
        )
        .bind(id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let transactions: Vec<TransactionRow> = sqlx::query_as(
            r#"SELECT id, customer_id, account_id, date, amount, description FROM transactions
               WHERE customer_id = $1 ORDER BY date, id"#,
        )
        .bind(id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Some(CustomerAggregate {
            customer: row.into(),
            accounts: accounts.into_iter().map(Account::from).collect(),
            transactions: transactions.into_iter().map(Transaction::from).collect(),
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<Account> for PostgresRepo {
    async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepoError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"SELECT id, customer_id, account_number, opened_at FROM accounts WHERE id = $1"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Account::from))
    }

    async fn find(&self, filter: AccountFilter) -> Result<Vec<Account>, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, customer_id, account_number, opened_at FROM accounts WHERE TRUE",
        );
        if let Some(customer_id) = filter.customer_id {
            qb.push(" AND customer_id = ")
                .push_bind(customer_id.into_uuid());
        }
        qb.push(" ORDER BY opened_at, id");

        let rows: Vec<AccountRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn add_and_return(&self, account: Account) -> Result<Account, RepoError> {
        let row: AccountRow = sqlx::query_as(
            r#"INSERT INTO accounts (id, customer_id, account_number, opened_at)
               VALUES ($1, $2, $3, $4)
               RETURNING id, customer_id, account_number, opened_at"#,
        )
        .bind(account.id.into_uuid())
        .bind(account.customer_id.into_uuid())
        .bind(&account.account_number)
        .bind(account.opened_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<Transaction> for PostgresRepo {
    async fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        let row: Option<TransactionRow> = sqlx::query_as(
            r#"SELECT id, customer_id, account_id, date, amount, description
               FROM transactions WHERE id = $1"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Transaction::from))
    }

    async fn find(&self, filter: TransactionFilter) -> Result<Vec<Transaction>, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, customer_id, account_id, date, amount, description FROM transactions WHERE TRUE",
        );
        if let Some(customer_id) = filter.customer_id {
            qb.push(" AND customer_id = ")
                .push_bind(customer_id.into_uuid());
        }
        if let Some(account_id) = filter.account_id {
            qb.push(" AND account_id = ")
                .push_bind(account_id.into_uuid());
        }
        if let Some(from) = filter.date_from {
            qb.push(" AND date >= ").push_bind(ceil_to_micros(from));
        }
        if let Some(to) = filter.date_to {
            qb.push(" AND date <= ").push_bind(to);
        }
        qb.push(" ORDER BY date, id");

        let rows: Vec<TransactionRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn add_and_return(&self, tx: Transaction) -> Result<Transaction, RepoError> {
        let row: TransactionRow = sqlx::query_as(
            r#"INSERT INTO transactions (id, customer_id, account_id, date, amount, description)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, customer_id, account_id, date, amount, description"#,
        )
        .bind(tx.id.into_uuid())
        .bind(tx.customer_id.into_uuid())
        .bind(tx.account_id.into_uuid())
        .bind(tx.date)
        .bind(tx.amount)
        .bind(&tx.description)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commissions
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<Commission> for PostgresRepo {
    async fn get_by_id(&self, id: CommissionId) -> Result<Option<Commission>, RepoError> {
        let row: Option<CommissionRow> =
            sqlx::query_as(r#"SELECT id, transaction_id, amount FROM commissions WHERE id = $1"#)
                .bind(id.into_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;

        Ok(row.map(Commission::from))
    }

    async fn find(&self, filter: CommissionFilter) -> Result<Vec<Commission>, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT c.id, c.transaction_id, c.amount FROM commissions c \
             JOIN transactions t ON t.id = c.transaction_id WHERE TRUE",
        );
        if let Some(transaction_id) = filter.transaction_id {
            qb.push(" AND c.transaction_id = ")
                .push_bind(transaction_id.into_uuid());
        }
        if let Some(customer_id) = filter.customer_id {
            qb.push(" AND t.customer_id = ")
                .push_bind(customer_id.into_uuid());
        }
        if let Some(account_id) = filter.account_id {
            qb.push(" AND t.account_id = ")
                .push_bind(account_id.into_uuid());
        }
        if let Some(from) = filter.date_from {
            qb.push(" AND t.date >= ").push_bind(ceil_to_micros(from));
        }
        if let Some(to) = filter.date_to {
            qb.push(" AND t.date <= ").push_bind(to);
        }
        qb.push(" ORDER BY t.date, c.id");

        let rows: Vec<CommissionRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Commission::from).collect())
    }

    async fn add_and_return(&self, commission: Commission) -> Result<Commission, RepoError> {
        let row: CommissionRow = sqlx::query_as(
            r#"INSERT INTO commissions (id, transaction_id, amount) VALUES ($1, $2, $3)
               RETURNING id, transaction_id, amount"#,
        )
        .bind(commission.id.into_uuid())
        .bind(commission.transaction_id.into_uuid())
        .bind(commission.amount)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }
}
