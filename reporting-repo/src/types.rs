//! Database row types and conversion helpers.
//!
//! SQLite stores identifiers and timestamps as text; PostgreSQL uses native
//! `UUID` and `TIMESTAMPTZ` columns. Each backend has its own row structs so
//! both adapters can be compiled side by side.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use reporting_types::RepoError;

// ─────────────────────────────────────────────────────────────────────────────
// Error helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a driver error into the repository taxonomy.
pub fn db_err(e: sqlx::Error) -> RepoError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => RepoError::Conflict(db.message().to_string()),
        Some(db) if db.is_foreign_key_violation() => {
            RepoError::Conflict(format!("Missing related record: {}", db.message()))
        }
        _ => RepoError::Database(e.to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-width RFC 3339 in UTC, so text columns sort chronologically.
#[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Rounds a lower range bound up to the microsecond columns both backends store.
///
/// Truncating instead would admit rows just before a sub-microsecond bound.
pub fn ceil_to_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    match dt.timestamp_subsec_nanos() % 1_000 {
        0 => dt,
        rem => dt + Duration::nanoseconds(i64::from(1_000 - rem)),
    }
}

#[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::Database(format!("Invalid timestamp {}: {}", s, e)))
}

#[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
pub fn parse_id<T: std::str::FromStr<Err = uuid::Error>>(s: &str) -> Result<T, RepoError> {
    s.parse()
        .map_err(|e| RepoError::Database(format!("Invalid id {}: {}", s, e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
pub mod sqlite_rows {
    use sqlx::FromRow;

    use reporting_types::{Account, Commission, Customer, RepoError, Transaction};

    use super::{parse_id, parse_timestamp};

    #[derive(FromRow)]
    pub struct CustomerRow {
        pub id: String,
        pub name: String,
        pub email: String,
        pub created_at: String,
    }

    impl CustomerRow {
        pub fn into_domain(self) -> Result<Customer, RepoError> {
            Ok(Customer::from_parts(
                parse_id(&self.id)?,
                self.name,
                self.email,
                parse_timestamp(&self.created_at)?,
            ))
        }
    }

    #[derive(FromRow)]
    pub struct AccountRow {
        pub id: String,
        pub customer_id: String,
        pub account_number: String,
        pub opened_at: String,
    }

    impl AccountRow {
        pub fn into_domain(self) -> Result<Account, RepoError> {
            Ok(Account::from_parts(
                parse_id(&self.id)?,
                parse_id(&self.customer_id)?,
                self.account_number,
                parse_timestamp(&self.opened_at)?,
            ))
        }
    }

    #[derive(FromRow)]
    pub struct TransactionRow {
        pub id: String,
        pub customer_id: String,
        pub account_id: String,
        pub date: String,
        pub amount: i64,
        pub description: Option<String>,
    }

    impl TransactionRow {
        pub fn into_domain(self) -> Result<Transaction, RepoError> {
            Ok(Transaction {
                id: parse_id(&self.id)?,
                customer_id: parse_id(&self.customer_id)?,
                account_id: parse_id(&self.account_id)?,
                date: parse_timestamp(&self.date)?,
                amount: self.amount,
                description: self.description,
            })
        }
    }

    #[derive(FromRow)]
    pub struct CommissionRow {
        pub id: String,
        pub transaction_id: String,
        pub amount: i64,
    }

    impl CommissionRow {
        pub fn into_domain(self) -> Result<Commission, RepoError> {
            Ok(Commission {
                id: parse_id(&self.id)?,
                transaction_id: parse_id(&self.transaction_id)?,
                amount: self.amount,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "postgres")]
pub mod pg_rows {
    use chrono::{DateTime, Utc};
    use sqlx::FromRow;
    use uuid::Uuid;

    use reporting_types::{
        Account, AccountId, Commission, CommissionId, Customer, CustomerId, Transaction,
        TransactionId,
    };

    #[derive(FromRow)]
    pub struct CustomerRow {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub created_at: DateTime<Utc>,
    }

    impl From<CustomerRow> for Customer {
        fn from(row: CustomerRow) -> Self {
            Customer::from_parts(
                CustomerId::from_uuid(row.id),
                row.name,
                row.email,
                row.created_at,
            )
        }
    }

    #[derive(FromRow)]
    pub struct AccountRow {
        pub id: Uuid,
        pub customer_id: Uuid,
        pub account_number: String,
        pub opened_at: DateTime<Utc>,
    }

    impl From<AccountRow> for Account {
        fn from(row: AccountRow) -> Self {
            Account::from_parts(
                AccountId::from_uuid(row.id),
                CustomerId::from_uuid(row.customer_id),
                row.account_number,
                row.opened_at,
            )
        }
    }

    #[derive(FromRow)]
    pub struct TransactionRow {
        pub id: Uuid,
        pub customer_id: Uuid,
        pub account_id: Uuid,
        pub date: DateTime<Utc>,
        pub amount: i64,
        pub description: Option<String>,
    }

    impl From<TransactionRow> for Transaction {
        fn from(row: TransactionRow) -> Self {
            Transaction {
                id: TransactionId::from_uuid(row.id),
                customer_id: CustomerId::from_uuid(row.customer_id),
                account_id: AccountId::from_uuid(row.account_id),
                date: row.date,
                amount: row.amount,
                description: row.description,
            }
        }
    }

    #[derive(FromRow)]
    pub struct CommissionRow {
        pub id: Uuid,
        pub transaction_id: Uuid,
        pub amount: i64,
    }

    impl From<CommissionRow> for Commission {
        fn from(row: CommissionRow) -> Self {
            Commission {
                id: CommissionId::from_uuid(row.id),
                transaction_id: TransactionId::from_uuid(row.transaction_id),
                amount: row.amount,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamps_sort_as_text() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = early + Duration::milliseconds(500);
        assert!(format_timestamp(early) < format_timestamp(late));
        assert_eq!(format_timestamp(early), "2024-01-01T00:00:00.000000Z");
    }

    #[test]
    fn test_timestamp_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2023, 7, 4, 18, 30, 5).unwrap();
        assert_eq!(parse_timestamp(&format_timestamp(dt)).unwrap(), dt);
    }

    #[test]
    fn test_lower_bound_rounds_up_sub_micros() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bound = whole + Duration::nanoseconds(500);

        assert_eq!(ceil_to_micros(bound), whole + Duration::microseconds(1));
        assert_eq!(ceil_to_micros(whole), whole);
        assert!(format_timestamp(whole) < format_timestamp(ceil_to_micros(bound)));
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let result = parse_id::<reporting_types::CustomerId>("nope");
        assert!(matches!(result, Err(RepoError::Database(_))));
    }
}
