//! Query filters passed to `Repository::find`.
//!
//! Every field is optional; a `None` field does not constrain the result and
//! the supplied fields are combined with AND. Date bounds are inclusive.

use chrono::{DateTime, Utc};

use crate::domain::{
    Account, AccountId, Commission, Customer, CustomerId, Transaction, TransactionId,
};

/// Customers owning a given account and/or transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilter {
    pub owns_account: Option<AccountId>,
    pub owns_transaction: Option<TransactionId>,
}

impl CustomerFilter {
    pub fn owning_account(id: AccountId) -> Self {
        Self {
            owns_account: Some(id),
            ..Self::default()
        }
    }

    pub fn owning_transaction(id: TransactionId) -> Self {
        Self {
            owns_transaction: Some(id),
            ..Self::default()
        }
    }

    /// Evaluates the filter against a customer and the records it could own.
    pub fn matches(
        &self,
        customer: &Customer,
        accounts: &[Account],
        transactions: &[Transaction],
    ) -> bool {
        let owns_account = self.owns_account.is_none_or(|id| {
            accounts
                .iter()
                .any(|a| a.id == id && a.customer_id == customer.id)
        });
        let owns_transaction = self.owns_transaction.is_none_or(|id| {
            transactions
                .iter()
                .any(|t| t.id == id && t.customer_id == customer.id)
        });
        owns_account && owns_transaction
    }
}

/// Accounts of a customer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountFilter {
    pub customer_id: Option<CustomerId>,
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        self.customer_id.is_none_or(|id| account.customer_id == id)
    }
}

/// Transactions by owner, account and booking date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub customer_id: Option<CustomerId>,
    pub account_id: Option<AccountId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    pub fn for_customer(id: CustomerId) -> Self {
        Self {
            customer_id: Some(id),
            ..Self::default()
        }
    }

    pub fn for_account(id: AccountId) -> Self {
        Self {
            account_id: Some(id),
            ..Self::default()
        }
    }

    /// Restricts the filter to an inclusive date range.
    pub fn between(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.customer_id.is_none_or(|id| tx.customer_id == id)
            && self.account_id.is_none_or(|id| tx.account_id == id)
            && tx.is_within(self.date_from, self.date_to)
    }
}

/// Commissions by their transaction, or by the owner, account and date of
/// that transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommissionFilter {
    pub transaction_id: Option<TransactionId>,
    pub customer_id: Option<CustomerId>,
    pub account_id: Option<AccountId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl CommissionFilter {
    pub fn for_transaction(id: TransactionId) -> Self {
        Self {
            transaction_id: Some(id),
            ..Self::default()
        }
    }

    /// True when any predicate needs the owning transaction to evaluate.
    pub fn needs_transaction(&self) -> bool {
        self.customer_id.is_some()
            || self.account_id.is_some()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    /// Evaluates the filter against a commission and its owning transaction.
    /// A commission whose transaction is unknown only matches filters that do
    /// not look at the transaction.
    pub fn matches(&self, commission: &Commission, tx: Option<&Transaction>) -> bool {
        if self
            .transaction_id
            .is_some_and(|id| commission.transaction_id != id)
        {
            return false;
        }
        if !self.needs_transaction() {
            return true;
        }
        let Some(tx) = tx else {
            return false;
        };
        TransactionFilter {
            customer_id: self.customer_id,
            account_id: self.account_id,
            date_from: self.date_from,
            date_to: self.date_to,
        }
        .matches(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_customer_filter_owning_account() {
        let owner = Customer::new("Owner".into(), "o@example.com".into()).unwrap();
        let other = Customer::new("Other".into(), "x@example.com".into()).unwrap();
        let account = Account::open(owner.id, "ACC".into());
        let accounts = vec![account.clone()];

        let filter = CustomerFilter::owning_account(account.id);
        assert!(filter.matches(&owner, &accounts, &[]));
        assert!(!filter.matches(&other, &accounts, &[]));
    }

    #[test]
    fn test_empty_customer_filter_matches_all() {
        let c = Customer::new("Any".into(), "a@example.com".into()).unwrap();
        assert!(CustomerFilter::default().matches(&c, &[], &[]));
    }

    #[test]
    fn test_transaction_filter_combines_predicates() {
        let customer = CustomerId::new();
        let account = AccountId::new();
        let tx = Transaction::record(customer, account, at(10), 100, None);

        assert!(TransactionFilter::for_customer(customer).matches(&tx));
        assert!(
            TransactionFilter::for_customer(customer)
                .between(Some(at(1)), Some(at(10)))
                .matches(&tx)
        );
        assert!(
            !TransactionFilter::for_customer(customer)
                .between(Some(at(11)), None)
                .matches(&tx)
        );
        assert!(!TransactionFilter::for_customer(CustomerId::new()).matches(&tx));
        assert!(TransactionFilter::for_account(account).matches(&tx));
    }

    #[test]
    fn test_commission_filter_by_transaction() {
        let tx = Transaction::record(CustomerId::new(), AccountId::new(), at(3), 100, None);
        let commission = Commission::charge(tx.id, 2);

        assert!(CommissionFilter::for_transaction(tx.id).matches(&commission, None));
        assert!(!CommissionFilter::for_transaction(TransactionId::new()).matches(&commission, None));
    }

    #[test]
    fn test_commission_filter_all_predicates_must_hold() {
        let customer = CustomerId::new();
        let account = AccountId::new();
        let tx = Transaction::record(customer, account, at(15), 100, None);
        let commission = Commission::charge(tx.id, 2);

        let filter = CommissionFilter {
            customer_id: Some(customer),
            account_id: Some(AccountId::new()),
            ..CommissionFilter::default()
        };
        assert!(!filter.matches(&commission, Some(&tx)));

        let filter = CommissionFilter {
            customer_id: Some(customer),
            account_id: Some(account),
            date_from: Some(at(1)),
            date_to: Some(at(31)),
            ..CommissionFilter::default()
        };
        assert!(filter.matches(&commission, Some(&tx)));
        assert!(!filter.matches(&commission, None));
    }
}
