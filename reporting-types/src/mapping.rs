//! Entity to model conversions.
//!
//! One `From` implementation per entity pair. Conversions are pure: they copy
//! fields and never touch storage.

use crate::domain::{Account, Commission, Customer, CustomerAggregate, Transaction};
use crate::dto::{
    AccountModel, ComissionModel, CustomerModel, FullCustomerModel, NewCustomer, TransactionModel,
};
use crate::error::DomainError;

impl From<Customer> for CustomerModel {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            created_at: c.created_at,
        }
    }
}

impl From<Account> for AccountModel {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            customer_id: a.customer_id,
            account_number: a.account_number,
            opened_at: a.opened_at,
        }
    }
}

impl From<Transaction> for TransactionModel {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            customer_id: t.customer_id,
            account_id: t.account_id,
            date: t.date,
            amount: t.amount,
            description: t.description,
        }
    }
}

impl From<Commission> for ComissionModel {
    fn from(c: Commission) -> Self {
        Self {
            id: c.id,
            transaction_id: c.transaction_id,
            amount: c.amount,
        }
    }
}

impl From<CustomerAggregate> for FullCustomerModel {
    fn from(agg: CustomerAggregate) -> Self {
        let CustomerAggregate {
            customer,
            accounts,
            transactions,
        } = agg;

        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            created_at: customer.created_at,
            accounts: accounts.into_iter().map(AccountModel::from).collect(),
            transactions: transactions
                .into_iter()
                .map(TransactionModel::from)
                .collect(),
        }
    }
}

impl TryFrom<NewCustomer> for Customer {
    type Error = DomainError;

    /// Assigns a fresh id and creation time to the inbound model.
    fn try_from(model: NewCustomer) -> Result<Self, Self::Error> {
        Customer::new(model.name, model.email)
    }
}

/// Maps every element of a collection.
pub fn map_all<T, M: From<T>>(items: impl IntoIterator<Item = T>) -> Vec<M> {
    items.into_iter().map(M::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerId, TransactionId};
    use chrono::Utc;

    fn customer() -> Customer {
        Customer::new("Grace".into(), "grace@example.com".into()).unwrap()
    }

    #[test]
    fn test_customer_model_copies_fields() {
        let c = customer();
        let model = CustomerModel::from(c.clone());
        assert_eq!(model.id, c.id);
        assert_eq!(model.name, c.name);
        assert_eq!(model.email, c.email);
        assert_eq!(model.created_at, c.created_at);
    }

    #[test]
    fn test_full_customer_model_keeps_children() {
        let c = customer();
        let account = Account::open(c.id, "ACC-1".into());
        let tx = Transaction::record(c.id, account.id, Utc::now(), 990, Some("coffee".into()));

        let model = FullCustomerModel::from(CustomerAggregate {
            customer: c.clone(),
            accounts: vec![account.clone()],
            transactions: vec![tx.clone()],
        });

        assert_eq!(model.id, c.id);
        assert_eq!(model.accounts, vec![AccountModel::from(account)]);
        assert_eq!(model.transactions, vec![TransactionModel::from(tx)]);
    }

    #[test]
    fn test_commission_model() {
        let tx_id = TransactionId::new();
        let commission = Commission::charge(tx_id, 15);
        let model = ComissionModel::from(commission.clone());
        assert_eq!(model.id, commission.id);
        assert_eq!(model.transaction_id, tx_id);
        assert_eq!(model.amount, 15);
    }

    #[test]
    fn test_new_customer_to_entity() {
        let entity = Customer::try_from(NewCustomer {
            name: "Linus".into(),
            email: "linus@example.com".into(),
        })
        .unwrap();
        assert_eq!(entity.name, "Linus");
        assert_eq!(entity.email, "linus@example.com");
    }

    #[test]
    fn test_new_customer_rejects_blank_name() {
        let result = Customer::try_from(NewCustomer {
            name: "".into(),
            email: "nobody@example.com".into(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_map_all() {
        let owner = CustomerId::new();
        let accounts = vec![
            Account::open(owner, "A".into()),
            Account::open(owner, "B".into()),
        ];
        let models: Vec<AccountModel> = map_all(accounts);
        assert_eq!(models.len(), 2);
        assert!(models.iter().all(|m| m.customer_id == owner));
        assert_eq!(models[1].account_number, "B");
    }
}
