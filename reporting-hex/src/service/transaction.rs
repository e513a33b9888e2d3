//! Transaction search.

use reporting_types::{
    AccountId, AppError, Customer, CustomerId, Entity, Repository, Transaction,
    TransactionFilter, TransactionModel, TransactionSearchFilter, mapping::map_all,
};

pub struct TransactionService<C, T> {
    customers: C,
    transactions: T,
}

impl<C, T> TransactionService<C, T>
where
    C: Repository<Customer>,
    T: Repository<Transaction>,
{
    pub fn new(customers: C, transactions: T) -> Self {
        Self {
            customers,
            transactions,
        }
    }

    /// Lists a customer's transactions inside an inclusive date range.
    #[tracing::instrument(skip(self))]
    pub async fn search_transaction(
        &self,
        customer_id: CustomerId,
        filter: TransactionSearchFilter,
    ) -> Result<Vec<TransactionModel>, AppError> {
        if self.customers.get_by_id(customer_id).await?.is_none() {
            return Err(AppError::entity_not_found(Customer::NAME, customer_id));
        }

        let criteria =
            TransactionFilter::for_customer(customer_id).between(filter.date_from, filter.date_to);
        let found = self.transactions.find(criteria).await?;

        Ok(map_all(found))
    }

    /// Lists the transactions booked on an account.
    #[tracing::instrument(skip(self))]
    pub async fn search_transaction_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionModel>, AppError> {
        let found = self
            .transactions
            .find(TransactionFilter::for_account(account_id))
            .await?;

        Ok(map_all(found))
    }
}
