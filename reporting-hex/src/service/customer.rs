//! Customer lookups and registration.

use reporting_types::{
    Account, AccountId, AppError, Customer, CustomerFilter, CustomerId, CustomerModel,
    CustomerRepository, Entity, FullCustomerModel, NewCustomer, Repository, Transaction,
    TransactionId,
};

/// Resolves customers by id, owned account or owned transaction.
pub struct CustomerService<C, A, T> {
    customers: C,
    accounts: A,
    transactions: T,
}

impl<C, A, T> CustomerService<C, A, T>
where
    C: CustomerRepository,
    A: Repository<Account>,
    T: Repository<Transaction>,
{
    /// Creates a new customer service with the given repositories.
    pub fn new(customers: C, accounts: A, transactions: T) -> Self {
        Self {
            customers,
            accounts,
            transactions,
        }
    }

    /// Gets a customer with its accounts and transactions.
    ///
    /// A customer without any account is reported as not found.
    #[tracing::instrument(skip(self))]
    pub async fn get_full_customer_by_id(
        &self,
        id: CustomerId,
    ) -> Result<FullCustomerModel, AppError> {
        let customer = self
            .customers
            .get_full_customer(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found(Customer::NAME, id))?;

        if !customer.has_accounts() {
            return Err(AppError::NotFound(format!(
                "No Accounts related to Customer {}",
                id
            )));
        }

        Ok(customer.into())
    }

    /// Gets a customer by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer_by_id(&self, id: CustomerId) -> Result<CustomerModel, AppError> {
        self.customers
            .get_by_id(id)
            .await?
            .map(CustomerModel::from)
            .ok_or_else(|| AppError::entity_not_found(Customer::NAME, id))
    }

    /// Gets the customer owning an account.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer_by_account_id(
        &self,
        account_id: AccountId,
    ) -> Result<CustomerModel, AppError> {
        let account = self
            .accounts
            .get_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::entity_not_found(Account::NAME, account_id))?;

        self.customers
            .find(CustomerFilter::owning_account(account.id))
            .await?
            .into_iter()
            .next()
            .map(CustomerModel::from)
            .ok_or_else(|| {
                AppError::NotFound(format!("Customer with account {} not found", account_id))
            })
    }

    /// Gets the customer owning a transaction.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer_by_transaction_id(
        &self,
        transaction_id: TransactionId,
    ) -> Result<CustomerModel, AppError> {
        let transaction = self
            .transactions
            .get_by_id(transaction_id)
            .await?
            .ok_or_else(|| AppError::entity_not_found(Transaction::NAME, transaction_id))?;

        self.customers
            .find(CustomerFilter::owning_transaction(transaction.id))
            .await?
            .into_iter()
            .next()
            .map(CustomerModel::from)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Customer with transaction {} not found",
                    transaction_id
                ))
            })
    }

    /// Adds a new customer and returns it as persisted.
    #[tracing::instrument(skip(self))]
    pub async fn add_customer(&self, model: NewCustomer) -> Result<CustomerModel, AppError> {
        let entity = Customer::try_from(model)?;
        let stored = self.customers.add_and_return(entity).await?;
        tracing::info!(customer_id = %stored.id, "customer added");
        Ok(stored.into())
    }
}
