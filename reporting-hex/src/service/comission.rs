//! Commission lookups.

use reporting_types::{
    AppError, ComissionModel, ComissionQuery, Commission, CommissionFilter, CommissionId, Entity,
    Repository, Transaction, TransactionId, mapping::map_all,
};

pub struct ComissionService<T, M> {
    transactions: T,
    commissions: M,
}

impl<T, M> ComissionService<T, M>
where
    T: Repository<Transaction>,
    M: Repository<Commission>,
{
    pub fn new(transactions: T, commissions: M) -> Self {
        Self {
            transactions,
            commissions,
        }
    }

    /// Gets a commission by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_comission_by_id(&self, id: CommissionId) -> Result<ComissionModel, AppError> {
        self.commissions
            .get_by_id(id)
            .await?
            .map(ComissionModel::from)
            .ok_or_else(|| AppError::entity_not_found(Commission::NAME, id))
    }

    /// Gets the first commission charged on a transaction.
    #[tracing::instrument(skip(self))]
    pub async fn get_comission_by_transaction_id(
        &self,
        transaction_id: TransactionId,
    ) -> Result<ComissionModel, AppError> {
        if self.transactions.get_by_id(transaction_id).await?.is_none() {
            return Err(AppError::entity_not_found(Transaction::NAME, transaction_id));
        }

        self.commissions
            .find(CommissionFilter::for_transaction(transaction_id))
            .await?
            .into_iter()
            .next()
            .map(ComissionModel::from)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Commission for transaction {} not found",
                    transaction_id
                ))
            })
    }

    /// Lists commissions matching every supplied criterion.
    #[tracing::instrument(skip(self))]
    pub async fn get_comissions(
        &self,
        query: ComissionQuery,
    ) -> Result<Vec<ComissionModel>, AppError> {
        let filter = CommissionFilter {
            transaction_id: None,
            customer_id: query.customer_id,
            account_id: query.account_id,
            date_from: query.date_start,
            date_to: query.date_end,
        };

        let found = self.commissions.find(filter).await?;
        Ok(map_all(found))
    }
}
