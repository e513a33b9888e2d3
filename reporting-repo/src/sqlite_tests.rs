//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use reporting_types::{
        Account, AccountFilter, AccountId, Commission, CommissionFilter, Customer,
        CustomerFilter, CustomerId, CustomerRepository, RepoError, Repository, Transaction,
        TransactionFilter, TransactionId,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn customers(repo: &SqliteRepo) -> &dyn Repository<Customer> {
        repo
    }

    fn accounts(repo: &SqliteRepo) -> &dyn Repository<Account> {
        repo
    }

    fn transactions(repo: &SqliteRepo) -> &dyn Repository<Transaction> {
        repo
    }

    fn commissions(repo: &SqliteRepo) -> &dyn Repository<Commission> {
        repo
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, d, 10, 0, 0).unwrap()
    }

    async fn add_customer(repo: &SqliteRepo, name: &str) -> Customer {
        let customer = Customer::new(name.to_string(), format!("{}@example.com", name)).unwrap();
        customers(repo).add_and_return(customer).await.unwrap()
    }

    async fn add_account(repo: &SqliteRepo, owner: CustomerId, number: &str) -> Account {
        accounts(repo)
            .add_and_return(Account::open(owner, number.to_string()))
            .await
            .unwrap()
    }

    async fn add_transaction(
        repo: &SqliteRepo,
        account: &Account,
        date: DateTime<Utc>,
        amount: i64,
    ) -> Transaction {
        transactions(repo)
            .add_and_return(Transaction::record(
                account.customer_id,
                account.id,
                date,
                amount,
                None,
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get_customer() {
        let repo = setup_repo().await;

        let created = add_customer(&repo, "alice").await;
        let fetched = customers(&repo).get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "alice");
        assert_eq!(fetched.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_customer_not_found() {
        let repo = setup_repo().await;

        let result = customers(&repo).get_by_id(CustomerId::new()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_add_customer_duplicate_id_conflicts() {
        let repo = setup_repo().await;
        let created = add_customer(&repo, "alice").await;

        let result = customers(&repo).add_and_return(created).await;

        assert!(matches!(
            result,
            Err(RepoError::Conflict(_) | RepoError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_account_requires_existing_customer() {
        let repo = setup_repo().await;

        let result = accounts(&repo)
            .add_and_return(Account::open(CustomerId::new(), "ORPHAN".into()))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_find_customer_owning_account() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let bob = add_customer(&repo, "bob").await;
        let account = add_account(&repo, bob.id, "BOB-1").await;
        add_account(&repo, alice.id, "ALICE-1").await;

        let owners = customers(&repo)
            .find(CustomerFilter::owning_account(account.id))
            .await
            .unwrap();

        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, bob.id);

        let none = customers(&repo)
            .find(CustomerFilter::owning_account(AccountId::new()))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_customer_owning_transaction() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let account = add_account(&repo, alice.id, "ALICE-1").await;
        let tx = add_transaction(&repo, &account, day(1), 100).await;

        let owners = customers(&repo)
            .find(CustomerFilter::owning_transaction(tx.id))
            .await
            .unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, alice.id);

        let none = customers(&repo)
            .find(CustomerFilter::owning_transaction(TransactionId::new()))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_accounts_by_customer() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let bob = add_customer(&repo, "bob").await;
        add_account(&repo, alice.id, "ALICE-1").await;
        add_account(&repo, alice.id, "ALICE-2").await;
        add_account(&repo, bob.id, "BOB-1").await;

        let found = accounts(&repo)
            .find(AccountFilter {
                customer_id: Some(alice.id),
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|a| a.customer_id == alice.id));

        let all = accounts(&repo).find(AccountFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_full_customer_loads_children() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let bob = add_customer(&repo, "bob").await;
        let account = add_account(&repo, alice.id, "ALICE-1").await;
        let bob_account = add_account(&repo, bob.id, "BOB-1").await;
        let tx = add_transaction(&repo, &account, day(2), 250).await;
        add_transaction(&repo, &bob_account, day(2), 999).await;

        let full = repo.get_full_customer(alice.id).await.unwrap().unwrap();

        assert_eq!(full.customer, alice);
        assert_eq!(full.accounts, vec![account]);
        assert_eq!(full.transactions, vec![tx]);
    }

    #[tokio::test]
    async fn test_full_customer_without_accounts() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;

        let full = repo.get_full_customer(alice.id).await.unwrap().unwrap();

        assert!(full.accounts.is_empty());
        assert!(full.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_full_customer_not_found() {
        let repo = setup_repo().await;

        let full = repo.get_full_customer(CustomerId::new()).await.unwrap();

        assert!(full.is_none());
    }

    #[tokio::test]
    async fn test_find_transactions_in_date_range() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let account = add_account(&repo, alice.id, "ALICE-1").await;
        let early = add_transaction(&repo, &account, day(1), 100).await;
        let middle = add_transaction(&repo, &account, day(10), 200).await;
        let late = add_transaction(&repo, &account, day(20), 300).await;

        let found = transactions(&repo)
            .find(TransactionFilter::for_customer(alice.id).between(Some(day(1)), Some(day(10))))
            .await
            .unwrap();
        assert_eq!(found, vec![early.clone(), middle]);

        let open_start = transactions(&repo)
            .find(TransactionFilter::for_customer(alice.id).between(None, Some(day(5))))
            .await
            .unwrap();
        assert_eq!(open_start, vec![early]);

        let open_end = transactions(&repo)
            .find(TransactionFilter::for_customer(alice.id).between(Some(day(11)), None))
            .await
            .unwrap();
        assert_eq!(open_end, vec![late]);
    }

    #[tokio::test]
    async fn test_sub_micro_lower_bound_agrees_with_in_memory_filter() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let account = add_account(&repo, alice.id, "ALICE-1").await;
        let tx = add_transaction(&repo, &account, day(5), 100).await;

        let filter = TransactionFilter::for_customer(alice.id)
            .between(Some(day(5) + Duration::nanoseconds(500)), None);
        assert!(!filter.matches(&tx));

        let found = transactions(&repo).find(filter).await.unwrap();
        assert!(found.is_empty());

        let commission_filter = CommissionFilter {
            date_from: Some(day(5) + Duration::nanoseconds(500)),
            ..CommissionFilter::default()
        };
        commissions(&repo)
            .add_and_return(Commission::charge(tx.id, 3))
            .await
            .unwrap();
        let found = commissions(&repo).find(commission_filter).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_commissions_of_one_transaction_sorted_by_id() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let account = add_account(&repo, alice.id, "ALICE-1").await;
        let tx = add_transaction(&repo, &account, day(2), 100).await;
        for amount in 1..=4 {
            commissions(&repo)
                .add_and_return(Commission::charge(tx.id, amount))
                .await
                .unwrap();
        }

        let found = commissions(&repo)
            .find(CommissionFilter::for_transaction(tx.id))
            .await
            .unwrap();

        let ids: Vec<_> = found.iter().map(|c| *c.id.as_uuid()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(found.len(), 4);
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_reversed_date_range_finds_nothing() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let account = add_account(&repo, alice.id, "ALICE-1").await;
        add_transaction(&repo, &account, day(10), 100).await;

        let found = transactions(&repo)
            .find(TransactionFilter::for_customer(alice.id).between(Some(day(20)), Some(day(1))))
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_find_transactions_by_account() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let first = add_account(&repo, alice.id, "ALICE-1").await;
        let second = add_account(&repo, alice.id, "ALICE-2").await;
        let tx = add_transaction(&repo, &first, day(3), 10).await;
        add_transaction(&repo, &second, day(3), 20).await;

        let found = transactions(&repo)
            .find(TransactionFilter::for_account(first.id))
            .await
            .unwrap();

        assert_eq!(found, vec![tx]);
    }

    #[tokio::test]
    async fn test_commission_lookup_and_filters() {
        let repo = setup_repo().await;
        let alice = add_customer(&repo, "alice").await;
        let bob = add_customer(&repo, "bob").await;
        let alice_account = add_account(&repo, alice.id, "ALICE-1").await;
        let bob_account = add_account(&repo, bob.id, "BOB-1").await;
        let alice_tx = add_transaction(&repo, &alice_account, day(5), 1000).await;
        let bob_tx = add_transaction(&repo, &bob_account, day(25), 2000).await;

        let alice_fee = commissions(&repo)
            .add_and_return(Commission::charge(alice_tx.id, 10))
            .await
            .unwrap();
        let bob_fee = commissions(&repo)
            .add_and_return(Commission::charge(bob_tx.id, 20))
            .await
            .unwrap();

        let fetched = commissions(&repo)
            .get_by_id(alice_fee.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, alice_fee);

        let by_tx = commissions(&repo)
            .find(CommissionFilter::for_transaction(bob_tx.id))
            .await
            .unwrap();
        assert_eq!(by_tx, vec![bob_fee.clone()]);

        let by_customer = commissions(&repo)
            .find(CommissionFilter {
                customer_id: Some(alice.id),
                ..CommissionFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_customer, vec![alice_fee.clone()]);

        let by_account_and_date = commissions(&repo)
            .find(CommissionFilter {
                account_id: Some(bob_account.id),
                date_from: Some(day(20)),
                date_to: Some(day(30)),
                ..CommissionFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_account_and_date, vec![bob_fee]);

        let mismatched = commissions(&repo)
            .find(CommissionFilter {
                customer_id: Some(alice.id),
                account_id: Some(bob_account.id),
                ..CommissionFilter::default()
            })
            .await
            .unwrap();
        assert!(mismatched.is_empty());

        let all = commissions(&repo)
            .find(CommissionFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }
}
