//! Integration tests for statuses, chains, exchanges, assets and pools

mod common;

#[cfg(test)]
mod reference_data_tests {
    use super::common::create_test_store;
    use ledger_dal::entities::{Asset, Audit, Pool, Status};
    use ledger_dal::repositories::Joiner;
    use ledger_dal::{
        BulkCreate, Count, Create, DalError, Delete, PageQuery, Paginate, Predicate, Read,
        ReadAll, ReadByUuid, ReadMany, Repository, SharedConnection, SortOrder, Update,
    };
    use sqlx::PgPool;
    use std::time::Duration;
    use uuid::Uuid;

    fn ids(pools: &[Pool]) -> Vec<i32> {
        pools.iter().map(|pool| pool.pool_id).collect()
    }

    // ============================================================
    // Reads
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_read_missing_key_returns_none(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);

        assert!(store.pool.read(&999).await?.is_none());
        assert!(store.status.read_by_uuid(&Uuid::new_v4()).await?.is_none());
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_read_by_key_and_by_uuid_agree(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);

        let by_key = store.pool.read(&2).await?.expect("pool 2 is in the fixture");
        let by_uuid = store
            .pool
            .read_by_uuid(&by_key.uuid)
            .await?
            .expect("uuid was just read");

        assert_eq!(by_key, by_uuid);
        assert_eq!(by_key.fee_tier, Some(3000));
        assert_eq!(by_key.audit.created_by.as_deref(), Some("SYSTEM"));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_read_many_skips_unknown_keys(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);

        let mut found = ids(&store.pool.read_many(&[1, 3, 99]).await?);
        found.sort();
        assert_eq!(found, vec![1, 3]);

        let all = store.status.read_all().await?;
        let uuids: Vec<Uuid> = all.iter().map(|status| status.uuid).collect();
        assert_eq!(store.status.read_many_by_uuid(&uuids).await?.len(), 3);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_key_lists_longer_than_the_bind_limit(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);
        let wanted: Vec<i32> = (1..=70_000).collect();

        let mut found = ids(&store.pool.read_many(&wanted).await?);
        found.sort();
        assert_eq!(found, vec![1, 2, 3, 4]);

        let page = PageQuery::default()
            .filter(Predicate::is_in("pool_id", wanted))
            .sorted_by("pool_id", SortOrder::Asc);
        assert_eq!(ids(&store.pool.paginate(&page).await?), vec![1, 2, 3, 4]);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_parent_finders(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);

        assert_eq!(ids(&store.pool.find_by_exchange(1).await?), vec![1, 2, 3]);
        let sushi = store
            .pool
            .find_by_address("0x397ff1542f962076d0bfe58ea045ffa2d347aca0")
            .await?
            .expect("sushi pool is in the fixture");
        assert_eq!(sushi.exchange_id, Some(2));

        assert_eq!(store.asset.find_by_symbol("USDC").await?.len(), 2);
        assert_eq!(store.asset.find_by_chain(2).await?.len(), 1);
        assert_eq!(store.exchange.find_by_chain(1).await?.len(), 2);

        let active = store.status.find_by_name("ACTIVE").await?;
        assert_eq!(active.map(|status| status.status_id), Some(1));
        assert!(store.chain.find_by_name("Solana").await?.is_none());
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_repositories_run_inside_a_caller_transaction(pool: PgPool) -> Result<(), DalError> {
        let shared = SharedConnection::new(pool.begin().await?);
        let statuses: Repository<Status, _> =
            Repository::with_timeout(shared.clone(), Duration::from_secs(30));
        let paused = Status {
            name: "PAUSED".to_string(),
            ..Status::default()
        };

        let inserted = statuses.create(&paused).await?;
        assert!(statuses.read(&inserted.key).await?.is_some());

        drop(statuses);
        let tx = shared.into_inner().expect("every clone was dropped");
        tx.rollback().await?;

        let store = create_test_store(pool);
        assert!(store.status.read(&inserted.key).await?.is_none());
        assert_eq!(store.status.count().await?, 3);
        Ok(())
    }

    // ============================================================
    // Pagination
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_paginate_window(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);

        let page = PageQuery::window(1, 3).sorted_by("pool_id", SortOrder::Asc);
        assert_eq!(ids(&store.pool.paginate(&page).await?), vec![2, 3]);

        // a zero bound means no window at all
        let page = PageQuery::window(0, 3).sorted_by("pool_id", SortOrder::Asc);
        assert_eq!(ids(&store.pool.paginate(&page).await?), vec![1, 2, 3, 4]);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_paginate_filters(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);

        let page = PageQuery::default()
            .filter(Predicate::eq("exchange_id", 1_i32))
            .filter(Predicate::gt("fee_tier", 1000_i32))
            .sorted_by("fee_tier", SortOrder::Desc);
        assert_eq!(ids(&store.pool.paginate(&page).await?), vec![3, 2]);

        let page = PageQuery::default()
            .filter(Predicate::eq("status_id", 2_i32))
            .filter(Predicate::eq("fee_tier", 500_i32))
            .joined_by(Joiner::Or)
            .sorted_by("pool_id", SortOrder::Asc);
        assert_eq!(ids(&store.pool.paginate(&page).await?), vec![1, 3, 4]);

        let page = PageQuery::default().filter(Predicate::eq("pool_id; --", 1_i32));
        assert!(matches!(
            store.pool.paginate(&page).await,
            Err(DalError::UnknownColumn { .. })
        ));
        Ok(())
    }

    // ============================================================
    // Mutations
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_create_then_read_round_trip(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);
        let new_pool = Pool {
            name: "USDT/WETH 0.05%".to_string(),
            pool_address: Some("0x11b815efb8f581194ae79006d24e0d814b7697f6".to_string()),
            exchange_id: Some(1),
            chain_id: Some(1),
            fee_tier: Some(500),
            status_id: Some(3),
            audit: Audit::by("loader"),
            ..Pool::default()
        };

        let inserted = store.pool.create(&new_pool).await?;
        assert_eq!(inserted.key, 5);
        assert!(!inserted.uuid.is_nil());

        let stored = store
            .pool
            .read(&inserted.key)
            .await?
            .expect("row was just inserted");
        assert_eq!(stored.uuid, inserted.uuid);
        assert_eq!(stored.name, new_pool.name);
        assert_eq!(stored.pool_address, new_pool.pool_address);
        assert_eq!(stored.audit.created_by.as_deref(), Some("loader"));
        assert_eq!(stored.audit.updated_by.as_deref(), Some("loader"));
        assert!(stored.audit.created_at.is_some());
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_create_without_actor_records_system(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);
        let status = Status {
            name: "ARCHIVED".to_string(),
            ..Status::default()
        };

        let inserted = store.status.create(&status).await?;
        let stored = store.status.read(&inserted.key).await?.expect("inserted");

        assert_eq!(stored.audit.created_by.as_deref(), Some("SYSTEM"));
        assert_eq!(stored.audit.updated_by.as_deref(), Some("SYSTEM"));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_failed_insert_is_an_error(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);
        let duplicate = Status {
            name: "ACTIVE".to_string(),
            ..Status::default()
        };

        let result = store.status.create(&duplicate).await;

        assert!(matches!(result, Err(DalError::Database(_))));
        assert_eq!(store.status.count().await?, 3);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_update_overwrites_and_stamps(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);
        let mut pool_row = store.pool.read(&1).await?.expect("pool 1 is in the fixture");
        let before = pool_row.audit.updated_at;

        pool_row.fee_tier = Some(100);
        pool_row.description = Some("fee tier lowered".to_string());
        pool_row.audit.updated_by = Some("rebalancer".to_string());
        store.pool.update(&pool_row).await?;

        let stored = store.pool.read(&1).await?.expect("still there");
        assert_eq!(stored.fee_tier, Some(100));
        assert_eq!(stored.description.as_deref(), Some("fee tier lowered"));
        assert_eq!(stored.audit.updated_by.as_deref(), Some("rebalancer"));
        assert_eq!(stored.audit.created_by.as_deref(), Some("SYSTEM"));
        assert!(stored.audit.updated_at >= before);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_update_without_key_is_rejected(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);
        let unsaved = Pool {
            name: "never stored".to_string(),
            ..Pool::default()
        };

        let result = store.pool.update(&unsaved).await;

        assert!(matches!(result, Err(DalError::MissingKey { table: "pools" })));
        assert_eq!(store.pool.count().await?, 4);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_delete_is_idempotent(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);

        store.pool.delete(&4).await?;
        assert!(store.pool.read(&4).await?.is_none());
        assert_eq!(store.pool.count().await?, 3);

        store.pool.delete(&4).await?;
        Ok(())
    }

    // ============================================================
    // Bulk load
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_create_many_reports_copied_rows(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);
        let assets: Vec<Asset> = ["DAI", "USDT", "WBTC"]
            .into_iter()
            .map(|symbol| Asset {
                name: format!("{} token", symbol),
                description: Some("bulk\tloaded\nfrom list".to_string()),
                symbol: Some(symbol.to_string()),
                decimals: Some(18),
                chain_id: Some(1),
                ..Asset::default()
            })
            .collect();

        assert_eq!(store.asset.create_many(&assets).await?, 3);
        assert_eq!(store.asset.count().await?, 6);

        let dai = store.asset.find_by_symbol("DAI").await?;
        assert_eq!(dai.len(), 1);
        assert!(!dai[0].uuid.is_nil());
        assert_eq!(dai[0].description.as_deref(), Some("bulk\tloaded\nfrom list"));
        assert_eq!(dai[0].audit.created_by.as_deref(), Some("SYSTEM"));
        assert!(dai[0].audit.created_at.is_some());

        assert_eq!(store.asset.create_many(&[]).await?, 0);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_create_many_surfaces_copy_errors(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);
        let statuses = vec![
            Status {
                name: "FROZEN".to_string(),
                ..Status::default()
            },
            Status {
                name: "ACTIVE".to_string(),
                ..Status::default()
            },
        ];

        assert!(matches!(
            store.status.create_many(&statuses).await,
            Err(DalError::Database(_))
        ));
        assert_eq!(store.status.count().await?, 3);
        Ok(())
    }

    // ============================================================
    // Validity window
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("reference")))]
    async fn test_validity_longer_than(pool: PgPool) -> Result<(), DalError> {
        let store = create_test_store(pool);

        let long_lived = store.exchange.find_validity_longer_than(30).await?;
        let names: Vec<&str> = long_lived.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Sushiswap"]);

        assert_eq!(store.exchange.find_validity_longer_than(10).await?.len(), 2);
        Ok(())
    }
}
