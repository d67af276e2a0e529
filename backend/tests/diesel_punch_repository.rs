//! Integration tests for the Diesel punch and user repositories against
//! embedded PostgreSQL.
//!
//! Each test starts its own cluster and database, so tests never share rows.
//! Set `SKIP_TEST_CLUSTER=1` where a cluster cannot be started.

use chrono::{DateTime, TimeDelta, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use punchclock::domain::ports::{PunchRepository, UserPersistenceError, UserRepository};
use punchclock::domain::{EmailAddress, Punch, User, UserId, UserName};
use punchclock::outbound::persistence::{
    DbPool, DieselPunchRepository, DieselUserRepository, PoolConfig,
};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, migrated_database};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    punches: DieselPunchRepository,
    users: DieselUserRepository,
}

impl TestContext {
    fn account(&self, email: &str) -> UserId {
        let id = UserId::random();
        let user = User::new(
            id,
            UserName::new("Ana").expect("valid name"),
            EmailAddress::new(email).expect("valid email"),
        );
        self.runtime
            .block_on(self.users.create(&user, "$argon2id$fixture"))
            .expect("create user");
        id
    }

    fn punch(&self, owner: &UserId, raw: &str) -> Punch {
        self.runtime
            .block_on(self.punches.insert(owner, at(raw)))
            .expect("insert punch")
    }

    fn day(&self, owner: &UserId, start: &str) -> Vec<Punch> {
        let start = at(start);
        self.runtime
            .block_on(
                self.punches
                    .list_in_window(owner, start, start + TimeDelta::hours(24)),
            )
            .expect("list punches")
    }
}

fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 fixture")
        .with_timezone(&Utc)
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = migrated_database(&cluster, &runtime)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        punches: DieselPunchRepository::new(pool.clone()),
        users: DieselUserRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn window_is_half_open(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: window_is_half_open skipped");
        return;
    };
    let owner = ctx.account("ana@example.com");
    ctx.punch(&owner, "2024-03-09T23:59:59.999999Z");
    let first = ctx.punch(&owner, "2024-03-10T00:00:00Z");
    let last = ctx.punch(&owner, "2024-03-10T23:59:59.999999Z");
    ctx.punch(&owner, "2024-03-11T00:00:00Z");

    assert_eq!(ctx.day(&owner, "2024-03-10T00:00:00Z"), vec![first, last]);
}

#[rstest]
fn equal_instants_are_ordered_by_id(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: equal_instants_are_ordered_by_id skipped");
        return;
    };
    let owner = ctx.account("ana@example.com");
    let late = ctx.punch(&owner, "2024-03-10T12:00:00Z");
    let first_tie = ctx.punch(&owner, "2024-03-10T08:00:00Z");
    let second_tie = ctx.punch(&owner, "2024-03-10T08:00:00Z");

    let listed = ctx.day(&owner, "2024-03-10T00:00:00Z");

    assert!(first_tie.id() < second_tie.id());
    assert_eq!(listed, vec![first_tie, second_tie, late]);
}

#[rstest]
fn foreign_punches_are_invisible_to_find_update_and_delete(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!(
            "SKIP-TEST-CLUSTER: foreign_punches_are_invisible_to_find_update_and_delete skipped"
        );
        return;
    };
    let owner = ctx.account("ana@example.com");
    let stranger = ctx.account("bia@example.com");
    let punch = ctx.punch(&owner, "2024-03-10T08:00:00Z");

    let found = ctx
        .runtime
        .block_on(ctx.punches.find(&stranger, punch.id()))
        .expect("find");
    let updated = ctx
        .runtime
        .block_on(
            ctx.punches
                .update_timestamp(&stranger, punch.id(), at("2024-03-10T09:00:00Z")),
        )
        .expect("update");
    let deleted = ctx
        .runtime
        .block_on(ctx.punches.delete(&stranger, punch.id()))
        .expect("delete");

    assert!(found.is_none());
    assert!(updated.is_none());
    assert!(!deleted);
    assert!(ctx.day(&stranger, "2024-03-10T00:00:00Z").is_empty());
    assert_eq!(ctx.day(&owner, "2024-03-10T00:00:00Z"), vec![punch]);
}

#[rstest]
fn owner_can_find_move_and_delete_a_punch(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: owner_can_find_move_and_delete_a_punch skipped");
        return;
    };
    let owner = ctx.account("ana@example.com");
    let punch = ctx.punch(&owner, "2024-03-10T08:00:00Z");

    let found = ctx
        .runtime
        .block_on(ctx.punches.find(&owner, punch.id()))
        .expect("find");
    assert_eq!(found.as_ref(), Some(&punch));

    let moved = ctx
        .runtime
        .block_on(
            ctx.punches
                .update_timestamp(&owner, punch.id(), at("2024-03-10T08:30:00Z")),
        )
        .expect("update")
        .expect("owned punch");
    assert_eq!(moved.id(), punch.id());
    assert_eq!(moved.timestamp(), at("2024-03-10T08:30:00Z"));

    let deleted = ctx
        .runtime
        .block_on(ctx.punches.delete(&owner, punch.id()))
        .expect("delete");
    assert!(deleted);
    assert!(ctx.day(&owner, "2024-03-10T00:00:00Z").is_empty());
}

#[rstest]
fn exists_at_honours_owner_and_exclusion(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: exists_at_honours_owner_and_exclusion skipped");
        return;
    };
    let owner = ctx.account("ana@example.com");
    let stranger = ctx.account("bia@example.com");
    let instant = at("2024-03-10T08:00:00Z");
    let punch = ctx.punch(&owner, "2024-03-10T08:00:00Z");

    let exists = |who: &UserId, excluding| {
        ctx.runtime
            .block_on(ctx.punches.exists_at(who, instant, excluding))
            .expect("exists_at")
    };

    assert!(exists(&owner, None));
    assert!(!exists(&owner, Some(punch.id())));
    assert!(!exists(&stranger, None));

    let twin = ctx.punch(&owner, "2024-03-10T08:00:00Z");
    assert!(exists(&owner, Some(punch.id())));
    assert!(exists(&owner, Some(twin.id())));
}

#[rstest]
fn microsecond_instants_survive_storage(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: microsecond_instants_survive_storage skipped");
        return;
    };
    let owner = ctx.account("ana@example.com");
    let punch = ctx.punch(&owner, "2024-03-10T08:00:00.123456Z");

    let listed = ctx.day(&owner, "2024-03-10T00:00:00Z");

    assert_eq!(listed, vec![punch]);
}

#[rstest]
fn duplicate_email_is_reported(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_email_is_reported skipped");
        return;
    };
    ctx.account("ana@example.com");
    let again = User::new(
        UserId::random(),
        UserName::new("Other").expect("valid name"),
        EmailAddress::new("ana@example.com").expect("valid email"),
    );

    let result = ctx.runtime.block_on(ctx.users.create(&again, "hash"));

    assert!(matches!(
        result,
        Err(UserPersistenceError::DuplicateEmail { .. })
    ));
}

#[rstest]
fn credentials_are_found_by_email(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: credentials_are_found_by_email skipped");
        return;
    };
    let id = ctx.account("ana@example.com");
    let email = EmailAddress::new("ana@example.com").expect("valid email");
    let unknown = EmailAddress::new("nobody@example.com").expect("valid email");

    let stored = ctx
        .runtime
        .block_on(ctx.users.find_credentials_by_email(&email))
        .expect("lookup")
        .expect("stored credentials");
    let missing = ctx
        .runtime
        .block_on(ctx.users.find_credentials_by_email(&unknown))
        .expect("lookup");

    assert_eq!(stored.user_id, id);
    assert_eq!(stored.password_hash, "$argon2id$fixture");
    assert!(missing.is_none());
}
