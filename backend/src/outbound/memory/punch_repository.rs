//! In-memory `PunchRepository`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{PunchRepository, PunchRepositoryError};
use crate::domain::{Punch, PunchId, UserId, sort_punches};

#[derive(Debug, Default)]
struct Ledger {
    last_id: i64,
    punches: Vec<Punch>,
}

/// Punch store held in process memory. Ids start at 1 and never repeat.
#[derive(Debug, Default)]
pub struct InMemoryPunchRepository {
    ledger: Mutex<Ledger>,
}

impl InMemoryPunchRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Ledger>, PunchRepositoryError> {
        self.ledger
            .lock()
            .map_err(|_| PunchRepositoryError::connection("punch store lock poisoned"))
    }
}

fn is_owned(punch: &Punch, owner: &UserId, id: PunchId) -> bool {
    punch.id() == id && punch.owner() == owner
}

#[async_trait]
impl PunchRepository for InMemoryPunchRepository {
    async fn insert(
        &self,
        owner: &UserId,
        timestamp: DateTime<Utc>,
    ) -> Result<Punch, PunchRepositoryError> {
        let mut ledger = self.lock()?;
        let next = ledger
            .last_id
            .checked_add(1)
            .ok_or_else(|| PunchRepositoryError::query("punch id space exhausted"))?;
        let id = PunchId::new(next).map_err(|err| PunchRepositoryError::query(err.to_string()))?;
        let punch = Punch::new(id, *owner, timestamp);
        ledger.last_id = next;
        ledger.punches.push(punch.clone());
        Ok(punch)
    }

    async fn list_in_window(
        &self,
        owner: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Punch>, PunchRepositoryError> {
        let ledger = self.lock()?;
        let mut found: Vec<Punch> = ledger
            .punches
            .iter()
            .filter(|punch| punch.owner() == owner)
            .filter(|punch| punch.timestamp() >= start && punch.timestamp() < end)
            .cloned()
            .collect();
        sort_punches(&mut found);
        Ok(found)
    }

    async fn find(
        &self,
        owner: &UserId,
        id: PunchId,
    ) -> Result<Option<Punch>, PunchRepositoryError> {
        let ledger = self.lock()?;
        Ok(ledger
            .punches
            .iter()
            .find(|punch| is_owned(punch, owner, id))
            .cloned())
    }

    async fn exists_at(
        &self,
        owner: &UserId,
        timestamp: DateTime<Utc>,
        excluding: Option<PunchId>,
    ) -> Result<bool, PunchRepositoryError> {
        let ledger = self.lock()?;
        Ok(ledger.punches.iter().any(|punch| {
            punch.owner() == owner
                && punch.timestamp() == timestamp
                && Some(punch.id()) != excluding
        }))
    }

    async fn update_timestamp(
        &self,
        owner: &UserId,
        id: PunchId,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<Punch>, PunchRepositoryError> {
        let mut ledger = self.lock()?;
        let Some(slot) = ledger
            .punches
            .iter_mut()
            .find(|punch| is_owned(punch, owner, id))
        else {
            return Ok(None);
        };
        *slot = Punch::new(id, *owner, timestamp);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, owner: &UserId, id: PunchId) -> Result<bool, PunchRepositoryError> {
        let mut ledger = self.lock()?;
        let before = ledger.punches.len();
        ledger.punches.retain(|punch| !is_owned(punch, owner, id));
        Ok(ledger.punches.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rstest::{fixture, rstest};

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .expect("fixture")
            .with_timezone(&Utc)
    }

    #[fixture]
    fn repo() -> InMemoryPunchRepository {
        InMemoryPunchRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn ids_increase_with_insertion(repo: InMemoryPunchRepository) {
        let owner = UserId::random();
        let first = repo.insert(&owner, at("2024-03-10T12:00:00Z")).await.expect("insert");
        let second = repo.insert(&owner, at("2024-03-10T08:00:00Z")).await.expect("insert");

        assert_eq!(first.id().get(), 1);
        assert_eq!(second.id().get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn window_is_half_open_and_owner_scoped(repo: InMemoryPunchRepository) {
        let owner = UserId::random();
        let stranger = UserId::random();
        let start = at("2024-03-10T00:00:00Z");
        let end = start + TimeDelta::hours(24);
        for instant in [start, end - TimeDelta::microseconds(1), end] {
            repo.insert(&owner, instant).await.expect("insert");
        }
        repo.insert(&stranger, start).await.expect("insert");

        let listed = repo.list_in_window(&owner, start, end).await.expect("list");

        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|punch| punch.owner() == &owner));
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_punches_cannot_be_touched(repo: InMemoryPunchRepository) {
        let owner = UserId::random();
        let stranger = UserId::random();
        let punch = repo.insert(&owner, at("2024-03-10T08:00:00Z")).await.expect("insert");

        let updated = repo
            .update_timestamp(&stranger, punch.id(), at("2024-03-10T09:00:00Z"))
            .await
            .expect("update");
        let found = repo.find(&stranger, punch.id()).await.expect("find");
        let deleted = repo.delete(&stranger, punch.id()).await.expect("delete");

        assert!(updated.is_none());
        assert!(found.is_none());
        assert!(!deleted);
        let listed = repo
            .list_in_window(&owner, at("2024-03-10T00:00:00Z"), at("2024-03-11T00:00:00Z"))
            .await
            .expect("list");
        assert_eq!(listed, vec![punch]);
    }

    #[rstest]
    #[tokio::test]
    async fn exists_at_can_skip_the_punch_being_moved(repo: InMemoryPunchRepository) {
        let owner = UserId::random();
        let instant = at("2024-03-10T08:00:00Z");
        let punch = repo.insert(&owner, instant).await.expect("insert");

        assert!(repo.exists_at(&owner, instant, None).await.expect("exists"));
        assert!(!repo
            .exists_at(&owner, instant, Some(punch.id()))
            .await
            .expect("exists"));
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_ids_are_not_reused(repo: InMemoryPunchRepository) {
        let owner = UserId::random();
        let first = repo.insert(&owner, at("2024-03-10T08:00:00Z")).await.expect("insert");
        assert!(repo.delete(&owner, first.id()).await.expect("delete"));

        let second = repo.insert(&owner, at("2024-03-10T09:00:00Z")).await.expect("insert");
        assert_eq!(second.id().get(), 2);
    }
}
