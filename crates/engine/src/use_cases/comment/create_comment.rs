//! Create comment use case.
//!
//! Fans one logical comment out into its two embedded twins. The Room-side
//! twin is written first. If that write fails nothing is stored; if the
//! User-side write fails afterwards the room keeps a comment without a twin,
//! which is reported as [`CommentError::PartialWrite`] and never retried here.

use std::sync::Arc;

use jotunwiki_domain::{CommentDraft, HintCategory, RoomHint, RoomId, UserEmail};

use crate::infrastructure::ports::{ClockPort, RoomRepo, UserRepo};

use super::error::CommentError;

/// Raw comment input as received at the boundary.
#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub user_email: UserEmail,
    pub room_id: RoomId,
    pub text: String,
    pub category: String,
}

pub struct CreateComment {
    room_repo: Arc<dyn RoomRepo>,
    user_repo: Arc<dyn UserRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CreateComment {
    pub fn new(
        room_repo: Arc<dyn RoomRepo>,
        user_repo: Arc<dyn UserRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            room_repo,
            user_repo,
            clock,
        }
    }

    /// Returns the Room-side comment on full success.
    pub async fn execute(&self, input: CreateCommentInput) -> Result<RoomHint, CommentError> {
        let category: HintCategory = input
            .category
            .parse()
            .map_err(|_| CommentError::InvalidCategory(input.category.clone()))?;

        let user = self
            .user_repo
            .get(&input.user_email)
            .await?
            .ok_or_else(|| CommentError::UserNotFound(input.user_email.clone()))?;
        let room = self
            .room_repo
            .get(input.room_id)
            .await?
            .ok_or(CommentError::RoomNotFound(input.room_id))?;

        // One date for both twins.
        let draft = CommentDraft::new(self.clock.now().date_naive(), input.text, category);

        let room_hint = draft.room_side(&user);
        self.room_repo
            .append_hint(room.room_id, &room_hint)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CommentError::RoomNotFound(room.room_id)
                } else {
                    CommentError::Repo(e)
                }
            })?;

        let user_hint = draft.user_side(&room);
        if let Err(source) = self.user_repo.append_hint(&user.email, &user_hint).await {
            tracing::error!(
                room_id = %room.room_id,
                user_email = %user.email,
                category = %category,
                creation_date = %draft.creation_date,
                error = %source,
                "Comment stored on room without its user twin"
            );
            return Err(CommentError::PartialWrite {
                room_id: room.room_id,
                user_email: user.email,
                category,
                source,
            });
        }

        tracing::info!(
            room_id = %room.room_id,
            user_email = %user.email,
            category = %category,
            "Comment created"
        );
        Ok(room_hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockRoomRepo, MockUserRepo, RepoError};
    use chrono::{NaiveDate, TimeZone, Utc};
    use jotunwiki_domain::{DungeonId, Room, User};

    fn clock() -> Arc<dyn ClockPort> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 0)
                .single()
                .expect("valid timestamp"),
        ))
    }

    fn author() -> User {
        let mut user = User::new("a@b.com", "astrid", "2024-01-15");
        user.country = Some("NO".to_string());
        user
    }

    fn target() -> Room {
        Room::new(RoomId::new(1), "Frozen Hall", DungeonId::new(10), "Jotun's Lair")
    }

    fn input(category: &str) -> CreateCommentInput {
        CreateCommentInput {
            user_email: UserEmail::from("a@b.com"),
            room_id: RoomId::new(1),
            text: "careful".to_string(),
            category: category.to_string(),
        }
    }

    fn found_user() -> MockUserRepo {
        let mut user_repo = MockUserRepo::new();
        user_repo
            .expect_get()
            .withf(|email| email.as_str() == "a@b.com")
            .returning(|_| Ok(Some(author())));
        user_repo
    }

    fn found_room() -> MockRoomRepo {
        let mut room_repo = MockRoomRepo::new();
        room_repo
            .expect_get()
            .withf(|id| *id == RoomId::new(1))
            .returning(|_| Ok(Some(target())));
        room_repo
    }

    #[tokio::test]
    async fn when_category_invalid_no_repo_is_touched() {
        // Mocks without expectations panic on any call.
        let use_case = CreateComment::new(
            Arc::new(MockRoomRepo::new()),
            Arc::new(MockUserRepo::new()),
            clock(),
        );

        for bad in ["Rumor", "bug", ""] {
            let result = use_case.execute(input(bad)).await;
            assert!(matches!(result, Err(CommentError::InvalidCategory(c)) if c == bad));
        }
    }

    #[tokio::test]
    async fn when_user_missing_returns_user_not_found() {
        let mut user_repo = MockUserRepo::new();
        user_repo.expect_get().returning(|_| Ok(None));

        let use_case = CreateComment::new(Arc::new(MockRoomRepo::new()), Arc::new(user_repo), clock());
        let result = use_case.execute(input("Bug")).await;

        assert!(matches!(result, Err(CommentError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn when_room_missing_nothing_is_written() {
        let mut room_repo = MockRoomRepo::new();
        room_repo.expect_get().returning(|_| Ok(None));
        room_repo.expect_append_hint().never();
        let mut user_repo = found_user();
        user_repo.expect_append_hint().never();

        let use_case = CreateComment::new(Arc::new(room_repo), Arc::new(user_repo), clock());
        let result = use_case.execute(input("Bug")).await;

        assert!(matches!(result, Err(CommentError::RoomNotFound(id)) if id == RoomId::new(1)));
    }

    #[tokio::test]
    async fn when_valid_both_twins_share_date_text_and_category() {
        let mut room_repo = found_room();
        room_repo
            .expect_append_hint()
            .times(1)
            .withf(|id, hint| {
                *id == RoomId::new(1)
                    && hint.publish_by.email.as_str() == "a@b.com"
                    && hint.publish_by.creation_date == "2024-01-15"
                    && hint.publish_by.country.as_deref() == Some("NO")
            })
            .returning(|_, _| Ok(()));

        let mut user_repo = found_user();
        user_repo
            .expect_append_hint()
            .times(1)
            .withf(|email, hint| {
                email.as_str() == "a@b.com"
                    && hint.creation_date == NaiveDate::from_ymd_opt(2026, 10, 18)
                    && hint.text == "careful"
                    && hint.category == HintCategory::Bug
                    && hint.references_room.room_name == "Frozen Hall"
                    && hint.references_room.dungeon_id == DungeonId::new(10)
            })
            .returning(|_, _| Ok(()));

        let use_case = CreateComment::new(Arc::new(room_repo), Arc::new(user_repo), clock());
        let hint = use_case.execute(input("Bug")).await.expect("created");

        assert_eq!(hint.creation_date, NaiveDate::from_ymd_opt(2026, 10, 18));
        assert_eq!(hint.text, "careful");
        assert_eq!(hint.category, HintCategory::Bug);
    }

    #[tokio::test]
    async fn when_room_write_fails_user_is_not_written() {
        let mut room_repo = found_room();
        room_repo
            .expect_append_hint()
            .returning(|_, _| Err(RepoError::database("append_room_hint", "disk full")));
        let mut user_repo = found_user();
        user_repo.expect_append_hint().never();

        let use_case = CreateComment::new(Arc::new(room_repo), Arc::new(user_repo), clock());
        let result = use_case.execute(input("Lore")).await;

        assert!(matches!(result, Err(CommentError::Repo(RepoError::Database { .. }))));
    }

    #[tokio::test]
    async fn when_user_write_fails_reports_partial_write() {
        let mut room_repo = found_room();
        room_repo.expect_append_hint().times(1).returning(|_, _| Ok(()));
        let mut user_repo = found_user();
        user_repo
            .expect_append_hint()
            .returning(|_, _| Err(RepoError::database("append_user_hint", "locked")));

        let use_case = CreateComment::new(Arc::new(room_repo), Arc::new(user_repo), clock());
        let result = use_case.execute(input("Hint")).await;

        match result {
            Err(CommentError::PartialWrite {
                room_id,
                user_email,
                category,
                ..
            }) => {
                assert_eq!(room_id, RoomId::new(1));
                assert_eq!(user_email.as_str(), "a@b.com");
                assert_eq!(category, HintCategory::Hint);
            }
            other => panic!("expected partial write, got {other:?}"),
        }
    }
}
