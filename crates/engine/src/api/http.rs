//! HTTP routes.
//!
//! Thin handlers: parse keys and bodies, call one use case, shape the JSON.
//! Every error body is `{"message": ...}`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::str::FromStr;
use std::sync::Arc;

use jotunwiki_domain::{
    DungeonDetail, DungeonId, DungeonSummary, Loot, LootId, Monster, MonsterId, RoomHint, RoomId,
    User, UserEmail,
};
use jotunwiki_shared::{CreateCommentRequest, MessageResponse, RoomDetailResponse, RoomListItem};

use crate::app::App;
use crate::use_cases::{
    CommentError, CreateCommentInput, DungeonError, LookupError, RemovalError,
};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/dungeon", get(list_dungeons))
        .route("/dungeon/{dungeon_id}", get(get_dungeon))
        .route("/room", get(list_rooms))
        .route("/room/comment", post(create_comment).get(comment_is_not_a_room))
        .route("/room/{room_id}", get(get_room))
        .route("/loot", get(list_loot))
        .route("/loot/{loot_id}", get(get_loot).delete(delete_loot))
        .route("/monster", get(list_monsters))
        .route("/monster/{monster_id}", get(get_monster).delete(delete_monster))
        .route("/user", get(list_users))
        .route("/user/{email}", get(get_user))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

async fn root() -> &'static str {
    "Jotun's Lair Wiki API"
}

async fn health() -> &'static str {
    "OK"
}

/// Keys that do not parse can never match a document.
fn parse_key<K: FromStr>(raw: &str, entity_type: &str) -> Result<K, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("{entity_type} not found")))
}

// =============================================================================
// Dungeons
// =============================================================================

async fn list_dungeons(State(app): State<Arc<App>>) -> Result<Json<Vec<DungeonSummary>>, ApiError> {
    let dungeons = app.use_cases.dungeons.list().await?;
    Ok(Json(dungeons))
}

async fn get_dungeon(
    State(app): State<Arc<App>>,
    Path(dungeon_id): Path<String>,
) -> Result<Json<DungeonDetail>, ApiError> {
    let dungeon_id: DungeonId = parse_key(&dungeon_id, "Dungeon")?;
    let dungeon = app.use_cases.dungeons.get(dungeon_id).await?;
    Ok(Json(dungeon))
}

// =============================================================================
// Rooms and comments
// =============================================================================

async fn list_rooms(State(app): State<Arc<App>>) -> Result<Json<Vec<RoomListItem>>, ApiError> {
    let headers = app.use_cases.lookup.list_rooms().await?;
    Ok(Json(headers.into_iter().map(RoomListItem::from).collect()))
}

async fn get_room(
    State(app): State<Arc<App>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailResponse>, ApiError> {
    let room_id: RoomId = parse_key(&room_id, "Room")?;
    let room = app.use_cases.lookup.get_room(room_id).await?;
    Ok(Json(RoomDetailResponse::from(room)))
}

/// `GET /room/comment` reads as a room lookup with a non-numeric key.
async fn comment_is_not_a_room() -> ApiError {
    ApiError::NotFound("Room not found".to_string())
}

async fn create_comment(
    State(app): State<Arc<App>>,
    body: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RoomHint>), ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let hint = app
        .use_cases
        .create_comment
        .execute(CreateCommentInput {
            user_email: UserEmail::new(request.user_email),
            room_id: RoomId::new(request.room_id),
            text: request.text,
            category: request.category,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(hint)))
}

// =============================================================================
// Loot and monsters
// =============================================================================

async fn list_loot(State(app): State<Arc<App>>) -> Result<Json<Vec<Loot>>, ApiError> {
    Ok(Json(app.use_cases.lookup.list_loot().await?))
}

async fn get_loot(
    State(app): State<Arc<App>>,
    Path(loot_id): Path<String>,
) -> Result<Json<Loot>, ApiError> {
    let loot_id: LootId = parse_key(&loot_id, "Loot")?;
    Ok(Json(app.use_cases.lookup.get_loot(loot_id).await?))
}

async fn delete_loot(
    State(app): State<Arc<App>>,
    Path(loot_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let loot_id: LootId = parse_key(&loot_id, "Loot")?;
    app.use_cases.remove.delete_loot(loot_id).await?;
    Ok(Json(MessageResponse::new("Loot deleted successfully")))
}

async fn list_monsters(State(app): State<Arc<App>>) -> Result<Json<Vec<Monster>>, ApiError> {
    Ok(Json(app.use_cases.lookup.list_monsters().await?))
}

async fn get_monster(
    State(app): State<Arc<App>>,
    Path(monster_id): Path<String>,
) -> Result<Json<Monster>, ApiError> {
    let monster_id: MonsterId = parse_key(&monster_id, "Monster")?;
    Ok(Json(app.use_cases.lookup.get_monster(monster_id).await?))
}

async fn delete_monster(
    State(app): State<Arc<App>>,
    Path(monster_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let monster_id: MonsterId = parse_key(&monster_id, "Monster")?;
    app.use_cases.remove.delete_monster(monster_id).await?;
    Ok(Json(MessageResponse::new("Monster deleted successfully")))
}

// =============================================================================
// Users
// =============================================================================

async fn list_users(State(app): State<Arc<App>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(app.use_cases.lookup.list_users().await?))
}

async fn get_user(
    State(app): State<Arc<App>>,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = app.use_cases.lookup.get_user(&UserEmail::new(email)).await?;
    Ok(Json(user))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Store failure. Details are logged where the error is converted.
    Internal,
    /// The request partly succeeded and left embedded copies out of sync.
    Inconsistent(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Inconsistent(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(MessageResponse::new(message))).into_response()
    }
}

fn internal(error: &dyn std::error::Error) -> ApiError {
    tracing::error!(error = %error, "Request failed on store error");
    ApiError::Internal
}

impl From<CommentError> for ApiError {
    fn from(e: CommentError) -> Self {
        match e {
            CommentError::InvalidCategory(_) => ApiError::BadRequest(
                "Invalid category, expected one of Lore, Hint, Suggestion, Bug".to_string(),
            ),
            CommentError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            CommentError::RoomNotFound(_) => ApiError::NotFound("Room not found".to_string()),
            CommentError::PartialWrite { room_id, .. } => ApiError::Inconsistent(format!(
                "Comment was saved on room {room_id} but could not be saved on the user"
            )),
            CommentError::Repo(ref source) => internal(source),
        }
    }
}

impl From<RemovalError> for ApiError {
    fn from(e: RemovalError) -> Self {
        match e {
            RemovalError::LootNotFound(_) => ApiError::NotFound("Loot not found".to_string()),
            RemovalError::MonsterNotFound(_) => {
                ApiError::NotFound("Monster not found".to_string())
            }
            RemovalError::IncompleteCascade { canonical, .. } => ApiError::Inconsistent(format!(
                "{} deleted, but some rooms may still list it; cleanup is incomplete",
                canonical.entity_type()
            )),
            RemovalError::Repo(ref source) => internal(source),
        }
    }
}

impl From<DungeonError> for ApiError {
    fn from(e: DungeonError) -> Self {
        match e {
            DungeonError::NotFound(_) => ApiError::NotFound("Dungeon not found".to_string()),
            DungeonError::Repo(ref source) => internal(source),
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{entity_type} not found"))
            }
            LookupError::Repo(ref source) => internal(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::RepoError;
    use jotunwiki_domain::{CanonicalRef, HintCategory};

    #[test]
    fn store_errors_do_not_leak_details() {
        let api: ApiError = LookupError::Repo(RepoError::database("get_room", "secret path")).into();
        assert!(matches!(api, ApiError::Internal));

        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn inconsistencies_are_distinct_from_store_errors() {
        let partial: ApiError = CommentError::PartialWrite {
            room_id: RoomId::new(1),
            user_email: UserEmail::from("a@b.com"),
            category: HintCategory::Bug,
            source: RepoError::database("append_user_hint", "locked"),
        }
        .into();
        let incomplete: ApiError = RemovalError::IncompleteCascade {
            canonical: CanonicalRef::Loot(LootId::new(5)),
            failed_rooms: vec![RoomId::new(2)],
            detail: "1 room(s) not scrubbed".to_string(),
        }
        .into();

        assert!(matches!(partial, ApiError::Inconsistent(ref m) if m.contains("room 1")));
        assert!(matches!(incomplete, ApiError::Inconsistent(ref m) if m.starts_with("Loot")));
        assert_eq!(
            incomplete.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unparseable_keys_are_not_found() {
        let result: Result<RoomId, _> = parse_key("abc", "Room");
        assert!(matches!(result, Err(ApiError::NotFound(ref m)) if m == "Room not found"));

        let parsed: Result<RoomId, _> = parse_key("42", "Room");
        assert!(matches!(parsed, Ok(id) if id == RoomId::new(42)));
    }
}
